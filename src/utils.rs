use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::mem::MaybeUninit;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use spdlog::sink::{StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};


pub fn get_maxrss() -> f64 {
    let usage = unsafe {
        let mut usage = MaybeUninit::uninit();
        assert_eq!(libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()), 0);
        usage.assume_init()
    };
    usage.ru_maxrss as f64 / (1024.0 * 1024.0)
}


/// Logs go to standard error: standard output may carry the phased VCF.
pub fn init_logger(verbose: bool) -> Result<()> {
    let sink = StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .build()
        .context("cannot create log sink")?;
    let logger = Logger::builder()
        .sink(Arc::new(sink))
        .build()
        .context("cannot create logger")?;
    let level = if verbose { Level::Debug } else { Level::Info };
    logger.set_level_filter(LevelFilter::MoreSevereEqual(level));
    spdlog::set_default_logger(Arc::new(logger));
    Ok(())
}


fn is_gzipped(path: &Path) -> bool {
    matches!(path.extension(), Some(ext) if ext == "gz")
}

pub fn get_file_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open file: \"{}\"", path.display()))?;
    Ok(match is_gzipped(path) {
        true => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        false => Box::new(BufReader::new(file)),
    })
}

/// Truncates or creates `path`; gzip-compressed when it ends with `.gz`.
pub fn get_file_writer(path: &Path) -> Result<Box<dyn Write>> {
    let file = File::create(path)
        .with_context(|| format!("cannot create file: \"{}\"", path.display()))?;
    Ok(match is_gzipped(path) {
        true => Box::new(GzEncoder::new(BufWriter::new(file), Compression::default())),
        false => Box::new(BufWriter::new(file)),
    })
}

/// `None` stands for standard output
pub fn get_output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => get_file_writer(path),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}


/// Copies the bytes of `input` unchanged to `writer`, returning the number of
/// lines (a last line without newline counts too).
pub fn stream_lines(input: &Path, writer: &mut dyn Write) -> Result<usize> {
    let mut reader = get_file_reader(input)?;
    let mut buf = Vec::new();
    let mut nb_lines = 0;
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)
            .with_context(|| format!("cannot read file: \"{}\"", input.display()))?;
        if n == 0 {
            break
        }
        writer.write_all(&buf)?;
        nb_lines += 1;
    }
    writer.flush()?;
    Ok(nb_lines)
}
