use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use hapchat::cli;
use hapchat::utils;
use hapchat::vcf;
use hapchat::{ArtifactStore, Pipeline, Tools};


fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    let t_start = Instant::now();

    let opts = cli::Options::parse();
    utils::init_logger(opts.verbose)?;

    let tools = Tools::from_options(&opts)?;
    tools.check()?;

    let params = opts.params();
    let store = ArtifactStore::for_bam(&opts.bam, opts.force)?;
    spdlog::info!("Intermediate files in: {}", store.dir().display());

    let pipeline = Pipeline::new(&tools, &store, &params);
    let phased_vcf = pipeline.run(&opts.vcf, &opts.bam, opts.reference.as_deref())?;

    match vcf::summarize(&phased_vcf) {
        Ok(summary) => spdlog::info!("  {summary}"),
        Err(e) => spdlog::warn!("cannot summarize \"{}\": {e:#}", phased_vcf.display()),
    }

    let mut writer = utils::get_output_writer(opts.output_path())?;
    let nb_lines = utils::stream_lines(&phased_vcf, &mut writer)?;
    match opts.output_path() {
        Some(path) => spdlog::info!("{nb_lines} lines written to: {}", path.display()),
        None => spdlog::debug!("{nb_lines} lines written to standard output"),
    }

    spdlog::info!("Time: {:.2}s | MaxRSS: {:.2}GB", t_start.elapsed().as_secs_f64(), utils::get_maxrss());

    Ok(())
}
