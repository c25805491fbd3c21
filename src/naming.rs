//! Canonical paths of the intermediate files.
//!
//! Every derived artifact is named after the artifact it was computed from,
//! followed by the producing stage and its parameters, so that a path
//! determines the whole parameter history that produced it.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::params::{DownsampleParams, MergeParams, Realignment};


fn derive(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

/// Hidden directory next to the BAM file: `dir/sample.bam` => `dir/.sample.bam.hx_`
pub fn intermediate_dir(bam_path: &Path) -> io::Result<PathBuf> {
    let bam_path = std::path::absolute(bam_path)?;
    let file_name = bam_path.file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("not a file path: \"{}\"", bam_path.display())))?;
    let mut dir_name = OsString::from(".");
    dir_name.push(file_name);
    dir_name.push(".hx_");
    let parent = bam_path.parent().unwrap_or(Path::new("/"));
    Ok(parent.join(dir_name))
}

pub fn instance(int_dir: &Path, mode: Realignment) -> PathBuf {
    int_dir.join(format!("{}.wif", mode.name()))
}

pub fn merged(wif: &Path, params: &MergeParams) -> PathBuf {
    let suffix = format!(".merged_e{}_m{}_t{}_n{}.wif",
        params.error_rate.digits(), params.max_error_rate.digits(), params.thr, params.neg_thr);
    derive(wif, &suffix)
}

pub fn shuffled(wif: &Path, seed: u64) -> PathBuf {
    derive(wif, &format!(".lines.shuf{seed}"))
}

pub fn sample(wif: &Path, params: &DownsampleParams) -> PathBuf {
    derive(wif, &format!(".sample_s{}_m{}", params.seed, params.max_coverage))
}

pub fn downsampled(wif: &Path, params: &DownsampleParams) -> PathBuf {
    derive(wif, &format!(".downs.s{}.m{}.wif", params.seed, params.max_coverage))
}

pub fn haplotypes(wif: &Path) -> PathBuf {
    derive(wif, ".hap")
}

pub fn blocks_dir(wif: &Path) -> PathBuf {
    derive(wif, ".info_")
}

pub fn blocks(wif: &Path) -> PathBuf {
    blocks_dir(wif).join("block_sites_")
}

pub fn phased_vcf(hap: &Path) -> PathBuf {
    derive(hap, ".vcf")
}

// side files

pub fn log(artifact: &Path) -> PathBuf {
    derive(artifact, ".log")
}

pub fn transcript(artifact: &Path) -> PathBuf {
    derive(artifact, ".transcript")
}

pub fn merge_graph(artifact: &Path) -> PathBuf {
    derive(artifact, ".graph")
}

/// Identity of the inputs an artifact was built from
pub fn stamp(artifact: &Path) -> PathBuf {
    derive(artifact, ".stamp")
}
