use std::path::{Path, PathBuf};

use clap::Parser;

use crate::params::{DownsampleParams, Fraction, MergeParams, Params};

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "HapCHAT: Adaptive haplotype assembly for efficiently leveraging high coverage in long reads", long_about = None)]
pub struct Options {

    /// VCF file with variants to be phased
    #[arg(value_name = "VCF")]
    pub vcf: PathBuf,

    /// BAM file of sequencing reads
    #[arg(value_name = "BAM")]
    pub bam: PathBuf,

    /// Output VCF file with phase information [default: standard output]
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Reference file, for detecting alleles in realignment mode
    #[arg(short = 'r', long = "reference", value_name = "FASTA")]
    pub reference: Option<PathBuf>,

    /// Threshold exponent for the merging step (threshold = 10^THRESHOLD)
    #[arg(short = 't', long = "thr", value_name = "THRESHOLD", default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=18))]
    pub thr: u32,

    /// Negative threshold exponent for the merging step (threshold = 10^NEG_THRESHOLD)
    #[arg(short = 'n', long = "neg_thr", value_name = "NEG_THRESHOLD", default_value_t = 3, value_parser = clap::value_parser!(u32).range(0..=18))]
    pub neg_thr: u32,

    /// Probability that a site is wrong
    #[arg(short = 'e', long = "error_rate", value_name = "ERROR_RATE", default_value = "0.15")]
    pub error_rate: Fraction,

    /// Maximum error rate for a site
    #[arg(short = 'm', long = "max_err", value_name = "MAX_ERR", default_value = "0.25")]
    pub max_err: Fraction,

    /// Seed for pseudorandom downsampling
    #[arg(short = 's', long = "seed", value_name = "SEED", default_value_t = 1)]
    pub seed: u64,

    /// Downsample coverage to at most MAXCOV
    #[arg(short = 'H', long = "max_coverage", value_name = "MAXCOV", default_value_t = 15, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_coverage: u32,

    /// Installation directory containing software/ and scripts/ [default: executable directory]
    #[arg(long = "home", value_name = "PATH", env = "HAPCHAT_HOME")]
    pub home: Option<PathBuf>,

    /// WhatsHap executable [default: HOME/software/whatshap/venv/bin/whatshap]
    #[arg(long = "whatshap", value_name = "PATH")]
    pub whatshap: Option<PathBuf>,

    /// HapCHAT core phasing executable [default: HOME/software/hapchat/hapchat_core]
    #[arg(long = "hapchat-core", value_name = "PATH")]
    pub hapchat_core: Option<PathBuf>,

    /// Directory with the helper scripts [default: HOME/scripts]
    #[arg(long = "scripts-dir", value_name = "PATH")]
    pub scripts_dir: Option<PathBuf>,

    /// Python interpreter used for the helper scripts
    #[arg(long = "python", value_name = "CMD", default_value = "python3")]
    pub python: String,

    /// Bash interpreter used for the helper scripts
    #[arg(long = "bash", value_name = "CMD", default_value = "bash")]
    pub bash: String,

    /// Rebuild intermediate files even when cached ones are up to date
    #[arg(long = "force")]
    pub force: bool,

    /// Print debug messages
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Options {

    pub fn params(&self) -> Params {
        Params {
            merge: MergeParams {
                error_rate: self.error_rate,
                max_error_rate: self.max_err,
                thr: self.thr,
                neg_thr: self.neg_thr,
            },
            downsample: DownsampleParams {
                seed: self.seed,
                max_coverage: self.max_coverage,
            },
        }
    }

    /// `None` stands for standard output
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref().filter(|path| *path != Path::new("-"))
    }
}
