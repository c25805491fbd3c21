use std::path::{Path, PathBuf};

use crate::artifact::ArtifactStore;
use crate::params::Params;
use crate::runner::StageError;
use crate::stages::{downsample, extract, merge, phasing, reconcile};
use crate::tools::Tools;

// input:
//   - variants (vcf) and reads (bam)
//   - optional reference for realignment
// output:
//   - phased vcf in the intermediate directory of the bam

pub struct Pipeline<'a> {
    tools: &'a Tools,
    store: &'a ArtifactStore,
    params: &'a Params,
}

impl<'a> Pipeline<'a> {

    pub fn new(tools: &'a Tools, store: &'a ArtifactStore, params: &'a Params) -> Pipeline<'a> {
        Pipeline { tools, store, params }
    }

    /// Runs every stage in order; each one starts only after the previous
    /// one produced a verified artifact.
    pub fn run(&self, vcf_path: &Path, bam_path: &Path, reference: Option<&Path>) -> Result<PathBuf, StageError> {

        spdlog::info!("Extracting reads ({} mode)", extract::realignment_mode(reference).name());
        let wif = extract::read_bam(self.tools, self.store, vcf_path, bam_path, reference)?;

        let merge_params = &self.params.merge;
        spdlog::info!("Merging reads (error rate {}, max error rate {}, thresholds 10^{}/10^{})",
            merge_params.error_rate, merge_params.max_error_rate, merge_params.thr, merge_params.neg_thr);
        let merged_wif = merge::merge_reads(self.tools, self.store, &wif, merge_params)?;

        let downsample_params = &self.params.downsample;
        spdlog::info!("Downsampling to coverage {} (seed {})", downsample_params.max_coverage, downsample_params.seed);
        let downs_wif = downsample::downsample(self.tools, self.store, &merged_wif, downsample_params)?;

        spdlog::info!("Phasing");
        let hap = phasing::run_hapchat_core(self.tools, self.store, &downs_wif)?;

        spdlog::info!("Building phased VCF");
        reconcile::phase_vcf(self.tools, self.store, &hap, &wif, vcf_path)
    }
}
