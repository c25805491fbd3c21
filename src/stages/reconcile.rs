use std::path::{Path, PathBuf};

use crate::artifact::ArtifactStore;
use crate::naming;
use crate::runner::{Stage, StageCommand, StageError};
use crate::tools::{Tools, SUBVCF_SCRIPT, WIFTOOLS_SCRIPT};

/// Block boundaries of the full-coverage instance `wif`.
pub fn find_blocks(tools: &Tools, store: &ArtifactStore, wif: &Path) -> Result<PathBuf, StageError> {

    store.get_or_create(Stage::Blocks, naming::blocks(wif), &[wif], |_| {
        StageCommand::new(Stage::Blocks, &tools.python, naming::log(&naming::blocks_dir(wif)))
            .arg(tools.script(WIFTOOLS_SCRIPT))
            .arg("-i")
            .arg(wif)
            .run()
    })
}

/// Annotates `vcf_path` with the haplotypes in `hap`. Blocks come from the
/// original instance `wif`, not from the merged and downsampled one `hap`
/// was computed on.
pub fn phase_vcf(tools: &Tools, store: &ArtifactStore, hap: &Path, wif: &Path, vcf_path: &Path) -> Result<PathBuf, StageError> {

    let blocks = find_blocks(tools, store, wif)?;

    store.get_or_create(Stage::Annotation, naming::phased_vcf(hap), &[hap, blocks.as_path(), vcf_path], |phased_vcf| {
        StageCommand::new(Stage::Annotation, &tools.python, phased_vcf)
            .stderr(naming::log(phased_vcf))
            .arg(tools.script(SUBVCF_SCRIPT))
            .arg("-p").arg(hap)
            .arg(&blocks)
            .arg(vcf_path)
            .run()
    })
}
