use std::path::{Path, PathBuf};

use crate::artifact::ArtifactStore;
use crate::naming;
use crate::params::Realignment;
use crate::runner::{Stage, StageCommand, StageError};
use crate::tools::Tools;

/// Coverage bound requested from WhatsHap; high enough that no read is dropped
/// before the downsampling stage.
pub const EXTRACTION_MAX_COVERAGE: u32 = 1000;

pub fn realignment_mode(reference: Option<&Path>) -> Realignment {
    if reference.is_some() { Realignment::Realigned } else { Realignment::Raw }
}

/// Converts the reads of `bam_path` at the sites of `vcf_path` into a WIF instance.
pub fn read_bam(tools: &Tools, store: &ArtifactStore, vcf_path: &Path, bam_path: &Path, reference: Option<&Path>) -> Result<PathBuf, StageError> {

    store.create_dir(Stage::Extraction)?;

    let mode = realignment_mode(reference);
    let wif = naming::instance(store.dir(), mode);

    let mut inputs = vec![vcf_path, bam_path];
    inputs.extend(reference);

    store.get_or_create(Stage::Extraction, wif, &inputs, |wif| {
        let mut command = StageCommand::new(Stage::Extraction, &tools.whatshap, naming::transcript(wif))
            .stderr(naming::log(wif))
            .args(["phase", "-o", "/dev/null"]);
        if let Some(reference) = reference {
            command = command.arg("--reference").arg(reference);
        }
        command.arg("--output-wif").arg(wif)
            .arg("-H").arg(EXTRACTION_MAX_COVERAGE.to_string())
            .arg(vcf_path)
            .arg(bam_path)
            .run()
    })
}
