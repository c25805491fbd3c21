use std::path::{Path, PathBuf};

use crate::artifact::ArtifactStore;
use crate::naming;
use crate::runner::{Stage, StageCommand, StageError};
use crate::tools::Tools;

// fixed configuration of the core phasing algorithm
const ERROR_RATE: &str = "0.05";
const ALPHA: &str = "0.1";
const BALANCING: &str = "1000";
const READ_SELECTION: &str = "0";

/// Runs the HapCHAT core algorithm on `wif`, returning the haplotypes.
pub fn run_hapchat_core(tools: &Tools, store: &ArtifactStore, wif: &Path) -> Result<PathBuf, StageError> {

    store.get_or_create(Stage::Phasing, naming::haplotypes(wif), &[wif], |hap| {
        StageCommand::new(Stage::Phasing, &tools.hapchat_core, naming::log(hap))
            .arg("-i").arg(wif)
            .arg("-o").arg(hap)
            .arg("-A")
            .args(["-e", ERROR_RATE, "-a", ALPHA, "-b", BALANCING, "-r", READ_SELECTION])
            .run()
    })
}
