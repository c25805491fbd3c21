use std::path::{Path, PathBuf};

use crate::artifact::ArtifactStore;
use crate::naming;
use crate::params::MergeParams;
use crate::runner::{Stage, StageCommand, StageError};
use crate::tools::{Tools, MERGE_SCRIPT};

/// Collapses compatible overlapping reads of `wif` into longer virtual reads.
/// The merge graph is written next to the merged instance.
pub fn merge_reads(tools: &Tools, store: &ArtifactStore, wif: &Path, params: &MergeParams) -> Result<PathBuf, StageError> {

    let merged = naming::merged(wif, params);

    store.get_or_create(Stage::Merge, merged, &[wif], |merged| {
        StageCommand::new(Stage::Merge, &tools.python, naming::log(merged))
            .arg(tools.script(MERGE_SCRIPT))
            .arg("-e").arg(params.error_rate.to_string())
            .arg("-m").arg(params.max_error_rate.to_string())
            .arg("-t").arg(params.threshold().to_string())
            .arg("-n").arg(params.neg_threshold().to_string())
            .arg("-w").arg(wif)
            .arg("-o").arg(merged)
            .arg("-g").arg(naming::merge_graph(merged))
            .run()
    })
}
