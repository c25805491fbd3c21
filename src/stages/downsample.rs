use std::path::{Path, PathBuf};

use crate::artifact::ArtifactStore;
use crate::naming;
use crate::params::DownsampleParams;
use crate::runner::{Stage, StageCommand, StageError};
use crate::tools::{Tools, EXTRACT_SAMPLE_SCRIPT, SHUFFLE_SCRIPT, WIFTOOLS_SCRIPT};

/// Bounds the coverage of `wif` to `params.max_coverage`.
///
/// The reads are first shuffled with `params.seed`, then greedily selected in
/// shuffled order while no site exceeds the bound. The selected reads are
/// finally extracted from `wif` itself, so the shuffle only decides the order
/// in which reads are considered.
pub fn downsample(tools: &Tools, store: &ArtifactStore, wif: &Path, params: &DownsampleParams) -> Result<PathBuf, StageError> {

    let seed = params.seed.to_string();
    let max_coverage = params.max_coverage.to_string();

    let shuffled = store.get_or_create(Stage::Shuffle, naming::shuffled(wif, params.seed), &[wif], |shuffled| {
        StageCommand::new(Stage::Shuffle, &tools.bash, naming::log(shuffled))
            .arg(tools.script(SHUFFLE_SCRIPT))
            .arg(wif)
            .arg(&seed)
            .current_dir(store.dir())
            .run()
    })?;

    let sample = store.get_or_create(Stage::Selection, naming::sample(wif, params), &[shuffled.as_path()], |sample| {
        StageCommand::new(Stage::Selection, &tools.python, sample)
            .stderr(naming::log(sample))
            .arg(tools.script(WIFTOOLS_SCRIPT))
            .arg("-s").arg(&max_coverage)
            .arg(&shuffled)
            .arg(wif)
            .run()
    })?;

    store.get_or_create(Stage::Sampling, naming::downsampled(wif, params), &[wif, sample.as_path()], |downs| {
        StageCommand::new(Stage::Sampling, &tools.bash, naming::log(downs))
            .arg(tools.script(EXTRACT_SAMPLE_SCRIPT))
            .arg(wif)
            .arg(&sample)
            .arg(&seed)
            .arg(&max_coverage)
            .current_dir(store.dir())
            .run()
    })
}
