use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::naming;
use crate::runner::{Stage, StageError};


/// Checks that a stage left a non-empty file at `path`.
pub fn verify(stage: Stage, path: &Path) -> Result<(), StageError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
        Ok(meta) if meta.is_file() => Err(StageError::EmptyArtifact { stage, path: path.to_path_buf() }),
        _ => Err(StageError::MissingArtifact { stage, path: path.to_path_buf() }),
    }
}

/// One line per input with its modification time, size and canonical path.
/// `None` when an input cannot be inspected.
pub fn input_stamp(inputs: &[&Path]) -> Option<String> {
    let mut stamp = String::new();
    for input in inputs {
        let path = fs::canonicalize(input).ok()?;
        let meta = fs::metadata(&path).ok()?;
        let mtime = meta.modified().ok()?.duration_since(UNIX_EPOCH).ok()?;
        stamp.push_str(&format!("{}.{:09}\t{}\t{}\n", mtime.as_secs(), mtime.subsec_nanos(), meta.len(), path.display()));
    }
    Some(stamp)
}

/// An artifact is fresh when it is non-empty and was built from exactly the
/// inputs described by `stamp`.
pub fn is_fresh(artifact: &Path, stamp: &str) -> bool {
    if !matches!(fs::metadata(artifact), Ok(meta) if meta.is_file() && meta.len() > 0) {
        return false
    }
    matches!(fs::read_to_string(naming::stamp(artifact)), Ok(recorded) if recorded == stamp)
}


/// The per-BAM intermediate directory, used as a cache of stage outputs.
/// Nothing in it is ever deleted except the partial output of a failed stage.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    force: bool,
}

impl ArtifactStore {

    pub fn for_bam(bam_path: &Path, force: bool) -> Result<ArtifactStore> {
        let dir = naming::intermediate_dir(bam_path)
            .with_context(|| format!("cannot locate intermediate directory for \"{}\"", bam_path.display()))?;
        Ok(ArtifactStore { dir, force })
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }

    /// Idempotent
    pub fn create_dir(&self, stage: Stage) -> Result<(), StageError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StageError::Io { stage, path: self.dir.clone(), source })
    }

    /// Returns `artifact`, running `build` first unless a copy built from the
    /// same `inputs` is already present. A built artifact is verified and
    /// stamped before it is returned.
    pub fn get_or_create<F>(&self, stage: Stage, artifact: PathBuf, inputs: &[&Path], build: F) -> Result<PathBuf, StageError>
    where
        F: FnOnce(&Path) -> Result<(), StageError>,
    {
        let stamp = input_stamp(inputs);
        if !self.force && matches!(&stamp, Some(stamp) if is_fresh(&artifact, stamp)) {
            spdlog::info!("  {stage}: reusing \"{}\"", artifact.display());
            return Ok(artifact)
        }

        spdlog::info!("  {stage}: building \"{}\"", artifact.display());
        let t_start = Instant::now();
        if let Err(err) = build(&artifact).and_then(|_| verify(stage, &artifact)) {
            if artifact.is_file() && fs::remove_file(&artifact).is_ok() {
                spdlog::debug!("removed incomplete \"{}\"", artifact.display());
            }
            return Err(err)
        }
        spdlog::debug!("{stage} done in {:.2}s", t_start.elapsed().as_secs_f64());

        let stamp_path = naming::stamp(&artifact);
        match stamp {
            Some(stamp) => fs::write(&stamp_path, stamp)
                .map_err(|source| StageError::Io { stage, path: stamp_path, source })?,
            None if stamp_path.is_file() => fs::remove_file(&stamp_path)
                .map_err(|source| StageError::Io { stage, path: stamp_path, source })?,
            None => {}
        }

        Ok(artifact)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_verify() {
        let dir = tempfile::tempdir().unwrap();
        let full = dir.path().join("full.wif");
        let empty = dir.path().join("empty.wif");
        fs::write(&full, "read\n").unwrap();
        fs::write(&empty, "").unwrap();

        assert!(verify(Stage::Merge, &full).is_ok());
        assert!(matches!(verify(Stage::Merge, &empty), Err(StageError::EmptyArtifact { .. })));
        assert!(matches!(verify(Stage::Merge, &dir.path().join("none")), Err(StageError::MissingArtifact { .. })));
        assert!(matches!(verify(Stage::Merge, dir.path()), Err(StageError::MissingArtifact { .. })));
    }

    fn set_modified(path: &Path, time: SystemTime) {
        File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
    }

    #[test]
    fn test_freshness_follows_input_identity() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.wif");
        let output = dir.path().join("raw.wif.hap");
        fs::write(&input, "read\n").unwrap();
        fs::write(&output, "0101\n").unwrap();

        let stamp = input_stamp(&[input.as_path()]).unwrap();
        assert!(!is_fresh(&output, &stamp));
        fs::write(naming::stamp(&output), &stamp).unwrap();
        assert!(is_fresh(&output, &stamp));

        // touched, even into the past
        set_modified(&input, SystemTime::now() - Duration::from_secs(3600));
        assert!(!is_fresh(&output, &input_stamp(&[input.as_path()]).unwrap()));

        assert!(input_stamp(&[dir.path().join("missing").as_path()]).is_none());
        assert_eq!(input_stamp(&[]).unwrap(), "");
    }

    #[test]
    fn test_older_replacement_input_is_rebuilt() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore { dir: dir.path().to_path_buf(), force: false };
        let first = dir.path().join("first.vcf");
        let second = dir.path().join("second.vcf");
        fs::write(&first, "chr1\t100\n").unwrap();
        fs::write(&second, "chr1\t500\n").unwrap();
        set_modified(&second, SystemTime::now() - Duration::from_secs(3600));
        let artifact = dir.path().join("raw.wif");

        let mut builds = Vec::new();
        for input in [&first, &first, &second, &first] {
            store.get_or_create(Stage::Extraction, artifact.clone(), &[input.as_path()], |path| {
                builds.push(input.clone());
                fs::copy(input, path).unwrap();
                Ok(())
            }).unwrap();
        }
        assert_eq!(builds, [first.clone(), second.clone(), first.clone()]);
        assert_eq!(fs::read_to_string(&artifact).unwrap(), "chr1\t100\n");
    }

    #[test]
    fn test_get_or_create_reuses_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore { dir: dir.path().to_path_buf(), force: false };
        let artifact = dir.path().join("a.wif");

        let mut builds = 0;
        for _ in 0..2 {
            store.get_or_create(Stage::Merge, artifact.clone(), &[], |path| {
                builds += 1;
                fs::write(path, "merged\n").unwrap();
                Ok(())
            }).unwrap();
        }
        assert_eq!(builds, 1);

        let forced = ArtifactStore { force: true, ..store };
        forced.get_or_create(Stage::Merge, artifact.clone(), &[], |path| {
            builds += 1;
            fs::write(path, "merged\n").unwrap();
            Ok(())
        }).unwrap();
        assert_eq!(builds, 2);
    }

    #[test]
    fn test_get_or_create_discards_failed_output() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore { dir: dir.path().to_path_buf(), force: false };

        let empty = dir.path().join("empty.wif");
        let err = store.get_or_create(Stage::Sampling, empty.clone(), &[], |path| {
            File::create(path).unwrap();
            Ok(())
        }).unwrap_err();
        assert!(matches!(err, StageError::EmptyArtifact { stage: Stage::Sampling, .. }));
        assert!(!empty.exists());

        let partial = dir.path().join("partial.hap");
        let err = store.get_or_create(Stage::Phasing, partial.clone(), &[], |path| {
            fs::write(path, "01").unwrap();
            Err(StageError::MissingArtifact { stage: Stage::Phasing, path: path.to_path_buf() })
        }).unwrap_err();
        assert_eq!(err.stage(), Stage::Phasing);
        assert!(!partial.exists());
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::for_bam(&dir.path().join("sample.bam"), false).unwrap();
        store.create_dir(Stage::Extraction).unwrap();
        store.create_dir(Stage::Extraction).unwrap();
        assert!(store.dir().is_dir());
        assert!(store.dir().ends_with(".sample.bam.hx_"));
    }
}
