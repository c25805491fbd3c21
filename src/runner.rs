use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

use itertools::Itertools;
use thiserror::Error;


/// Every external invocation of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Extraction,
    Merge,
    Shuffle,
    Selection,
    Sampling,
    Phasing,
    Blocks,
    Annotation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Extraction => "read extraction",
            Stage::Merge => "read merging",
            Stage::Shuffle => "read shuffling",
            Stage::Selection => "coverage selection",
            Stage::Sampling => "sample extraction",
            Stage::Phasing => "phasing",
            Stage::Blocks => "block detection",
            Stage::Annotation => "vcf annotation",
        };
        f.write_str(name)
    }
}


#[derive(Error, Debug)]
pub enum StageError {
    #[error("{stage}: cannot run \"{}\": {source}", .program.display())]
    Spawn { stage: Stage, program: PathBuf, source: io::Error },

    #[error("{stage}: terminated with {status}, see \"{}\"", .log.display())]
    Failed { stage: Stage, status: ExitStatus, log: PathBuf },

    #[error("{stage}: expected output \"{}\" was not produced", .path.display())]
    MissingArtifact { stage: Stage, path: PathBuf },

    #[error("{stage}: output \"{}\" is empty", .path.display())]
    EmptyArtifact { stage: Stage, path: PathBuf },

    #[error("{stage}: cannot write \"{}\": {source}", .path.display())]
    Io { stage: Stage, path: PathBuf, source: io::Error },
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Spawn { stage, .. }
            | StageError::Failed { stage, .. }
            | StageError::MissingArtifact { stage, .. }
            | StageError::EmptyArtifact { stage, .. }
            | StageError::Io { stage, .. } => *stage,
        }
    }
}


/// An external command whose standard output goes to a file and whose
/// standard error goes either to its own file or along with standard output.
/// Standard output of the pipeline itself is never inherited.
#[derive(Debug, Clone)]
pub struct StageCommand {
    stage: Stage,
    program: PathBuf,
    args: Vec<OsString>,
    workdir: Option<PathBuf>,
    stdout: PathBuf,
    stderr: Option<PathBuf>,
}

impl StageCommand {

    pub fn new(stage: Stage, program: impl Into<PathBuf>, stdout: impl Into<PathBuf>) -> StageCommand {
        StageCommand {
            stage,
            program: program.into(),
            args: Vec::new(),
            workdir: None,
            stdout: stdout.into(),
            stderr: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> StageCommand {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> StageCommand
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    pub fn stderr(mut self, path: impl Into<PathBuf>) -> StageCommand {
        self.stderr = Some(path.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> StageCommand {
        self.workdir = Some(dir.into());
        self
    }

    /// File holding the diagnostics of the command
    pub fn log_path(&self) -> &Path {
        self.stderr.as_deref().unwrap_or(&self.stdout)
    }

    fn create(&self, path: &Path) -> Result<File, StageError> {
        File::create(path).map_err(|source| StageError::Io { stage: self.stage, path: path.to_path_buf(), source })
    }

    /// Blocks until the command terminates; a nonzero exit status is an error.
    pub fn run(&self) -> Result<(), StageError> {
        let stdout = self.create(&self.stdout)?;
        let stderr = match &self.stderr {
            Some(path) => self.create(path)?,
            None => stdout.try_clone()
                .map_err(|source| StageError::Io { stage: self.stage, path: self.stdout.clone(), source })?,
        };

        let mut command = Command::new(&self.program);
        command.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        spdlog::debug!("running: {}", self);
        let t_start = Instant::now();
        let status = command.status()
            .map_err(|source| StageError::Spawn { stage: self.stage, program: self.program.clone(), source })?;
        spdlog::debug!("{} finished in {:.2}s ({status})", self.stage, t_start.elapsed().as_secs_f64());

        if !status.success() {
            return Err(StageError::Failed { stage: self.stage, status, log: self.log_path().to_path_buf() })
        }
        Ok(())
    }
}

impl fmt::Display for StageCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let args = self.args.iter().map(|arg| arg.to_string_lossy()).join(" ");
        write!(f, "{} {args} > {}", self.program.display(), self.stdout.display())?;
        match &self.stderr {
            Some(path) => write!(f, " 2> {}", path.display()),
            None => write!(f, " 2>&1"),
        }
    }
}
