use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::cli::Options;

pub const WHATSHAP: &str = "software/whatshap/venv/bin/whatshap";
pub const HAPCHAT_CORE: &str = "software/hapchat/hapchat_core";
pub const SCRIPTS_DIR: &str = "scripts";

pub const MERGE_SCRIPT: &str = "rb-merge.py";
pub const SHUFFLE_SCRIPT: &str = "pseudorandomshuffle.bash";
pub const WIFTOOLS_SCRIPT: &str = "wiftools.py";
pub const EXTRACT_SAMPLE_SCRIPT: &str = "extractsample.bash";
pub const SUBVCF_SCRIPT: &str = "subvcf.py";

const SCRIPTS: [&str; 5] = [MERGE_SCRIPT, SHUFFLE_SCRIPT, WIFTOOLS_SCRIPT, EXTRACT_SAMPLE_SCRIPT, SUBVCF_SCRIPT];


/// Locations of the external programs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Tools {
    pub whatshap: PathBuf,
    pub hapchat_core: PathBuf,
    pub python: PathBuf,
    pub bash: PathBuf,
    pub scripts_dir: PathBuf,
}

impl Tools {

    pub fn from_options(opts: &Options) -> Result<Tools> {
        let home = match &opts.home {
            Some(home) => home.clone(),
            None => installation_dir()?,
        };

        // helper scripts may run from within the intermediate directory
        let absolute = |path: PathBuf| std::path::absolute(&path)
            .with_context(|| format!("cannot resolve path \"{}\"", path.display()));

        Ok(Tools {
            whatshap: absolute(opts.whatshap.clone().unwrap_or_else(|| home.join(WHATSHAP)))?,
            hapchat_core: absolute(opts.hapchat_core.clone().unwrap_or_else(|| home.join(HAPCHAT_CORE)))?,
            python: PathBuf::from(&opts.python),
            bash: PathBuf::from(&opts.bash),
            scripts_dir: absolute(opts.scripts_dir.clone().unwrap_or_else(|| home.join(SCRIPTS_DIR)))?,
        })
    }

    pub fn script(&self, name: &str) -> PathBuf {
        self.scripts_dir.join(name)
    }

    /// Fails before any stage runs if a dependency is missing. The
    /// installation is checked before the interpreters.
    pub fn check(&self) -> Result<()> {
        if !self.whatshap.is_file() {
            bail!("WhatsHap not found at \"{}\", please run setup.sh", self.whatshap.display());
        }
        if !self.hapchat_core.is_file() {
            bail!("HapCHAT core phasing algorithm not found at \"{}\", please run setup.sh", self.hapchat_core.display());
        }
        for name in SCRIPTS {
            let script = self.script(name);
            if !script.is_file() {
                bail!("helper script {name} not found at \"{}\", please run setup.sh", script.display());
            }
        }
        for interpreter in [&self.python, &self.bash] {
            which::which(interpreter)
                .with_context(|| format!("missing {} interpreter, please check your system PATH", interpreter.display()))?;
        }
        Ok(())
    }
}

fn installation_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the hapchat executable")?;
    let exe = exe.canonicalize().unwrap_or(exe);
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}
