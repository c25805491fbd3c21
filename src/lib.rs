pub mod artifact;
pub mod cli;
pub mod naming;
pub mod params;
pub mod pipeline;
pub mod runner;
pub mod stages;
pub mod tools;
pub mod utils;
pub mod vcf;

pub use self::artifact::ArtifactStore;
pub use self::params::Params;
pub use self::pipeline::Pipeline;
pub use self::runner::{Stage, StageError};
pub use self::tools::Tools;
