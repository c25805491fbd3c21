pub mod downsample;
pub mod extract;
pub mod merge;
pub mod phasing;
pub mod reconcile;
