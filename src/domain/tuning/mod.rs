pub mod scoring;
pub mod target;

pub use scoring::ScoringTuning;
pub use target::TargetTuning;
