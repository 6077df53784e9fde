use probescope_common::Real;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("Number of slices must be at least one")]
    InvalidSliceCount,
    #[error("Collector height must be positive and finite, got {0}")]
    InvalidCollectorHeight(Real),
    #[error("Bounds must have positive area, got {width} x {height}")]
    InvalidBounds { width: Real, height: Real },
    #[error("Invalid value for {name}: {value}")]
    InvalidPresentation { name: &'static str, value: Real },
    #[error("No emitter at index {0}")]
    NoSuchEmitter(usize),
    #[error("No collector at index {0}")]
    NoSuchCollector(usize),
}
