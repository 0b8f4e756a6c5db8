/// Construction-time validation errors
use thiserror::Error;

/// Rejected settings for a camera or engine.
///
/// The render pipeline itself never fails; everything that could produce
/// NaN or sign-flipped projections is caught here instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("near clip distance must be finite and greater than zero, got {0}")]
    InvalidNearClip(f64),

    #[error("field of view scale must be finite and greater than zero, got {0}")]
    InvalidFov(f64),

    #[error("move speed must be finite, got {0}")]
    InvalidMoveSpeed(f64),

    #[error("viewport must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
