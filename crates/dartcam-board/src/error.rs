/// Board construction errors. A model is never built from a calibration
/// that fails one of these checks.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("radius must be finite and > 0 (got {0})")]
    InvalidRadius(f64),
    #[error("board center must be finite (got ({x}, {y}))")]
    NonFiniteCenter { x: f64, y: f64 },
    #[error("angle offset must be finite (got {0} degrees)")]
    NonFiniteAngleOffset(f64),
    #[error("{name} must be in [0, 100] (got {value})")]
    PercentOutOfRange { name: &'static str, value: f64 },
    #[error("inner_bull_pct must be > 0")]
    ZeroInnerBull,
    #[error("ring order violated: {inner} ({inner_pct}%) exceeds {outer} ({outer_pct}%)")]
    RingOrder {
        inner: &'static str,
        inner_pct: f64,
        outer: &'static str,
        outer_pct: f64,
    },
}

/// A classification input that is not a finite point.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[error("point ({x}, {y}) is not finite")]
pub struct InvalidPointError {
    pub x: f64,
    pub y: f64,
}
