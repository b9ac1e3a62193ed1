use thiserror::Error;

/// Rejection reasons for [`crate::config::Config::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name}: min {min} is greater than max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("branch_length_multiplier_max is {value}; children must shrink (multiplier below 1) or growth never reaches the leaf threshold")]
    NonShrinkingLength { value: f32 },
}

/// Failures while growing a tree from an already-validated configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    #[error("tree exceeded the maximum branch depth of {max}")]
    DepthExceeded { max: usize },
}
