//! Configuration types for the CPM engine.

use std::str::FromStr;

use thiserror::Error;

/// Errors raised while building or validating a configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown duration policy: {0}")]
    UnknownDurationPolicy(String),
    #[error("Criticality epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),
}

/// How tasks with a duration that is zero, negative or NaN are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationPolicy {
    /// Keep the degenerate interval as given. NaN is still replaced with 0.0.
    #[default]
    Preserve,
    /// Replace the duration with 0.0.
    Clamp,
    /// Fail the computation.
    Reject,
}

impl DurationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Clamp => "clamp",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for DurationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(Self::Preserve),
            "clamp" => Ok(Self::Clamp),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::UnknownDurationPolicy(other.to_string())),
        }
    }
}

/// Configuration for a single engine run.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Tasks with |float| below this are critical.
    pub epsilon: f64,
    /// Verbosity level: 0=silent, 1=summary, 2=steps, 3=trace.
    pub verbosity: u8,
    pub duration_policy: DurationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-3,
            verbosity: 0,
            duration_policy: DurationPolicy::Preserve,
        }
    }
}

impl EngineConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_duration_policy(mut self, policy: DurationPolicy) -> Self {
        self.duration_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}
