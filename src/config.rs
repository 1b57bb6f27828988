use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Iteration ceiling used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// How much the engine trusts the intermediary to accept bridged payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntermediaryPolicy {
    /// Bridged legs are never checked against the intermediary's modes.
    #[default]
    Trusted,
    /// Before settling, the intermediary must accept the first mode of every
    /// other bank, since that is the mode a bridged leg uses.
    Strict,
}

/// Knobs for a settlement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub max_iterations: usize,
    pub intermediary: IntermediaryPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            intermediary: IntermediaryPolicy::Trusted,
        }
    }
}

impl EngineConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_intermediary(mut self, policy: IntermediaryPolicy) -> Self {
        self.intermediary = policy;
        self
    }
}

/// Output encodings for a settlement plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlanFormat {
    #[default]
    Text,
    Csv,
    Json,
}
