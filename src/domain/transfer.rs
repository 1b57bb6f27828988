use super::balance::PartyBalance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown instead of transfer lines when nothing needs to move.
pub const BALANCED_MESSAGE: &str = "All accounts balanced!";

/// How a transfer reaches its payee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Payer and payee share the mode used.
    Direct,
    /// One leg of a payment bridged through the intermediary.
    Intermediary,
}

/// A single payment in the settlement plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub payer: String,
    pub payee: String,
    pub amount: u64,
    pub mode: String,
    pub route: Route,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pays {} to {} via {}",
            self.payer, self.amount, self.payee, self.mode
        )
    }
}

/// Why a settlement run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every balance reached zero.
    Settled,
    /// The iteration ceiling was hit with balances still open.
    IterationLimit,
    /// A debtor had to be bridged but no bank with a positive balance was left.
    NoFallbackTarget,
}

/// The ordered output of a settlement run.
///
/// Transfers are kept in emission order, which is also the order in which
/// they should be executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub transfers: Vec<Transfer>,
    pub outcome: Outcome,
    pub iterations: usize,
    /// Banks still holding a non-zero balance when the run stopped.
    pub residual: Vec<PartyBalance>,
}

impl SettlementPlan {
    pub fn is_settled(&self) -> bool {
        self.outcome == Outcome::Settled
    }

    /// Total amount moved across all legs.
    pub fn total_volume(&self) -> u64 {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Human readable lines, one per transfer, or the balanced indicator for
    /// an empty plan.
    pub fn lines(&self) -> Vec<String> {
        if self.transfers.is_empty() {
            return vec![BALANCED_MESSAGE.to_string()];
        }
        self.transfers.iter().map(ToString::to_string).collect()
    }
}
