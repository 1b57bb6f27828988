use super::network::DebtMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A bank's signed net position.
///
/// Positive values are net creditors, negative values net debtors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Balance(pub i64);

impl Balance {
    pub const ZERO: Self = Self(0);

    pub fn new(amount: i64) -> Self {
        Self(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_debtor(&self) -> bool {
        self.0 < 0
    }

    pub fn is_creditor(&self) -> bool {
        self.0 > 0
    }

    /// Absolute size of the position.
    pub fn magnitude(&self) -> u64 {
        self.0.unsigned_abs()
    }
}

impl From<u64> for Balance {
    fn from(amount: u64) -> Self {
        Self(amount as i64)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A bank's name paired with its net position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBalance {
    pub bank: String,
    pub net: Balance,
}

/// Computes each bank's net balance: everything owed to it minus everything
/// it owes.
///
/// The result is indexed like the matrix and always sums to zero.
pub fn net_balances(matrix: &DebtMatrix) -> Vec<Balance> {
    let n = matrix.size();
    (0..n)
        .map(|i| {
            let inflow: i64 = (0..n).map(|x| i64::from(matrix.get(x, i))).sum();
            let outflow: i64 = (0..n).map(|x| i64::from(matrix.get(i, x))).sum();
            Balance(inflow - outflow)
        })
        .collect()
}
