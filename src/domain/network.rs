use super::modes::ModeSet;
use crate::error::{Result, SettlementError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Name given to the intermediary in freshly created networks.
pub const DEFAULT_INTERMEDIARY: &str = "World_Bank";
/// Modes accepted by the intermediary in freshly created networks.
pub const DEFAULT_INTERMEDIARY_MODES: &str = "GooglePay,PayTM,Wire";

/// A bank taking part in settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub modes: ModeSet,
}

impl Party {
    pub fn new(name: impl AsRef<str>, modes: ModeSet) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            modes,
        }
    }
}

/// One raw "debtor owes creditor" entry, as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtEntry {
    pub debtor: String,
    pub creditor: String,
    pub amount: u32,
}

impl DebtEntry {
    pub fn new(debtor: impl AsRef<str>, creditor: impl AsRef<str>, amount: u32) -> Self {
        Self {
            debtor: debtor.as_ref().trim().to_string(),
            creditor: creditor.as_ref().trim().to_string(),
            amount,
        }
    }
}

/// The full settlement input: an ordered bank list and the debts between them.
///
/// The bank at position 0 acts as the intermediary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Network {
    pub parties: Vec<Party>,
    pub debts: Vec<DebtEntry>,
}

impl Network {
    pub fn new(parties: Vec<Party>, debts: Vec<DebtEntry>) -> Self {
        Self { parties, debts }
    }

    /// A network holding only the default intermediary, ready to be filled in.
    pub fn template() -> Self {
        Self::new(
            vec![Party::new(
                DEFAULT_INTERMEDIARY,
                ModeSet::parse(DEFAULT_INTERMEDIARY_MODES),
            )],
            Vec::new(),
        )
    }

    pub fn intermediary(&self) -> Option<&Party> {
        self.parties.first()
    }

    /// Checks the bank list before any computation happens.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.parties.len());
        for party in &self.parties {
            if party.name.is_empty() {
                return Err(SettlementError::EmptyPartyName);
            }
            if party.modes.is_empty() {
                return Err(SettlementError::MissingModes(party.name.clone()));
            }
            if !seen.insert(party.name.as_str()) {
                return Err(SettlementError::DuplicateParty(party.name.clone()));
            }
        }

        if self.parties.len() < 2 {
            return Err(SettlementError::TooFewParties(self.parties.len()));
        }
        Ok(())
    }

    /// Resolves the raw debt entries into an N×N matrix indexed by bank
    /// position.
    ///
    /// A later entry for the same (debtor, creditor) pair replaces an earlier
    /// one.
    pub fn debt_matrix(&self) -> Result<DebtMatrix> {
        let index: HashMap<&str, usize> = self
            .parties
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.as_str(), i))
            .collect();
        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| SettlementError::UnknownParty(name.to_string()))
        };

        let mut matrix = DebtMatrix::zeroed(self.parties.len());
        for entry in &self.debts {
            let debtor = lookup(&entry.debtor)?;
            let creditor = lookup(&entry.creditor)?;
            matrix.set(debtor, creditor, entry.amount);
        }
        Ok(matrix)
    }
}

/// Dense N×N debt matrix: `get(i, j)` is what bank `i` owes bank `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtMatrix {
    size: usize,
    cells: Vec<u32>,
}

impl DebtMatrix {
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, debtor: usize, creditor: usize) -> u32 {
        self.cells[debtor * self.size + creditor]
    }

    pub fn set(&mut self, debtor: usize, creditor: usize, amount: u32) {
        self.cells[debtor * self.size + creditor] = amount;
    }
}
