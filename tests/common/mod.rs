#![allow(dead_code)]

use cashflow_minimizer::domain::modes::ModeSet;
use cashflow_minimizer::domain::network::{DebtEntry, Network, Party};
use rand::Rng;
use rand::rngs::StdRng;
use std::io::Write;
use tempfile::NamedTempFile;

pub const MODES: [&str; 5] = ["Cash", "GooglePay", "PayTM", "UPI", "Wire"];

/// A random but valid network: `banks` banks with one or two modes each and
/// `debts` entries between them.
pub fn random_network(rng: &mut StdRng, banks: usize, debts: usize) -> Network {
    let parties: Vec<Party> = (0..banks)
        .map(|i| {
            let name = if i == 0 {
                "World_Bank".to_string()
            } else {
                format!("Bank_{i}")
            };
            let mut modes = ModeSet::new();
            for _ in 0..rng.gen_range(1..=2) {
                modes.insert(MODES[rng.gen_range(0..MODES.len())]);
            }
            Party::new(name, modes)
        })
        .collect();

    let entries = (0..debts)
        .map(|_| {
            let debtor = &parties[rng.gen_range(0..banks)].name;
            let creditor = &parties[rng.gen_range(0..banks)].name;
            DebtEntry::new(debtor, creditor, rng.gen_range(0..1000))
        })
        .collect();

    Network::new(parties, entries)
}

/// Writes `lines` to a temporary network file.
pub fn network_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}
