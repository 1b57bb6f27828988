use crate::config::{EngineConfig, IntermediaryPolicy};
use crate::domain::balance::{Balance, PartyBalance, net_balances};
use crate::domain::modes::common_mode;
use crate::domain::network::{DebtMatrix, Network, Party};
use crate::domain::transfer::{Outcome, Route, SettlementPlan, Transfer};
use crate::error::{Result, SettlementError};
use tracing::{debug, info, instrument, warn};

/// Position of the intermediary in the bank list.
const INTERMEDIARY: usize = 0;

/// Turns a network of debts into an ordered list of transfers.
///
/// The engine is stateless between runs: every call to [`settle`] validates
/// its input, derives fresh balances and owns them until the plan is
/// returned, so one engine can serve any number of independent runs.
///
/// [`settle`]: SettlementEngine::settle
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: EngineConfig,
}

impl SettlementEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates the network and resolves its debts into a matrix.
    ///
    /// All configuration and reference errors surface here, before any
    /// balance is touched.
    pub fn prepare(&self, network: &Network) -> Result<DebtMatrix> {
        network.validate()?;
        if self.config.intermediary == IntermediaryPolicy::Strict {
            check_intermediary(&network.parties)?;
        }
        network.debt_matrix()
    }

    /// Net balance of every bank, in bank-list order.
    pub fn balances(&self, network: &Network) -> Result<Vec<PartyBalance>> {
        let matrix = self.prepare(network)?;
        Ok(network
            .parties
            .iter()
            .zip(net_balances(&matrix))
            .map(|(party, net)| PartyBalance {
                bank: party.name.clone(),
                net,
            })
            .collect())
    }

    /// Computes the settlement plan for `network`.
    ///
    /// Never fails once validation has passed: a run that cannot finish is
    /// reported through [`SettlementPlan::outcome`] and the residual balances.
    #[instrument(skip_all, fields(banks = network.parties.len(), debts = network.debts.len()))]
    pub fn settle(&self, network: &Network) -> Result<SettlementPlan> {
        let matrix = self.prepare(network)?;
        Ok(self.run(&network.parties, net_balances(&matrix)))
    }

    fn run(&self, parties: &[Party], balances: Vec<Balance>) -> SettlementPlan {
        let mut run = Run::new(parties, balances);
        let mut iterations = 0;

        let outcome = loop {
            if run.settled == parties.len() {
                break Outcome::Settled;
            }
            if iterations >= self.config.max_iterations {
                break Outcome::IterationLimit;
            }
            iterations += 1;

            let Some(debtor) = run.select_debtor() else {
                break Outcome::Settled;
            };
            match run.select_creditor(debtor) {
                Some((creditor, mode)) => run.pay_direct(debtor, creditor, mode),
                None => {
                    if !run.bridge(debtor) {
                        break Outcome::NoFallbackTarget;
                    }
                }
            }
        };

        let residual = run.residual();
        match outcome {
            Outcome::Settled => info!(
                transfers = run.transfers.len(),
                iterations, "settlement complete"
            ),
            _ => warn!(
                ?outcome,
                iterations,
                open_balances = residual.len(),
                "settlement stopped with unsettled balances"
            ),
        }

        SettlementPlan {
            transfers: run.transfers,
            outcome,
            iterations,
            residual,
        }
    }
}

/// Under the strict policy the intermediary has to accept the mode each bank
/// would use on a bridged leg, which is always its first mode.
fn check_intermediary(parties: &[Party]) -> Result<()> {
    let Some((hub, others)) = parties.split_first() else {
        return Ok(());
    };
    for party in others {
        if let Some(mode) = party.modes.first()
            && !hub.modes.contains(mode)
        {
            return Err(SettlementError::UnservicedMode {
                intermediary: hub.name.clone(),
                party: party.name.clone(),
                mode: mode.to_string(),
            });
        }
    }
    Ok(())
}

/// Working state of a single settlement run.
struct Run<'a> {
    parties: &'a [Party],
    balances: Vec<Balance>,
    transfers: Vec<Transfer>,
    settled: usize,
}

impl<'a> Run<'a> {
    fn new(parties: &'a [Party], balances: Vec<Balance>) -> Self {
        let settled = balances.iter().filter(|b| b.is_zero()).count();
        Self {
            parties,
            balances,
            transfers: Vec::new(),
            settled,
        }
    }

    /// Most negative balance; the first one wins a tie.
    fn select_debtor(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, balance) in self.balances.iter().enumerate() {
            if balance.is_debtor() && best.is_none_or(|j| *balance < self.balances[j]) {
                best = Some(i);
            }
        }
        best
    }

    /// Largest positive balance sharing a mode with `debtor`, together with
    /// that shared mode. The first one wins a tie.
    fn select_creditor(&self, debtor: usize) -> Option<(usize, &'a str)> {
        let parties = self.parties;
        let modes = &parties[debtor].modes;
        let mut best: Option<(usize, &'a str)> = None;

        for (i, balance) in self.balances.iter().enumerate() {
            if !balance.is_creditor() || best.is_some_and(|(j, _)| *balance <= self.balances[j]) {
                continue;
            }
            if let Some(mode) = common_mode(modes, &parties[i].modes) {
                best = Some((i, mode));
            }
        }
        best
    }

    /// Largest positive balance regardless of modes. The first one wins a tie.
    fn select_largest_creditor(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, balance) in self.balances.iter().enumerate() {
            if balance.is_creditor() && best.is_none_or(|j| *balance > self.balances[j]) {
                best = Some(i);
            }
        }
        best
    }

    fn pay_direct(&mut self, debtor: usize, creditor: usize, mode: &str) {
        let amount = self.balances[debtor]
            .magnitude()
            .min(self.balances[creditor].magnitude());

        self.emit(debtor, creditor, amount, mode, Route::Direct);
        self.balances[debtor] += Balance::from(amount);
        self.balances[creditor] -= Balance::from(amount);
        self.mark_if_settled(debtor);
        self.mark_if_settled(creditor);
    }

    /// Moves the debtor's whole position through the intermediary to the
    /// largest creditor. Returns `false` when no creditor is left to receive
    /// the second leg.
    fn bridge(&mut self, debtor: usize) -> bool {
        let parties = self.parties;
        let amount = self.balances[debtor].magnitude();

        let outgoing = parties[debtor].modes.first().unwrap_or_default();
        self.emit(debtor, INTERMEDIARY, amount, outgoing, Route::Intermediary);

        let Some(target) = self.select_largest_creditor() else {
            return false;
        };
        let incoming = parties[target].modes.first().unwrap_or_default();
        self.emit(INTERMEDIARY, target, amount, incoming, Route::Intermediary);

        let owed = self.balances[debtor];
        self.balances[target] += owed;
        self.balances[debtor] = Balance::ZERO;
        self.mark_if_settled(debtor);
        self.mark_if_settled(target);
        true
    }

    fn mark_if_settled(&mut self, index: usize) {
        if self.balances[index].is_zero() {
            self.settled += 1;
        }
    }

    fn emit(&mut self, payer: usize, payee: usize, amount: u64, mode: &str, route: Route) {
        let transfer = Transfer {
            payer: self.parties[payer].name.clone(),
            payee: self.parties[payee].name.clone(),
            amount,
            mode: mode.to_string(),
            route,
        };
        debug!(%transfer, ?route, "transfer emitted");
        self.transfers.push(transfer);
    }

    fn residual(&self) -> Vec<PartyBalance> {
        self.parties
            .iter()
            .zip(&self.balances)
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(party, balance)| PartyBalance {
                bank: party.name.clone(),
                net: *balance,
            })
            .collect()
    }
}
