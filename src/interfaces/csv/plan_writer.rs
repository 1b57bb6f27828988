use crate::config::PlanFormat;
use crate::domain::balance::PartyBalance;
use crate::domain::transfer::SettlementPlan;
use crate::error::Result;
use std::io::Write;

const PLAN_HEADER: [&str; 5] = ["payer", "payee", "amount", "mode", "route"];
const BALANCES_HEADER: [&str; 2] = ["bank", "net"];

/// Writes settlement output to any `Write` sink (e.g., Stdout, File).
pub struct PlanWriter<W: Write> {
    sink: W,
}

impl<W: Write> PlanWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write(&mut self, plan: &SettlementPlan, format: PlanFormat) -> Result<()> {
        match format {
            PlanFormat::Text => self.write_text(plan),
            PlanFormat::Csv => self.write_csv(plan),
            PlanFormat::Json => self.write_json(plan),
        }
    }

    /// One "<payer> pays <amount> to <payee> via <mode>" line per transfer.
    pub fn write_text(&mut self, plan: &SettlementPlan) -> Result<()> {
        for line in plan.lines() {
            writeln!(self.sink, "{line}")?;
        }
        Ok(())
    }

    /// A header row followed by one record per transfer, in emission order.
    pub fn write_csv(&mut self, plan: &SettlementPlan) -> Result<()> {
        let mut writer = csv_writer(&mut self.sink);
        writer.write_record(PLAN_HEADER)?;
        for transfer in &plan.transfers {
            writer.serialize(transfer)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// The whole plan, including outcome and residual balances.
    pub fn write_json(&mut self, plan: &SettlementPlan) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.sink, plan)?;
        writeln!(self.sink)?;
        Ok(())
    }

    pub fn write_balances(&mut self, balances: &[PartyBalance]) -> Result<()> {
        let mut writer = csv_writer(&mut self.sink);
        writer.write_record(BALANCES_HEADER)?;
        for balance in balances {
            let net = balance.net.to_string();
            writer.write_record([balance.bank.as_str(), net.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn csv_writer<W: Write>(sink: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink)
}
