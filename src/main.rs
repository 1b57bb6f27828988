use cashflow_minimizer::application::engine::SettlementEngine;
use cashflow_minimizer::application::service::SettlementService;
use cashflow_minimizer::config::{
    DEFAULT_MAX_ITERATIONS, EngineConfig, IntermediaryPolicy, PlanFormat,
};
use cashflow_minimizer::domain::network::Network;
use cashflow_minimizer::domain::ports::{NetworkStore, NetworkStoreBox};
use cashflow_minimizer::domain::transfer::{Outcome, SettlementPlan};
use cashflow_minimizer::infrastructure::file::FileNetworkStore;
use cashflow_minimizer::interfaces::csv::plan_writer::PlanWriter;
use cashflow_minimizer::logging;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, bail};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Settle a network of bank debts with as few transfers as possible", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the settlement plan for a network file.
    Settle {
        /// Network file with BANKS and TRANS sections
        input: PathBuf,

        /// Stop after this many settlement steps even if balances remain open.
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,

        /// Whether the intermediary's modes are checked before settling.
        #[arg(long, value_enum, default_value_t = IntermediaryPolicy::Trusted)]
        intermediary: IntermediaryPolicy,

        /// Output encoding of the plan.
        #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
        format: PlanFormat,
    },
    /// Print every bank's net balance as CSV.
    Balances {
        /// Network file with BANKS and TRANS sections
        input: PathBuf,
    },
    /// Write a template network file holding the default intermediary.
    Init {
        /// Where to write the template
        output: PathBuf,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Settle {
            input,
            max_iterations,
            intermediary,
            format,
        } => {
            let config = EngineConfig::default()
                .with_max_iterations(max_iterations)
                .with_intermediary(intermediary);
            cmd_settle(input, config, format).await
        }
        Command::Balances { input } => cmd_balances(input).await,
        Command::Init { output, force } => cmd_init(output, force).await,
    }
}

async fn cmd_settle(input: PathBuf, config: EngineConfig, format: PlanFormat) -> Result<()> {
    let store: NetworkStoreBox = Box::new(FileNetworkStore::new(input));
    let service = SettlementService::new(store, SettlementEngine::new(config));
    let plan = service.settle().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = PlanWriter::new(stdout.lock());
    writer.write(&plan, format).into_diagnostic()?;

    if !plan.is_settled() {
        eprintln!("WARNING: {}", unsettled_summary(&plan));
    }
    Ok(())
}

async fn cmd_balances(input: PathBuf) -> Result<()> {
    let store: NetworkStoreBox = Box::new(FileNetworkStore::new(input));
    let service = SettlementService::new(store, SettlementEngine::default());
    let balances = service.balances().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = PlanWriter::new(stdout.lock());
    writer.write_balances(&balances).into_diagnostic()?;
    Ok(())
}

async fn cmd_init(output: PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
    }
    FileNetworkStore::new(&output)
        .save(&Network::template())
        .await
        .into_diagnostic()?;
    Ok(())
}

fn unsettled_summary(plan: &SettlementPlan) -> String {
    let reason = match plan.outcome {
        Outcome::IterationLimit => "iteration limit reached",
        Outcome::NoFallbackTarget => "no bank left to receive a bridged payment",
        Outcome::Settled => "settled",
    };
    format!(
        "settlement stopped after {} iterations ({reason}); {} bank(s) still unsettled",
        plan.iterations,
        plan.residual.len()
    )
}
