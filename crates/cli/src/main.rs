mod args;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;
use std::process::ExitCode;

use args::Cli;
use swyftx_portfolio_core::models::catalog::normalize_code;
use swyftx_portfolio_core::models::settings::{ClientSettings, EngineConfig};
use swyftx_portfolio_core::providers::swyftx::SwyftxClient;
use swyftx_portfolio_core::providers::traits::ExchangeDataSource;
use swyftx_portfolio_core::PortfolioTracker;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = ClientSettings::load(cli.demo, &cli.key_file)
        .context("Could not load API credentials")?;
    let client = SwyftxClient::new(settings);

    let mut tracker = PortfolioTracker::connect(&client, EngineConfig::default())
        .await
        .context("Could not establish connection to Swyftx API")?;
    println!("Connection to Swyftx API established");

    let outcome = report(&mut tracker, cli);

    // Log out even when reporting failed.
    match client.logout().await {
        Ok(true) => println!("\nSuccessfully logged out"),
        Ok(false) => println!("\nNot successfully logged out"),
        Err(e) => {
            warn!("Logout failed: {e}");
            println!("\nNot successfully logged out");
        }
    }

    outcome
}

fn report(tracker: &mut PortfolioTracker, cli: &Cli) -> Result<()> {
    let currency = normalize_code(&cli.currency);
    if !tracker.exists_currency(&currency) {
        bail!("Unknown currency selected: {currency}");
    }

    if cli.balance {
        let rejected = tracker.report_holdings(&currency)?;
        print!(
            "{}",
            render::holdings_table(tracker.holdings(), &currency, tracker.total_value())
        );
        print!("{}", render::rejected_list(&rejected));
    }

    if cli.transactions || cli.export.is_some() {
        let rejected = tracker.report_transactions(&currency)?;
        if cli.transactions {
            print!("{}", render::completed_table(tracker.completed(), &currency));
            print!("{}", render::pending_table(tracker.pending(), &currency));
        }
        print!("{}", render::rejected_list(&rejected));
    }

    if let Some(path) = &cli.export {
        std::fs::write(path, tracker.export_ledger_to_csv())
            .with_context(|| format!("Could not write ledger to {}", path.display()))?;
        println!("\nLedger exported to {}", path.display());
    }

    Ok(())
}
