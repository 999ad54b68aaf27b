//! Coupons CLI

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use jiff::civil::Date;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coupons::{
    clock::{Clock, FixedClock, SystemClock},
    coupons::CouponId,
    evaluation::CouponEvaluator,
    fixtures::Fixture,
    receipt::{write_applicable, write_applied_cart},
    strategies::StrategyRegistry,
};

#[derive(Debug, Parser)]
#[command(name = "coupons", about = "Evaluate coupons against a cart", long_about = None)]
struct Cli {
    /// Directory holding the `coupons/` and `carts/` fixture sets
    #[arg(long, env = "COUPONS_FIXTURES", default_value = "./fixtures")]
    fixtures: PathBuf,

    /// Fixture set to load
    #[arg(long, default_value = "basic")]
    set: String,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<Date>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the coupons that apply to the cart and what each is worth
    Applicable,

    /// Price the cart with one coupon applied
    Apply {
        /// Coupon id
        coupon: u32,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "errors are reported to the terminal, not the log"
            )]
            {
                eprintln!("Error: {error:#}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut fixture = Fixture::with_base_path(cli.fixtures);

    fixture
        .load_coupons(&cli.set)
        .with_context(|| format!("loading coupons for set `{}`", cli.set))?
        .load_cart(&cli.set)
        .with_context(|| format!("loading cart for set `{}`", cli.set))?;

    let store = fixture.store()?;
    let cart = fixture.cart()?;
    let today = cli.today.unwrap_or_else(|| SystemClock.today());

    info!(set = %cli.set, %today, coupons = store.len(), lines = cart.len(), "loaded fixture set");

    let evaluator = CouponEvaluator::with_clock(StrategyRegistry::standard(), FixedClock(today));
    let out = io::stdout().lock();

    match cli.command {
        Commands::Applicable => {
            let results = evaluator.applicable_coupons(&store, &cart)?;

            write_applicable(out, &results)?;
        }
        Commands::Apply { coupon } => {
            let id = CouponId::new(coupon);
            let applied = evaluator.apply_coupon(&store, id, &cart)?;

            write_applied_cart(out, id, &applied)?;
        }
    }

    Ok(())
}
