pub(crate) mod console;
pub(crate) mod error;
pub(crate) mod report;

use std::{io, path::PathBuf, sync::Arc};

use clap::Parser;
use console::ConsoleReporter;
use error::ApplicationResult;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use runway_control::{schedule::load_schedule, simulation::Simulation};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Schedule file, one `<type> <arrival delay> <runway time>` line per aircraft
    schedule: PathBuf,
    #[clap(long, short)]
    /// Seed for the fuel reserves, makes runs reproducible
    seed: Option<u64>,
}

async fn run(cli: Cli) -> ApplicationResult<()> {
    let schedule = match cli.seed {
        Some(seed) => {
            debug!(seed, "seeding fuel reserves");
            load_schedule(&cli.schedule, &mut ChaCha8Rng::seed_from_u64(seed))?
        }
        None => load_schedule(&cli.schedule, &mut rand::thread_rng())?,
    };
    info!(path = %cli.schedule.display(), aircraft = schedule.len(), "schedule loaded");

    println!(
        "Starting runway simulation with {} aircraft ...",
        schedule.len()
    );
    let simulation = Simulation::new(Arc::new(ConsoleReporter::stdout()));
    let report = simulation.run(&schedule).await?;
    println!("Runway simulation done.");

    println!();
    report::write_summary(&mut io::stdout().lock(), &report)?;
    Ok(())
}

fn main() -> ApplicationResult<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let cli = Cli::parse();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
