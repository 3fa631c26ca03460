use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glucotrack_sim::config::{generate_default_config, Config, LoggingConfig};
use glucotrack_sim::constants::TREND_READING_RANGE;
use glucotrack_sim::dashboard::{render, DashboardState, Page};
use glucotrack_sim::invariants;
use glucotrack_sim::logic::{checked_classify, tone_for};
use glucotrack_sim::simulator;
use glucotrack_sim::source::RandomReadingSource;
use glucotrack_sim::types::PolicyVariant;

#[derive(Parser)]
#[command(name = "glucotrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Simulated glucose-monitoring dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single reading (mg/dL)
    Classify {
        #[arg(allow_negative_numbers = true)]
        reading: f64,
        /// insights or alert; both when omitted
        #[arg(short, long)]
        policy: Option<PolicyVariant>,
    },

    /// Render one dashboard page
    Render {
        /// home, device-settings, data-insights, reports, settings or profile
        page: Page,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run many render cycles and check invariants
    Simulate {
        #[arg(long)]
        cycles: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print every cycle
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "glucotrack_sim={level},glucotrack={level}",
            level = logging.level
        ))
    });
    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Warnings raised while loading config go to stderr before the
    // configured subscriber exists.
    let bootstrap = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Config::load_default().context("loading default config"),
    })?;
    init_tracing(&config.logging);

    let policies = config.thresholds.policies()?;

    match cli.command {
        Commands::Classify { reading, policy } => {
            let selected = match policy {
                Some(PolicyVariant::Insights) => vec![policies.insights],
                Some(PolicyVariant::AlertSidebar) => vec![policies.alert],
                None => vec![policies.insights, policies.alert],
            };
            for policy in selected {
                let c = checked_classify(reading, &policy)?;
                println!(
                    "{:<14} {} {}",
                    policy.variant.to_string(),
                    tone_for(c.severity),
                    c
                );
            }
        }

        Commands::Render { page, seed } => {
            let seed = seed.or(config.simulation.seed).unwrap_or_else(time_seed);
            tracing::info!(?page, seed, "rendering");
            let state = DashboardState {
                page,
                profile: config.profile.to_profile()?,
                policies,
                ..DashboardState::default()
            };
            let mut live = RandomReadingSource::seeded(seed, config.simulation.range())?;
            let mut trend =
                RandomReadingSource::seeded(seed.wrapping_add(1), TREND_READING_RANGE)?;
            println!("{}", render(&state, &mut live, &mut trend)?);
        }

        Commands::Simulate {
            cycles,
            seed,
            verbose,
        } => {
            let cycles = cycles.unwrap_or(config.simulation.cycles);
            let seed = seed.or(config.simulation.seed).unwrap_or_else(time_seed);

            println!("GlucoTrack Simulator");
            println!("====================");
            println!("Insights band:      {}", policies.insights.band);
            println!("Alert-sidebar band: {}", policies.alert.band);
            println!("Running {} cycles (seed: {})", cycles, seed);
            println!("Checking invariants:");
            for (name, _) in invariants::ALL_INVARIANTS {
                println!("  - {}", name);
            }

            let result = simulator::run_simulation(
                cycles,
                seed,
                verbose,
                &policies,
                config.simulation.range(),
            )?;
            println!("{}", result);
            if result.violation.is_some() {
                std::process::exit(1);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote default config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}
