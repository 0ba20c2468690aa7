//! Slot allocation CLI.
//!
//! Generate scenarios, run a single strategy, or compare strategies on
//! identical inputs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_reserve::allocation::StrategyKind;
use u_reserve::config::SimulationConfig;
use u_reserve::harness::{run_strategy, AllocationReport, Harness};

#[derive(Parser)]
#[command(name = "u-reserve")]
#[command(about = "Compare greedy slot allocation strategies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Args, Debug, Default)]
struct ScenarioArgs {
    /// Lowest slot value
    #[arg(long)]
    lo: Option<i64>,
    /// Highest slot value
    #[arg(long)]
    hi: Option<i64>,
    /// Number of applicants
    #[arg(short, long)]
    applicants: Option<usize>,
    /// Requested slots per applicant
    #[arg(short, long)]
    requests: Option<usize>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every strategy on the same scenario and compare.
    Compare {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Strategies (comma-separated): random_order, scarcity_first, conflict_graph_greedy
        #[arg(short, long)]
        strategies: Option<String>,
        /// Number of independent scenarios
        #[arg(short, long)]
        trials: Option<usize>,
        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a single strategy and print the reservation table.
    Run {
        /// Strategy: random_order, scarcity_first, conflict_graph_greedy
        #[arg(short, long, default_value = "random_order")]
        strategy: StrategyKind,
        #[command(flatten)]
        scenario: ScenarioArgs,
    },

    /// Generate and display a scenario.
    Generate {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
}

impl ScenarioArgs {
    fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(lo) = self.lo {
            config.lo = lo;
        }
        if let Some(hi) = self.hi {
            config.hi = hi;
        }
        if let Some(applicants) = self.applicants {
            config.applicants = applicants;
        }
        if let Some(requests) = self.requests {
            config.requests_per_applicant = requests;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
    }
}

fn parse_strategies(s: &str) -> Result<Vec<StrategyKind>> {
    s.split(',')
        .map(|name| name.parse::<StrategyKind>().map_err(anyhow::Error::from))
        .collect()
}

/// Base configuration: the file if given, otherwise `fallback`.
fn load_config(path: Option<&PathBuf>, fallback: SimulationConfig) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(fallback),
    }
}

/// Defaults of the single-strategy runs: `[0, 1200]` with 1000 applicants.
fn single_run_defaults() -> SimulationConfig {
    SimulationConfig::default()
        .with_range(0, 1200)
        .with_applicants(1000)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare {
            scenario,
            strategies,
            trials,
            output,
        } => {
            let mut config = scenario.apply(load_config(cli.config.as_ref(), SimulationConfig::default())?);
            if let Some(list) = strategies {
                config.strategies = parse_strategies(&list)?;
            }
            if let Some(trials) = trials {
                config.trials = trials;
            }

            let harness = Harness::from_config(&config)?;
            let mut rng = config.rng();
            let summary = harness.compare_trials(config.trials, &mut rng)?;

            for report in &summary.reports {
                println!("{report}");
            }
            if summary.trials > 1 {
                println!("{summary}");
            }

            if let Some(path) = output {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let json = serde_json::to_string_pretty(&summary)?;
                fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "wrote results");
            }
        }

        Commands::Run { strategy, scenario } => {
            let config = scenario
                .apply(load_config(cli.config.as_ref(), single_run_defaults())?)
                .with_strategies(vec![strategy]);
            let harness = Harness::from_config(&config)?;
            let mut rng = config.rng();

            let generated = harness.generate(&mut rng)?;
            println!("Slotspace: {}", generated.space);
            println!("Applications: {}", generated.len());

            let allocator = strategy.build();
            let (result, applicants) = run_strategy(allocator.as_ref(), &generated, &mut rng)?;
            println!("\nReserved slots:\n{}\n", AllocationReport::from_applicants(&applicants));
            println!(
                "{} finished in {:.4} ms",
                allocator.description(),
                result.elapsed_ms
            );
        }

        Commands::Generate { scenario } => {
            let config = scenario.apply(load_config(cli.config.as_ref(), SimulationConfig::default())?);
            let harness = Harness::from_config(&config)?;
            let mut rng = config.rng();
            let generated = harness.generate(&mut rng)?;

            println!("Slotspace: {}", generated.space);
            for applicant in &generated.applicants {
                println!("{applicant}");
            }
        }
    }

    Ok(())
}
