//! restcheck CLI - contract checks against live REST APIs

mod storage;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use restcheck_core::config::Config;
use restcheck_core::report::Reporter;
use restcheck_core::schema::generate_schema;
use restcheck_runner::suites;
use restcheck_runner::{Suite, SuiteRunner};

#[derive(Parser)]
#[command(name = "restcheck")]
#[command(about = "Contract checks against live REST APIs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "terminal")]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in suites
    Run {
        /// Suites to run (default: all). Repeatable.
        #[arg(short, long)]
        suite: Vec<String>,

        /// Config file (default: .restcheck.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Run cases in parallel
        #[arg(long)]
        parallel: bool,

        /// Seed for generated payloads (reproducible fixtures)
        #[arg(long)]
        seed: Option<u64>,

        /// Whole-run deadline in seconds
        #[arg(long)]
        deadline_secs: Option<u64>,

        /// Skip report persistence for this run
        #[arg(long)]
        no_report: bool,
    },

    /// List suites and their case counts
    List {
        /// Config file (default: .restcheck.toml)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize config file
    Init,

    /// Export JSON Schema for the summary format
    Schema,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Terminal,
    Json,
    Silent,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn load_config(path: Option<&str>) -> Result<Config> {
    Ok(match path {
        Some(path) => Config::load(std::path::Path::new(path))?,
        None => Config::load_default()?,
    })
}

/// Select suites by name, keeping the built-in order.
fn select_suites(mut all: Vec<Suite>, wanted: &[String]) -> Result<Vec<Suite>> {
    if wanted.is_empty() {
        return Ok(all);
    }
    let available: Vec<String> = all.iter().map(|s| s.name().to_string()).collect();
    for name in wanted {
        if !available.contains(name) {
            anyhow::bail!(
                "unknown suite \"{name}\" (available: {})",
                available.join(", ")
            );
        }
    }
    all.retain(|s| wanted.iter().any(|w| w == s.name()));
    Ok(all)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Run {
            suite,
            config,
            parallel,
            seed,
            deadline_secs,
            no_report,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            if parallel {
                cfg.parallel = true;
            }
            if let Some(seed) = seed {
                cfg.seed = Some(seed);
            }
            if let Some(secs) = deadline_secs {
                cfg.deadline_ms = Some(secs.saturating_mul(1000));
            }

            let selected = select_suites(suites::all(&cfg), &suite)?;
            let runner = SuiteRunner::from_config(&cfg)?;

            if cli.output != OutputFormat::Silent {
                eprintln!("Config:");
                eprintln!(
                    "  suites:   {}",
                    selected
                        .iter()
                        .map(Suite::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                eprintln!("  parallel: {}", cfg.parallel);
                eprintln!("  timeout:  {} ms", cfg.timeout_ms);
                eprintln!("  seed:     {}", runner.seed());
                eprintln!();
            }

            let reporter = Reporter::new();
            let run_start = Instant::now();
            for suite in &selected {
                runner.run(suite, &reporter)?;
            }
            let duration_secs = run_start.elapsed().as_secs_f64();
            let summary = reporter.on_suite_end()?;

            match cli.output {
                OutputFormat::Terminal => {
                    println!("\n{}", summary.to_terminal());
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                OutputFormat::Silent => {}
            }

            // Persist report unless opted out (CLI flag or config)
            if !no_report && cfg.report {
                let report_data = storage::ReportData {
                    config: &cfg,
                    summary: &summary,
                    seed: runner.seed(),
                    duration_secs,
                };
                match storage::save_report(&report_data) {
                    Ok(path) => {
                        if cli.output != OutputFormat::Silent {
                            eprintln!("Report saved: {}", path.display());
                        }
                    }
                    Err(e) => eprintln!("Warning: failed to save report: {e}"),
                }
            }

            Ok(if summary.all_passed() { 0 } else { 1 })
        }

        Commands::List { config } => {
            let cfg = load_config(config.as_deref())?;
            for suite in suites::all(&cfg) {
                println!("{} ({} cases)", suite.name(), suite.len());
            }
            Ok(0)
        }

        Commands::Init => {
            let config_path = ".restcheck.toml";
            if std::path::Path::new(config_path).exists() {
                eprintln!("{config_path} already exists");
                return Ok(1);
            }

            std::fs::write(config_path, Config::example())?;
            println!("Created {config_path}");
            println!("\nEdit the file to configure:");
            println!("  - base URLs of the services under check");
            println!("  - timeout_ms: per-request timeout ceiling");
            println!("  - seed: fix it for reproducible payloads");
            println!("  - parallel: run cases concurrently");
            Ok(0)
        }

        Commands::Schema => {
            println!("{}", generate_schema());
            Ok(0)
        }
    }
}
