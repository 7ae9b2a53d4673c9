//! esg-readiness: ESG self-assessment and readiness scoring tool
//!
//! Replays assessment answers against a framework, estimates readiness
//! locally and reconciles results from the external analysis service.

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use esg_readiness::{
    cli,
    config::{AppConfig, ConfigPreset, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with framework info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nBuilt-in Frameworks:",
        "\n  nsrf: National Sustainability Reporting Framework",
        "\n  iesg: i-ESG Operational Excellence",
        "\n\nOutput Formats:",
        "\n  summary, json"
    )
}

#[derive(Parser)]
#[command(name = "esg-readiness")]
#[command(version, long_version = build_long_version())]
#[command(about = "ESG self-assessment and readiness scoring tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Overall score below --min-score
    3  Error occurred

EXAMPLES:
    # Estimate readiness locally from an answer sheet
    esg-readiness assess answers.yaml

    # Submit for analysis, failing CI below the progressing band
    esg-readiness submit answers.yaml -o json --min-score 50

    # Inspect the request that would be sent
    esg-readiness request answers.yaml

    # Re-read a saved service response
    esg-readiness interpret response.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration preset (default, offline, ci-cd)
    #[arg(long, global = true)]
    preset: Option<String>,

    /// Framework definitions (YAML or JSON) replacing the built-in set
    #[arg(long, global = true, env = "ESG_READINESS_FRAMEWORKS")]
    frameworks: Option<PathBuf>,

    /// Mapping tables (YAML) replacing the built-in set
    #[arg(long, global = true, env = "ESG_READINESS_MAPPINGS")]
    mappings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Output arguments shared by report-producing subcommands
#[derive(Parser)]
struct OutputArgs {
    /// Output format (auto detects TTY: summary if interactive, json otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if the overall score is below this value (0-100)
    #[arg(long)]
    min_score: Option<f64>,
}

/// Arguments for the `assess` subcommand
#[derive(Parser)]
struct AssessArgs {
    /// Answer sheet (YAML or JSON)
    answers: PathBuf,

    /// List every criterion under its category
    #[arg(long)]
    criteria: bool,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `submit` subcommand
#[derive(Parser)]
struct SubmitArgs {
    /// Answer sheet (YAML or JSON)
    answers: PathBuf,

    /// Analysis service endpoint
    #[arg(long, env = "ESG_READINESS_ENDPOINT")]
    endpoint: Option<String>,

    /// API key sent as x-api-key
    #[arg(long, env = "ESG_READINESS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Do not call the service; report local scores
    #[arg(long)]
    offline: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered frameworks
    Frameworks {
        /// Output format
        #[arg(short, long, default_value = "auto")]
        output: ReportFormat,
    },

    /// Estimate readiness locally from an answer sheet
    Assess(AssessArgs),

    /// Print the normalized request for an answer sheet
    Request {
        /// Answer sheet (YAML or JSON)
        answers: PathBuf,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Interpret a saved analysis service response (`-` for stdin)
    Interpret {
        /// Response body file
        response: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Submit an answer sheet for analysis, with local fallback
    Submit(SubmitArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the JSON schema of the configuration file
    ConfigSchema {
        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },

    /// Print a commented example configuration file
    ExampleConfig,
}

/// Config layer built from global flags and subcommand arguments.
fn cli_overrides(cli: &Cli) -> AppConfig {
    let mut builder = AppConfig::builder()
        .frameworks_file(cli.frameworks.clone())
        .mappings_file(cli.mappings.clone())
        .no_color(cli.no_color)
        .quiet(cli.quiet);

    let output = match &cli.command {
        Commands::Assess(args) => Some(&args.output),
        Commands::Interpret { output, .. } => Some(output),
        Commands::Submit(args) => Some(&args.output),
        _ => None,
    };
    if let Some(output) = output {
        builder = builder
            .output_format(output.output)
            .output_file(output.output_file.clone())
            .min_score(output.min_score);
    }

    match &cli.command {
        Commands::Frameworks { output } => builder = builder.output_format(*output),
        Commands::Request { output_file, .. } => {
            builder = builder.output_file(output_file.clone());
        }
        Commands::Submit(args) => {
            if let Some(endpoint) = &args.endpoint {
                builder = builder.analysis_endpoint(endpoint.clone());
            }
            if let Some(timeout) = args.timeout {
                builder = builder.analysis_timeout_secs(timeout);
            }
            if args.offline {
                builder = builder.analysis_enabled(false);
            }
        }
        _ => {}
    }

    let mut config = builder.build();
    if let Commands::Submit(args) = &cli.command {
        config.analysis.api_key.clone_from(&args.api_key);
    }
    config
}

/// Resolve the effective configuration: preset or file, then CLI overrides.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let overrides = cli_overrides(cli);

    let config = match &cli.preset {
        Some(name) => {
            let Some(preset) = ConfigPreset::from_name(name) else {
                let valid: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                bail!("Unknown preset '{name}'. Valid options: {}", valid.join(", "));
            };
            let mut config = AppConfig::from_preset(preset);
            config.merge(&overrides);
            config
        }
        None => {
            let (config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }
            config
        }
    };

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "esg-readiness", &mut io::stdout());
            return Ok(exit_codes::SUCCESS);
        }
        Commands::ConfigSchema { output } => {
            let schema = esg_readiness::config::generate_json_schema()
                .context("Failed to serialize config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            return Ok(exit_codes::SUCCESS);
        }
        Commands::ExampleConfig => {
            print!("{}", esg_readiness::config::generate_example_config());
            return Ok(exit_codes::SUCCESS);
        }
        _ => {}
    }

    let config = resolve_config(cli)?;

    match &cli.command {
        Commands::Frameworks { .. } => cli::run_frameworks(&config),
        Commands::Assess(args) => cli::run_assess(&config, &args.answers, args.criteria),
        Commands::Request { answers, .. } => cli::run_request(&config, answers),
        Commands::Interpret { response, .. } => cli::run_interpret(&config, response),
        Commands::Submit(args) => cli::run_submit(&config, &args.answers),
        Commands::Completions { .. } | Commands::ConfigSchema { .. } | Commands::ExampleConfig => {
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "esg_readiness=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}
