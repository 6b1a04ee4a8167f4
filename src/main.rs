use analytics::{ScenarioAnalysis, StandardMetricsInput};
use anyhow::{Context, Result};
use calculators::{evaluate, CalculationRequest, Calculator, LoanCalculator, LoanInput, ValidationError};
use clap::{Args, Parser, Subcommand};
use configuration::{init_logging, load_request, load_settings, LogLevel, Settings};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

mod render;

/// The main entry point for the bizcalc application.
fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Rejected input is an expected outcome, not a crash.
            if let Some(invalid) = e.downcast_ref::<ValidationError>() {
                eprintln!("Calculation rejected: {invalid}");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings: Settings =
        load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }
    let _guard = init_logging(&settings.logging).context("Failed to initialise logging")?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "bizcalc starting");

    // Execute the appropriate command
    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Scenarios(args) => handle_scenarios(args, &settings),
        Commands::Amortize(args) => handle_amortize(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Financial calculators for small businesses.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML or JSON). `BIZCALC__*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set. Overrides the settings file.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a calculation request file.
    Run(RunArgs),
    /// Run standard metrics under worst, base and best revenue scenarios.
    Scenarios(RunArgs),
    /// Print a loan summary and its amortization schedule.
    Amortize(AmortizeArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Request file (TOML or JSON), tagged with `calculator = "..."` for `run`.
    #[arg(long)]
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct AmortizeArgs {
    /// Amount borrowed.
    #[arg(long)]
    principal: Decimal,

    /// Nominal annual interest rate, percent.
    #[arg(long)]
    rate: Decimal,

    /// Term in months.
    #[arg(long)]
    term: u32,

    /// Monthly revenue, for the affordability check.
    #[arg(long, requires = "expenses")]
    revenue: Option<Decimal>,

    /// Monthly expenses, for the affordability check.
    #[arg(long, requires = "revenue")]
    expenses: Option<Decimal>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Print the result as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_run(args: RunArgs) -> Result<()> {
    let request: CalculationRequest = load_request(&args.input)
        .with_context(|| format!("Failed to read request from {:?}", args.input))?;

    let report = evaluate(&request)?;
    render::print(&report, args.output.json)
}

fn handle_scenarios(args: RunArgs, settings: &Settings) -> Result<()> {
    let input: StandardMetricsInput = load_request(&args.input)
        .with_context(|| format!("Failed to read project from {:?}", args.input))?;

    let analysis = ScenarioAnalysis::run(&input, settings.scenarios.multipliers())?;
    render::print_comparison(
        &[
            ("worst", &analysis.worst),
            ("base", &analysis.base),
            ("best", &analysis.best),
        ],
        args.output.json,
    )
}

fn handle_amortize(args: AmortizeArgs) -> Result<()> {
    let input = LoanInput {
        principal: args.principal,
        annual_interest_rate: args.rate,
        term_months: args.term,
        monthly_revenue: args.revenue,
        monthly_expenses: args.expenses,
    };

    let result = LoanCalculator::new().calculate(&input)?;
    render::print(&result, args.output.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_amortize_with_global_flags() {
        let cli = Cli::try_parse_from([
            "bizcalc", "amortize", "--principal", "100000", "--rate", "8.5", "--term", "60",
            "--json", "--log-level", "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        match cli.command {
            Commands::Amortize(args) => {
                assert_eq!(args.principal, Decimal::from(100000));
                assert_eq!(args.term, 60);
                assert!(args.output.json);
            }
            _ => panic!("expected amortize"),
        }
    }

    #[test]
    fn affordability_needs_both_figures() {
        let result = Cli::try_parse_from([
            "bizcalc", "amortize", "--principal", "1000", "--rate", "5", "--term", "12",
            "--revenue", "5000",
        ]);
        assert!(result.is_err());
    }
}
