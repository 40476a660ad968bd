//! Risk aversion calculator CLI
//!
//! Recovers the CRRA coefficient implied by a stated certainty equivalent.
//!
//! # Usage
//! ```bash
//! # Text report with the calculator defaults
//! crra-gamma --wce 20000 --p1 0.5 --gain 110 --loss 100
//!
//! # JSON report including the sampled utility-difference curve
//! crra-gamma --wce 20000 --p1 0.5 --gain 110 --loss 100 --json --curve
//!
//! # Wider search in wealth-normalized units
//! crra-gamma --wce 20000 --gain 150 --loss 100 --normalize-wealth --max-limit 4000
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crra_gamma::{
    CurvePoint, GammaError, GammaSolver, LotteryInput, SearchConfig, SolveResult,
};

#[derive(Parser)]
#[command(name = "crra-gamma")]
#[command(about = "Relative risk aversion (Gamma) implied by a certainty equivalent")]
#[command(version)]
struct Cli {
    /// Certainty equivalent value (Wce)
    #[arg(long, default_value = "20000")]
    wce: f64,

    /// Probability of winning, between 0 and 1
    #[arg(long, default_value = "0.5")]
    p1: f64,

    /// Gain amount if the lottery is won
    #[arg(long, default_value = "110", allow_hyphen_values = true)]
    gain: f64,

    /// Loss amount if the lottery is lost
    #[arg(long, default_value = "100", allow_hyphen_values = true)]
    loss: f64,

    /// Largest upper bound the bracket search may probe
    #[arg(long, default_value = "1000")]
    max_limit: f64,

    /// First upper bound probed before doubling
    #[arg(long, default_value = "10")]
    initial_upper_bound: f64,

    /// Search in units of Wce to avoid underflow at large Gamma
    #[arg(long, default_value = "false")]
    normalize_wealth: bool,

    /// Emit the report as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Include the sampled utility-difference curve
    #[arg(long, default_value = "false")]
    curve: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Serialize)]
struct Report<'a> {
    lottery: &'a LotteryInput,
    #[serde(flatten)]
    result: &'a SolveResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<Vec<CurvePoint>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(GammaError::NoRootFound { .. } | GammaError::NonConvergence { .. }) =
                err.downcast_ref::<GammaError>()
            {
                eprintln!("Could not find Gamma. Please check your inputs.");
            }
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let lottery = LotteryInput::new(cli.wce, cli.p1, cli.gain, cli.loss)
        .context("invalid lottery parameters")?;
    let config = SearchConfig::default()
        .with_max_limit(cli.max_limit)
        .with_initial_upper_bound(cli.initial_upper_bound)
        .with_normalized_wealth(cli.normalize_wealth);

    let solver = GammaSolver::new(lottery, config).context("invalid search configuration")?;
    let result = solver.solve()?;
    let curve = cli.curve.then(|| result.curve().collect::<Vec<_>>());

    if cli.json {
        let report = Report {
            lottery: &lottery,
            result: &result,
            curve,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_text(&result, curve.as_deref());
    Ok(())
}

fn print_text(result: &SolveResult, curve: Option<&[CurvePoint]>) {
    let u = &result.utilities;
    println!("Relative Risk Aversion Coefficient (Gamma) = {:.4}", result.gamma);
    println!("U(win)  = {:.6e}", u.u_win);
    println!("U(loss) = {:.6e}", u.u_loss);
    println!("U(lott) = {:.6e}", u.u_lottery);
    println!("U(Wce)  = {:.6e}", u.u_ce);
    println!();
    println!("Risk behavior: {}", result.behavior.description());
    println!(
        "Bracket [{}, {}] after {} probe(s), {} Brent iteration(s)",
        result.search.bracket.0,
        result.search.bracket.1,
        result.search.probed_upper_bounds.len(),
        result.search.root.iterations
    );

    if let Some(points) = curve {
        println!();
        println!("{:>14} {:>16}", "gamma", "U(lott) - U(Wce)");
        for point in points {
            println!("{:>14.6} {:>16.6e}", point.gamma, point.difference);
        }
    }
}
