//! Visualize one flow.
//!
//! Without `--flow` the command prompts for a menu choice on stdin, and for
//! the two formulas when the custom flow is chosen without `--u`/`--v`.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use flowlines::selection::{Fallback, CUSTOM_KEY};
use flowlines::{visualize, CustomFormulas, FlowSelector, VisualizationConfig};
use tracing::{info, warn};

/// Arguments for `run`.
#[derive(Args)]
pub struct RunArgs {
    /// Menu key of the flow (1-5); prompts when omitted
    #[arg(short, long)]
    pub flow: Option<String>,

    /// Formula for u(x,y) when --flow 5
    #[arg(long, allow_hyphen_values = true)]
    pub u: Option<String>,

    /// Formula for v(x,y) when --flow 5
    #[arg(long, allow_hyphen_values = true)]
    pub v: Option<String>,

    /// Streamline grid points per axis
    #[arg(long, default_value = "200")]
    pub resolution: usize,

    /// Pathline steps
    #[arg(long, default_value = "800")]
    pub pathline_steps: usize,

    /// Streakline ticks
    #[arg(long, default_value = "500")]
    pub streak_steps: usize,

    /// Time step for pathlines and streaklines
    #[arg(long, default_value = "0.01")]
    pub dt: f64,
}

/// Run the `run` command.
pub fn execute(args: RunArgs) -> Result<()> {
    let selector = FlowSelector::default();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let choice = match &args.flow {
        Some(flow) => flow.clone(),
        None => {
            println!("Select a flow type:");
            for (key, label) in selector.menu() {
                println!("{key}. {label}");
            }
            prompt(&mut input, "Enter choice (1-5): ")?
        }
    };

    let formulas = if choice.trim() == CUSTOM_KEY {
        custom_formulas(&args, &mut input)?
    } else {
        None
    };

    let selected = selector.select(&choice, formulas.as_ref());
    match &selected.fallback {
        Some(Fallback::InvalidChoice { .. }) => {
            println!("Invalid choice, defaulting to {}", selected.flow.name());
        }
        Some(Fallback::CompileFailed(e)) => {
            println!("Could not parse expressions. Error: {e}");
            println!("Falling back to {}.", selected.flow.name());
        }
        Some(Fallback::MissingFormulas) => {
            println!("No formulas given. Falling back to {}.", selected.flow.name());
        }
        None => {}
    }

    let mut config = VisualizationConfig::default();
    config.grid.resolution = args.resolution;
    config.pathlines.steps = args.pathline_steps;
    config.pathlines.dt = args.dt;
    config.streaklines.steps = args.streak_steps;
    config.streaklines.dt = args.dt;

    info!(flow = selected.flow.name(), "running visualization");
    let report = visualize(&selected.flow, &config)
        .with_context(|| format!("visualizing {}", selected.flow.name()))?;
    println!("{report}");
    if !report.is_complete() {
        warn!(
            failed = report.failures().len(),
            "some stages did not complete"
        );
    }
    Ok(())
}

fn custom_formulas(args: &RunArgs, input: &mut impl BufRead) -> Result<Option<CustomFormulas>> {
    if let (Some(u), Some(v)) = (&args.u, &args.v) {
        return Ok(Some(CustomFormulas::new(u, v)));
    }
    println!("Enter formulas for u(x,y) and v(x,y)");
    println!("Examples: '-y', 'x/(x**2+y**2)', 'np.sin(x)*y'");
    let u = prompt(input, "u(x,y) = ")?;
    let v = prompt(input, "v(x,y) = ")?;
    if u.is_empty() || v.is_empty() {
        return Ok(None);
    }
    Ok(Some(CustomFormulas::new(u, v)))
}

/// Print `label`, read one line, and return it trimmed. End of input yields
/// an empty string.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    input.read_line(&mut line).context("reading from stdin")?;
    Ok(line.trim().to_string())
}
