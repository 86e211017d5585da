//! `axon`: reads a definition graph as JSON on stdin and either evaluates
//! or statically analyzes it (spec §6.6).

use anyhow::{Context, Result};
use axon_eval::{EvalOptions, Layer, Value};
use axon_types::TypeArena;
use clap::{Parser, ValueEnum};
use std::cell::Cell;
use std::io::Read;
use std::rc::Rc;

/// Evaluator and static type analyzer for axon definition graphs.
#[derive(Parser, Debug)]
#[command(name = "axon", version, about = "Evaluator and static type analyzer for axon definition graphs")]
struct CliArgs {
    /// Which phase to run over the definition graph read from stdin (default: evaluate).
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Abort evaluation after this many reduction steps (unset: unbounded).
    #[arg(long = "halt-after")]
    halt_after: Option<u64>,

    /// Increase log verbosity; repeat for more detail (-v, -vv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging output.
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Evaluate,
    Analyze,
}

fn init_tracing(args: &CliArgs) {
    let default_level = if args.quiet {
        "off"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args);

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).context("reading definition graph from stdin")?;

    let layer: Layer = match serde_json::from_str(&input) {
        Ok(layer) => layer,
        Err(err) => {
            tracing::error!(%err, "failed to parse definition graph");
            eprintln!("error: invalid definition graph: {err}");
            std::process::exit(1);
        }
    };
    let layers = vec![Rc::new(layer)];

    match args.mode.unwrap_or(Mode::Evaluate) {
        Mode::Evaluate => run_evaluate(layers, args.halt_after),
        Mode::Analyze => run_analyze(layers),
    }

    Ok(())
}

fn run_evaluate(layers: Vec<Rc<Layer>>, halt_after: Option<u64>) {
    let steps = Cell::new(0u64);
    let should_halt = move || match halt_after {
        None => false,
        Some(budget) => {
            steps.set(steps.get() + 1);
            steps.get() > budget
        }
    };

    let results = axon_runtime::evaluate_all_program(layers, |_| Value::Null, should_halt, EvalOptions::default());
    for (id, result) in results {
        match result {
            Ok(value) => println!("{id} -> {value:?}"),
            Err(err) => {
                tracing::warn!(%id, %err, "evaluation failed");
                println!("{id} -> error ({err})");
            }
        }
    }
}

fn run_analyze(layers: Vec<Rc<Layer>>) {
    let mut arena = TypeArena::new();
    let results = axon_runtime::analyze_all_program(&mut arena, layers, |_| None);
    for (id, result) in results {
        match result {
            Ok(report) => {
                let sig = axon_types::signature(&arena, report.ty);
                let mut tags: Vec<String> = report.def_types.iter().map(|tag| format!("{tag:?}")).collect();
                tags.sort();
                let mut used: Vec<String> = report.std_usage.iter().map(|id| id.to_string()).collect();
                used.sort();
                println!("{id} :: {sig}");
                println!("  defTypes: [{}]", tags.join(", "));
                println!("  stdUsage: [{}]", used.join(", "));
            }
            Err(err) => {
                tracing::warn!(%id, kind = %err.kind, path = %err.path, "analysis failed");
                println!("{id} :: error ({})", err.kind);
            }
        }
    }
}
