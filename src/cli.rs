use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;
use crate::runtime::index::{normalize_index, normalize_slice_bounds_optional};
use crate::runtime::stdlib::{BUILTINS, STRINGS};
use crate::runtime::{collect, Computation, GuestError, StepResult, Val, VM};

#[derive(Parser)]
#[command(name = "spindle")]
#[command(about = "Spindle - drive the runtime's built-in routines from the shell", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Join strings with a separator through Strings.join
    Join {
        /// Separator placed between items
        sep: String,

        /// Items to join
        items: Vec<String>,
    },

    /// Translate an element index against a container length
    Index {
        /// Container length
        len: usize,

        /// Requested index (negative counts from the end)
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Translate slice bounds against a container length
    Slice {
        /// Container length
        len: usize,

        /// Slice start (default: 0)
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// Slice end (default: len)
        #[arg(long, allow_negative_numbers = true)]
        end: Option<i64>,
    },

    /// Step a Builtins.range generator
    Range {
        #[arg(allow_negative_numbers = true)]
        start: i64,

        #[arg(allow_negative_numbers = true)]
        end: i64,

        /// Number of advance calls (default: until exhausted)
        #[arg(long)]
        take: Option<usize>,
    },

    /// Show the resolved platform configuration
    Platform,

    /// Show the effective runtime configuration as TOML
    Config,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

/// Install the tracing subscriber; RUST_LOG wins over the configured filter
pub fn init_tracing(config: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Report a guest error with its traceback and turn it into a host error
fn guest<T>(vm: &VM, result: std::result::Result<T, GuestError>) -> Result<T> {
    result.map_err(|e| {
        let report = json!({
            "error": e.info(),
            "traceback": vm.last_traceback(),
        });
        eprintln!("{}", report);
        anyhow!(e)
    })
}

/// Advance `take` times, or until the first `Exhausted` when `take` is unset
fn step_computation(
    vm: &mut VM,
    computation: &mut Computation,
    take: Option<usize>,
) -> std::result::Result<Vec<StepResult>, GuestError> {
    let mut steps = Vec::new();
    while take.map_or(true, |n| steps.len() < n) {
        let step = computation.advance(vm)?;
        let exhausted = step == StepResult::Exhausted;
        steps.push(step);
        if exhausted && take.is_none() {
            break;
        }
    }
    Ok(steps)
}

/// Internal function that handles CLI commands
fn run_cli_with_args(cli: Cli) -> Result<()> {
    // Load configuration before executing any command so config errors
    // surface immediately
    let config = RuntimeConfig::load(cli.config.as_deref())?;
    init_tracing(&config);

    let mut vm = VM::new(config);

    match cli.command {
        Commands::Join { sep, items } => {
            let list = Val::List(items.into_iter().map(Val::Str).collect());
            let call = vm.call(STRINGS, "join", vec![list, Val::Str(sep)]);
            let computation = guest(&vm, call)?;
            let result = collect(&mut vm, computation);
            let values = guest(&vm, result)?;
            for v in values {
                if let Val::Str(s) = v {
                    println!("{}", s);
                }
            }
        }

        Commands::Index { len, index } => {
            let i = guest(&vm, normalize_index(index, len))?;
            println!("{}", i);
        }

        Commands::Slice { len, start, end } => {
            let (i, j) = guest(&vm, normalize_slice_bounds_optional(start, end, len))?;
            println!("{} {}", i, j);
        }

        Commands::Range { start, end, take } => {
            let call = vm.call(BUILTINS, "range", vec![Val::Int(start), Val::Int(end)]);
            let mut computation = guest(&vm, call)?;
            let steps = step_computation(&mut vm, &mut computation, take);
            for step in guest(&vm, steps)? {
                match step {
                    StepResult::Produced(v) => println!("Produced({})", serde_json::to_string(&v)?),
                    StepResult::Exhausted => println!("Exhausted"),
                }
            }
        }

        Commands::Platform => {
            println!("{}", serde_json::to_string_pretty(vm.platform())?);
        }

        Commands::Config => {
            print!("{}", vm.config().to_toml()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_index() {
        let cli = Cli::try_parse_from(["spindle", "index", "5", "-1"]).expect("parse");
        match cli.command {
            Commands::Index { len, index } => {
                assert_eq!(len, 5);
                assert_eq!(index, -1);
            }
            _ => panic!("expected index command"),
        }
    }

    #[test]
    fn test_parse_slice_defaults() {
        let cli = Cli::try_parse_from(["spindle", "slice", "7"]).expect("parse");
        match cli.command {
            Commands::Slice { len, start, end } => {
                assert_eq!(len, 7);
                assert_eq!(start, None);
                assert_eq!(end, None);
            }
            _ => panic!("expected slice command"),
        }
    }

    fn range(vm: &mut VM, start: Val) -> Computation {
        vm.call(BUILTINS, "range", vec![start, Val::Int(3)])
            .expect("bind range")
    }

    #[test]
    fn test_take_zero_never_advances() {
        let mut vm = VM::new(RuntimeConfig::default());
        // A bad start argument only fails once the generator is advanced
        let mut computation = range(&mut vm, Val::from("a"));

        assert_eq!(step_computation(&mut vm, &mut computation, Some(0)), Ok(vec![]));
        assert!(!computation.is_started());
    }

    #[test]
    fn test_take_continues_past_exhaustion() {
        let mut vm = VM::new(RuntimeConfig::default());
        let mut computation = range(&mut vm, Val::Int(2));

        assert_eq!(
            step_computation(&mut vm, &mut computation, Some(3)),
            Ok(vec![
                StepResult::Produced(Val::Int(2)),
                StepResult::Exhausted,
                StepResult::Exhausted,
            ])
        );
    }

    #[test]
    fn test_without_take_stops_at_exhaustion() {
        let mut vm = VM::new(RuntimeConfig::default());
        let mut computation = range(&mut vm, Val::Int(1));

        assert_eq!(
            step_computation(&mut vm, &mut computation, None),
            Ok(vec![
                StepResult::Produced(Val::Int(1)),
                StepResult::Produced(Val::Int(2)),
                StepResult::Exhausted,
            ])
        );
    }

    #[test]
    fn test_parse_range_take() {
        let cli = Cli::try_parse_from(["spindle", "range", "-2", "2", "--take", "0"]).expect("parse");
        match cli.command {
            Commands::Range { start, end, take } => {
                assert_eq!((start, end), (-2, 2));
                assert_eq!(take, Some(0));
            }
            _ => panic!("expected range command"),
        }
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["spindle", "platform", "--config", "custom.toml"])
            .expect("parse");
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }
}
