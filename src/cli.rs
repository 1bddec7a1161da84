// File: ./src/cli.rs
//! Command-line surface of the `todo` binary: argument definitions, logger
//! setup and dispatch onto the controller.
use crate::config::Config;
use crate::context::{AppContext, StandardContext};
use crate::controller::{ListOptions, TodoController};
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "todo", version)]
#[command(about = "Manage a plain-text todo.txt task list")]
pub struct Cli {
    /// Use a different directory for config, data and logs
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Task file to operate on (overrides the config file)
    #[arg(long, global = true, env = "TODO_TXT_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show tasks as "[index]: line"
    List {
        /// Order by priority, A first
        #[arg(short, long)]
        sorted: bool,

        /// Only tasks whose line contains TEXT (case-sensitive)
        #[arg(short, long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Append a task; the words are joined with single spaces
    Add {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Mark a task done as of today
    Complete { index: usize },

    /// Remove a task; later tasks move up by one
    Delete { index: usize },

    /// Set a task's priority letter (A-Z)
    #[command(visible_aliases = ["prioritize", "pri"])]
    Prioritise { index: usize, priority: String },

    /// Remove a task's priority
    #[command(visible_aliases = ["deprioritize", "depri"])]
    Deprioritise { index: usize },

    /// Task totals and open tasks per priority
    Report,

    /// Print the config file and task file locations
    ConfigPath,
}

/// Stderr gets warnings (debug with `-v`); the log file under the cache
/// directory gets the configured level. Failing to open the log file only
/// costs the file logger.
pub fn init_logging(ctx: &dyn AppContext, config: &Config, verbose: bool) {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let file_level = config.log_level_filter();
    if file_level != LevelFilter::Off
        && let Some(path) = ctx.get_log_path()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(&path)
    {
        loggers.push(WriteLogger::new(
            file_level,
            simplelog::Config::default(),
            file,
        ));
    }

    // A logger may already be installed (tests running `run` twice).
    let _ = CombinedLogger::init(loggers);
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = StandardContext::new(cli.root.clone());
    let config = Config::load(&ctx)?;
    init_logging(&ctx, &config, cli.verbose);

    let path = config.resolve_todo_path(&ctx, cli.file.clone())?;
    log::debug!("Using todo file {:?}", path);
    let controller = TodoController::new(path);

    match cli.command {
        Command::List { sorted, filter } => {
            let options = ListOptions {
                sorted: sorted || config.sort_by_priority,
                filter: filter.as_deref(),
            };
            for line in controller.list(&options)? {
                println!("{}", line);
            }
        }
        Command::Add { text } => {
            controller.add(&text.join(" "))?;
        }
        Command::Complete { index } => controller.complete(index)?,
        Command::Delete { index } => {
            controller.delete(index)?;
        }
        Command::Prioritise { index, priority } => controller.prioritise(index, &priority)?,
        Command::Deprioritise { index } => controller.deprioritise(index)?,
        Command::Report => print!("{}", controller.report()?),
        Command::ConfigPath => {
            println!("config: {}", ctx.get_config_file_path()?.display());
            println!("tasks:  {}", controller.path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("todo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_flags() {
        let cli = parse(&["list", "-s", "-f", "Mom"]);
        assert_eq!(
            cli.command,
            Command::List {
                sorted: true,
                filter: Some("Mom".to_string())
            }
        );
    }

    #[test]
    fn test_add_joins_words() {
        let cli = parse(&["add", "(A)", "Call", "-", "Mom"]);
        match cli.command {
            Command::Add { text } => assert_eq!(text.join(" "), "(A) Call - Mom"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_prioritise_aliases() {
        for name in ["prioritise", "prioritize", "pri"] {
            let cli = parse(&[name, "3", "D"]);
            assert_eq!(
                cli.command,
                Command::Prioritise {
                    index: 3,
                    priority: "D".to_string()
                }
            );
        }
        assert_eq!(parse(&["depri", "2"]).command, Command::Deprioritise { index: 2 });
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["report", "--root", "/tmp/todo-root", "-v"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/todo-root")));
        assert!(cli.verbose);
        assert_eq!(cli.command, Command::Report);
    }

    #[test]
    fn test_negative_index_rejected() {
        assert!(Cli::try_parse_from(["todo", "complete", "-1"]).is_err());
    }
}
