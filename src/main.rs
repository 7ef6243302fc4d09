use clap::{Parser, Subcommand};
use nmlegis::prelude::*;
use nmlegis::{reference, render};
use serde::Serialize;
use std::io::{self, BufRead};

/// Parse and normalize New Mexico Legislature bill action strings
#[derive(Parser, Debug)]
#[command(name = "nmlegis")]
#[command(about = "Parse, date and expand NM Legislature action codes")]
#[command(version)]
struct Args {
    /// Output format: json (one document per line) or text
    #[arg(long, global = true, default_value = "json", value_parser = ["json", "text"])]
    format: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an action string into classified actions, status and summary
    Parse {
        /// Action string, e.g. "[1] HPREF-HAFC-DP-PASSED/H (54-2)"
        actions: Option<String>,

        /// Read one action string per line from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Convert an action string into dated history items
    History {
        /// Action string, e.g. "[1] HJC-DP [5] PASSED/H (60-8)"
        actions: Option<String>,

        /// Calendar date of legislative day 1 (YYYY-MM-DD)
        #[arg(long, env = "NMLEGIS_SESSION_START")]
        session_start: String,

        /// Chamber of origin: H or S
        #[arg(long, env = "NMLEGIS_CHAMBER", default_value = "H")]
        chamber: String,

        /// Read one action string per line from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Expand codes in action text into plain English
    Expand {
        /// Raw or human-readable action text
        text: String,
    },

    /// List known action and committee codes
    Codes {
        /// Only show codes whose code or description contains this term
        #[arg(long)]
        search: Option<String>,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  parse     Parse an action string into classified actions");
    println!("  history   Convert an action string into dated history items");
    println!("  expand    Expand codes in action text into plain English");
    println!("  codes     List known action and committee codes");
}

/// Inputs from the positional argument or, with `--stdin`, one per line
fn inputs(arg: Option<String>, stdin: bool) -> anyhow::Result<Vec<String>> {
    if stdin {
        let lines = io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()?;
        return Ok(lines.into_iter().filter(|line| !line.trim().is_empty()).collect());
    }
    arg.map(|a| vec![a])
        .ok_or_else(|| anyhow::anyhow!("missing action string (pass one or use --stdin)"))
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

fn run_parse_command(format: OutputFormat, cmd: Command) -> anyhow::Result<()> {
    let Command::Parse { actions, stdin } = cmd else {
        unreachable!()
    };

    for line in inputs(actions, stdin)? {
        emit(format, &parse(&line), render::parsed_actions)?;
    }
    Ok(())
}

fn run_history_command(format: OutputFormat, cmd: Command) -> anyhow::Result<()> {
    let Command::History {
        actions,
        session_start,
        chamber,
        stdin,
    } = cmd
    else {
        unreachable!()
    };

    let config = ConfigBuilder::new()
        .session_start_str(&session_start)?
        .chamber_str(&chamber)?
        .output(format)
        .build()?;

    for line in inputs(actions, stdin)? {
        let items = normalize_actions(&line, config.session_start, config.origin_chamber);
        tracing::debug!(items = items.len(), "normalized history");
        emit(config.output, &items, |items| render::history(items))?;
    }
    Ok(())
}

fn run_expand_command(format: OutputFormat, cmd: Command) -> anyhow::Result<()> {
    let Command::Expand { text } = cmd else {
        unreachable!()
    };

    emit(format, &expand(&text), render::expanded)
}

fn run_codes_command(format: OutputFormat, cmd: Command) -> anyhow::Result<()> {
    let Command::Codes { search } = cmd else {
        unreachable!()
    };

    let codes = match search.as_deref() {
        Some(term) => reference::search_codes(term),
        None => get_all_codes(),
    };
    emit(format, &codes, render::codes)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let format: OutputFormat = args.format.parse()?;

    match args.command {
        Some(cmd @ Command::Parse { .. }) => run_parse_command(format, cmd),
        Some(cmd @ Command::History { .. }) => run_history_command(format, cmd),
        Some(cmd @ Command::Expand { .. }) => run_expand_command(format, cmd),
        Some(cmd @ Command::Codes { .. }) => run_codes_command(format, cmd),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
