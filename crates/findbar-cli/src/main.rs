//! `findbar`: check and exercise find-bar command lists from the shell.

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use findbar_core::{Catalog, FindBarConfig, FindBarSession, MatchOutcome, Suggestion};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HIGHLIGHT_PRE: &str = "[";
const HIGHLIGHT_POST: &str = "]";

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Command list (.toml, .yaml or .json)")
}

fn cli() -> Command {
    Command::new("findbar")
        .version(findbar_core::VERSION)
        .about("Find-bar command matcher")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level (RUST_LOG overrides)"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("check")
                .about("Validate a config and list its compiled commands")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("match")
                .about("Resolve input and print the outcome as JSON")
                .arg(config_arg())
                .arg(
                    Arg::new("scope")
                        .long("scope")
                        .help("Token of the command whose parameter is being entered"),
                )
                .arg(
                    Arg::new("input")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .help("Typed text"),
                ),
        )
        .subcommand(
            Command::new("suggest")
                .about("Print ranked suggestions for input")
                .arg(config_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(
                    Arg::new("input")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .help("Typed text"),
                ),
        )
        .subcommand(
            Command::new("repl")
                .about("Submit each stdin line to a find-bar session")
                .arg(config_arg()),
        )
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_catalog(args: &ArgMatches) -> Result<(FindBarConfig, Arc<Catalog>)> {
    let path = args
        .get_one::<PathBuf>("config")
        .ok_or_else(|| anyhow!("--config is required"))?;
    let config = FindBarConfig::load(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let catalog = config.build_catalog()?;
    tracing::info!(
        path = %path.display(),
        commands = catalog.snapshot().len(),
        "loaded command list"
    );
    Ok((config, Arc::new(catalog)))
}

fn joined_input(args: &ArgMatches) -> String {
    args.get_many::<String>("input")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn render_check(catalog: &Catalog) -> String {
    let set = catalog.snapshot();
    let width = set.iter().map(|c| c.token().len()).max().unwrap_or(0);
    let mut out = format!("{} command(s)\n", set.len());
    for command in set.iter() {
        let param = command
            .param()
            .map(|p| format!("  [{}: {}]", p.name, p.display))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<width$}  ^{}{}\n",
            command.token(),
            command.regexp(),
            param,
            width = width
        ));
    }
    out
}

fn render_suggestions(suggestions: &[Suggestion], input: &str) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            if suggestion.is_search() {
                format!("{i}. Search for: {input}")
            } else {
                format!(
                    "{i}. {}  ({})",
                    suggestion.highlighted(HIGHLIGHT_PRE, HIGHLIGHT_POST).trim_end(),
                    suggestion.command().token()
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn run_repl(config: &FindBarConfig, catalog: Arc<Catalog>) -> Result<()> {
    let mut session = FindBarSession::with_placeholder(catalog, config.placeholder.clone());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let scope = session.scope().map(|s| format!("{s} ")).unwrap_or_default();
        write!(stdout, "{scope}({})> ", session.placeholder())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        // Blank line on a scoped prompt leaves the scope
        if line.is_empty() && session.scope().is_some() {
            session.set_input_text("");
            session.dismiss();
            continue;
        }

        session.set_input_text(line);
        let outcome = session.submit();
        if let MatchOutcome::Dispatch { .. } | MatchOutcome::Search { .. } = outcome {
            writeln!(stdout, "{}", serde_json::to_string(&outcome)?)?;
        }
        if let MatchOutcome::Dispatch { .. } = outcome {
            session.set_input_text("");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("check", args)) => {
            let (_, catalog) = load_catalog(args)?;
            print!("{}", render_check(&catalog));
        }
        Some(("match", args)) => {
            let (_, catalog) = load_catalog(args)?;
            let scope = match args.get_one::<String>("scope") {
                Some(token) => Some(
                    catalog
                        .snapshot()
                        .scope_for(token)
                        .ok_or_else(|| anyhow!("unknown command token: {token}"))?,
                ),
                None => None,
            };
            let outcome = catalog.match_input(&joined_input(args), scope.as_ref());
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Some(("suggest", args)) => {
            let (_, catalog) = load_catalog(args)?;
            let input = joined_input(args);
            let suggestions = catalog.suggest(&input, None);
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(suggestions.as_slice())?);
            } else {
                println!("{}", render_suggestions(&suggestions, &input));
            }
        }
        Some(("repl", args)) => {
            let (config, catalog) = load_catalog(args)?;
            run_repl(&config, catalog)?;
        }
        _ => {}
    }
    Ok(())
}
