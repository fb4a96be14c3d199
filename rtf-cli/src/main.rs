//! Command-line interface for rtf
//! This binary tokenizes an RTF file and prints the token stream in different formats.
//!
//! Usage:
//!   rtf `<path>` [--format `<format>`] [--config `<file>`] [--ignore `<word>`]... [--track `<spec>`]...
//!
//! Settings are read from the built-in defaults, the `--config` file and `RTF_*` environment
//! variables, in that order; flags win over all of them.
//! Logging goes to stderr and is controlled through `RUST_LOG` (e.g. `RUST_LOG=rtf_parser=debug`).

mod output;

use clap::{Arg, ArgAction, Command};
use rtf_config::{Loader, OutputFormat, RtfConfig};
use rtf_parser::rtf::lexing::TrackedWordOption;
use rtf_parser::rtf::loader::RtfLoader;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let matches = Command::new("rtf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting RTF token streams")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the rtf file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (token-simple, token-json, token-yaml, detokenize)")
                .value_parser(OutputFormat::NAMES),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("ignore")
                .long("ignore")
                .short('i')
                .help("Skip compounds opened by this control word (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("track")
                .long("track")
                .short('t')
                .help("Track a control word: WORD[:stackable][=DEFAULT] (repeatable)")
                .value_parser(clap::value_parser!(TrackedWordOption))
                .action(ArgAction::Append),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");

    let mut loader = Loader::new();
    if let Some(config_path) = matches.get_one::<String>("config") {
        loader = loader.with_file(config_path);
    }
    loader = loader.with_env();
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .unwrap_or_else(|e| exit_with("Invalid format", e));
    }
    let mut config = loader
        .build()
        .unwrap_or_else(|e| exit_with("Configuration error", e));

    if let Some(ignored) = matches.get_many::<String>("ignore") {
        config.tokenizer.ignored_compounds.extend(ignored.cloned());
    }
    if let Some(tracked) = matches.get_many::<TrackedWordOption>("track") {
        config.tokenizer.tracked.extend(tracked.cloned());
    }

    handle_tokenize_command(path, &config);
}

/// Tokenize `path` and print the result
fn handle_tokenize_command(path: &str, config: &RtfConfig) {
    tracing::debug!(path, format = ?config.output.format, "tokenizing");

    let tokens = RtfLoader::from_path(path)
        .and_then(|loader| loader.tokenize(&config.tokenizer))
        .unwrap_or_else(|e| exit_with("Tokenization error", e));

    let formatted = output::format_tokens(&tokens, config.output.format)
        .unwrap_or_else(|e| exit_with("Error formatting tokens", e));

    print!("{}", formatted);
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}
