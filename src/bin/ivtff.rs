//! Command-line interface for ivtff
//! This binary parses an IVTFF transliteration file and prints its pages in one of the
//! registered output formats.
//!
//! Usage:
//!   ivtff `<path>` [--format `<format>`] [--config `<file>`] [--strict | --report] [--merge-duplicates]
//!   ivtff --list-formats                                    - List all available output formats
//!
//! Logging goes to stderr and is controlled through `RUST_LOG` (default: warn).

use clap::{Arg, ArgAction, ArgMatches, Command};
use ivtff::ivtff::config::{ConfigError, IvtffConfig, Loader};
use ivtff::ivtff::formats::FormatRegistry;
use ivtff::ivtff::parser::{CandidatePolicy, DuplicateHeaderPolicy, Parser};

fn main() {
    init_logging();

    let matches = Command::new("ivtff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse IVTFF manuscript transliterations into page-indexed text")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the transliteration file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from configuration: json)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on lines that are neither comment, locus nor page header")
                .action(ArgAction::SetTrue)
                .conflicts_with("report"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Print diagnostics for dropped lines and undecoded codes to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("merge-duplicates")
                .long("merge-duplicates")
                .help("Keep page text when a page header appears again")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let path = matches
        .get_one::<String>("path")
        .expect("path is required unless listing formats");

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    handle_parse_command(path, &config);
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build the configuration: defaults, then the user file, then command-line flags
fn load_config(matches: &ArgMatches) -> Result<IvtffConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.file(file);
    }
    if matches.get_flag("strict") {
        loader = loader.header_candidates(CandidatePolicy::Reject);
    }
    if matches.get_flag("report") {
        loader = loader.header_candidates(CandidatePolicy::Report);
    }
    if matches.get_flag("merge-duplicates") {
        loader = loader.duplicate_headers(DuplicateHeaderPolicy::Merge);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.format(format.as_str());
    }
    loader.load()
}

/// Handle the parse command
fn handle_parse_command(path: &str, config: &IvtffConfig) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    let parser = Parser::new(config.parse_options());
    let report = parser.parse(&source).unwrap_or_else(|e| {
        eprintln!("{}", e.render(&source));
        std::process::exit(1);
    });

    if config.parser.header_candidates == CandidatePolicy::Report {
        for diagnostic in &report.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    let output = FormatRegistry::builtin()
        .render(&report.pages, &config.output.format)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    print!("{}", output);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:");
    for (name, description) in FormatRegistry::builtin().catalog() {
        println!("  {:<6} {}", name, description);
    }
}
