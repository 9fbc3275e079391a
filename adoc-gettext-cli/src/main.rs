// Command-line interface for adoc-gettext
//
// This binary extracts translatable text from AsciiDoc documents and writes
// gettext POT catalogs.
//
// Usage:
//  adoc-gettext gettextize -m <master.adoc> [-p <output.pot>]
//
// Catalog metadata (package name, version, bug address) comes from an
// optional adoc-gettext.toml configuration file layered over built-in
// defaults; the corresponding flags override both.

use adoc_gettext::attributes::{all_builtins_attribute_filter, default_attribute_filter};
use adoc_gettext::blacklist::filter_extractions;
use adoc_gettext::catalog::{Catalog, HeaderInfo};
use adoc_gettext::{extract, ExtractOptions};
use adoc_gettext_config::{GettextConfig, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use regex::Regex;
use std::fs;
use std::process::exit;

fn build_cli() -> Command {
    Command::new("adoc-gettext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Gettext catalog tooling for AsciiDoc documents")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adoc-gettext.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("gettextize")
                .about("Extract translatable text from a master document into a POT catalog")
                .long_about(
                    "Parse the master AsciiDoc document, extract its translatable text in\n\
                    document order and write a gettext POT catalog.\n\n\
                    Examples:\n  \
                    adoc-gettext gettextize -m book.adoc                # POT to stdout\n  \
                    adoc-gettext gettextize -m book.adoc -p book.pot    # POT to file\n  \
                    adoc-gettext gettextize -m book.adoc -a lang=en     # preset attribute",
                )
                .arg(
                    Arg::new("master")
                        .long("master")
                        .short('m')
                        .help("Master AsciiDoc document to extract from")
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("po")
                        .long("po")
                        .short('p')
                        .help("Output POT file (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("attribute")
                        .long("attribute")
                        .short('a')
                        .value_name("NAME=VALUE")
                        .help("Set a document attribute before parsing (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("ignore")
                        .long("ignore")
                        .short('i')
                        .value_name("REGEX")
                        .help("Drop extracted lines matching this pattern (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("no-builtin-attrs")
                        .long("no-builtin-attrs")
                        .help("Leave builtin attribute labels (Note, Table of Contents, ...) out of the catalog")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("package-name")
                        .long("package-name")
                        .value_name("NAME")
                        .help("Package name for the Project-Id-Version header"),
                )
                .arg(
                    Arg::new("package-version")
                        .long("package-version")
                        .value_name("VERSION")
                        .help("Package version for the Project-Id-Version header"),
                )
                .arg(
                    Arg::new("bugs-email-address")
                        .long("bugs-email-address")
                        .value_name("ADDRESS")
                        .help("Address for the Report-Msgid-Bugs-To header"),
                ),
        )
}

fn load_config(matches: &ArgMatches, sub: &ArgMatches) -> GettextConfig {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("adoc-gettext.toml"),
    };
    let overrides = [
        ("package-name", "catalog.package_name"),
        ("package-version", "catalog.package_version"),
        ("bugs-email-address", "catalog.bugs_email_address"),
    ];
    for (flag, key) in overrides {
        if let Some(value) = sub.get_one::<String>(flag) {
            loader = match loader.set_override(key, value.as_str()) {
                Ok(loader) => loader,
                Err(e) => {
                    eprintln!("Error applying --{flag}: {e}");
                    exit(1);
                }
            };
        }
    }
    if sub.get_flag("no-builtin-attrs") {
        loader = match loader.set_override("extract.builtin_attrs", false) {
            Ok(loader) => loader,
            Err(e) => {
                eprintln!("Error applying --no-builtin-attrs: {e}");
                exit(1);
            }
        };
    }
    match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            exit(1);
        }
    }
}

fn parse_attribute_args(sub: &ArgMatches) -> Vec<(String, String)> {
    let mut attributes = Vec::new();
    for arg in sub
        .get_many::<String>("attribute")
        .unwrap_or_default()
        .cloned()
    {
        let Some((name, value)) = arg.split_once('=') else {
            eprintln!("Error in --attribute \"{arg}\", format must be \"name=value\"");
            exit(1);
        };
        if name.is_empty() {
            eprintln!("Error in --attribute \"{arg}\", missing name");
            exit(1);
        }
        attributes.push((name.to_string(), value.to_string()));
    }
    attributes
}

fn parse_ignore_patterns(sub: &ArgMatches, config: &GettextConfig) -> Vec<Regex> {
    let mut patterns = Vec::new();
    let from_config = config.extract.ignore.iter().cloned();
    let from_flags = sub
        .get_many::<String>("ignore")
        .unwrap_or_default()
        .cloned();
    for pattern in from_config.chain(from_flags) {
        match Regex::new(&pattern) {
            Ok(re) => patterns.push(re),
            Err(_) => {
                eprintln!("Error in --ignore regular expression \"{pattern}\"");
                exit(1);
            }
        }
    }
    patterns
}

fn gettextize(matches: &ArgMatches, sub: &ArgMatches) {
    let config = load_config(matches, sub);
    let attributes = parse_attribute_args(sub);
    let patterns = parse_ignore_patterns(sub, &config);

    let master = sub.get_one::<String>("master").cloned().unwrap_or_default();
    let source = match fs::read_to_string(&master) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {master}: {e}");
            exit(1);
        }
    };

    let options = ExtractOptions {
        attribute_filter: Some(if config.extract.builtin_attrs {
            default_attribute_filter
        } else {
            all_builtins_attribute_filter
        }),
        attributes,
    };
    let extractions = match extract(&source, &options) {
        Ok(extractions) => extractions,
        Err(e) => {
            eprintln!("Error processing {master}: {e}");
            exit(1);
        }
    };
    let extractions = filter_extractions(extractions, &patterns);

    let header: HeaderInfo = (&config.catalog).into();
    let pot = Catalog::from_extractions(extractions, header).to_pot();

    match sub.get_one::<String>("po") {
        Some(path) => {
            if let Err(e) = fs::write(path, pot) {
                eprintln!("Error writing {path}: {e}");
                exit(1);
            }
        }
        None => print!("{pot}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    match matches.subcommand() {
        Some(("gettextize", sub)) => gettextize(&matches, sub),
        _ => {
            // subcommand_required makes this unreachable via clap.
            eprintln!("No command given");
            exit(1);
        }
    }
}
