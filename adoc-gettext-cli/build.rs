use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the surface in src/main.rs. Build scripts can't access src/
// modules, so the completion command is declared again here.
fn completion_cli() -> Command {
    Command::new("adoc-gettext")
        .about("Gettext catalog tooling for AsciiDoc documents")
        .arg_required_else_help(true)
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
                .arg(
                    Arg::new("master")
                        .long("master")
                        .short('m')
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("po")
                        .long("po")
                        .short('p')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("attribute")
                        .long("attribute")
                        .short('a')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("ignore")
                        .long("ignore")
                        .short('i')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("no-builtin-attrs")
                        .long("no-builtin-attrs")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("package-name").long("package-name"))
                .arg(Arg::new("package-version").long("package-version"))
                .arg(Arg::new("bugs-email-address").long("bugs-email-address")),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = completion_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "adoc-gettext", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "adoc-gettext", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "adoc-gettext", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
