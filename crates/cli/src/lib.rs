pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "frontdesk",
    about = "Frontdesk operator CLI",
    long_about = "Operate frontdesk readiness, config inspection, address validation, and transcript extraction.",
    after_help = "Examples:\n  frontdesk doctor --json\n  frontdesk config --strict\n  frontdesk address --street \"123 Main St\" --zip 43004\n  frontdesk extract --text 'All set. {\"patient_name\": \"Jane Doe\"}'"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config {
        #[arg(long, help = "Exit non-zero when the configuration does not validate")]
        strict: bool,
    },
    #[command(about = "Validate config, credential presence, and effect destination readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Validate one address against the verification service and print the verdict")]
    Address {
        #[arg(long, help = "Street line, e.g. \"123 Main St\"")]
        street: String,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long, value_name = "ZIPCODE")]
        zip: Option<String>,
    },
    #[command(about = "Run the intake payload extractor over assistant text and print the record")]
    Extract {
        #[arg(long, conflicts_with = "file", help = "Utterance text to extract from")]
        text: Option<String>,
        #[arg(help = "File containing the utterance text")]
        file: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config { strict } => commands::config::run(strict),
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Address { street, city, state, zip } => {
            commands::address::run(street, city, state, zip)
        }
        Command::Extract { text, file } => commands::extract::run(text, file),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
