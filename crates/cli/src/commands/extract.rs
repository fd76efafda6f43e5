use std::fs;
use std::path::PathBuf;

use frontdesk_agent::extract;

use super::CommandResult;

pub fn run(text: Option<String>, file: Option<PathBuf>) -> CommandResult {
    let utterance = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                return CommandResult::failure(
                    "extract",
                    "io",
                    format!("could not read `{}`: {error}", path.display()),
                    2,
                );
            }
        },
        (None, None) => {
            return CommandResult::failure(
                "extract",
                "usage",
                "provide an utterance via --text or a file path",
                2,
            );
        }
    };

    match extract::extract(&utterance) {
        Ok(record) => {
            let output = serde_json::to_string_pretty(&record)
                .unwrap_or_else(|error| format!("record serialization failed: {error}"));
            CommandResult { exit_code: 0, output }
        }
        Err(error) => CommandResult::failure("extract", error.class(), error.to_string(), 1),
    }
}
