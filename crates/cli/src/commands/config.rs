use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use frontdesk_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

use super::CommandResult;

pub fn run(strict: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            let message = format!("config validation failed: {error}");
            if strict {
                return CommandResult::failure("config", "config_validation", message, 2);
            }
            return CommandResult { exit_code: 0, output: message };
        }
    };

    CommandResult { exit_code: 0, output: render(&config) }
}

fn render(config: &AppConfig) -> String {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_key: &str| {
        field_source(key_path, env_key, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "llm.model",
        &config.llm.model,
        source("llm.model", "FRONTDESK_LLM_MODEL"),
    ));
    lines.push(render_line(
        "llm.api_key",
        redact_secret(config.llm.api_key.expose_secret()),
        source("llm.api_key", "FRONTDESK_LLM_API_KEY"),
    ));
    lines.push(render_line(
        "transcription.model",
        &config.transcription.model,
        source("transcription.model", "FRONTDESK_TRANSCRIPTION_MODEL"),
    ));
    lines.push(render_line(
        "transcription.api_key",
        redact_secret(config.transcription.api_key.expose_secret()),
        source("transcription.api_key", "FRONTDESK_TRANSCRIPTION_API_KEY"),
    ));
    lines.push(render_line(
        "speech.voice",
        &config.speech.voice,
        source("speech.voice", "FRONTDESK_SPEECH_VOICE"),
    ));

    lines.push(render_line(
        "address.auth_id",
        redact_secret(config.address.auth_id.expose_secret()),
        source("address.auth_id", "FRONTDESK_ADDRESS_AUTH_ID"),
    ));
    lines.push(render_line(
        "address.auth_token",
        redact_secret(config.address.auth_token.expose_secret()),
        source("address.auth_token", "FRONTDESK_ADDRESS_AUTH_TOKEN"),
    ));
    lines.push(render_line(
        "address.base_url",
        &config.address.base_url,
        source("address.base_url", "FRONTDESK_ADDRESS_BASE_URL"),
    ));
    lines.push(render_line(
        "address.timeout_secs",
        &config.address.timeout_secs.to_string(),
        source("address.timeout_secs", "FRONTDESK_ADDRESS_TIMEOUT_SECS"),
    ));

    lines.push(render_line(
        "mail.username",
        redact_secret(config.mail.username.expose_secret()),
        source("mail.username", "FRONTDESK_MAIL_USERNAME"),
    ));
    lines.push(render_line(
        "mail.password",
        redact_secret(config.mail.password.expose_secret()),
        source("mail.password", "FRONTDESK_MAIL_PASSWORD"),
    ));
    lines.push(render_line(
        "mail.host",
        &format!("{}:{}", config.mail.host, config.mail.port),
        source("mail.host", "FRONTDESK_MAIL_HOST"),
    ));
    lines.push(render_line(
        "mail.recipients",
        &config.mail.recipients.join(", "),
        source("mail.recipients", "FRONTDESK_MAIL_RECIPIENTS"),
    ));

    lines.push(render_line(
        "dispatch.notify",
        &config.dispatch.notify.to_string(),
        source("dispatch.notify", "FRONTDESK_DISPATCH_NOTIFY"),
    ));
    lines.push(render_line(
        "dispatch.archive",
        &config.dispatch.archive.to_string(),
        source("dispatch.archive", "FRONTDESK_DISPATCH_ARCHIVE"),
    ));
    lines.push(render_line(
        "dispatch.archive_path",
        &config.dispatch.archive_path.display().to_string(),
        source("dispatch.archive_path", "FRONTDESK_DISPATCH_ARCHIVE_PATH"),
    ));
    lines.push(render_line(
        "dispatch.required_fields",
        &config.dispatch.required_fields.join(", "),
        source("dispatch.required_fields", "FRONTDESK_DISPATCH_REQUIRED_FIELDS"),
    ));

    lines.push(render_line(
        "session.greeting",
        &config.session.greeting,
        source("session.greeting", "FRONTDESK_SESSION_GREETING"),
    ));
    lines.push(render_line(
        "session.sentinels",
        &config.session.sentinels.join(" | "),
        source("session.sentinels", "FRONTDESK_SESSION_SENTINELS"),
    ));

    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        source("server.bind_address", "FRONTDESK_SERVER_BIND_ADDRESS"),
    ));
    lines.push(render_line(
        "server.health_check_port",
        &config.server.health_check_port.to_string(),
        source("server.health_check_port", "FRONTDESK_SERVER_HEALTH_CHECK_PORT"),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", "FRONTDESK_LOGGING_LEVEL"),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", "FRONTDESK_LOGGING_FORMAT"),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("frontdesk.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/frontdesk.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var_os(env_key).is_some() {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_secret(value: &str) -> &'static str {
    if value.trim().is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
