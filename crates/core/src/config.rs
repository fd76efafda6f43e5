use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub transcription: TranscriptionConfig,
    pub speech: SpeechConfig,
    pub address: AddressConfig,
    pub mail: MailConfig,
    pub dispatch: DispatchConfig,
    pub session: SessionConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: SecretString,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct TranscriptionConfig {
    pub api_key: SecretString,
    pub model: String,
}

/// Text-to-speech settings handed to the external runtime; the runtime loads
/// its own credential, so none is required here.
#[derive(Clone, Debug)]
pub struct SpeechConfig {
    pub voice: String,
}

#[derive(Clone, Debug)]
pub struct AddressConfig {
    pub auth_id: SecretString,
    pub auth_token: SecretString,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub username: SecretString,
    pub password: SecretString,
    pub host: String,
    pub port: u16,
    pub from: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct DispatchConfig {
    pub notify: bool,
    pub archive: bool,
    pub archive_path: PathBuf,
    pub required_fields: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub greeting: String,
    pub sentinels: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub health_check_port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub llm_model: Option<String>,
    pub dispatch_notify: Option<bool>,
    pub dispatch_archive: Option<bool>,
    pub archive_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

pub const DEFAULT_GREETING: &str = "Hello! I will help you get checked in. Let's begin.";

/// Sentinels the assistant is scripted to emit verbatim once the intake is
/// wrapped up. Both deployment scripts are covered by default.
pub const DEFAULT_SENTINELS: [&str; 2] =
    ["Your appointment has been scheduled", "Here is the summary of your request"];

pub const DEFAULT_REQUIRED_FIELDS: [&str; 3] = ["patient_name", "doctor_name", "appointment_time"];

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig { api_key: String::new().into(), model: "gpt-4o".to_string() },
            transcription: TranscriptionConfig {
                api_key: String::new().into(),
                model: "nova-2".to_string(),
            },
            speech: SpeechConfig { voice: "sonic-english".to_string() },
            address: AddressConfig {
                auth_id: String::new().into(),
                auth_token: String::new().into(),
                base_url: "https://us-street.api.smarty.com/street-address".to_string(),
                timeout_secs: 10,
            },
            mail: MailConfig {
                username: String::new().into(),
                password: String::new().into(),
                host: "smtp.gmail.com".to_string(),
                port: 587,
                from: "no-reply@yourdomain.com".to_string(),
                recipients: vec![
                    "jeff@assorthealth.com".to_string(),
                    "connor@assorthealth.com".to_string(),
                    "cole@assorthealth.com".to_string(),
                ],
                subject: "New Appointment Intake".to_string(),
                timeout_secs: 15,
            },
            dispatch: DispatchConfig {
                notify: true,
                archive: false,
                archive_path: PathBuf::from("output.json"),
                required_fields: DEFAULT_REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect(),
            },
            session: SessionConfig {
                greeting: DEFAULT_GREETING.to_string(),
                sentinels: DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect(),
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                health_check_port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("frontdesk.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(llm) = patch.llm {
            if let Some(api_key_value) = llm.api_key {
                self.llm.api_key = secret_value(api_key_value);
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
        }

        if let Some(transcription) = patch.transcription {
            if let Some(api_key_value) = transcription.api_key {
                self.transcription.api_key = secret_value(api_key_value);
            }
            if let Some(model) = transcription.model {
                self.transcription.model = model;
            }
        }

        if let Some(speech) = patch.speech {
            if let Some(voice) = speech.voice {
                self.speech.voice = voice;
            }
        }

        if let Some(address) = patch.address {
            if let Some(auth_id_value) = address.auth_id {
                self.address.auth_id = secret_value(auth_id_value);
            }
            if let Some(auth_token_value) = address.auth_token {
                self.address.auth_token = secret_value(auth_token_value);
            }
            if let Some(base_url) = address.base_url {
                self.address.base_url = base_url;
            }
            if let Some(timeout_secs) = address.timeout_secs {
                self.address.timeout_secs = timeout_secs;
            }
        }

        if let Some(mail) = patch.mail {
            if let Some(username_value) = mail.username {
                self.mail.username = secret_value(username_value);
            }
            if let Some(password_value) = mail.password {
                self.mail.password = secret_value(password_value);
            }
            if let Some(host) = mail.host {
                self.mail.host = host;
            }
            if let Some(port) = mail.port {
                self.mail.port = port;
            }
            if let Some(from) = mail.from {
                self.mail.from = from;
            }
            if let Some(recipients) = mail.recipients {
                self.mail.recipients = recipients;
            }
            if let Some(subject) = mail.subject {
                self.mail.subject = subject;
            }
            if let Some(timeout_secs) = mail.timeout_secs {
                self.mail.timeout_secs = timeout_secs;
            }
        }

        if let Some(dispatch) = patch.dispatch {
            if let Some(notify) = dispatch.notify {
                self.dispatch.notify = notify;
            }
            if let Some(archive) = dispatch.archive {
                self.dispatch.archive = archive;
            }
            if let Some(archive_path) = dispatch.archive_path {
                self.dispatch.archive_path = PathBuf::from(archive_path);
            }
            if let Some(required_fields) = dispatch.required_fields {
                self.dispatch.required_fields = required_fields;
            }
        }

        if let Some(session) = patch.session {
            if let Some(greeting) = session.greeting {
                self.session.greeting = greeting;
            }
            if let Some(sentinels) = session.sentinels {
                self.session.sentinels = sentinels;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(health_check_port) = server.health_check_port {
                self.server.health_check_port = health_check_port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FRONTDESK_LLM_API_KEY") {
            self.llm.api_key = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_LLM_MODEL") {
            self.llm.model = value;
        }

        if let Some(value) = read_env("FRONTDESK_TRANSCRIPTION_API_KEY") {
            self.transcription.api_key = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_TRANSCRIPTION_MODEL") {
            self.transcription.model = value;
        }

        if let Some(value) = read_env("FRONTDESK_SPEECH_VOICE") {
            self.speech.voice = value;
        }

        if let Some(value) = read_env("FRONTDESK_ADDRESS_AUTH_ID") {
            self.address.auth_id = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_ADDRESS_AUTH_TOKEN") {
            self.address.auth_token = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_ADDRESS_BASE_URL") {
            self.address.base_url = value;
        }
        if let Some(value) = read_env("FRONTDESK_ADDRESS_TIMEOUT_SECS") {
            self.address.timeout_secs = parse_u64("FRONTDESK_ADDRESS_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("FRONTDESK_MAIL_USERNAME") {
            self.mail.username = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_PASSWORD") {
            self.mail.password = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_HOST") {
            self.mail.host = value;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_PORT") {
            self.mail.port = parse_u16("FRONTDESK_MAIL_PORT", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_FROM") {
            self.mail.from = value;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_RECIPIENTS") {
            self.mail.recipients = split_list(&value);
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_SUBJECT") {
            self.mail.subject = value;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_TIMEOUT_SECS") {
            self.mail.timeout_secs = parse_u64("FRONTDESK_MAIL_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("FRONTDESK_DISPATCH_NOTIFY") {
            self.dispatch.notify = parse_bool("FRONTDESK_DISPATCH_NOTIFY", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_DISPATCH_ARCHIVE") {
            self.dispatch.archive = parse_bool("FRONTDESK_DISPATCH_ARCHIVE", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_DISPATCH_ARCHIVE_PATH") {
            self.dispatch.archive_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("FRONTDESK_DISPATCH_REQUIRED_FIELDS") {
            self.dispatch.required_fields = split_list(&value);
        }

        if let Some(value) = read_env("FRONTDESK_SESSION_GREETING") {
            self.session.greeting = value;
        }
        if let Some(value) = read_env("FRONTDESK_SESSION_SENTINELS") {
            self.session.sentinels = split_list(&value);
        }

        if let Some(value) = read_env("FRONTDESK_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("FRONTDESK_SERVER_HEALTH_CHECK_PORT") {
            self.server.health_check_port =
                parse_u16("FRONTDESK_SERVER_HEALTH_CHECK_PORT", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("FRONTDESK_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("FRONTDESK_LOGGING_LEVEL").or_else(|| read_env("FRONTDESK_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("FRONTDESK_LOGGING_FORMAT").or_else(|| read_env("FRONTDESK_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm.model = llm_model;
        }
        if let Some(notify) = overrides.dispatch_notify {
            self.dispatch.notify = notify;
        }
        if let Some(archive) = overrides.dispatch_archive {
            self.dispatch.archive = archive;
        }
        if let Some(archive_path) = overrides.archive_path {
            self.dispatch.archive_path = archive_path;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_llm(&self.llm)?;
        validate_transcription(&self.transcription)?;
        validate_address(&self.address)?;
        validate_dispatch(&self.dispatch)?;
        validate_mail(&self.mail, self.dispatch.notify)?;
        validate_session(&self.session)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("frontdesk.toml"), PathBuf::from("config/frontdesk.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if llm.api_key.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "llm.api_key is required (set FRONTDESK_LLM_API_KEY)".to_string(),
        ));
    }
    if llm.model.trim().is_empty() {
        return Err(ConfigError::Validation("llm.model must not be empty".to_string()));
    }
    Ok(())
}

fn validate_transcription(transcription: &TranscriptionConfig) -> Result<(), ConfigError> {
    if transcription.api_key.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "transcription.api_key is required (set FRONTDESK_TRANSCRIPTION_API_KEY)".to_string(),
        ));
    }
    if transcription.model.trim().is_empty() {
        return Err(ConfigError::Validation("transcription.model must not be empty".to_string()));
    }
    Ok(())
}

fn validate_address(address: &AddressConfig) -> Result<(), ConfigError> {
    if address.auth_id.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "address.auth_id is required (set FRONTDESK_ADDRESS_AUTH_ID)".to_string(),
        ));
    }
    if address.auth_token.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "address.auth_token is required (set FRONTDESK_ADDRESS_AUTH_TOKEN)".to_string(),
        ));
    }
    if !address.base_url.starts_with("http://") && !address.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "address.base_url must start with http:// or https://".to_string(),
        ));
    }
    if address.timeout_secs == 0 || address.timeout_secs > 60 {
        return Err(ConfigError::Validation(
            "address.timeout_secs must be in range 1..=60".to_string(),
        ));
    }
    Ok(())
}

fn validate_mail(mail: &MailConfig, notify_enabled: bool) -> Result<(), ConfigError> {
    if mail.timeout_secs == 0 || mail.timeout_secs > 120 {
        return Err(ConfigError::Validation(
            "mail.timeout_secs must be in range 1..=120".to_string(),
        ));
    }

    // Relay credentials and a recipient list are only needed when the
    // notification effect is switched on; archive-only deployments run
    // without them.
    if !notify_enabled {
        return Ok(());
    }

    if mail.username.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "mail.username is required when dispatch.notify is enabled (set FRONTDESK_MAIL_USERNAME)"
                .to_string(),
        ));
    }
    if mail.password.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "mail.password is required when dispatch.notify is enabled (set FRONTDESK_MAIL_PASSWORD)"
                .to_string(),
        ));
    }
    if mail.host.trim().is_empty() {
        return Err(ConfigError::Validation("mail.host must not be empty".to_string()));
    }
    if mail.port == 0 {
        return Err(ConfigError::Validation("mail.port must be greater than zero".to_string()));
    }
    if !mail.from.contains('@') {
        return Err(ConfigError::Validation(
            "mail.from must be a plain email address".to_string(),
        ));
    }
    if mail.recipients.is_empty() {
        return Err(ConfigError::Validation(
            "mail.recipients must list at least one address when dispatch.notify is enabled"
                .to_string(),
        ));
    }
    for recipient in &mail.recipients {
        if !recipient.contains('@') {
            return Err(ConfigError::Validation(format!(
                "mail.recipients entry `{recipient}` is not an email address"
            )));
        }
    }
    Ok(())
}

fn validate_dispatch(dispatch: &DispatchConfig) -> Result<(), ConfigError> {
    if !dispatch.notify && !dispatch.archive {
        return Err(ConfigError::Validation(
            "at least one of dispatch.notify and dispatch.archive must be enabled".to_string(),
        ));
    }
    if dispatch.archive && dispatch.archive_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "dispatch.archive_path must not be empty when dispatch.archive is enabled".to_string(),
        ));
    }
    for field in &dispatch.required_fields {
        if field.trim().is_empty() {
            return Err(ConfigError::Validation(
                "dispatch.required_fields must not contain blank names".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_session(session: &SessionConfig) -> Result<(), ConfigError> {
    if session.sentinels.is_empty() {
        return Err(ConfigError::Validation(
            "session.sentinels must list at least one completion phrase".to_string(),
        ));
    }
    for sentinel in &session.sentinels {
        if sentinel.trim().is_empty() {
            return Err(ConfigError::Validation(
                "session.sentinels must not contain blank phrases".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.health_check_port == 0 {
        return Err(ConfigError::Validation(
            "server.health_check_port must be greater than zero".to_string(),
        ));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty()).map(String::from).collect()
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    llm: Option<LlmPatch>,
    transcription: Option<TranscriptionPatch>,
    speech: Option<SpeechPatch>,
    address: Option<AddressPatch>,
    mail: Option<MailPatch>,
    dispatch: Option<DispatchPatch>,
    session: Option<SessionPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TranscriptionPatch {
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SpeechPatch {
    voice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AddressPatch {
    auth_id: Option<String>,
    auth_token: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct MailPatch {
    username: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    from: Option<String>,
    recipients: Option<Vec<String>>,
    subject: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct DispatchPatch {
    notify: Option<bool>,
    archive: Option<bool>,
    archive_path: Option<String>,
    required_fields: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct SessionPatch {
    greeting: Option<String>,
    sentinels: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    health_check_port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
