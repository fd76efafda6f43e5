use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use frontdesk_agent::address::{AddressAuthority, AddressServiceError, SmartyAddressClient};
use frontdesk_agent::{intake_registry, CompletionDetector, IntakeRuntime, ToolRegistry};
use frontdesk_core::config::{AppConfig, ConfigError, LoadOptions};
use frontdesk_core::FieldPolicy;
use frontdesk_notify::{Archive, IntakeDispatcher, JsonArchive, Mailer, NotifyError, SmtpNotifier};
use frontdesk_voice::{AssistantTurnHandler, EventDispatcher, SessionRunner};

use crate::pipeline::IntakePipeline;

pub struct Application {
    pub config: AppConfig,
    pub tools: ToolRegistry,
    pub session_runner: SessionRunner,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("address client setup failed: {0}")]
    Address(#[from] AddressServiceError),
    #[error("mail relay setup failed: {0}")]
    Mail(#[from] NotifyError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(
        event_name = "frontdesk.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Wires the session components from an already-validated configuration:
/// address validator behind the tool registry, completion runtime, the
/// configured side effects behind the dispatcher, and the intake pipeline
/// registered as the session's assistant-turn subscriber.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let authority: Arc<dyn AddressAuthority> =
        Arc::new(SmartyAddressClient::from_config(&config.address)?);
    let tools = intake_registry(authority);

    let mailer: Option<Arc<dyn Mailer>> = if config.dispatch.notify {
        Some(Arc::new(SmtpNotifier::from_config(&config.mail)?))
    } else {
        None
    };
    let archive: Option<Arc<dyn Archive>> = if config.dispatch.archive {
        Some(Arc::new(JsonArchive::new(&config.dispatch.archive_path)))
    } else {
        None
    };
    let policy = FieldPolicy::new(config.dispatch.required_fields.clone());
    let dispatcher = Arc::new(IntakeDispatcher::new(mailer, archive, policy));

    let runtime = IntakeRuntime::new(CompletionDetector::new(config.session.sentinels.clone()));
    let pipeline = IntakePipeline::new(runtime, dispatcher);

    let mut events = EventDispatcher::new();
    events.register(AssistantTurnHandler::new(pipeline));
    let session_runner = SessionRunner::idle(events, config.session.greeting.clone());

    info!(
        event_name = "frontdesk.bootstrap.components_wired",
        correlation_id = "bootstrap",
        notify = config.dispatch.notify,
        archive = config.dispatch.archive,
        sentinel_count = config.session.sentinels.len(),
        "session components wired"
    );

    Ok(Application { config, tools, session_runner })
}
