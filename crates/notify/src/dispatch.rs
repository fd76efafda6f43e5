use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use frontdesk_core::{ApplicationError, DomainError, FieldPolicy, IntakeRecord};

use crate::archive::Archive;
use crate::email::Mailer;

/// Outcome of one configured effect within a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectStatus {
    Delivered,
    Failed(ApplicationError),
    Disabled,
}

impl EffectStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport {
    pub notification: EffectStatus,
    pub persistence: EffectStatus,
}

impl DispatchReport {
    pub fn all_succeeded(&self) -> bool {
        !self.notification.is_failed() && !self.persistence.is_failed()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Effects were attempted; the report carries each effect's status.
    Dispatched(DispatchReport),
    /// This session already dispatched. A no-op signal, not an error.
    AlreadyDispatched,
}

/// Fans a completed intake record out to the configured effects, at most
/// once per session.
///
/// Ordering matters: the already-dispatched marker is checked first, the
/// record contract second, and the marker is only consumed once effects are
/// actually attempted. A record that fails the field policy leaves the
/// marker clear so a later corrected record can still dispatch. Effects run
/// independently; a mail failure never blocks the archive write, and neither
/// failure escapes this call.
pub struct IntakeDispatcher {
    mailer: Option<Arc<dyn Mailer>>,
    archive: Option<Arc<dyn Archive>>,
    policy: FieldPolicy,
    dispatched: AtomicBool,
}

impl IntakeDispatcher {
    pub fn new(
        mailer: Option<Arc<dyn Mailer>>,
        archive: Option<Arc<dyn Archive>>,
        policy: FieldPolicy,
    ) -> Self {
        Self { mailer, archive, policy, dispatched: AtomicBool::new(false) }
    }

    pub fn has_dispatched(&self) -> bool {
        self.dispatched.load(Ordering::SeqCst)
    }

    pub async fn dispatch(&self, record: &IntakeRecord) -> Result<DispatchOutcome, DomainError> {
        if self.has_dispatched() {
            return Ok(DispatchOutcome::AlreadyDispatched);
        }

        self.policy.validate(record)?;

        if self
            .dispatched
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(DispatchOutcome::AlreadyDispatched);
        }

        let notification = match &self.mailer {
            None => EffectStatus::Disabled,
            Some(mailer) => match mailer.send_summary(record).await {
                Ok(()) => EffectStatus::Delivered,
                Err(error) => {
                    let error = ApplicationError::Notification(error.to_string());
                    warn!(
                        event_name = "frontdesk.dispatch.notification_failed",
                        class = error.class(),
                        error = %error,
                        "notification effect failed; session continues"
                    );
                    EffectStatus::Failed(error)
                }
            },
        };

        let persistence = match &self.archive {
            None => EffectStatus::Disabled,
            Some(archive) => match archive.store(record).await {
                Ok(()) => EffectStatus::Delivered,
                Err(error) => {
                    let error = ApplicationError::Persistence(error.to_string());
                    warn!(
                        event_name = "frontdesk.dispatch.persistence_failed",
                        class = error.class(),
                        error = %error,
                        "persistence effect failed; session continues"
                    );
                    EffectStatus::Failed(error)
                }
            },
        };

        let report = DispatchReport { notification, persistence };
        info!(
            event_name = "frontdesk.intake.dispatched",
            field_count = record.len(),
            clean = report.all_succeeded(),
            "intake record dispatched"
        );
        Ok(DispatchOutcome::Dispatched(report))
    }
}
