use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::debug;

use frontdesk_core::config::MailConfig;
use frontdesk_core::IntakeRecord;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification message could not be built: {0}")]
    Compose(String),
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Outbound notification seam. The dispatcher only needs "send one summary
/// for this record"; tests substitute a recording fake.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_summary(&self, record: &IntakeRecord) -> Result<(), NotifyError>;
}

/// Plain-text body of the notification. Appointment records get the
/// one-sentence summary; any other field shape falls back to one line per
/// field so richer deployments still produce a readable message.
pub fn summary_text(record: &IntakeRecord) -> String {
    let patient = record.field_text("patient_name");
    let doctor = record.field_text("doctor_name");
    let time = record.field_text("appointment_time");

    if let (Some(patient), Some(doctor), Some(time)) = (patient, doctor, time) {
        return format!("{patient} has scheduled an appointment with {doctor} on {time}.");
    }

    record
        .as_object()
        .iter()
        .map(|(key, _)| {
            let value = record.field_text(key).unwrap_or_else(|| "<none>".to_string());
            format!("{key}: {value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sends the intake summary through the configured mail relay.
#[derive(Debug)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
    subject: String,
}

impl SmtpNotifier {
    pub fn from_config(config: &MailConfig) -> Result<Self, NotifyError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|error| NotifyError::Compose(format!("invalid from address: {error}")))?;

        let recipients = config
            .recipients
            .iter()
            .map(|recipient| {
                recipient.parse::<Mailbox>().map_err(|error| {
                    NotifyError::Compose(format!("invalid recipient `{recipient}`: {error}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|error| NotifyError::Compose(format!("smtp relay init failed: {error}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.expose_secret().to_owned(),
                config.password.expose_secret().to_owned(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport, from, recipients, subject: config.subject.clone() })
    }
}

#[async_trait]
impl Mailer for SmtpNotifier {
    async fn send_summary(&self, record: &IntakeRecord) -> Result<(), NotifyError> {
        let mut builder = Message::builder().from(self.from.clone()).subject(&self.subject);
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }

        let message = builder
            .body(summary_text(record))
            .map_err(|error| NotifyError::Compose(error.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|error| NotifyError::Delivery(error.to_string()))?;

        debug!(
            event_name = "frontdesk.notify.email_sent",
            recipient_count = self.recipients.len(),
            "intake summary email accepted by relay"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value};

    use frontdesk_core::config::MailConfig;
    use frontdesk_core::IntakeRecord;

    use super::{summary_text, NotifyError, SmtpNotifier};

    fn record(pairs: &[(&str, Value)]) -> IntakeRecord {
        let mut fields = Map::new();
        for (key, value) in pairs {
            fields.insert((*key).to_string(), value.clone());
        }
        IntakeRecord::from_object(fields)
    }

    fn mail_config() -> MailConfig {
        MailConfig {
            username: "relay-user".to_string().into(),
            password: "relay-pass".to_string().into(),
            host: "smtp.gmail.com".to_string(),
            port: 587,
            from: "no-reply@yourdomain.com".to_string(),
            recipients: vec![
                "jeff@assorthealth.com".to_string(),
                "connor@assorthealth.com".to_string(),
            ],
            subject: "New Appointment Intake".to_string(),
            timeout_secs: 15,
        }
    }

    #[test]
    fn appointment_summary_mentions_every_key_field() {
        let record = record(&[
            ("patient_name", Value::from("Jane Doe")),
            ("doctor_name", Value::from("Dr. Mark Patel")),
            ("appointment_time", Value::from("Tuesday 1PM")),
        ]);

        let summary = summary_text(&record);
        assert_eq!(
            summary,
            "Jane Doe has scheduled an appointment with Dr. Mark Patel on Tuesday 1PM."
        );
    }

    #[test]
    fn non_appointment_shapes_fall_back_to_field_lines() {
        let record = record(&[
            ("intent", Value::from("schedule_appointment")),
            ("confidence", Value::from(0.93)),
        ]);

        let summary = summary_text(&record);
        assert!(summary.contains("intent: schedule_appointment"));
        assert!(summary.contains("confidence: 0.93"));
    }

    #[test]
    fn partial_appointment_records_use_the_fallback() {
        let record = record(&[
            ("patient_name", Value::from("Jane Doe")),
            ("doctor_name", Value::from("Dr. Mark Patel")),
        ]);

        let summary = summary_text(&record);
        assert!(summary.contains("patient_name: Jane Doe"));
        assert!(!summary.contains("has scheduled an appointment"));
    }

    #[tokio::test]
    async fn notifier_builds_from_a_valid_mail_config() {
        assert!(SmtpNotifier::from_config(&mail_config()).is_ok());
    }

    #[test]
    fn invalid_recipient_is_a_compose_error() {
        let mut config = mail_config();
        config.recipients.push("not an address".to_string());

        let error = SmtpNotifier::from_config(&config).unwrap_err();
        assert!(matches!(error, NotifyError::Compose(_)));
        assert!(error.to_string().contains("not an address"));
    }

    #[test]
    fn invalid_from_address_is_a_compose_error() {
        let mut config = mail_config();
        config.from = "???".to_string();

        let error = SmtpNotifier::from_config(&config).unwrap_err();
        assert!(matches!(error, NotifyError::Compose(_)));
    }
}
