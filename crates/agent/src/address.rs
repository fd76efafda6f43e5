use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use frontdesk_core::config::AddressConfig;

/// One address-verification request. Street is the only required part; the
/// rest are refinements forwarded unchanged when present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AddressQuery {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
}

impl AddressQuery {
    pub fn new(street: impl Into<String>) -> Self {
        Self { street: street.into(), ..Self::default() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressStatus {
    Valid,
    Incomplete,
    Invalid,
}

/// Tri-state classification of one verification call, with a reason the
/// conversational script can voice back to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressVerdict {
    pub status: AddressStatus,
    pub reason: String,
}

impl AddressVerdict {
    pub fn valid(reason: impl Into<String>) -> Self {
        Self { status: AddressStatus::Valid, reason: reason.into() }
    }

    pub fn incomplete(reason: impl Into<String>) -> Self {
        Self { status: AddressStatus::Incomplete, reason: reason.into() }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self { status: AddressStatus::Invalid, reason: reason.into() }
    }

    pub fn is_deliverable(&self) -> bool {
        self.status == AddressStatus::Valid
    }
}

#[derive(Debug, Error)]
pub enum AddressServiceError {
    #[error("street must not be empty")]
    EmptyStreet,
    #[error("address service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("address service returned status {0}")]
    Status(u16),
}

/// Seam over the external verification authority so the tool, the pipeline,
/// and the CLI can be exercised against fakes.
#[async_trait]
pub trait AddressAuthority: Send + Sync {
    /// Low-level call with transport failures kept distinguishable from a
    /// definitive non-deliverable classification.
    async fn validate(&self, query: &AddressQuery) -> Result<AddressVerdict, AddressServiceError>;

    /// Conversation-facing form: verification failure must never abort a
    /// session, so every error folds into an `Invalid` verdict whose reason
    /// carries the failure for diagnosability.
    async fn verdict(&self, query: &AddressQuery) -> AddressVerdict {
        match self.validate(query).await {
            Ok(verdict) => verdict,
            Err(error) => {
                warn!(
                    event_name = "frontdesk.address.verification_failed",
                    error = %error,
                    "address verification failed; classifying as invalid"
                );
                AddressVerdict::invalid(format!("Address could not be verified ({error})."))
            }
        }
    }
}

/// HTTP client for the SmartyStreets street-address endpoint.
pub struct SmartyAddressClient {
    client: Client,
    base_url: String,
    auth_id: SecretString,
    auth_token: SecretString,
}

impl SmartyAddressClient {
    pub fn new(
        base_url: String,
        auth_id: SecretString,
        auth_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, AddressServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url, auth_id, auth_token })
    }

    pub fn from_config(config: &AddressConfig) -> Result<Self, AddressServiceError> {
        Self::new(
            config.base_url.clone(),
            config.auth_id.clone(),
            config.auth_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl AddressAuthority for SmartyAddressClient {
    async fn validate(&self, query: &AddressQuery) -> Result<AddressVerdict, AddressServiceError> {
        if query.street.trim().is_empty() {
            return Err(AddressServiceError::EmptyStreet);
        }

        let mut params: Vec<(&str, &str)> = vec![
            ("auth-id", self.auth_id.expose_secret()),
            ("auth-token", self.auth_token.expose_secret()),
            ("street", query.street.as_str()),
        ];
        if let Some(city) = &query.city {
            params.push(("city", city));
        }
        if let Some(state) = &query.state {
            params.push(("state", state));
        }
        if let Some(zipcode) = &query.zipcode {
            params.push(("zipcode", zipcode));
        }

        let response = self.client.get(&self.base_url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AddressServiceError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        let verdict = classify(&payload);
        debug!(
            event_name = "frontdesk.address.classified",
            status = ?verdict.status,
            "address verification response classified"
        );
        Ok(verdict)
    }
}

/// DPV match-code mapping. `Y` is deliverable as given; `D` is deliverable
/// but missing a secondary unit designator; everything else, including an
/// empty candidate list, is not deliverable.
fn classify(payload: &Value) -> AddressVerdict {
    let Some(first) = payload.as_array().and_then(|candidates| candidates.first()) else {
        return AddressVerdict::invalid("Address not found or incomplete.");
    };

    let code =
        first.pointer("/analysis/dpv_match_code").and_then(Value::as_str).unwrap_or_default();
    match code {
        "Y" => AddressVerdict::valid("Address is valid and complete."),
        "D" => AddressVerdict::incomplete("Missing apartment or suite number."),
        "" => AddressVerdict::invalid("Invalid address (no DPV code returned)"),
        other => AddressVerdict::invalid(format!("Invalid address (DPV code: {other})")),
    }
}
