use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::address::{AddressAuthority, AddressQuery};

/// A function tool the external runtime may invoke mid-conversation on the
/// model's behalf. Input and output are JSON values, matching the runtime's
/// function-calling surface.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub async fn execute(&self, name: &str, input: Value) -> Result<Value> {
        let tool =
            self.tools.get(name).ok_or_else(|| anyhow!("unknown tool `{name}` requested"))?;
        debug!(event_name = "frontdesk.tool.execute", tool = name, "executing tool");
        tool.execute(input).await
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Mid-conversation address verification. Always resolves to a verdict:
/// a missing street or an unreachable service comes back as an `invalid`
/// verdict for the script to voice, never as a tool failure that would
/// derail the call.
pub struct ValidateAddressTool {
    authority: Arc<dyn AddressAuthority>,
}

impl ValidateAddressTool {
    pub fn new(authority: Arc<dyn AddressAuthority>) -> Self {
        Self { authority }
    }
}

#[async_trait]
impl Tool for ValidateAddressTool {
    fn name(&self) -> &'static str {
        "validate_address"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let query: AddressQuery = serde_json::from_value(input)?;
        let verdict = self.authority.verdict(&query).await;
        Ok(serde_json::to_value(verdict)?)
    }
}

/// The registry offered to every intake session.
pub fn intake_registry(authority: Arc<dyn AddressAuthority>) -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    registry.register(ValidateAddressTool::new(authority));
    registry
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use super::{intake_registry, ToolRegistry};
    use crate::address::{AddressAuthority, AddressQuery, AddressServiceError, AddressVerdict};

    enum Canned {
        Verdict(AddressVerdict),
        Status(u16),
    }

    struct CannedAuthority {
        canned: Canned,
    }

    #[async_trait]
    impl AddressAuthority for CannedAuthority {
        async fn validate(
            &self,
            query: &AddressQuery,
        ) -> Result<AddressVerdict, AddressServiceError> {
            if query.street.trim().is_empty() {
                return Err(AddressServiceError::EmptyStreet);
            }
            match &self.canned {
                Canned::Verdict(verdict) => Ok(verdict.clone()),
                Canned::Status(code) => Err(AddressServiceError::Status(*code)),
            }
        }
    }

    fn registry_with(canned: Canned) -> ToolRegistry {
        intake_registry(Arc::new(CannedAuthority { canned }))
    }

    #[tokio::test]
    async fn registry_exposes_the_address_tool() {
        let registry =
            registry_with(Canned::Verdict(AddressVerdict::valid("Address is valid and complete.")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["validate_address"]);
    }

    #[tokio::test]
    async fn address_tool_returns_the_verdict_as_json() {
        let registry =
            registry_with(Canned::Verdict(AddressVerdict::valid("Address is valid and complete.")));

        let output = registry
            .execute("validate_address", json!({"street": "123 Main St"}))
            .await
            .expect("tool run succeeds");

        assert_eq!(
            output,
            json!({"status": "valid", "reason": "Address is valid and complete."})
        );
    }

    #[tokio::test]
    async fn service_failure_surfaces_as_an_invalid_verdict_not_a_tool_error() {
        let registry = registry_with(Canned::Status(500));

        let output = registry
            .execute("validate_address", json!({"street": "123 Main St"}))
            .await
            .expect("tool run still succeeds");

        assert_eq!(output["status"], "invalid");
        assert!(output["reason"].as_str().unwrap_or_default().contains("500"));
    }

    #[tokio::test]
    async fn missing_street_surfaces_as_an_invalid_verdict() {
        let registry = registry_with(Canned::Verdict(AddressVerdict::valid("unused")));

        let output = registry
            .execute("validate_address", json!({"city": "Columbus"}))
            .await
            .expect("tool run still succeeds");

        assert_eq!(output["status"], "invalid");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = registry_with(Canned::Verdict(AddressVerdict::valid("unused")));

        let error = registry.execute("book_flight", json!({})).await.unwrap_err();
        assert!(error.to_string().contains("book_flight"));
    }
}
