use frontdesk_agent::address::{AddressAuthority, AddressQuery, SmartyAddressClient};
use frontdesk_core::config::{AppConfig, LoadOptions};

use super::CommandResult;

pub fn run(
    street: String,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "address",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    let client = match SmartyAddressClient::from_config(&config.address) {
        Ok(client) => client,
        Err(error) => {
            return CommandResult::failure(
                "address",
                "client_build",
                format!("could not build verification client: {error}"),
                2,
            );
        }
    };

    let query = AddressQuery { street, city, state, zipcode: zip };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "address",
                "runtime",
                format!("could not start async runtime: {error}"),
                2,
            );
        }
    };

    // Transport failures fold into an invalid verdict, same as in a live
    // session, so the command always prints a verdict on exit 0.
    let verdict = runtime.block_on(client.verdict(&query));
    let output = serde_json::to_string_pretty(&verdict)
        .unwrap_or_else(|error| format!("{{\"status\":\"invalid\",\"reason\":\"{error}\"}}"));

    CommandResult { exit_code: 0, output }
}
