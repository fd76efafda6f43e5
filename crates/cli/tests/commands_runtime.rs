use std::env;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

use frontdesk_cli::commands::{address, config, doctor, extract};
use serde_json::Value;

#[test]
fn config_strict_fails_without_credentials() {
    with_env(&[], || {
        let result = config::run(true);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn config_without_strict_reports_the_failure_but_exits_zero() {
    with_env(&[], || {
        let result = config::run(false);
        assert_eq!(result.exit_code, 0, "non-strict config should not fail the process");
        assert!(result.output.contains("config validation failed"));
    });
}

#[test]
fn config_renders_redacted_values_with_sources() {
    with_env(valid_env(), || {
        let result = config::run(true);
        assert_eq!(result.exit_code, 0, "expected config render with valid env");

        assert!(result.output.contains("llm.api_key = <redacted> (source: env"));
        assert!(!result.output.contains("sk-test"));
        assert!(result.output.contains("dispatch.notify = true (source: default)"));
        assert!(result.output.contains("session.greeting"));
    });
}

#[test]
fn doctor_passes_with_full_credentials() {
    with_env(valid_env(), || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0, "expected all readiness checks to pass");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        let checks = payload["checks"].as_array().expect("report should carry checks");
        assert_eq!(checks.len(), 4);
        assert!(checks.iter().all(|check| check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_and_skips_downstream_checks_without_credentials() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 1, "expected doctor failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");

        let checks = payload["checks"].as_array().expect("report should carry checks");
        assert_eq!(checks[0]["name"], "config_validation");
        assert_eq!(checks[0]["status"], "fail");
        assert!(checks[1..].iter().all(|check| check["status"] == "skipped"));
    });
}

#[test]
fn doctor_flags_missing_mail_credentials_when_notify_enabled() {
    let mut vars = valid_env().to_vec();
    vars.retain(|(key, _)| *key != "FRONTDESK_MAIL_PASSWORD");
    with_env(&vars, || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 1, "missing mail password should fail readiness");

        let payload = parse_payload(&result.output);
        let credential_check = payload["checks"]
            .as_array()
            .and_then(|checks| checks.iter().find(|check| check["name"] == "credential_presence"))
            .expect("credential check should be present");
        assert_eq!(credential_check["status"], "fail");
        assert!(credential_check["details"].as_str().unwrap_or("").contains("mail.password"));
    });
}

#[test]
fn doctor_human_output_lists_every_check() {
    with_env(valid_env(), || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("all readiness checks passed"));
        assert!(result.output.contains("[ok] config_validation"));
        assert!(result.output.contains("[ok] archive_destination"));
    });
}

#[test]
fn extract_prints_the_record_for_embedded_payloads() {
    with_env(&[], || {
        let text = concat!(
            "Your appointment has been scheduled. ",
            "{\"patient_name\": \"Jane Doe\", \"appointment_time\": \"Tuesday 1PM\"}"
        );
        let result = extract::run(Some(text.to_string()), None);
        assert_eq!(result.exit_code, 0, "expected extraction success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["patient_name"], "Jane Doe");
        assert_eq!(payload["appointment_time"], "Tuesday 1PM");
    });
}

#[test]
fn extract_reads_the_utterance_from_a_file() {
    with_env(&[], || {
        let mut file = tempfile::NamedTempFile::new().expect("temp file creates");
        write!(file, "All set! {{\"doctor_name\": \"Dr. Mark Patel\"}}").expect("temp file writes");

        let result = extract::run(None, Some(file.path().to_path_buf()));
        assert_eq!(result.exit_code, 0, "expected extraction success from file");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["doctor_name"], "Dr. Mark Patel");
    });
}

#[test]
fn extract_classifies_text_without_a_structured_block() {
    with_env(&[], || {
        let result = extract::run(Some("Thanks for calling, goodbye!".to_string()), None);
        assert_eq!(result.exit_code, 1, "expected extraction failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "extract");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "no_structured_block");
    });
}

#[test]
fn extract_without_input_is_a_usage_error() {
    with_env(&[], || {
        let result = extract::run(None, None);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "usage");
    });
}

#[test]
fn address_requires_a_valid_config() {
    with_env(&[], || {
        let result = address::run("123 Main St".to_string(), None, None, None);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "address");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn address_folds_an_unreachable_service_into_an_invalid_verdict() {
    let mut vars = valid_env().to_vec();
    vars.push(("FRONTDESK_ADDRESS_BASE_URL", "http://127.0.0.1:9/street-address"));
    vars.push(("FRONTDESK_ADDRESS_TIMEOUT_SECS", "1"));
    with_env(&vars, || {
        let result = address::run("123 Main St".to_string(), None, None, None);
        assert_eq!(result.exit_code, 0, "verdicts always print on exit 0");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "invalid");
        assert!(payload["reason"].as_str().unwrap_or("").contains("could not be verified"));
    });
}

fn valid_env() -> &'static [(&'static str, &'static str)] {
    &[
        ("FRONTDESK_LLM_API_KEY", "sk-test"),
        ("FRONTDESK_TRANSCRIPTION_API_KEY", "dg-test"),
        ("FRONTDESK_ADDRESS_AUTH_ID", "auth-id-test"),
        ("FRONTDESK_ADDRESS_AUTH_TOKEN", "auth-token-test"),
        ("FRONTDESK_MAIL_USERNAME", "intake@example.com"),
        ("FRONTDESK_MAIL_PASSWORD", "app-password"),
    ]
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    let keys = [
        "FRONTDESK_LLM_API_KEY",
        "FRONTDESK_LLM_MODEL",
        "FRONTDESK_TRANSCRIPTION_API_KEY",
        "FRONTDESK_TRANSCRIPTION_MODEL",
        "FRONTDESK_SPEECH_VOICE",
        "FRONTDESK_ADDRESS_AUTH_ID",
        "FRONTDESK_ADDRESS_AUTH_TOKEN",
        "FRONTDESK_ADDRESS_BASE_URL",
        "FRONTDESK_ADDRESS_TIMEOUT_SECS",
        "FRONTDESK_MAIL_USERNAME",
        "FRONTDESK_MAIL_PASSWORD",
        "FRONTDESK_MAIL_HOST",
        "FRONTDESK_MAIL_PORT",
        "FRONTDESK_MAIL_FROM",
        "FRONTDESK_MAIL_RECIPIENTS",
        "FRONTDESK_MAIL_SUBJECT",
        "FRONTDESK_MAIL_TIMEOUT_SECS",
        "FRONTDESK_DISPATCH_NOTIFY",
        "FRONTDESK_DISPATCH_ARCHIVE",
        "FRONTDESK_DISPATCH_ARCHIVE_PATH",
        "FRONTDESK_DISPATCH_REQUIRED_FIELDS",
        "FRONTDESK_SESSION_GREETING",
        "FRONTDESK_SESSION_SENTINELS",
        "FRONTDESK_SERVER_BIND_ADDRESS",
        "FRONTDESK_SERVER_HEALTH_CHECK_PORT",
        "FRONTDESK_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "FRONTDESK_LOGGING_LEVEL",
        "FRONTDESK_LOGGING_FORMAT",
        "FRONTDESK_LOG_LEVEL",
        "FRONTDESK_LOG_FORMAT",
        "FRONTDESK_CONFIG",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
