use std::path::Path;

use frontdesk_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use serde::Serialize;

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_credentials(&config));
            checks.push(check_address_endpoint(&config));
            checks.push(check_archive_destination(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["credential_presence", "address_endpoint", "archive_destination"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

/// Presence only; format and reachability belong to the providers.
fn check_credentials(config: &AppConfig) -> DoctorCheck {
    let mut missing = Vec::new();
    if config.llm.api_key.expose_secret().trim().is_empty() {
        missing.push("llm.api_key");
    }
    if config.transcription.api_key.expose_secret().trim().is_empty() {
        missing.push("transcription.api_key");
    }
    if config.address.auth_id.expose_secret().trim().is_empty() {
        missing.push("address.auth_id");
    }
    if config.address.auth_token.expose_secret().trim().is_empty() {
        missing.push("address.auth_token");
    }
    if config.dispatch.notify {
        if config.mail.username.expose_secret().trim().is_empty() {
            missing.push("mail.username");
        }
        if config.mail.password.expose_secret().trim().is_empty() {
            missing.push("mail.password");
        }
    }

    if missing.is_empty() {
        DoctorCheck {
            name: "credential_presence",
            status: CheckStatus::Pass,
            details: "all required credentials are present".to_string(),
        }
    } else {
        DoctorCheck {
            name: "credential_presence",
            status: CheckStatus::Fail,
            details: format!("missing credentials: {}", missing.join(", ")),
        }
    }
}

fn check_address_endpoint(config: &AppConfig) -> DoctorCheck {
    let url = &config.address.base_url;
    if url.starts_with("http://") || url.starts_with("https://") {
        DoctorCheck {
            name: "address_endpoint",
            status: CheckStatus::Pass,
            details: format!("verification endpoint `{url}` is well-formed"),
        }
    } else {
        DoctorCheck {
            name: "address_endpoint",
            status: CheckStatus::Fail,
            details: format!("verification endpoint `{url}` is not an http(s) URL"),
        }
    }
}

fn check_archive_destination(config: &AppConfig) -> DoctorCheck {
    if !config.dispatch.archive {
        return DoctorCheck {
            name: "archive_destination",
            status: CheckStatus::Pass,
            details: "archive effect disabled".to_string(),
        };
    }

    let path = &config.dispatch.archive_path;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if parent.is_dir() {
        DoctorCheck {
            name: "archive_destination",
            status: CheckStatus::Pass,
            details: format!("archive destination `{}` is reachable", path.display()),
        }
    } else {
        DoctorCheck {
            name: "archive_destination",
            status: CheckStatus::Fail,
            details: format!("archive directory `{}` does not exist", parent.display()),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
