use std::path::{Path, PathBuf};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

#[derive(Clone)]
pub struct HealthState {
    archive_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub session: HealthCheck,
    pub archive: HealthCheck,
    pub checked_at: String,
}

pub fn router(archive_path: Option<PathBuf>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { archive_path })
}

pub async fn spawn(
    bind_address: &str,
    port: u16,
    archive_path: Option<PathBuf>,
) -> std::io::Result<()> {
    let address = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "frontdesk.health.start",
        correlation_id = "bootstrap",
        bind_address = %address,
        "health endpoint started"
    );

    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router(archive_path)).await {
            error!(
                event_name = "frontdesk.health.error",
                correlation_id = "bootstrap",
                error = %error,
                "health endpoint server terminated unexpectedly"
            );
        }
    });

    Ok(())
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let archive = archive_check(state.archive_path.as_deref());
    let ready = archive.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: "frontdesk-server",
        version: env!("CARGO_PKG_VERSION"),
        session: HealthCheck {
            status: "ready",
            detail: "session components initialized".to_string(),
        },
        archive,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn archive_check(path: Option<&Path>) -> HealthCheck {
    let Some(path) = path else {
        return HealthCheck {
            status: "ready",
            detail: "archive effect disabled".to_string(),
        };
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if parent.is_dir() {
        HealthCheck {
            status: "ready",
            detail: format!("archive destination `{}` is reachable", path.display()),
        }
    } else {
        HealthCheck {
            status: "degraded",
            detail: format!("archive directory `{}` does not exist", parent.display()),
        }
    }
}
