//! Lifecycle dispatcher: the single webhook endpoint SmartThings calls.
//!
//! Every inbound request carries a `lifecycle` discriminator. PING and
//! CONFIRMATION arrive while the app is being registered, before the
//! platform's public key is available, so only those two skip signature
//! verification. Everything else must present a valid signature or is
//! rejected with 401 before any processing happens.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::config;
use crate::server::AppState;
use crate::signature;

// ── Inbound payloads ────────────────────────────────────────────────────────

/// One webhook callback, discriminated by the `lifecycle` field.
#[derive(Debug, Deserialize)]
#[serde(
    tag = "lifecycle",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
enum LifecycleEvent {
    Ping {
        ping_data: PingData,
    },
    Confirmation {
        confirmation_data: ConfirmationData,
    },
    Configuration {
        configuration_data: config::ConfigurationData,
    },
    Install {
        install_data: InstallData,
    },
    Update {
        update_data: InstallData,
    },
    Uninstall {},
    Event {
        event_data: EventData,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct PingData {
    challenge: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmationData {
    confirmation_url: String,
}

/// Payload shared by INSTALL and UPDATE.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstallData {
    auth_token: String,
    installed_app: InstalledApp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstalledApp {
    installed_app_id: String,
    #[serde(default)]
    location_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventData {
    #[serde(default)]
    events: Vec<EventEnvelope>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventEnvelope {
    event_type: String,
    #[serde(default)]
    timer_event: Option<TimerEvent>,
}

#[derive(Debug, Deserialize)]
struct TimerEvent {
    name: String,
    time: String,
}

// ── Router ──────────────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(handle_webhook))
}

// ── Dispatch ────────────────────────────────────────────────────────────────

async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    // The signature exemption depends on the lifecycle, so peek at the
    // discriminator before deserializing the full payload.
    let lifecycle = body
        .get("lifecycle")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let exempt = matches!(lifecycle.as_str(), "PING" | "CONFIRMATION");
    if !exempt && !signature::verify(&headers) {
        warn!(%lifecycle, "rejecting request with missing or invalid signature");
        return (StatusCode::UNAUTHORIZED, "Forbidden").into_response();
    }

    let event: LifecycleEvent = match serde_json::from_value(body) {
        Ok(event) => event,
        Err(e) => {
            warn!(%lifecycle, error = %e, "malformed lifecycle payload");
            return error_envelope(StatusCode::BAD_REQUEST, "malformed lifecycle payload");
        }
    };

    info!(%lifecycle, "handling lifecycle callback");

    match event {
        // PING verifies the app is alive during creation: echo the challenge.
        LifecycleEvent::Ping { ping_data } => Json(json!({
            "statusCode": 200,
            "pingData": { "challenge": ping_data.challenge },
        }))
        .into_response(),

        // CONFIRMATION: the platform hands us a URL to call back, proving we
        // own the target. Fire-and-forget; a failure only gets logged.
        LifecycleEvent::Confirmation { confirmation_data } => {
            let http = state.http.clone();
            let url = confirmation_data.confirmation_url;
            tokio::spawn(async move {
                match http.get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        info!("confirmation URL accepted");
                    }
                    Ok(resp) => warn!(status = %resp.status(), "confirmation URL rejected"),
                    Err(e) => warn!(error = %e, "confirmation callout failed"),
                }
            });
            Json(json!({ "statusCode": 200 })).into_response()
        }

        LifecycleEvent::Configuration { configuration_data } => {
            match config::handle(&configuration_data) {
                Ok(page) => Json(json!({
                    "statusCode": 200,
                    "configurationData": page,
                }))
                .into_response(),
                Err(e) => {
                    warn!(error = %e, "configuration request rejected");
                    error_envelope(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string())
                }
            }
        }

        // App-specific install/update behavior (creating subscriptions and
        // schedules through the REST client) belongs to the embedding app;
        // the bridge only acknowledges.
        LifecycleEvent::Install { install_data } => {
            info!(
                installed_app_id = %install_data.installed_app.installed_app_id,
                location_id = install_data.installed_app.location_id.as_deref().unwrap_or("-"),
                has_token = !install_data.auth_token.is_empty(),
                "app installed"
            );
            Json(json!({ "statusCode": 200, "installData": {} })).into_response()
        }

        LifecycleEvent::Update { update_data } => {
            info!(
                installed_app_id = %update_data.installed_app.installed_app_id,
                has_token = !update_data.auth_token.is_empty(),
                "app configuration updated"
            );
            Json(json!({ "statusCode": 200, "updateData": {} })).into_response()
        }

        LifecycleEvent::Uninstall {} => {
            info!("app uninstalled");
            Json(json!({ "statusCode": 200, "uninstallData": {} })).into_response()
        }

        // EVENT is acknowledged regardless of whether the inner handler
        // recognized the event type.
        LifecycleEvent::Event { event_data } => {
            handle_event(&event_data);
            Json(json!({ "statusCode": 200, "eventData": {} })).into_response()
        }

        LifecycleEvent::Unknown => {
            warn!(%lifecycle, "unsupported lifecycle");
            error_envelope(
                StatusCode::BAD_REQUEST,
                &format!("lifecycle {lifecycle} not supported"),
            )
        }
    }
}

/// Inspect the first event in an EVENT callback. Only TIMER_EVENT is
/// expected; anything else is logged and dropped.
fn handle_event(event_data: &EventData) {
    let Some(first) = event_data.events.first() else {
        error!("EVENT lifecycle with no events");
        return;
    };

    match (first.event_type.as_str(), &first.timer_event) {
        ("TIMER_EVENT", Some(timer)) => {
            info!(
                schedule = %timer.name,
                time = %timer.time,
                "received timer event"
            );
        }
        ("TIMER_EVENT", None) => error!("TIMER_EVENT without timerEvent payload"),
        (other, _) => error!("expected TIMER_EVENT, got {other}"),
    }
}

fn error_envelope(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "statusCode": status.as_u16(),
            "error": message,
        })),
    )
        .into_response()
}
