//! Periodic snapshot polling.
//!
//! Two actors cooperate here. `poll_ticker` decides *when* a poll is due,
//! following the configured refresh interval, and `snapshot` issues the
//! request and applies responses through [`SnapshotFeed`]. A tick that finds
//! the previous request still running is skipped.

use futures::{FutureExt, StreamExt, select};
use shared::{ServerApi, SnapshotFeed, SnapshotState, ViewConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use zoon::{SignalExt, Task, TaskHandle, Timer};

use crate::config::AppConfig;
use crate::dataflow::{Actor, relay};
use crate::utils::js_error_message;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("no browser window available")]
    NoWindow,
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with HTTP {status}")]
    Status { status: u16 },
    #[error("malformed snapshot: {0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct SnapshotSource {
    pub snapshot_actor: Actor<SnapshotState>,
    _poll_ticker_actor: Actor<()>,
}

impl SnapshotSource {
    pub fn new(app_config: &AppConfig) -> Self {
        let (poll_due_relay, mut poll_due_stream) = relay::<String>();
        let (snapshot_received_relay, mut snapshot_received_stream) =
            relay::<(u64, Result<ServerApi, String>)>();

        let config_signal = app_config.view_config_actor.signal();
        let poll_ticker_actor = Actor::new((), async move |_state| {
            let mut config_stream = config_signal.to_stream().fuse();
            let mut config = ViewConfig::default();
            let mut poll_due = true;

            loop {
                if poll_due {
                    poll_due_relay.send(config.snapshot_url.clone());
                    poll_due = false;
                }
                select! {
                    new_config = config_stream.next() => {
                        match new_config {
                            Some(new_config) => config = new_config,
                            None => break,
                        }
                    }
                    _ = Timer::sleep(config.refresh_interval_ms).fuse() => {
                        poll_due = true;
                    }
                }
            }
        });

        let snapshot_actor = Actor::new(SnapshotState::Loading, async move |state| {
            let mut feed = SnapshotFeed::new();
            let mut _in_flight: Option<TaskHandle> = None;

            loop {
                select! {
                    url = poll_due_stream.next() => {
                        let Some(url) = url else { break };
                        match feed.next_request() {
                            Some(sequence) => {
                                let snapshot_received_relay = snapshot_received_relay.clone();
                                // Replaces the handle of a request that already answered.
                                _in_flight = Some(Task::start_droppable(async move {
                                    let response = fetch_snapshot(&url)
                                        .await
                                        .map_err(|error| error.to_string());
                                    snapshot_received_relay.send((sequence, response));
                                }));
                            }
                            None => zoon::println!("📡 POLL: previous request still running, skipping tick"),
                        }
                    }
                    received = snapshot_received_stream.next() => {
                        let Some((sequence, response)) = received else { break };
                        if let Err(error) = &response {
                            zoon::eprintln!("📡 POLL: request #{} failed: {}", sequence, error);
                        }
                        match feed.accept(sequence, response) {
                            Some(next) => state.set_neq(next),
                            None => zoon::println!("📡 POLL: dropped stale response #{}", sequence),
                        }
                    }
                }
            }
        });

        Self {
            snapshot_actor,
            _poll_ticker_actor: poll_ticker_actor,
        }
    }
}

async fn fetch_snapshot(url: &str) -> Result<ServerApi, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|error| FetchError::Network(js_error_message(&error)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|value| FetchError::Decode(js_error_message(&value)))?;
    if !response.ok() {
        return Err(FetchError::Status {
            status: response.status(),
        });
    }

    let body = response
        .text()
        .map_err(|error| FetchError::Decode(js_error_message(&error)))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|error| FetchError::Network(js_error_message(&error)))?;
    let body = body
        .as_string()
        .ok_or_else(|| FetchError::Decode("response body is not text".to_string()))?;

    parse_snapshot(&body)
}

pub fn parse_snapshot(body: &str) -> Result<ServerApi, FetchError> {
    serde_json::from_str(body).map_err(|error| FetchError::Decode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snapshot_body() {
        let api = parse_snapshot(
            r#"{"live_servers":1,"offline_servers":1,"result":[
                {"id":1,"name":"a","online_status":true,"status":{"NetInTransfer":5,"NetOutTransfer":6}},
                {"id":2,"name":"b","online_status":false,"tag":"eu"}
            ]}"#,
        )
        .unwrap();

        let servers = api.result.unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].total_transfer(), 11);
        assert_eq!(servers[1].tag(), Some("eu"));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let error = parse_snapshot("<html>502</html>").unwrap_err();
        assert!(matches!(error, FetchError::Decode(_)));
        assert!(error.to_string().starts_with("malformed snapshot:"));
    }

    #[test]
    fn status_error_names_the_code() {
        assert_eq!(
            FetchError::Status { status: 503 }.to_string(),
            "server responded with HTTP 503"
        );
    }
}
