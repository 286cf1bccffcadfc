//! JSON-over-HTTP client for the wallet backend service.
//!
//! Every operation is `POST {base_url}/rpc/{command}` with a JSON object of
//! named arguments. The service answers `{"ok": <value>}` or
//! `{"error": "<message>"}`.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wd_core::ports::{BackendError, BackendEvent, BackendEventPort, WalletBackendPort};
use wd_core::wallet::WalletSummary;

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub event_poll_interval: Duration,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7878".to_string(),
            request_timeout: Duration::from_secs(30),
            event_poll_interval: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    ok: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Cloneable transport shared with the event polling task.
#[derive(Clone)]
struct RpcClient {
    base_url: String,
    http: reqwest::Client,
}

impl RpcClient {
    async fn call<T: DeserializeOwned>(&self, command: &str, args: Value) -> Result<T, BackendError> {
        let url = format!("{}/rpc/{}", self.base_url, command);
        debug!(command, "wallet backend request");

        let response = self
            .http
            .post(&url)
            .json(&args)
            .send()
            .await
            .map_err(|err| BackendError::Unavailable(format!("{command}: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| BackendError::Unavailable(format!("{command}: {err}")))?;

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(BackendError::Unavailable(format!("{command}: HTTP {status}")));
            }
            Err(err) => {
                return Err(BackendError::Unavailable(format!(
                    "{command}: malformed response: {err}"
                )));
            }
        };

        if let Some(message) = envelope.error {
            debug!(command, %status, "wallet backend rejected request");
            return Err(BackendError::Rejected(message));
        }
        if !status.is_success() {
            return Err(BackendError::Unavailable(format!("{command}: HTTP {status}")));
        }

        serde_json::from_value(envelope.ok.unwrap_or(Value::Null)).map_err(|err| {
            BackendError::Unavailable(format!("{command}: unexpected result: {err}"))
        })
    }
}

/// [`WalletBackendPort`] and [`BackendEventPort`] over HTTP.
pub struct HttpWalletBackend {
    rpc: RpcClient,
    event_poll_interval: Duration,
}

impl HttpWalletBackend {
    pub fn new(config: HttpBackendConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !config.event_poll_interval.is_zero(),
            "wallet backend event poll interval must be non-zero"
        );
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("build wallet backend http client")?;
        Ok(Self {
            rpc: RpcClient {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                http,
            },
            event_poll_interval: config.event_poll_interval,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.rpc.base_url
    }
}

#[async_trait]
impl WalletBackendPort for HttpWalletBackend {
    async fn list_wallets(&self) -> Result<Vec<WalletSummary>, BackendError> {
        self.rpc.call("list_wallets", json!({})).await
    }

    async fn check_open(&self) -> Result<bool, BackendError> {
        self.rpc.call("check_open", json!({})).await
    }

    async fn current_wallet_name(&self) -> Result<Option<String>, BackendError> {
        self.rpc.call("current_wallet_name", json!({})).await
    }

    async fn is_current_secured(&self) -> Result<Option<bool>, BackendError> {
        self.rpc.call("is_current_secured", json!({})).await
    }

    async fn generate_seed_phrase(&self) -> Result<String, BackendError> {
        self.rpc.call("generate_seed_phrase", json!({})).await
    }

    async fn open_wallet(&self, name: &str, password: Option<&str>) -> Result<bool, BackendError> {
        self.rpc
            .call("open_wallet", json!({ "name": name, "password": password }))
            .await
    }

    async fn create_wallet(
        &self,
        name: &str,
        password: Option<&str>,
        use_password: bool,
        seed_phrase: Option<&str>,
    ) -> Result<bool, BackendError> {
        self.rpc
            .call(
                "create_wallet",
                json!({
                    "name": name,
                    "password": password,
                    "use_password": use_password,
                    "seed_phrase": seed_phrase,
                }),
            )
            .await
    }

    async fn recover_wallet(
        &self,
        name: &str,
        seed_phrase: &str,
        password: Option<&str>,
        use_password: bool,
    ) -> Result<bool, BackendError> {
        self.rpc
            .call(
                "recover_wallet",
                json!({
                    "name": name,
                    "seed_phrase": seed_phrase,
                    "password": password,
                    "use_password": use_password,
                }),
            )
            .await
    }

    async fn close_wallet(&self) -> Result<bool, BackendError> {
        self.rpc.call("close_wallet", json!({})).await
    }

    async fn delete_wallet(&self, name: &str) -> Result<bool, BackendError> {
        self.rpc.call("delete_wallet", json!({ "name": name })).await
    }
}

#[async_trait]
impl BackendEventPort for HttpWalletBackend {
    /// Polls `poll_events` until the receiver is dropped. Unknown event names
    /// are skipped; poll failures are logged and retried on the next tick.
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<BackendEvent>> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let rpc = self.rpc.clone();
        let period = self.event_poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            info!(interval_ms = period.as_millis() as u64, "wallet backend event polling started");

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                let names: Vec<String> = match rpc.call("poll_events", json!({})).await {
                    Ok(names) => names,
                    Err(err) => {
                        warn!(error = %err, "wallet backend event poll failed");
                        continue;
                    }
                };
                for name in names {
                    match serde_json::from_value::<BackendEvent>(Value::String(name.clone())) {
                        Ok(event) => {
                            if tx.send(event).await.is_err() {
                                debug!("backend event receiver dropped");
                                return;
                            }
                        }
                        Err(_) => debug!(event = %name, "ignoring unknown backend event"),
                    }
                }
            }
            debug!("wallet backend event polling stopped");
        });

        Ok(rx)
    }
}
