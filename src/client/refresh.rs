//! One-shot, fan-in token refresh.
//!
//! A wave runs from the first 401 that opens it until the refresh exchange
//! settles. Every request that hits 401 while the wave is open waits on the
//! same outcome instead of starting its own exchange, so exactly one call
//! reaches the refresh endpoint per wave.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, Mutex};

use crate::error::{FlotillaError, Result};
use crate::store::CredentialKey;

use super::{into_api_result, ApiClient, REFRESH_PATH};

/// How a settled wave ended, delivered to every participant.
#[derive(Debug, Clone)]
enum WaveOutcome {
    Refreshed { access_token: String },
    Failed(Arc<FlotillaError>),
}

/// Wave lifecycle. `Refreshing` holds the completion handle of every
/// request waiting on the in-flight exchange.
enum RefreshWave {
    Idle,
    Refreshing {
        waiters: Vec<oneshot::Sender<WaveOutcome>>,
    },
}

pub(super) struct RefreshGate {
    state: Mutex<RefreshWave>,
}

impl RefreshGate {
    pub(super) fn new() -> Self {
        Self {
            state: Mutex::new(RefreshWave::Idle),
        }
    }

    /// Join the current wave, opening one if none is in flight. Returns
    /// whether the caller became the opener (responsible for driving the
    /// exchange) and the receiver for the wave outcome.
    async fn subscribe(&self) -> (bool, oneshot::Receiver<WaveOutcome>) {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.lock().await;
        match &mut *state {
            RefreshWave::Idle => {
                *state = RefreshWave::Refreshing { waiters: vec![tx] };
                (true, rx)
            }
            RefreshWave::Refreshing { waiters } => {
                waiters.push(tx);
                (false, rx)
            }
        }
    }

    /// Deliver the outcome to every waiter and return to idle. Only after
    /// this may a later 401 open a new wave.
    async fn settle(&self, outcome: WaveOutcome) {
        let mut state = self.state.lock().await;
        let previous = std::mem::replace(&mut *state, RefreshWave::Idle);
        if let RefreshWave::Refreshing { waiters } = previous {
            for waiter in waiters {
                let _ = waiter.send(outcome.clone());
            }
        }
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    refresh: Option<String>,
}

impl ApiClient {
    /// Entry point for a request that just observed its first 401: wait for
    /// this request's wave to settle and return the fresh access token, or
    /// the wave's terminal failure.
    pub(super) async fn await_refresh_outcome(&self) -> Result<String> {
        let (opener, outcome) = self.gate.subscribe().await;
        if opener {
            // The exchange runs on its own task so a caller dropping this
            // request future cannot leave the wave unsettled for the others.
            let client = self.clone();
            tokio::spawn(async move {
                let outcome = client.run_refresh_exchange().await;
                client.gate.settle(outcome).await;
            });
        }
        match outcome.await {
            Ok(WaveOutcome::Refreshed { access_token }) => Ok(access_token),
            Ok(WaveOutcome::Failed(cause)) => Err(FlotillaError::RefreshFailed(cause)),
            Err(_) => Err(FlotillaError::Authentication(
                "token refresh was interrupted".to_string(),
            )),
        }
    }

    async fn run_refresh_exchange(&self) -> WaveOutcome {
        match self.exchange_refresh_token().await {
            Ok(access_token) => {
                tracing::debug!("access token refreshed");
                WaveOutcome::Refreshed { access_token }
            }
            Err(err) => {
                // Credentials must be gone before any waiter can observe
                // the rejection.
                if let Err(clear_err) = self.store.clear().await {
                    tracing::error!(
                        error = %clear_err,
                        "failed to clear credentials after refresh failure"
                    );
                }
                tracing::warn!(error = %err, "token refresh failed; credentials cleared");
                WaveOutcome::Failed(Arc::new(err))
            }
        }
    }

    /// One network call to the refresh endpoint, persisting the returned
    /// pair. The rotated refresh token is authoritative when present;
    /// otherwise the stored one is kept.
    async fn exchange_refresh_token(&self) -> Result<String> {
        let refresh_token = self
            .store
            .get(CredentialKey::RefreshToken)
            .await?
            .ok_or_else(|| FlotillaError::Authentication("no refresh token stored".to_string()))?;

        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = self
            .http
            .post(&url)
            .json(&RefreshRequest {
                refresh: &refresh_token,
            })
            .send()
            .await?;
        let response = into_api_result(response).await?;
        let payload: RefreshResponse = response.json().await?;

        self.store
            .set(CredentialKey::AccessToken, &payload.access)
            .await?;
        if let Some(rotated) = &payload.refresh {
            self.store.set(CredentialKey::RefreshToken, rotated).await?;
        }
        Ok(payload.access)
    }
}
