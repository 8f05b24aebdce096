//! Flotilla — Rust client SDK for the taxi-fleet back office.
//!
//! One shared [`client::ApiClient`] authenticates every request from the
//! credential store and transparently recovers from expired access tokens:
//! concurrent 401s coalesce into a single refresh exchange, and each
//! affected request is replayed exactly once with the fresh token. When the
//! refresh itself fails, credentials are cleared and every waiting request
//! is rejected with that cause, so callers can route straight back to the
//! login flow.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use flotilla::prelude::*;
//!
//! # async fn example() -> flotilla::error::Result<()> {
//! let config = Config::from_env();
//! let store = Arc::new(FileCredentialStore::new_default());
//! let client = ApiClient::new(&config, store)?;
//!
//! let auth = AuthService::new(client.clone());
//! let user = auth.login("maria", "secreta").await?;
//! println!("sesión iniciada como {} ({})", user.username, user.rol);
//!
//! let taxis = client.list_taxis().await?;
//! println!("{} taxis asignados", taxis.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod store;
pub mod validation;
