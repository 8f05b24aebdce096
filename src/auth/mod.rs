//! Login, logout, and session persistence.
//!
//! `POST token/` issues the credential pair; the user's identity comes from
//! `GET usuarios/me/` right after. Both halves of the session (tokens and
//! user id/role) live in the credential store so the app can resume without
//! a fresh login.

use serde::{Deserialize, Serialize};

use crate::api::types::{Rol, Usuario};
use crate::api::ME_PATH;
use crate::client::{ApiClient, LOGIN_PATH};
use crate::error::Result;
use crate::store::CredentialKey;

/// Token pair issued by `POST token/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub access: String,
    pub refresh: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Snapshot of the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredSession {
    pub user_id: i64,
    pub role: Rol,
}

/// Service facade for the authentication flows.
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Authenticate against `POST token/`, fetch the user's identity, and
    /// persist the full session. A rejected login mutates nothing; the
    /// token endpoint is exempt from refresh recovery, so bad credentials
    /// surface directly as the backend's error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Usuario> {
        let credentials: Credentials = self
            .client
            .post(LOGIN_PATH, &LoginRequest { username, password })
            .await?;

        let store = self.client.store();
        store
            .set(CredentialKey::AccessToken, &credentials.access)
            .await?;
        store
            .set(CredentialKey::RefreshToken, &credentials.refresh)
            .await?;

        let user: Usuario = self.client.get(ME_PATH).await?;
        store
            .set(CredentialKey::UserId, &user.id.to_string())
            .await?;
        store
            .set(CredentialKey::UserRole, &user.rol.to_string())
            .await?;

        tracing::debug!(username = %user.username, rol = %user.rol, "login succeeded");
        Ok(user)
    }

    /// Drop the persisted session.
    pub async fn logout(&self) -> Result<()> {
        self.client.store().clear().await?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Rebuild the session from the store. Returns `None` when any piece
    /// is missing. Unreadable stored state (bad id or unknown role) clears
    /// the store and reads as no session.
    pub async fn stored_session(&self) -> Result<Option<StoredSession>> {
        let store = self.client.store();
        let access = store.get(CredentialKey::AccessToken).await?;
        let refresh = store.get(CredentialKey::RefreshToken).await?;
        let user_id = store.get(CredentialKey::UserId).await?;
        let role = store.get(CredentialKey::UserRole).await?;

        let (Some(_), Some(_), Some(user_id), Some(role)) = (access, refresh, user_id, role)
        else {
            return Ok(None);
        };

        match (user_id.parse::<i64>(), role.parse::<Rol>()) {
            (Ok(user_id), Ok(role)) => Ok(Some(StoredSession { user_id, role })),
            _ => {
                tracing::warn!("stored session is unreadable; clearing credentials");
                store.clear().await?;
                Ok(None)
            }
        }
    }

    /// Persist an updated user identity (id + role).
    pub async fn update_stored_user(&self, user: &Usuario) -> Result<()> {
        let store = self.client.store();
        store
            .set(CredentialKey::UserId, &user.id.to_string())
            .await?;
        store
            .set(CredentialKey::UserRole, &user.rol.to_string())
            .await?;
        Ok(())
    }
}
