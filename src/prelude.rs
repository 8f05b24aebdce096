//! Convenience re-exports for common use.

pub use crate::api::types::{
    ConceptoGasto, EstadoVerificacion, Factura, Gasto, IngresoGuardia, NuevoGasto,
    NuevoIngresoGuardia, Rol, Taxi, Usuario,
};
pub use crate::auth::{AuthService, Credentials, StoredSession};
pub use crate::client::ApiClient;
pub use crate::config::Config;
pub use crate::error::{ErrorCategory, FlotillaError, Result};
pub use crate::store::{
    CredentialKey, CredentialStore, CredentialStoreConfig, FileCredentialStore,
};
