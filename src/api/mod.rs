//! Typed endpoints of the fleet back office.

pub mod types;

use crate::client::ApiClient;
use crate::error::Result;

use types::{ConceptoGasto, Gasto, IngresoGuardia, NuevoGasto, NuevoIngresoGuardia, Taxi, Usuario};

pub(crate) const ME_PATH: &str = "usuarios/me/";

impl ApiClient {
    /// `GET usuarios/me/` — identity and role of the authenticated user.
    pub async fn current_user(&self) -> Result<Usuario> {
        self.get(ME_PATH).await
    }

    /// `GET taxis/` — taxis assigned to the authenticated user.
    pub async fn list_taxis(&self) -> Result<Vec<Taxi>> {
        self.get("taxis/").await
    }

    /// `GET conceptos-gasto/` — the expense concept catalog.
    pub async fn list_conceptos_gasto(&self) -> Result<Vec<ConceptoGasto>> {
        self.get("conceptos-gasto/").await
    }

    /// `GET gastos/` — expenses visible to the authenticated user.
    pub async fn list_gastos(&self) -> Result<Vec<Gasto>> {
        self.get("gastos/").await
    }

    /// `POST gastos/` — register an expense.
    pub async fn create_gasto(&self, gasto: &NuevoGasto) -> Result<()> {
        self.post_discard("gastos/", gasto).await
    }

    /// `GET ingresos-guardia/` — guard-shift incomes.
    pub async fn list_ingresos_guardia(&self) -> Result<Vec<IngresoGuardia>> {
        self.get("ingresos-guardia/").await
    }

    /// `POST ingresos-guardia/` — register a guard-shift income.
    pub async fn create_ingreso_guardia(&self, ingreso: &NuevoIngresoGuardia) -> Result<()> {
        self.post_discard("ingresos-guardia/", ingreso).await
    }
}
