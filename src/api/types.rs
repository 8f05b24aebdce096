//! Wire types for the fleet back-office API.
//!
//! Field names mirror the backend serializers verbatim; decimal amounts
//! arrive as strings on reads and are sent as numbers on writes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bon::Builder;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Roles the backend assigns to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rol {
    Administrador,
    Validador,
    Encargado,
}

/// Verification state of a registered gasto or ingreso.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EstadoVerificacion {
    #[default]
    Pendiente,
    Aprobado,
    Rechazado,
}

/// Authenticated user identity, as returned by `GET usuarios/me/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    pub rol: Rol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxi {
    pub id_taxi: i64,
    pub placa: String,
    pub modelo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptoGasto {
    pub id_concepto_gasto: i64,
    pub nombre: String,
}

/// Expense as returned by `GET gastos/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gasto {
    pub id_gasto: i64,
    pub id_taxi: i64,
    pub id_taxi_placa: String,
    pub concepto: i64,
    pub concepto_nombre: String,
    pub monto: String,
    pub fecha_gasto: NaiveDate,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub id_encargado_registro: i64,
    pub id_encargado_registro_username: String,
    pub estado_verificacion: EstadoVerificacion,
    pub fecha_registro: DateTime<Utc>,
    pub fecha_ultima_actualizacion: DateTime<Utc>,
}

/// Payload for `POST gastos/`. An attached factura travels inline as a
/// base64 data URI.
#[derive(Debug, Clone, Builder, Serialize)]
pub struct NuevoGasto {
    pub id_taxi: i64,
    pub concepto: i64,
    pub monto: f64,
    pub fecha_gasto: NaiveDate,
    pub descripcion: String,
    pub id_encargado_registro: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_factura_adjunta_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_factura_adjunta_name: Option<String>,
}

impl NuevoGasto {
    /// Attach a factura image to this gasto.
    pub fn with_factura(mut self, factura: &Factura) -> Self {
        self.url_factura_adjunta_base64 = Some(factura.to_data_uri());
        self.url_factura_adjunta_name = Some(factura.name.clone());
        self
    }
}

/// Guard-shift income as returned by `GET ingresos-guardia/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngresoGuardia {
    pub id_ingreso_guardia: i64,
    pub id_taxi: i64,
    pub taxi_placa: String,
    pub fecha_pago: NaiveDate,
    pub monto: String,
    pub estado_verificacion: EstadoVerificacion,
    pub id_encargado_registro: i64,
    pub encargado_nombre: String,
}

/// Payload for `POST ingresos-guardia/`. New registrations always start
/// out pending verification.
#[derive(Debug, Clone, Builder, Serialize)]
pub struct NuevoIngresoGuardia {
    pub id_taxi: i64,
    pub fecha_pago: NaiveDate,
    pub monto: f64,
    #[builder(default)]
    pub estado_verificacion: EstadoVerificacion,
    pub id_encargado_registro: i64,
}

/// An invoice photo to attach to a gasto: raw bytes plus metadata.
#[derive(Debug, Clone)]
pub struct Factura {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Factura {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Encode as the `data:<mime>;base64,<payload>` URI the backend stores.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn rol_round_trips_through_wire_names() {
        let parsed: Rol = serde_json::from_value(json!("encargado")).unwrap();
        assert_eq!(parsed, Rol::Encargado);
        assert_eq!(serde_json::to_value(Rol::Administrador).unwrap(), json!("administrador"));
        assert_eq!("validador".parse::<Rol>().unwrap(), Rol::Validador);
        assert_eq!(Rol::Encargado.to_string(), "encargado");
    }

    #[test]
    fn unknown_rol_is_rejected() {
        assert!("gerente".parse::<Rol>().is_err());
        assert!(serde_json::from_value::<Rol>(json!("gerente")).is_err());
    }

    #[test]
    fn estado_defaults_to_pendiente() {
        assert_eq!(EstadoVerificacion::default(), EstadoVerificacion::Pendiente);
        assert_eq!(
            serde_json::to_value(EstadoVerificacion::Pendiente).unwrap(),
            json!("pendiente")
        );
    }

    #[test]
    fn nuevo_gasto_omits_factura_fields_when_absent() {
        let gasto = NuevoGasto::builder()
            .id_taxi(3)
            .concepto(1)
            .monto(1500.0)
            .fecha_gasto(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap())
            .descripcion("Cambio de llantas delanteras".to_string())
            .id_encargado_registro(7)
            .build();
        let value = serde_json::to_value(&gasto).unwrap();
        assert_eq!(
            value,
            json!({
                "id_taxi": 3,
                "concepto": 1,
                "monto": 1500.0,
                "fecha_gasto": "2025-06-14",
                "descripcion": "Cambio de llantas delanteras",
                "id_encargado_registro": 7
            })
        );
    }

    #[test]
    fn with_factura_inlines_data_uri_and_name() {
        let factura = Factura::new("factura-llantas.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
        let gasto = NuevoGasto::builder()
            .id_taxi(3)
            .concepto(1)
            .monto(1500.0)
            .fecha_gasto(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap())
            .descripcion("Cambio de llantas delanteras".to_string())
            .id_encargado_registro(7)
            .build()
            .with_factura(&factura);
        let value = serde_json::to_value(&gasto).unwrap();
        assert_eq!(
            value["url_factura_adjunta_base64"],
            json!("data:image/jpeg;base64,/9j/")
        );
        assert_eq!(value["url_factura_adjunta_name"], json!("factura-llantas.jpg"));
    }

    #[test]
    fn nuevo_ingreso_defaults_to_pendiente() {
        let ingreso = NuevoIngresoGuardia::builder()
            .id_taxi(2)
            .fecha_pago(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap())
            .monto(800.0)
            .id_encargado_registro(7)
            .build();
        let value = serde_json::to_value(&ingreso).unwrap();
        assert_eq!(value["estado_verificacion"], json!("pendiente"));
    }

    #[test]
    fn gasto_list_item_deserializes() {
        let gasto: Gasto = serde_json::from_value(json!({
            "id_gasto": 11,
            "id_taxi": 3,
            "id_taxi_placa": "ABC-123",
            "concepto": 1,
            "concepto_nombre": "Mantenimiento",
            "monto": "1500.00",
            "fecha_gasto": "2025-06-14",
            "descripcion": "Cambio de llantas delanteras",
            "id_encargado_registro": 7,
            "id_encargado_registro_username": "maria",
            "estado_verificacion": "aprobado",
            "fecha_registro": "2025-06-14T18:30:00Z",
            "fecha_ultima_actualizacion": "2025-06-15T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(gasto.id_gasto, 11);
        assert_eq!(gasto.monto, "1500.00");
        assert_eq!(gasto.estado_verificacion, EstadoVerificacion::Aprobado);
        assert_eq!(
            gasto.fecha_gasto,
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
        );
    }

    #[test]
    fn gasto_without_descripcion_deserializes() {
        let gasto: Gasto = serde_json::from_value(json!({
            "id_gasto": 12,
            "id_taxi": 3,
            "id_taxi_placa": "ABC-123",
            "concepto": 2,
            "concepto_nombre": "Combustible",
            "monto": "400.00",
            "fecha_gasto": "2025-06-15",
            "descripcion": null,
            "id_encargado_registro": 7,
            "id_encargado_registro_username": "maria",
            "estado_verificacion": "pendiente",
            "fecha_registro": "2025-06-15T08:00:00Z",
            "fecha_ultima_actualizacion": "2025-06-15T08:00:00Z"
        }))
        .unwrap();
        assert!(gasto.descripcion.is_none());
    }
}
