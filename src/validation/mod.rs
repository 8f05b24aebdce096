//! Client-side validation for the registration forms.
//!
//! Mirrors what the backend enforces so the app can reject bad input
//! before spending a round trip. Messages are user-facing product copy.

use chrono::{Days, Months, NaiveDate};

/// Field errors from validating login input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_valid(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Field errors from validating a new gasto.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GastoErrors {
    pub monto: Option<String>,
    pub descripcion: Option<String>,
    pub fecha: Option<String>,
    pub concepto: Option<String>,
}

impl GastoErrors {
    pub fn is_valid(&self) -> bool {
        self.monto.is_none()
            && self.descripcion.is_none()
            && self.fecha.is_none()
            && self.concepto.is_none()
    }
}

/// Field errors from validating a new ingreso de guardia.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngresoErrors {
    pub monto: Option<String>,
    pub fecha: Option<String>,
}

impl IngresoErrors {
    pub fn is_valid(&self) -> bool {
        self.monto.is_none() && self.fecha.is_none()
    }
}

pub fn validate_login(username: &str, password: &str) -> LoginErrors {
    let mut errors = LoginErrors::default();
    let username = username.trim();

    if username.is_empty() {
        errors.username = Some("El nombre de usuario es requerido".to_string());
    } else if username.chars().count() < 3 {
        errors.username =
            Some("El nombre de usuario debe tener al menos 3 caracteres".to_string());
    } else if username.chars().count() > 50 {
        errors.username =
            Some("El nombre de usuario no puede tener más de 50 caracteres".to_string());
    }

    if password.is_empty() {
        errors.password = Some("La contraseña es requerida".to_string());
    } else if password.chars().count() < 4 {
        errors.password = Some("La contraseña debe tener al menos 4 caracteres".to_string());
    } else if password.chars().count() > 100 {
        errors.password =
            Some("La contraseña no puede tener más de 100 caracteres".to_string());
    }

    errors
}

/// Validate gasto form input. `hoy` is injected so date bounds are
/// deterministic under test.
pub fn validate_gasto(
    monto: &str,
    descripcion: &str,
    fecha: NaiveDate,
    concepto: Option<i64>,
    hoy: NaiveDate,
) -> GastoErrors {
    GastoErrors {
        monto: validate_monto(monto),
        descripcion: validate_descripcion(descripcion),
        fecha: validate_fecha(fecha, hoy),
        concepto: concepto
            .is_none()
            .then(|| "El tipo de gasto es requerido".to_string()),
    }
}

/// Validate ingreso form input.
pub fn validate_ingreso(monto: &str, fecha: NaiveDate, hoy: NaiveDate) -> IngresoErrors {
    IngresoErrors {
        monto: validate_monto(monto),
        fecha: validate_fecha(fecha, hoy),
    }
}

fn validate_monto(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some("La cantidad es requerida".to_string());
    }
    match raw.parse::<f64>() {
        Err(_) => Some("La cantidad debe ser un número válido".to_string()),
        Ok(value) if value.is_nan() || value <= 0.0 => {
            Some("La cantidad debe ser mayor a 0".to_string())
        }
        Ok(value) if value > 999_999.99 => {
            Some("La cantidad no puede ser mayor a 999,999.99".to_string())
        }
        Ok(_) => None,
    }
}

fn validate_descripcion(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Some("La descripción es requerida".to_string())
    } else if trimmed.chars().count() < 5 {
        Some("La descripción debe tener al menos 5 caracteres".to_string())
    } else if trimmed.chars().count() > 500 {
        Some("La descripción no puede tener más de 500 caracteres".to_string())
    } else {
        None
    }
}

// Registrations may be dated up to tomorrow and back at most a year.
fn validate_fecha(fecha: NaiveDate, hoy: NaiveDate) -> Option<String> {
    if fecha > hoy + Days::new(1) {
        Some("La fecha no puede ser futura".to_string())
    } else if fecha < hoy - Months::new(12) {
        Some("La fecha no puede ser de hace más de un año".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hoy() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    #[test]
    fn valid_login_passes() {
        assert!(validate_login("maria", "secreta").is_valid());
    }

    #[test]
    fn short_username_is_rejected() {
        let errors = validate_login("ab", "secreta");
        assert!(errors.username.unwrap().contains("al menos 3"));
        assert!(errors.password.is_none());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let errors = validate_login("", "");
        assert!(errors.username.unwrap().contains("requerido"));
        assert!(errors.password.unwrap().contains("requerida"));
    }

    #[test]
    fn overlong_username_and_password_are_rejected() {
        let errors = validate_login(&"x".repeat(51), &"y".repeat(101));
        assert!(errors.username.unwrap().contains("más de 50"));
        assert!(errors.password.unwrap().contains("más de 100"));
    }

    #[test]
    fn username_is_trimmed_before_checking() {
        assert!(validate_login("  maria  ", "secreta").is_valid());
    }

    #[test]
    fn valid_gasto_passes() {
        let errors = validate_gasto("1500.50", "Cambio de llantas", hoy(), Some(1), hoy());
        assert!(errors.is_valid());
    }

    #[test]
    fn non_numeric_monto_is_rejected() {
        let errors = validate_ingreso("doce", hoy(), hoy());
        assert!(errors.monto.unwrap().contains("número válido"));
    }

    #[test]
    fn zero_and_negative_monto_are_rejected() {
        assert!(validate_ingreso("0", hoy(), hoy()).monto.is_some());
        assert!(validate_ingreso("-5", hoy(), hoy()).monto.is_some());
    }

    #[test]
    fn monto_above_cap_is_rejected() {
        let errors = validate_ingreso("1000000", hoy(), hoy());
        assert!(errors.monto.unwrap().contains("999,999.99"));
    }

    #[test]
    fn short_descripcion_is_rejected() {
        let errors = validate_gasto("100", "gas", hoy(), Some(1), hoy());
        assert!(errors.descripcion.unwrap().contains("al menos 5"));
    }

    #[test]
    fn missing_concepto_is_rejected() {
        let errors = validate_gasto("100", "Combustible semanal", hoy(), None, hoy());
        assert!(errors.concepto.unwrap().contains("requerido"));
    }

    #[test]
    fn tomorrow_is_the_latest_accepted_fecha() {
        assert!(validate_ingreso("100", hoy() + Days::new(1), hoy()).is_valid());
        let errors = validate_ingreso("100", hoy() + Days::new(2), hoy());
        assert!(errors.fecha.unwrap().contains("futura"));
    }

    #[test]
    fn fecha_older_than_a_year_is_rejected() {
        let errors = validate_ingreso("100", hoy() - Months::new(13), hoy());
        assert!(errors.fecha.unwrap().contains("más de un año"));
    }
}
