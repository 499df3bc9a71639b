//! Input validation for the declaration request.
//!
//! Required fields are checked in a fixed order and the first missing one
//! aborts the request; no error aggregation.

use serde_json::{Map, Value};

use super::DeclaracaoError;

/// Required JSON keys, in the order they are checked.
pub const CAMPOS_OBRIGATORIOS: [&str; 4] = ["nome", "cpf", "email", "acomodacao"];

/// Loose truthiness of a JSON value: `null`, `false`, `0` and empty strings
/// are falsy, everything else (including arrays and objects) is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// A required field is present when it is truthy and not blank.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        other => is_truthy(other),
    }
}

/// Validate that every required field is present, failing on the first gap.
pub fn validate_required(payload: &Map<String, Value>) -> Result<(), DeclaracaoError> {
    for campo in CAMPOS_OBRIGATORIOS {
        if !is_present(payload.get(campo)) {
            log::warn!(
                "Campo ausente: {} {}",
                campo,
                serde_json::to_string(payload).unwrap_or_default()
            );
            return Err(DeclaracaoError::CampoAusente(campo));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(0.0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!(" "))));
        assert!(is_truthy(Some(&json!(42))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
    }

    #[test]
    fn test_blank_string_is_missing() {
        let result = validate_required(&payload(json!({
            "nome": "   ",
            "cpf": "123",
            "email": "a@b.com",
            "acomodacao": "Chalé"
        })));
        assert!(matches!(result, Err(DeclaracaoError::CampoAusente("nome"))));
    }

    #[test]
    fn test_numeric_fields_count_as_present() {
        let result = validate_required(&payload(json!({
            "nome": "Ana",
            "cpf": 12345678901u64,
            "email": "ana@example.com",
            "acomodacao": 7
        })));
        assert!(result.is_ok());
    }

    #[test]
    fn test_first_missing_field_wins() {
        let result = validate_required(&payload(json!({ "nome": "Ana" })));
        assert!(matches!(result, Err(DeclaracaoError::CampoAusente("cpf"))));
    }
}
