//! Field normalization: trimming, digit stripping and defaults.

use serde_json::{Map, Value};

use super::models::HospedeData;
use super::validation::is_truthy;

pub const NUM_HOSPEDES_PADRAO: &str = "1";
pub const ASSINATURA_PADRAO: &str = "Confirmada digitalmente";

/// String form of a loosely-typed value. Whole floats print without a
/// fractional part and arrays join their items with `,`.
fn texto(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => numero(n),
        Value::String(s) => s.clone(),
        Value::Array(itens) => itens.iter().map(item_de_lista).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Array items render like `texto`, except `null` becomes empty.
fn item_de_lista(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => texto(other),
    }
}

fn numero(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Truthy field as text, or `padrao` when the field is falsy or absent.
fn campo_ou(campos: &Map<String, Value>, chave: &str, padrao: &str) -> String {
    let value = campos.get(chave);
    if is_truthy(value) {
        value.map(texto).unwrap_or_default()
    } else {
        padrao.to_string()
    }
}

/// Build the cleaned guest record. Never fails.
pub fn normalizar(campos: &Map<String, Value>) -> HospedeData {
    HospedeData {
        nome: campo_ou(campos, "nome", "").trim().to_string(),
        rg: campo_ou(campos, "rg", "").trim().to_string(),
        cpf: somente_digitos(&campo_ou(campos, "cpf", "")),
        email: campo_ou(campos, "email", "").trim().to_lowercase(),
        acomodacao: campo_ou(campos, "acomodacao", "").trim().to_string(),
        checkin: campo_ou(campos, "checkin", ""),
        checkout: campo_ou(campos, "checkout", ""),
        num_hospedes: campo_ou(campos, "numHospedes", NUM_HOSPEDES_PADRAO),
        telefone: campo_ou(campos, "telefone", ""),
        assinatura: campo_ou(campos, "assinatura", ASSINATURA_PADRAO),
    }
}

/// Keep only ASCII digits.
pub fn somente_digitos(valor: &str) -> String {
    valor.chars().filter(char::is_ascii_digit).collect()
}
