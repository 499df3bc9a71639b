use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::normalize::normalizar;
use super::validation::validate_required;
use super::{DeclaracaoDocument, DeclaracaoError};

/// Raw guest-registration payload as received over HTTP.
///
/// Field values are loosely typed; anything that is not a JSON object is
/// treated as an empty payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclaracaoRequest {
    pub campos: Map<String, Value>,
}

impl DeclaracaoRequest {
    pub fn new(campos: Map<String, Value>) -> Self {
        Self { campos }
    }

    /// Parse a request body. An empty body is an empty payload.
    pub fn from_slice(body: &[u8]) -> Result<Self, DeclaracaoError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(DeclaracaoError::CorpoInvalido)?;
        Ok(Self::from(value))
    }

    /// Check the required fields, failing on the first one missing.
    pub fn validate(&self) -> Result<(), DeclaracaoError> {
        validate_required(&self.campos)
    }

    /// Cleaned, defaulted view of the payload.
    pub fn normalize(&self) -> HospedeData {
        normalizar(&self.campos)
    }
}

impl From<Value> for DeclaracaoRequest {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(campos) => Self { campos },
            _ => Self::default(),
        }
    }
}

/// Normalized guest data used to render the declaration.
///
/// Also documents the accepted request body; optional fields are not
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct HospedeData {
    /// Nome completo do hóspede responsável
    #[schema(example = "Maria da Silva")]
    pub nome: String,
    /// Número do RG (opcional)
    #[schema(required = false)]
    pub rg: String,
    /// CPF, apenas dígitos após normalização
    #[schema(example = "12345678901")]
    pub cpf: String,
    #[schema(example = "maria@example.com")]
    pub email: String,
    /// Nome da acomodação reservada
    #[schema(example = "Chalé das Araucárias")]
    pub acomodacao: String,
    #[schema(required = false, example = "2024-01-01")]
    pub checkin: String,
    #[schema(required = false, example = "2024-01-04")]
    pub checkout: String,
    #[schema(rename = "numHospedes", required = false, example = "2")]
    pub num_hospedes: String,
    #[schema(required = false)]
    pub telefone: String,
    /// Texto exibido no bloco de assinatura digital
    #[schema(required = false)]
    pub assinatura: String,
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeclaracaoResponse {
    pub success: bool,
    /// Documento HTML completo
    pub html_content: String,
    #[schema(example = "Declaracao_Maria_da_Silva_1704067200000.html")]
    pub filename: String,
    /// Instante de geração em ISO-8601 (UTC)
    pub data_geracao: String,
    pub hospede: String,
    pub acomodacao: String,
}

impl From<DeclaracaoDocument> for DeclaracaoResponse {
    fn from(documento: DeclaracaoDocument) -> Self {
        Self {
            success: true,
            html_content: documento.html,
            filename: documento.filename,
            data_geracao: documento.data_geracao,
            hospede: documento.hospede,
            acomodacao: documento.acomodacao,
        }
    }
}
