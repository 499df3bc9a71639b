//! Declaration module - turns a guest registration into the HTML
//! "Declaração de Responsabilidade e Ciência das Regras de Hospedagem".
//!
//! Each request goes through three steps:
//! - `validation` - required fields, first missing one wins
//! - `normalize` - trimming, CPF digits, defaults
//! - `generator` - stay length, formatting and template rendering

pub mod common;
pub mod engine;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod validation;

pub use engine::{RenderError, TemplateEngine};
pub use generator::DeclaracaoGenerator;
pub use handlers::{config, config_with};
pub use models::{DeclaracaoRequest, DeclaracaoResponse, HospedeData};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::ErrorResponse;

/// Errors that can occur while handling a declaration request.
#[derive(Debug, Error)]
pub enum DeclaracaoError {
    #[error("Método não permitido")]
    MetodoNaoPermitido,
    #[error("Campo obrigatório ausente: {0}")]
    CampoAusente(&'static str),
    #[error("Corpo da requisição inválido: {0}")]
    CorpoInvalido(#[source] serde_json::Error),
    #[error("Erro ao renderizar documento: {0}")]
    Render(#[from] RenderError),
}

impl ResponseError for DeclaracaoError {
    fn status_code(&self) -> StatusCode {
        match self {
            DeclaracaoError::MetodoNaoPermitido => StatusCode::METHOD_NOT_ALLOWED,
            DeclaracaoError::CampoAusente(_) | DeclaracaoError::CorpoInvalido(_) => {
                StatusCode::BAD_REQUEST
            }
            DeclaracaoError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            DeclaracaoError::Render(_) => ErrorResponse::internal_error(&self.to_string()),
            _ => ErrorResponse::new(&self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Result of a successful document generation.
#[derive(Debug, Clone)]
pub struct DeclaracaoDocument {
    pub html: String,
    pub filename: String,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub data_geracao: String,
    pub hospede: String,
    pub acomodacao: String,
}
