//! Placeholder rendering engine.
//!
//! Templates mark substitution points with `{{chave}}`. Every marker must
//! resolve to a provided value; values are inserted verbatim, so callers
//! escape user input before handing it over.

use std::collections::HashMap;

use thiserror::Error;

const ABRE: &str = "{{";
const FECHA: &str = "}}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("placeholder desconhecido no template: {0}")]
    PlaceholderDesconhecido(String),
    #[error("placeholder sem fechamento no template (posição {0})")]
    PlaceholderAberto(usize),
}

/// Stateless engine for filling `{{chave}}` templates.
pub struct TemplateEngine;

impl TemplateEngine {
    /// Substitute every placeholder in `template` with its value.
    pub fn render(template: &str, valores: &HashMap<&str, String>) -> Result<String, RenderError> {
        let mut saida = String::with_capacity(template.len() + 1024);
        let mut resto = template;
        let mut offset = 0;

        while let Some(inicio) = resto.find(ABRE) {
            saida.push_str(&resto[..inicio]);

            let apos_abre = &resto[inicio + ABRE.len()..];
            let fim = apos_abre
                .find(FECHA)
                .ok_or(RenderError::PlaceholderAberto(offset + inicio))?;

            let chave = apos_abre[..fim].trim();
            let valor = valores
                .get(chave)
                .ok_or_else(|| RenderError::PlaceholderDesconhecido(chave.to_string()))?;
            saida.push_str(valor);

            let consumido = inicio + ABRE.len() + fim + FECHA.len();
            offset += consumido;
            resto = &resto[consumido..];
        }

        saida.push_str(resto);
        Ok(saida)
    }
}
