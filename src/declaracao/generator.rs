//! Generator for the Declaração de Responsabilidade e Ciência das Regras de
//! Hospedagem.
//!
//! Builds the guest-facing HTML declaration from normalized registration
//! data: computes the stay length, formats CPF and dates, and fills the
//! static template.

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};

use super::common::{
    calcular_diarias, escape_html, formatar_cpf, formatar_data, formatar_data_local, nome_arquivo,
};
use super::engine::TemplateEngine;
use super::models::HospedeData;
use super::{DeclaracaoDocument, DeclaracaoError};

const TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/static/declaracao_responsabilidade.html"
));

/// Generator for the guest declaration document.
#[derive(Debug, Clone)]
pub struct DeclaracaoGenerator {
    template: Cow<'static, str>,
}

impl Default for DeclaracaoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclaracaoGenerator {
    /// Generator backed by the bundled template.
    pub fn new() -> Self {
        Self {
            template: Cow::Borrowed(TEMPLATE),
        }
    }

    /// Generator backed by a custom template using the same placeholders.
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: Cow::Owned(template.into()),
        }
    }

    /// Render the declaration stamped with the current time.
    pub fn generate(&self, hospede: &HospedeData) -> Result<DeclaracaoDocument, DeclaracaoError> {
        self.render_at(hospede, Utc::now())
    }

    /// Render the declaration as if generated at `gerado_em`.
    pub fn render_at(
        &self,
        hospede: &HospedeData,
        gerado_em: DateTime<Utc>,
    ) -> Result<DeclaracaoDocument, DeclaracaoError> {
        let diarias = calcular_diarias(&hospede.checkin, &hospede.checkout);
        let data_atual = formatar_data_local(&gerado_em);
        let valores = template_values(hospede, diarias, &data_atual);

        let html = TemplateEngine::render(&self.template, &valores)?;

        Ok(DeclaracaoDocument {
            html,
            filename: nome_arquivo(&hospede.nome, &gerado_em),
            data_geracao: gerado_em.to_rfc3339_opts(SecondsFormat::Millis, true),
            hospede: hospede.nome.clone(),
            acomodacao: hospede.acomodacao.clone(),
        })
    }
}

fn template_values(
    hospede: &HospedeData,
    diarias: i64,
    data_atual: &str,
) -> HashMap<&'static str, String> {
    let documento_identidade = if hospede.rg.is_empty() {
        "Não informado".to_string()
    } else {
        format!("RG nº {}", escape_html(&hospede.rg))
    };

    // The checkout date is shown even when empty, as long as there is a checkin.
    let linha_periodo = if hospede.checkin.is_empty() {
        String::new()
    } else {
        format!(
            "<p><strong>Check-in:</strong> {} | <strong>Check-out:</strong> {}</p>",
            escape_html(&formatar_data(&hospede.checkin)),
            escape_html(&formatar_data(&hospede.checkout)),
        )
    };

    let linha_contato = if hospede.telefone.is_empty() {
        String::new()
    } else {
        format!(
            "<p><strong>Contato:</strong> {}</p>",
            escape_html(&hospede.telefone)
        )
    };

    let linha_validade = if hospede.checkin.is_empty() || hospede.checkout.is_empty() {
        String::new()
    } else {
        format!(
            "<p><strong>Válido para o período:</strong> {} a {}</p>",
            escape_html(&formatar_data(&hospede.checkin)),
            escape_html(&formatar_data(&hospede.checkout)),
        )
    };

    HashMap::from([
        ("nome", escape_html(&hospede.nome)),
        ("documento_identidade", documento_identidade),
        ("cpf", escape_html(&formatar_cpf(&hospede.cpf))),
        ("num_hospedes", escape_html(&hospede.num_hospedes)),
        ("acomodacao", escape_html(&hospede.acomodacao)),
        ("linha_periodo", linha_periodo),
        ("diarias", diarias.to_string()),
        ("linha_contato", linha_contato),
        ("assinatura", escape_html(&hospede.assinatura)),
        ("data_atual", data_atual.to_string()),
        ("linha_validade", linha_validade),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaracao::engine::RenderError;
    use chrono::TimeZone;

    fn hospede() -> HospedeData {
        HospedeData {
            nome: "Maria da Silva".to_string(),
            cpf: "12345678901".to_string(),
            email: "maria@example.com".to_string(),
            acomodacao: "Chalé 2".to_string(),
            num_hospedes: "2".to_string(),
            assinatura: "Confirmada digitalmente".to_string(),
            ..Default::default()
        }
    }

    fn instante() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_render_minimal_record() {
        let documento = DeclaracaoGenerator::new()
            .render_at(&hospede(), instante())
            .unwrap();

        assert!(documento.html.starts_with("<!DOCTYPE html>"));
        assert!(documento.html.contains("Maria da Silva"));
        assert!(documento.html.contains("Não informado"));
        assert!(documento.html.contains("123.456.789-01"));
        assert!(documento.html.contains("2 pessoa(s)"));
        assert!(documento.html.contains("1 diária(s)"));
        assert!(documento.html.contains("15/06/2024"));
        assert!(!documento.html.contains("Check-in:"));
        assert!(!documento.html.contains("Contato:"));
        assert!(!documento.html.contains("Válido para o período"));
        assert!(!documento.html.contains("{{"));
        assert_eq!(documento.filename, "Declaracao_Maria_da_Silva_1718452800000.html");
        assert_eq!(documento.data_geracao, "2024-06-15T12:00:00.000Z");
    }

    #[test]
    fn test_generate_stamps_current_time() {
        let antes = Utc::now();
        let documento = DeclaracaoGenerator::new().generate(&hospede()).unwrap();

        let gerado_em = DateTime::parse_from_rfc3339(&documento.data_geracao).unwrap();
        assert!(gerado_em.timestamp_millis() >= antes.timestamp_millis());
        assert_eq!(
            documento.filename,
            format!("Declaracao_Maria_da_Silva_{}.html", gerado_em.timestamp_millis())
        );
    }

    #[test]
    fn test_render_with_reservation_details() {
        let mut dados = hospede();
        dados.rg = "12.345.678-9".to_string();
        dados.checkin = "2024-01-01".to_string();
        dados.checkout = "2024-01-04".to_string();
        dados.telefone = "(11) 98765-4321".to_string();

        let html = DeclaracaoGenerator::new()
            .render_at(&dados, instante())
            .unwrap()
            .html;

        assert!(html.contains("RG nº 12.345.678-9"));
        assert!(html.contains(
            "<strong>Check-in:</strong> 01/01/2024 | <strong>Check-out:</strong> 04/01/2024"
        ));
        assert!(html.contains("3 diária(s)"));
        assert!(html.contains("<strong>Contato:</strong> (11) 98765-4321"));
        assert!(html.contains("Válido para o período:</strong> 01/01/2024 a 04/01/2024"));
    }

    #[test]
    fn test_checkin_without_checkout() {
        let mut dados = hospede();
        dados.checkin = "2024-01-01".to_string();

        let html = DeclaracaoGenerator::new()
            .render_at(&dados, instante())
            .unwrap()
            .html;

        assert!(html.contains("<strong>Check-out:</strong> </p>"));
        assert!(!html.contains("Válido para o período"));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let mut dados = hospede();
        dados.nome = "<script>alert(1)</script>".to_string();

        let html = DeclaracaoGenerator::new()
            .render_at(&dados, instante())
            .unwrap()
            .html;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_broken_template_is_render_error() {
        let generator = DeclaracaoGenerator::with_template("<p>{{inexistente}}</p>");
        let err = generator.render_at(&hospede(), instante()).unwrap_err();
        assert!(matches!(
            err,
            DeclaracaoError::Render(RenderError::PlaceholderDesconhecido(_))
        ));
    }
}
