//! Common utilities for the declaration document.
//!
//! Shared helpers for date parsing and display, stay-length arithmetic,
//! CPF formatting, HTML escaping and filename generation.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MS_POR_DIA: i64 = 24 * 60 * 60 * 1000;

/// Default stay length when dates are missing, invalid or out of order.
pub const DIARIAS_PADRAO: i64 = 1;

const FORMATOS_COM_OFFSET: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

const FORMATOS_DATA_HORA: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

// `dd/mm/yyyy` is read day first.
const FORMATOS_DATA: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%a %b %d %Y",
    "%a, %b %d, %Y",
];

/// A date-like string that was successfully understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataInterpretada {
    /// Point in time used for differences. Values without an offset are
    /// taken as UTC wall-clock time.
    pub instante: NaiveDateTime,
    /// Calendar date as written in the input.
    pub data: NaiveDate,
}

/// Parse a date-like string. Returns `None` for empty or unrecognised input.
pub fn parse_data(valor: &str) -> Option<DataInterpretada> {
    let valor = valor.trim();
    if valor.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(valor) {
        return Some(DataInterpretada {
            instante: dt.naive_utc(),
            data: dt.date_naive(),
        });
    }

    for formato in FORMATOS_COM_OFFSET {
        if let Ok(dt) = DateTime::parse_from_str(valor, formato) {
            return Some(DataInterpretada {
                instante: dt.naive_utc(),
                data: dt.date_naive(),
            });
        }
    }

    for formato in FORMATOS_DATA_HORA {
        if let Ok(dt) = NaiveDateTime::parse_from_str(valor, formato) {
            return Some(DataInterpretada {
                instante: dt,
                data: dt.date(),
            });
        }
    }

    for formato in FORMATOS_DATA {
        if let Ok(data) = NaiveDate::parse_from_str(valor, formato) {
            return Some(DataInterpretada {
                instante: data.and_time(chrono::NaiveTime::MIN),
                data,
            });
        }
    }

    DateTime::parse_from_rfc2822(valor)
        .ok()
        .map(|dt| DataInterpretada {
            instante: dt.naive_utc(),
            data: dt.date_naive(),
        })
}

/// Number of nightly stays between check-in and check-out.
///
/// Partial days round up. Anything that cannot produce a positive count
/// (missing or unparsable date, checkout not after checkin) yields `1`.
pub fn calcular_diarias(checkin: &str, checkout: &str) -> i64 {
    let (Some(entrada), Some(saida)) = (parse_data(checkin), parse_data(checkout)) else {
        return DIARIAS_PADRAO;
    };

    let diferenca = (saida.instante - entrada.instante).num_milliseconds();
    if diferenca <= 0 {
        return DIARIAS_PADRAO;
    }

    (diferenca + MS_POR_DIA - 1) / MS_POR_DIA
}

/// Format a CPF as `XXX.XXX.XXX-XX`.
///
/// Only the first eleven characters are grouped; any trailing digits are
/// kept as-is. Shorter or non-numeric values pass through unchanged.
pub fn formatar_cpf(cpf: &str) -> String {
    let bytes = cpf.as_bytes();
    if bytes.len() < 11 || !bytes[..11].iter().all(u8::is_ascii_digit) {
        return cpf.to_string();
    }

    format!(
        "{}.{}.{}-{}{}",
        &cpf[0..3],
        &cpf[3..6],
        &cpf[6..9],
        &cpf[9..11],
        &cpf[11..]
    )
}

/// Render a date-like string as `dd/mm/yyyy`, or return it unchanged when it
/// cannot be parsed.
pub fn formatar_data(valor: &str) -> String {
    match parse_data(valor) {
        Some(interpretada) => formatar_data_br(interpretada.data),
        None => valor.to_string(),
    }
}

/// Brazilian short date (e.g., "19/10/2026").
pub fn formatar_data_br(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

/// Local calendar date of `agora`, in Brazilian short format.
pub fn formatar_data_local<Tz: TimeZone>(agora: &DateTime<Tz>) -> String {
    formatar_data_br(agora.with_timezone(&Local).date_naive())
}

/// Escape special characters for HTML text and attribute content.
pub fn escape_html(valor: &str) -> String {
    let mut escaped = String::with_capacity(valor.len());
    for ch in valor.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Suggested filename: `Declaracao_<nome>_<epoch millis>.html`, with every
/// whitespace run in the name replaced by `_`.
pub fn nome_arquivo(nome: &str, gerado_em: &DateTime<Utc>) -> String {
    let nome = nome.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Declaracao_{}_{}.html", nome, gerado_em.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_offsets() {
        let data = parse_data("2024-03-10T23:30:00-03:00").unwrap();
        assert_eq!(data.data, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(
            data.instante,
            NaiveDate::from_ymd_opt(2024, 3, 11)
                .unwrap()
                .and_hms_opt(2, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_data_brazilian() {
        let data = parse_data("05/02/2024").unwrap();
        assert_eq!(data.data, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
    }

    #[test]
    fn test_parse_data_rejects_garbage() {
        assert!(parse_data("").is_none());
        assert!(parse_data("   ").is_none());
        assert!(parse_data("amanhã").is_none());
        assert!(parse_data("2024-02-30").is_none());
    }

    #[test]
    fn test_diarias_partial_day_rounds_up() {
        assert_eq!(calcular_diarias("2024-01-01T14:00", "2024-01-03T11:00"), 2);
        assert_eq!(calcular_diarias("2024-01-01T14:00", "2024-01-01T15:00"), 1);
    }

    #[test]
    fn test_cpf_with_extra_digits() {
        assert_eq!(formatar_cpf("123456789012"), "123.456.789-012");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Ana" & 'Bia'</b>"#),
            "&lt;b&gt;&quot;Ana&quot; &amp; &#39;Bia&#39;&lt;/b&gt;"
        );
    }
}
