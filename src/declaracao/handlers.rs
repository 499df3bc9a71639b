use actix_web::{http::Method, web, HttpResponse};

use super::generator::DeclaracaoGenerator;
use super::models::{DeclaracaoRequest, DeclaracaoResponse, HospedeData};
use super::DeclaracaoError;

pub const DOCUMENTO_PATH: &str = "/api/gerar-documento";

/// Generate the guest declaration - POST /api/gerar-documento
#[utoipa::path(
    post,
    path = "/api/gerar-documento",
    tag = "Declaração",
    request_body = HospedeData,
    responses(
        (status = 200, description = "Documento gerado", body = DeclaracaoResponse),
        (status = 400, description = "Campo obrigatório ausente ou corpo inválido", body = crate::ErrorResponse),
        (status = 405, description = "Método não permitido", body = crate::ErrorResponse),
        (status = 500, description = "Falha interna ao gerar o documento", body = crate::ErrorResponse)
    )
)]
pub async fn gerar_documento(
    generator: web::Data<DeclaracaoGenerator>,
    body: web::Bytes,
) -> Result<HttpResponse, DeclaracaoError> {
    let request = DeclaracaoRequest::from_slice(&body)?;
    request.validate()?;

    let hospede: HospedeData = request.normalize();
    let documento = generator.generate(&hospede).map_err(|e| {
        log::error!("Erro ao gerar documento: {}", e);
        e
    })?;

    log::info!(
        "Documento gerado para {} ({}): {}",
        documento.hospede,
        documento.acomodacao,
        documento.filename
    );

    Ok(HttpResponse::Ok().json(DeclaracaoResponse::from(documento)))
}

/// CORS preflight - always 200 with an empty body.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn metodo_nao_permitido() -> Result<HttpResponse, DeclaracaoError> {
    Err(DeclaracaoError::MetodoNaoPermitido)
}

/// Configure the declaration route with the bundled template.
pub fn config(cfg: &mut web::ServiceConfig) {
    config_with(DeclaracaoGenerator::new())(cfg)
}

/// Configure the declaration route around a specific generator.
pub fn config_with(generator: DeclaracaoGenerator) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(generator)).service(
            web::resource(DOCUMENTO_PATH)
                .route(web::post().to(gerar_documento))
                .route(web::method(Method::OPTIONS).to(preflight))
                .default_service(web::to(metodo_nao_permitido)),
        );
    }
}
