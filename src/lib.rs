use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{http::header, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod declaracao;

pub use crate::config::ServerConfig;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            timestamp: None,
        }
    }

    /// Error body for unexpected failures, stamped with the current time.
    pub fn internal_error(message: &str) -> Self {
        Self {
            error: message.to_string(),
            timestamp: Some(
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ),
        }
    }
}

/// CORS headers attached to every response.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::declaracao::handlers::gerar_documento),
    components(schemas(
        declaracao::HospedeData,
        declaracao::DeclaracaoResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Declaração", description = "Geração da declaração de responsabilidade do hóspede.")
    )
)]
pub struct ApiDoc;

pub async fn run() -> std::io::Result<()> {
    config::init_logging();

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid server configuration: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("declaracao_hospede_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "Starting server at http://{}:{}",
        server_config.host,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors_headers())
            .configure(declaracao::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(server_config.bind_address())?
    .run()
    .await
}
