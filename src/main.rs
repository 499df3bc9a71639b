#[actix_web::main]
async fn main() -> std::io::Result<()> {
    declaracao_hospede_server::run().await
}
