use tracing::{error, info};

use gradebook::domain::error::AppError;
use gradebook::infrastructure::{bootstrap, config::AppConfig};
use gradebook::interfaces::http;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::load().map_err(fatal)?;
    let state = bootstrap::build_state(&config).await.map_err(fatal)?;

    info!(host = %config.http.host, port = config.http.port, "Starting gradebook API");
    http::start_server(state, &config.http)?.await
}

fn fatal(err: AppError) -> std::io::Error {
    error!(error = %err, "Startup failed");
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
