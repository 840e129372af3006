use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use tracing::{error, info};

use crate::application::{ChartDataUseCase, StudentImportUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::StudentRepository;
use crate::interfaces::http::AppState;

/// Prepare the shared application state used by the HTTP handlers.
pub async fn build_state(config: &AppConfig) -> Result<web::Data<AppState>> {
    ensure_database_dir(&config.database.url)?;

    let repository = Arc::new(StudentRepository::connect(&config.database.url).await?);
    if let Err(err) = repository.health_check().await {
        error!(error = %err, "Database health check failed");
        return Err(err);
    }
    info!(database_url = %config.database.url, "Student database ready");

    Ok(web::Data::new(AppState {
        import_use_case: StudentImportUseCase::new(Arc::clone(&repository)),
        chart_use_case: ChartDataUseCase::new(Arc::clone(&repository)),
        repository,
    }))
}

/// Create the parent directory for a file-backed sqlite database.
fn ensure_database_dir(database_url: &str) -> Result<()> {
    let path = database_url.trim_start_matches("sqlite://");
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
