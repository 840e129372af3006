use std::sync::Arc;

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{dev::Server, get, post, put, web, App, HttpResponse, HttpServer, Responder};
use futures::StreamExt;
use serde_json::json;
use tracing::error;
use validator::Validate;

use crate::application::{ChartDataUseCase, StudentImportUseCase};
use crate::domain::error::{AppError, Result};
use crate::domain::student::StudentInput;
use crate::infrastructure::config::HttpConfig;
use crate::infrastructure::db::StudentRepository;

pub struct AppState {
    pub repository: Arc<StudentRepository>,
    pub import_use_case: StudentImportUseCase,
    pub chart_use_case: ChartDataUseCase,
}

struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
}

#[get("/students")]
async fn list_students(state: web::Data<AppState>) -> impl Responder {
    match state.repository.list_students().await {
        Ok(students) => HttpResponse::Ok().json(students),
        Err(err) => {
            error!(error = %err, "Failed to list students");
            error_response(&err)
        }
    }
}

#[post("/students")]
async fn add_student(state: web::Data<AppState>, body: web::Json<StudentInput>) -> impl Responder {
    let input = body.into_inner();
    if let Err(e) = input.validate() {
        return error_response(&AppError::InvalidRequest(format!(
            "incomplete student data: {}",
            e
        )));
    }

    match state.repository.insert_student(&input).await {
        Ok(_) => HttpResponse::Created().json(json!({ "message": "Student added successfully" })),
        Err(err) => {
            error!(error = %err, name = %input.name, "Failed to add student");
            error_response(&err)
        }
    }
}

#[put("/students/{id}")]
async fn update_student(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StudentInput>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(e) = input.validate() {
        return error_response(&AppError::InvalidRequest(format!(
            "incomplete student data: {}",
            e
        )));
    }

    let id = path.into_inner();
    let Ok(student_id) = id.parse::<i64>() else {
        return error_response(&AppError::NotFound(format!("No student matched id {}", id)));
    };

    match state.repository.update_student(student_id, &input).await {
        Ok(0) => error_response(&AppError::NotFound(format!("No student matched id {}", id))),
        Ok(_) => HttpResponse::Ok().json(json!({ "message": "Student updated successfully" })),
        Err(err) => {
            error!(error = %err, student_id, "Failed to update student");
            error_response(&err)
        }
    }
}

#[get("/chart-data")]
async fn chart_data(state: web::Data<AppState>) -> impl Responder {
    match state.chart_use_case.execute().await {
        Ok(chart) => HttpResponse::Ok().json(chart),
        Err(err) => {
            error!(error = %err, "Failed to build chart data");
            error_response(&err)
        }
    }
}

#[post("/upload")]
async fn upload_students(state: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let file = match read_upload(&mut payload).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return error_response(&AppError::InvalidRequest("no file uploaded".to_string()))
        }
        Err(err) => return error_response(&err),
    };

    match state
        .import_use_case
        .execute(&file.file_name, &file.bytes)
        .await
    {
        Ok(count) => HttpResponse::Created().json(json!({
            "message": format!("Imported {} student records", count),
            "count": count,
        })),
        Err(err) => {
            error!(error = %err, file_name = %file.file_name, "Import failed");
            error_response(&err)
        }
    }
}

#[get("/health")]
async fn health(state: web::Data<AppState>) -> impl Responder {
    match state.repository.health_check().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok" })),
        Err(err) => {
            error!(error = %err, "Health check failed");
            error_response(&err)
        }
    }
}

/// Pull the first `file` field out of a multipart upload.
async fn read_upload(payload: &mut Multipart) -> Result<Option<UploadedFile>> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidRequest(format!("Failed to read upload: {}", e)))?;
        if field.name() != "file" {
            continue;
        }

        let file_name = field
            .content_disposition()
            .get_filename()
            .unwrap_or("")
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| AppError::InvalidRequest(format!("Failed to read upload: {}", e)))?;
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(UploadedFile { file_name, bytes }));
    }
    Ok(None)
}

fn error_response(error: &AppError) -> HttpResponse {
    let body = json!({ "message": error.to_string() });
    match error {
        AppError::InvalidRequest(_)
        | AppError::UnsupportedFormat(_)
        | AppError::ParseError(_)
        | AppError::MissingColumns(_)
        | AppError::NoValidData(_) => HttpResponse::BadRequest().json(body),
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ConfigError(_) | AppError::DatabaseError(_) | AppError::IoError(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_students)
        .service(add_student)
        .service(update_student)
        .service(chart_data)
        .service(upload_students)
        .service(health);
}

pub fn start_server(state: web::Data<AppState>, config: &HttpConfig) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow any frontend origin

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind((config.host.clone(), config.port))?
    .run();

    Ok(server)
}
