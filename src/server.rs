use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::cleaning_logic::{process_upload, CleaningReport};
use crate::config::{CleaningRequest, CsvLoaderConfig, ServiceConfig};
use crate::error::{PipelineError, Result};
use crate::utils::prometheus_metrics::gather_metrics;
use crate::utils::spelling::DictionarySource;

/// Column cleaned when the form does not name one.
pub const DEFAULT_COLUMN: &str = "filename";

// Shared, read-only application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub loader: CsvLoaderConfig,
    pub dictionary: DictionarySource,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let dictionary = match &config.dictionary_path {
            Some(path) => DictionarySource::from_path(path)?,
            None => DictionarySource::Embedded,
        };
        Ok(AppState {
            loader: config.loader.clone(),
            dictionary,
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}

/// Error body returned by every failing endpoint.
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError(err)
    }
}

/// Client mistakes in the upload are 400, problems with the requested
/// operations against this table are 422.
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err.root() {
        PipelineError::ParseError(_)
        | PipelineError::InvalidTable(_)
        | PipelineError::ConfigValidationError(_) => StatusCode::BAD_REQUEST,
        PipelineError::ColumnNotFound { .. }
        | PipelineError::TypeMismatch { .. }
        | PipelineError::MissingParameter { .. }
        | PipelineError::InvalidParameter { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let mut body = json!({
            "success": false,
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        if let Some(op) = self.0.operation() {
            body["operation"] = json!(op);
        }
        (status, Json(body)).into_response()
    }
}

async fn home_handler() -> impl IntoResponse {
    Json(json!({ "Home page": "Welcome" }))
}

async fn metrics_handler() -> std::result::Result<String, ApiError> {
    Ok(gather_metrics()?)
}

async fn upload_handler(
    State(app_state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    mut multipart: Multipart,
) -> std::result::Result<Json<CleaningReport>, ApiError> {
    let mut request = CleaningRequest::for_column(DEFAULT_COLUMN);

    if let Some(query) = query {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&query).map_err(|e| {
            PipelineError::ConfigValidationError(format!("Malformed query string: {}", e))
        })?;
        for (name, value) in pairs {
            request.set_param(&name, &value)?;
        }
    }

    let mut file: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            file = Some(field.bytes().await.map_err(form_error)?.to_vec());
        } else {
            let value = field.text().await.map_err(form_error)?;
            debug!(field = %name, "Form parameter");
            request.set_param(&name, &value)?;
        }
    }

    let bytes = file.ok_or_else(|| {
        PipelineError::ConfigValidationError("Multipart form has no 'file' field".to_string())
    })?;

    let state = app_state.clone();
    let report = tokio::task::spawn_blocking(move || {
        process_upload(&bytes, &request, &state.loader, &state.dictionary)
    })
    .await
    .map_err(|e| PipelineError::Unexpected(format!("Cleaning task failed to complete: {}", e)))??;

    Ok(Json(report))
}

fn form_error(err: axum::extract::multipart::MultipartError) -> PipelineError {
    warn!(error = %err, "Rejecting malformed multipart upload");
    PipelineError::ConfigValidationError(format!("Malformed multipart form: {}", err))
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state.max_upload_bytes;
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(|| async { "OK" }))
        .route("/metrics", get(metrics_handler))
        .route("/upload", post(upload_handler))
        .route("/upload/", post(upload_handler))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// The main function to run the server
pub async fn run_server(config: ServiceConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let app_state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(app_state);

    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
