use crate::config::Config;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use bookshelf_core::{BookDraft, BookRecord, BookshelfError, ReadMode, RecordService, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub struct ServerState {
    pub service: RecordService,
}

/// Envelope returned by every API route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    fn ok_with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::ok(data)
        }
    }
}

#[derive(Debug, Serialize)]
struct BookResponse {
    position: usize,
    #[serde(flatten)]
    book: BookRecord,
}

#[derive(Debug, Serialize)]
struct ContentResponse {
    content: String,
    mode: ReadMode,
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentPayload {
    #[serde(default)]
    content: Option<String>,
}

pub async fn run_server(config: Config) -> Result<()> {
    let service = RecordService::open(config.collection_path(), config.content_path())?;
    let state = Arc::new(ServerState { service });

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(state: Arc<ServerState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/health", get(health_handler))
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/books/:position", put(update_book).delete(delete_book))
        .route(
            "/api/books/:position/content",
            get(get_content).put(put_content),
        )
        .with_state(state);

    let app = match &config.static_dir {
        Some(dir) => {
            tracing::info!("Serving static assets from {:?}", dir);
            api.fallback_service(ServeDir::new(dir))
        }
        None => api,
    };

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

fn error_response(error: BookshelfError) -> Response {
    let status = match &error {
        BookshelfError::Validation(_) | BookshelfError::MalformedInput(_) => {
            StatusCode::BAD_REQUEST
        }
        BookshelfError::NotFound(_) => StatusCode::NOT_FOUND,
        BookshelfError::Io(_)
        | BookshelfError::Serialization(_)
        | BookshelfError::InternalInconsistency(_)
        | BookshelfError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", error);
    }

    let message = match &error {
        BookshelfError::Validation(_) => "Validation failed".to_string(),
        other => other.to_string(),
    };

    let resp = ApiResponse::<()> {
        success: false,
        data: None,
        message: Some(message),
        errors: error.details(),
    };
    (status, Json(resp)).into_response()
}

fn parse_position(raw: &str) -> Result<usize> {
    raw.trim().parse::<usize>().map_err(|_| {
        BookshelfError::MalformedInput(format!("invalid book position: {}", raw))
    })
}

fn parse_json<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| BookshelfError::MalformedInput(rejection.body_text()))
}

async fn health_handler(State(state): State<Arc<ServerState>>) -> Response {
    let books = state.service.list_all().await;

    let data = serde_json::json!({
        "status": "ok",
        "books_count": books.len(),
    });

    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

async fn list_books(State(state): State<Arc<ServerState>>) -> Response {
    let books = state.service.list_all().await;
    (StatusCode::OK, Json(ApiResponse::ok(books))).into_response()
}

async fn create_book(
    State(state): State<Arc<ServerState>>,
    payload: std::result::Result<Json<BookDraft>, JsonRejection>,
) -> Response {
    let draft = match parse_json(payload) {
        Ok(draft) => draft,
        Err(e) => return error_response(e),
    };

    match state.service.create(draft).await {
        Ok(created) => {
            let data = BookResponse {
                position: created.position,
                book: created.book,
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::ok_with_message(data, "Book created")),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn update_book(
    State(state): State<Arc<ServerState>>,
    Path(position): Path<String>,
    payload: std::result::Result<Json<BookDraft>, JsonRejection>,
) -> Response {
    let position = match parse_position(&position) {
        Ok(position) => position,
        Err(e) => return error_response(e),
    };
    let draft = match parse_json(payload) {
        Ok(draft) => draft,
        Err(e) => return error_response(e),
    };

    match state.service.update(position, draft).await {
        Ok(updated) => {
            let data = BookResponse {
                position: updated.position,
                book: updated.book,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::ok_with_message(data, "Book updated")),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn delete_book(
    State(state): State<Arc<ServerState>>,
    Path(position): Path<String>,
) -> Response {
    let position = match parse_position(&position) {
        Ok(position) => position,
        Err(e) => return error_response(e),
    };

    match state.service.delete(position).await {
        Ok(deleted) => {
            let data = BookResponse {
                position: deleted.position,
                book: deleted.book,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::ok_with_message(data, "Book deleted")),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn get_content(
    State(state): State<Arc<ServerState>>,
    Path(position): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let position = match parse_position(&position) {
        Ok(position) => position,
        Err(e) => return error_response(e),
    };
    let mode = ReadMode::parse(query.mode.as_deref());

    match state.service.read_content(position, mode).await {
        Ok(read) => {
            let data = ContentResponse {
                content: read.content,
                mode: read.mode,
            };
            (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn put_content(
    State(state): State<Arc<ServerState>>,
    Path(position): Path<String>,
    payload: std::result::Result<Json<ContentPayload>, JsonRejection>,
) -> Response {
    let position = match parse_position(&position) {
        Ok(position) => position,
        Err(e) => return error_response(e),
    };
    let content = match parse_json(payload) {
        Ok(payload) => payload.content.unwrap_or_default(),
        Err(e) => return error_response(e),
    };

    match state.service.write_content(position, content).await {
        Ok(()) => {
            let resp = ApiResponse::<()> {
                success: true,
                data: None,
                message: Some("Content saved".to_string()),
                errors: None,
            };
            (StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => error_response(e),
    }
}
