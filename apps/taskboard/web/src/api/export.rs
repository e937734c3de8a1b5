//! `GET /download-db`: the SQLite file as an attachment.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::AppError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

pub fn router(db_path: PathBuf) -> Router {
    Router::new()
        .route("/download-db", get(download_db))
        .with_state(Arc::new(db_path))
}

/// Streams the configured database file without buffering it in memory.
pub async fn download_db(State(db_path): State<Arc<PathBuf>>) -> Result<Response, AppError> {
    let path = db_path.as_path();

    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("Database file not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(AppError::NotFound("Database file not found".to_string()));
    }

    tracing::info!(path = %path.display(), bytes = metadata.len(), "Exporting database file");

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment_name(path)),
        ),
        (header::CONTENT_LENGTH, metadata.len().to_string()),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

fn attachment_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.replace(['"', '\\'], "_"))
        .unwrap_or_else(|| "tasks.db".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn fetch(path: PathBuf) -> Response {
        router(path)
            .oneshot(
                Request::builder()
                    .uri("/download-db")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_streams_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");
        let contents = b"SQLite format 3\0some pages".to_vec();
        std::fs::write(&path, &contents).unwrap();

        let response = fetch(path).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"tasks.db\""
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.to_vec(), contents);
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();

        let response = fetch(dir.path().join("absent.db")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_is_404() {
        let dir = tempfile::tempdir().unwrap();

        let response = fetch(dir.path().to_path_buf()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreadable_path_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"plain file").unwrap();

        let response = fetch(file.join("tasks.db")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_attachment_name() {
        assert_eq!(attachment_name(Path::new("/data/tasks.db")), "tasks.db");
        assert_eq!(attachment_name(Path::new("we\"ird.db")), "we_ird.db");
        assert_eq!(attachment_name(Path::new("/")), "tasks.db");
    }
}
