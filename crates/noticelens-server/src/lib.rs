//! Static delivery server for the noticelens web client.
//!
//! Serves an asset directory and answers every unmatched path with the
//! directory's `index.html` (status 200), so client-side routes survive a
//! reload. Optionally mounts echo versions of the auth endpoints for local
//! development.

pub mod config;

use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::post,
};
use log::info;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

pub use config::{DEFAULT_PORT, INDEX_FILE, ServerConfig};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("asset root {0} does not exist or is not a directory")]
    MissingRoot(PathBuf),

    #[error("entry document {0} not found")]
    MissingIndex(PathBuf),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Echo auth
// ---------------------------------------------------------------------------

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn missing_email() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": "Email is required." })),
    )
        .into_response()
}

/// Echo the registration form back as a user. Passwords are never returned.
///
/// No `phone` is sent; clients derive it from `countryCode` and `mobileNumber`.
async fn handle_register(Json(body): Json<Value>) -> Response {
    let email = field(&body, "email");
    if email.trim().is_empty() {
        return missing_email();
    }
    Json(json!({
        "success": true,
        "user": {
            "id": uuid::Uuid::new_v4().to_string(),
            "firstName": field(&body, "firstName"),
            "lastName": field(&body, "lastName"),
            "email": email,
            "dateOfBirth": field(&body, "dateOfBirth"),
            "mobileNumber": field(&body, "mobileNumber"),
            "countryCode": field(&body, "countryCode"),
        }
    }))
    .into_response()
}

async fn handle_login(Json(body): Json<Value>) -> Response {
    let email = field(&body, "email");
    if email.trim().is_empty() {
        return missing_email();
    }
    Json(json!({
        "success": true,
        "user": {
            "id": uuid::Uuid::new_v4().to_string(),
            "email": email,
        }
    }))
    .into_response()
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        "{method} {path} -> {} ({:.1?})",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

/// Build the axum router. Fails if the asset root or its index is missing.
pub fn build_router(config: &ServerConfig) -> Result<Router, ServerError> {
    if !config.public_dir.is_dir() {
        return Err(ServerError::MissingRoot(config.public_dir.clone()));
    }
    let index = config.index_path();
    if !index.is_file() {
        return Err(ServerError::MissingIndex(index));
    }

    let static_files = ServeDir::new(&config.public_dir).fallback(ServeFile::new(index));

    let mut router = Router::new();
    if config.echo_auth {
        info!("echo auth routes enabled");
        router = router
            .route("/register", post(handle_register))
            .route("/login", post(handle_login));
    }

    Ok(router
        .fallback_service(static_files)
        .layer(middleware::from_fn(log_requests)))
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Run the static delivery server until Ctrl+C or SIGTERM.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(&config)?;
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Server is running on http://localhost:{}", config.port);
    serve(listener, app, shutdown_signal()).await?;
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
