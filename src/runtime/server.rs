//! Todayd HTTP server implementation.

use crate::http::{ApiResponse, StatusCode};
use crate::runtime::Config;
use crate::tasks::TodayHandler;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Todayd HTTP server.
///
/// Accepts connections and routes `GET /` to the fetch-and-filter
/// handler. Each connection runs on its own task; the handler holds no
/// shared mutable state, so requests are fully independent.
pub struct Server {
    /// Server configuration.
    config: Config,
    /// The one request handler this service exposes.
    handler: Arc<TodayHandler>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: Config, handler: TodayHandler) -> Self {
        Self {
            config,
            handler: Arc::new(handler),
        }
    }

    /// Start the HTTP server.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Todayd listening on {}", addr);

        let handler = self.handler.clone();
        let config = self.config.clone();

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let handler = handler.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let handler = handler.clone();
                    let config = config.clone();
                    async move { handle_request(req, handler, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    handler: Arc<TodayHandler>,
    config: Config,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let request_id = generate_request_id();

    debug!(
        "Handling request: {} {} from {} [{}]",
        method, path, remote_addr, request_id
    );

    if config.enable_health && method == Method::GET && path == "/_health" {
        return Ok(build_response(ApiResponse::text("OK")));
    }

    if method == Method::GET && path == "/" {
        let response = match handler.handle().await {
            Ok(response) => response,
            Err(e) => {
                error!("Task list request failed: {} [{}]", e, request_id);
                e.into()
            }
        };
        return Ok(build_response(response));
    }

    Ok(build_response(ApiResponse::error(
        StatusCode::NOT_FOUND,
        "no such endpoint",
    )))
}

/// Build a hyper Response from an ApiResponse.
fn build_response(api_response: ApiResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(api_response.status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            api_response.status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = Response::builder().status(status);

    for (name, value) in api_response.headers {
        builder = builder.header(name, value);
    }

    let body = api_response.body.unwrap_or_default();
    builder.body(Full::new(body)).unwrap()
}

/// Generate a unique request ID.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:x}", timestamp)
}
