//! HTTP server implementation
//!
//! hyper http1 with TokioIo, one spawned task per connection. Every machine
//! endpoint is a fixed path string, so dispatch is a plain match with no
//! path templating.

use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::artifacts::HEALTH_PATH;
use crate::config::{ArtifactSources, Args};
use crate::model::{self, CanonicalModel};
use crate::routes;
use crate::types::Result;

/// Shared application state. The canonical model is read-only after
/// construction; requests share it without any coordination.
pub struct AppState {
    pub args: Args,
    pub sources: ArtifactSources,
    pub model: CanonicalModel,
    /// Client for the installer proxy's single outbound fetch
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Build the state, validating the canonical model first. A model that
    /// fails validation must abort startup; serving drifted contracts is
    /// worse than not serving.
    pub fn new(args: Args) -> Result<Self> {
        let model = CanonicalModel::built_in();
        model::validate(&model)?;

        Ok(AppState {
            sources: args.artifact_sources(),
            args,
            model,
            http_client: reqwest::Client::new(),
        })
    }
}

pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "x0xmd listening on {} serving {} machine endpoints",
        state.args.listen,
        crate::artifacts::MACHINE_ENDPOINTS.len()
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

// Generic over the body type: dispatch never reads the body, and tests
// drive it with a plain String body.
async fn handle_request<B>(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<B>,
) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();
    debug!(method = %req.method(), path = %path, peer = %addr, "Handling request");

    if req.method() != Method::GET {
        return Ok(routes::not_found_response(&path));
    }

    let response = match path.as_str() {
        "/" => {
            let accept = req
                .headers()
                .get(hyper::header::ACCEPT)
                .and_then(|value| value.to_str().ok());
            routes::handle_root(&state.model, accept)
        }
        HEALTH_PATH => routes::health_check(),
        routes::llms::LLMS_PATH => routes::handle_llms(&state.model),
        "/install.sh" => {
            routes::handle_installer(&state.http_client, &state.args.install_script_url).await
        }
        other => routes::handle_artifact(&state.model, &state.sources, other)
            .unwrap_or_else(|| routes::not_found_response(other)),
    };

    Ok(response)
}
