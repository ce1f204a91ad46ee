//! Installer proxy.
//!
//! Relays the upstream install script with a shell-script content type and
//! an `X-X0x-Source` header recording where the bytes came from, so a
//! client can audit what was actually served. One fetch, no retry: this is
//! a security-sensitive path and failures must be visible, so any upstream
//! problem becomes an immediate 502 that is never cached.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{debug, warn};

use super::{CACHE_NO_STORE, VARY_NEGOTIATED};

const CONTENT_TYPE_SHELLSCRIPT: &str = "text/x-shellscript; charset=utf-8";
const CACHE_INSTALLER: &str = "public, max-age=300";

pub async fn handle_installer(
    client: &reqwest::Client,
    install_script_url: &str,
) -> Response<Full<Bytes>> {
    debug!(url = %install_script_url, "Fetching upstream install script");

    let upstream = match client
        .get(install_script_url)
        .header("accept", "text/plain")
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!("Installer upstream fetch failed: {err}");
            return installer_unavailable();
        }
    };

    if !upstream.status().is_success() {
        warn!(status = %upstream.status(), "Installer upstream returned non-success");
        return installer_unavailable();
    }

    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(err) => {
            warn!("Installer upstream body read failed: {err}");
            return installer_unavailable();
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", CONTENT_TYPE_SHELLSCRIPT)
        .header("Cache-Control", CACHE_INSTALLER)
        .header("Vary", VARY_NEGOTIATED)
        .header("X-X0x-Source", install_script_url)
        .body(Full::new(Bytes::from(body.to_vec())))
        .unwrap()
}

fn installer_unavailable() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::BAD_GATEWAY)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Cache-Control", CACHE_NO_STORE)
        .header("Vary", VARY_NEGOTIATED)
        .body(Full::new(Bytes::from("Installer source unavailable\n")))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::body_string;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// One-shot upstream that answers a single request with a canned
    /// response and closes.
    async fn spawn_upstream(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "{status_line}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/install.sh")
    }

    #[tokio::test]
    async fn relays_upstream_script_with_source_header() {
        let url = spawn_upstream("HTTP/1.1 200 OK", "#!/bin/sh\necho x0x\n").await;
        let client = reqwest::Client::new();

        let response = handle_installer(&client, &url).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], CONTENT_TYPE_SHELLSCRIPT);
        assert_eq!(response.headers()["X-X0x-Source"], url.as_str());
        assert_eq!(response.headers()["Cache-Control"], CACHE_INSTALLER);

        let body = body_string(response).await;
        assert_eq!(body, "#!/bin/sh\necho x0x\n");
    }

    #[tokio::test]
    async fn upstream_failure_is_an_uncached_502() {
        let url = spawn_upstream("HTTP/1.1 404 Not Found", "missing").await;
        let client = reqwest::Client::new();

        let response = handle_installer(&client, &url).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()["Cache-Control"], CACHE_NO_STORE);
        assert!(response.headers().get("X-X0x-Source").is_none());

        let body = body_string(response).await;
        assert_eq!(body, "Installer source unavailable\n");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_uncached_502() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::new();
        let response = handle_installer(&client, &format!("http://{addr}/install.sh")).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()["Cache-Control"], CACHE_NO_STORE);
    }
}
