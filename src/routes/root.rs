//! Negotiated root: HTML for browsers, JSON entry hints for everything else.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::artifacts::{
    self, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, DISCOVERY_PATH, INSTALL_PATH,
    INTEGRATION_CONFIDENCE_PATH, MACHINE_ENDPOINTS, PROPAGATION_PATH, TRUST_PATH,
};
use crate::model::CanonicalModel;
use crate::negotiate::{negotiate_root, Representation};

use super::{json_response, CACHE_NO_STORE, VARY_NEGOTIATED};

/// Machine entry hints served to non-browser clients at `/`.
#[derive(Debug, Serialize)]
struct RootHints {
    service: String,
    summary: String,
    machine_entrypoint: &'static str,
    content_type: &'static str,
    trust_metadata_endpoint: &'static str,
    integration_confidence_endpoint: &'static str,
    propagation_endpoint: &'static str,
    install_endpoint: &'static str,
    plaintext_summary: &'static str,
    installer: &'static str,
}

pub fn handle_root(model: &CanonicalModel, accept: Option<&str>) -> Response<Full<Bytes>> {
    let (content_type, body) = match negotiate_root(accept) {
        Representation::Html => (CONTENT_TYPE_HTML, render_html(model)),
        Representation::Json => match artifacts::to_pretty(&RootHints {
            service: model.identity.name.clone(),
            summary: "Machine-readable documentation surface for the x0x daemon.".to_string(),
            machine_entrypoint: DISCOVERY_PATH,
            content_type: CONTENT_TYPE_JSON,
            trust_metadata_endpoint: TRUST_PATH,
            integration_confidence_endpoint: INTEGRATION_CONFIDENCE_PATH,
            propagation_endpoint: PROPAGATION_PATH,
            install_endpoint: INSTALL_PATH,
            plaintext_summary: super::llms::LLMS_PATH,
            installer: "/install.sh",
        }) {
            Ok(body) => (CONTENT_TYPE_JSON, body),
            Err(err) => {
                tracing::error!("Failed to serialize root hints: {err}");
                return json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONTENT_TYPE_JSON,
                    CACHE_NO_STORE,
                    "{\n  \"error\": \"root_build_failed\"\n}\n".to_string(),
                );
            }
        },
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Cache-Control", CACHE_NO_STORE)
        .header("Vary", VARY_NEGOTIATED)
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn render_html(model: &CanonicalModel) -> String {
    let mut rows = String::new();
    for entry in MACHINE_ENDPOINTS {
        rows.push_str(&format!(
            "      <tr><td><a href=\"{path}\">{path}</a></td><td>{summary}</td></tr>\n",
            path = entry.path,
            summary = entry.summary,
        ));
    }

    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
           <meta charset=\"utf-8\">\n\
           <title>{name} &mdash; x0xmd discovery surface</title>\n\
         </head>\n\
         <body>\n\
           <h1>x0xmd discovery surface</h1>\n\
           <p>{name}. Source: <a href=\"{repo}\">{repo}</a>.</p>\n\
           <p>Agents should start at <a href=\"{discovery}\">{discovery}</a>;\n\
              trust metadata lives at <a href=\"{trust}\">{trust}</a>;\n\
              a plaintext briefing lives at <a href=\"{llms}\">{llms}</a>.</p>\n\
           <table>\n{rows}    </table>\n\
         </body>\n\
         </html>\n",
        name = model.identity.name,
        repo = model.identity.repo,
        discovery = DISCOVERY_PATH,
        trust = TRUST_PATH,
        llms = super::llms::LLMS_PATH,
        rows = rows,
    )
}
