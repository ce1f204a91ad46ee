//! Plaintext quick-read for language-model clients at `/llms.txt`.
//!
//! A compact numbered briefing rendered from the canonical model. It trades
//! the JSON artifacts' precision for a single document an agent can ingest
//! in one read, and points back at the machine endpoints for the contracts.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};

use crate::artifacts::MACHINE_ENDPOINTS;
use crate::model::CanonicalModel;

use super::CACHE_ARTIFACT;

pub const LLMS_PATH: &str = "/llms.txt";

const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

pub fn handle_llms(model: &CanonicalModel) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", CONTENT_TYPE_TEXT)
        .header("Cache-Control", CACHE_ARTIFACT)
        .body(Full::new(Bytes::from(render(model))))
        .unwrap()
}

fn render(model: &CanonicalModel) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{} quick read for agents", model.identity.name));
    lines.push(String::new());

    lines.push("1) What this is".to_string());
    lines.push(
        "x0x is a decentralized agent-to-agent messaging network with signed messages and contact trust filtering; this site publishes its machine-readable contracts.".to_string(),
    );
    lines.push(String::new());

    lines.push("2) Is it relevant?".to_string());
    for criterion in &model.fit_criteria {
        lines.push(format!("- {}", criterion.description));
    }
    lines.push(String::new());

    lines.push("3) Architecture mental model".to_string());
    lines.push(format!(
        "- Agents talk to a local daemon {} at {}",
        model.install.daemon.binary, model.install.daemon.api_base_url
    ));
    lines.push(
        "- Contact trust levels gate publishing, subscription, and contact mutation".to_string(),
    );
    for level in &model.trust.current.trust_levels {
        lines.push(format!("- trust level {}: {}", level.id, level.semantics));
    }
    lines.push(String::new());

    lines.push("4) Install".to_string());
    for pathway in &model.install.current.pathways {
        lines.push(format!("- {}: {}", pathway.platform, pathway.command));
    }
    for probe in &model.install.current.verification_probes {
        lines.push(format!("- verify: {}", probe.command_unix));
    }
    lines.push(String::new());

    lines.push("5) First use".to_string());
    for operation in &model.first_use.current.operations {
        lines.push(format!(
            "- {}: {} {}",
            operation.id, operation.request.method, operation.request.path
        ));
        lines.push(format!("  {}", operation.runnable_example));
    }
    lines.push(String::new());

    lines.push("6) Machine endpoints".to_string());
    for entry in MACHINE_ENDPOINTS {
        lines.push(format!("- {}", entry.path));
    }
    lines.push(String::new());

    lines.push("7) Sources".to_string());
    for evidence in &model.source_evidence {
        lines.push(format!("- {}: {}", evidence.id, evidence.source));
    }

    lines.push(String::new());
    lines.join("\n")
}
