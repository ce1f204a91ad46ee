use serde::Serialize;
use serde_json::Value;

use crate::model::{CanonicalModel, DeliverySemantics, Envelope, EventStream};

use super::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize)]
pub struct EventsContractArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub stream: EventStream,
    pub envelope: Envelope,
    pub delivery_semantics: DeliverySemantics,
    pub transcript_examples: Vec<Value>,
}

pub fn build(model: &CanonicalModel) -> EventsContractArtifact {
    EventsContractArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "events_contract".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.events.contract_version.clone(),
        stream: model.events.stream.clone(),
        envelope: model.events.envelope.clone(),
        delivery_semantics: model.events.delivery_semantics.clone(),
        transcript_examples: model.events.transcript_examples.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED_ENVELOPE_FIELDS: &[&str] = &[
        "event_id",
        "topic",
        "publisher_agent_id",
        "payload_base64",
        "signature",
        "received_at",
        "trust_level",
    ];

    #[test]
    fn envelope_names_every_required_field() {
        let artifact = build(&CanonicalModel::built_in());
        let names: Vec<&str> = artifact
            .envelope
            .required_fields
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        for required in REQUIRED_ENVELOPE_FIELDS {
            assert!(names.contains(required), "missing envelope field {required}");
        }
    }

    #[test]
    fn stream_is_sse_with_backoff_reconnect() {
        let artifact = build(&CanonicalModel::built_in());
        assert_eq!(artifact.stream.path, "/events");
        assert_eq!(artifact.stream.transport, "sse");
        let reconnect = &artifact.delivery_semantics.reconnect;
        assert_eq!(reconnect.strategy, "incremental_backoff");
        assert!(reconnect.initial_delay_ms < reconnect.max_delay_ms);
        assert!(reconnect.jitter);
    }

    #[test]
    fn transcript_shows_subscribe_then_stream() {
        let artifact = build(&CanonicalModel::built_in());
        let transcript = &artifact.transcript_examples[0];
        assert_eq!(transcript["id"], "subscribe-then-stream");
        assert_eq!(transcript["steps"][0]["step"], "subscribe");
        assert_eq!(transcript["steps"][1]["step"], "open-events-stream");
    }
}
