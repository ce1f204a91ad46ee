//! The built-in canonical model for the x0x daemon.
//!
//! All content lives here, in one place, so a drift review is a single-file
//! diff. Values mirror the published planning corpus; evidence ids follow
//! the `plan-<phase>-<doc>` convention.

use serde_json::json;

use super::*;

impl CanonicalModel {
    pub fn built_in() -> Self {
        CanonicalModel {
            schema_version: MODEL_SCHEMA_VERSION.to_string(),
            generated_at: GENERATED_AT.to_string(),
            identity: Identity {
                id: "x0x".to_string(),
                name: "x0x agent messaging daemon".to_string(),
                repo: "https://github.com/saorsa-labs/x0x".to_string(),
            },
            source_evidence: source_evidence(),
            capabilities_current: capabilities_current(),
            capabilities_planned: capabilities_planned(),
            fit_criteria: fit_criteria(),
            install: install(),
            first_use: first_use(),
            integration: integration(),
            events: events(),
            failure_modes: failure_modes(),
            trust: trust(),
            propagation: PropagationModel {
                purpose: "Compact machine packet an agent can hand to another agent so the recipient can evaluate, install, and verify x0x without human mediation.".to_string(),
                artifact_version: "1.2.0".to_string(),
                compactness: Compactness {
                    max_current_capabilities: 6,
                    max_fit_criteria: 5,
                    max_verification_probes: 4,
                    max_sources: 5,
                },
            },
        }
    }
}

fn source_evidence() -> Vec<SourceEvidence> {
    vec![
        SourceEvidence {
            id: "plan-01-01".to_string(),
            title: "Phase 01 plan 01: daemon core and message transport".to_string(),
            source: "https://github.com/saorsa-labs/x0x/blob/main/docs/plans/01-01-daemon-core.md".to_string(),
        },
        SourceEvidence {
            id: "plan-01-02".to_string(),
            title: "Phase 01 plan 02: topic subscription and event stream".to_string(),
            source: "https://github.com/saorsa-labs/x0x/blob/main/docs/plans/01-02-topics-and-events.md".to_string(),
        },
        SourceEvidence {
            id: "plan-02-01".to_string(),
            title: "Phase 02 plan 01: contact trust and message signing".to_string(),
            source: "https://github.com/saorsa-labs/x0x/blob/main/docs/plans/02-01-trust-and-signing.md".to_string(),
        },
        SourceEvidence {
            id: "plan-03-01".to_string(),
            title: "Phase 03 plan 01: propagation and operations".to_string(),
            source: "https://github.com/saorsa-labs/x0x/blob/main/docs/plans/03-01-propagation-and-operations.md".to_string(),
        },
        SourceEvidence {
            id: "vision".to_string(),
            title: "x0x vision: ambient agent-to-agent coordination".to_string(),
            source: "https://github.com/saorsa-labs/x0x/blob/main/docs/VISION.md".to_string(),
        },
    ]
}

fn capabilities_current() -> Vec<Capability> {
    vec![
        Capability {
            id: "agent-to-agent-messaging".to_string(),
            description: "Publish signed messages to named topics over the local daemon API.".to_string(),
            evidence: vec!["plan-01-01".to_string()],
        },
        Capability {
            id: "topic-subscription".to_string(),
            description: "Subscribe to topics and receive messages as server-sent events.".to_string(),
            evidence: vec!["plan-01-02".to_string()],
        },
        Capability {
            id: "contact-trust-management".to_string(),
            description: "Assign per-contact trust levels that gate message acceptance and actions.".to_string(),
            evidence: vec!["plan-02-01".to_string()],
        },
        Capability {
            id: "task-list-collaboration".to_string(),
            description: "Create and update shared task lists with signature-verified writes.".to_string(),
            evidence: vec!["plan-01-01".to_string(), "plan-02-01".to_string()],
        },
    ]
}

fn capabilities_planned() -> Vec<Capability> {
    vec![
        Capability {
            id: "reputation-weighted-trust".to_string(),
            description: "Derive trust suggestions from signed interaction history across contacts.".to_string(),
            evidence: vec!["plan-02-01".to_string(), "vision".to_string()],
        },
        Capability {
            id: "cross-network-relay".to_string(),
            description: "Relay messages between daemons on disjoint networks via trusted intermediaries.".to_string(),
            evidence: vec!["plan-03-01".to_string()],
        },
    ]
}

fn fit_criteria() -> Vec<FitCriterion> {
    vec![
        FitCriterion {
            id: "needs-agent-messaging".to_string(),
            description: "You operate agents that must exchange messages without a central broker.".to_string(),
        },
        FitCriterion {
            id: "needs-local-daemon".to_string(),
            description: "A process can run a local daemon and reach it at a loopback HTTP API.".to_string(),
        },
        FitCriterion {
            id: "needs-signed-provenance".to_string(),
            description: "Message acceptance must be gated on sender trust and signature validity.".to_string(),
        },
        FitCriterion {
            id: "tolerates-at-least-once".to_string(),
            description: "Consumers tolerate at-least-once delivery and deduplicate on event_id.".to_string(),
        },
    ]
}

fn install() -> InstallModel {
    InstallModel {
        contract_version: CONTRACT_VERSION.to_string(),
        daemon: Daemon {
            binary: "x0xd".to_string(),
            api_base_url: "http://127.0.0.1:12700".to_string(),
        },
        current: InstallCurrent {
            pathways: vec![
                InstallPathway {
                    id: "linux-curl-install".to_string(),
                    platform: "linux".to_string(),
                    command: "curl -fsSL https://x0x.md/install.sh | sh".to_string(),
                    non_interactive: true,
                    shell: "sh".to_string(),
                    caveats: vec![
                        "Requires curl and a writable ~/.local/bin on PATH.".to_string(),
                    ],
                    evidence: vec!["plan-03-01".to_string()],
                },
                InstallPathway {
                    id: "macos-curl-install".to_string(),
                    platform: "macos".to_string(),
                    command: "curl -fsSL https://x0x.md/install.sh | sh".to_string(),
                    non_interactive: true,
                    shell: "sh".to_string(),
                    caveats: vec![
                        "Gatekeeper may quarantine the binary on first launch; the script clears the attribute.".to_string(),
                    ],
                    evidence: vec!["plan-03-01".to_string()],
                },
                InstallPathway {
                    id: "windows-powershell-install".to_string(),
                    platform: "windows".to_string(),
                    command: "powershell -NoProfile -Command \"iwr https://x0x.md/install.ps1 -UseBasicParsing | iex\"".to_string(),
                    non_interactive: true,
                    shell: "powershell".to_string(),
                    caveats: vec![
                        "Requires PowerShell 5+ and permission to write %LOCALAPPDATA%\\x0x.".to_string(),
                    ],
                    evidence: vec!["plan-03-01".to_string()],
                },
            ],
            verification_probes: vec![
                VerificationProbe {
                    id: "daemon-binary-on-path".to_string(),
                    description: "The installed binary resolves on PATH and reports a version.".to_string(),
                    command_unix: "x0xd --version".to_string(),
                    command_windows: "x0xd.exe --version".to_string(),
                    expected_signal: json!({
                        "exit_code": 0,
                        "stdout_matches": "^x0xd \\d+\\.\\d+\\.\\d+"
                    }),
                },
                VerificationProbe {
                    id: "daemon-health-probe".to_string(),
                    description: "The running daemon answers its health endpoint.".to_string(),
                    command_unix: "curl -fsS http://127.0.0.1:12700/health".to_string(),
                    command_windows: "curl.exe -fsS http://127.0.0.1:12700/health".to_string(),
                    expected_signal: json!({
                        "exit_code": 0,
                        "json_fields": { "status": "ok" }
                    }),
                },
                VerificationProbe {
                    id: "daemon-identity-probe".to_string(),
                    description: "The daemon reports its own agent identity.".to_string(),
                    command_unix: "curl -fsS http://127.0.0.1:12700/identity".to_string(),
                    command_windows: "curl.exe -fsS http://127.0.0.1:12700/identity".to_string(),
                    expected_signal: json!({
                        "exit_code": 0,
                        "json_fields": { "agent_id": "<non-empty string>" }
                    }),
                },
            ],
            verification_matrix: vec![
                VerificationMatrixRow {
                    platform: "linux".to_string(),
                    pathway_ids: vec!["linux-curl-install".to_string()],
                    verify_probe_ids: vec![
                        "daemon-binary-on-path".to_string(),
                        "daemon-health-probe".to_string(),
                        "daemon-identity-probe".to_string(),
                    ],
                },
                VerificationMatrixRow {
                    platform: "macos".to_string(),
                    pathway_ids: vec!["macos-curl-install".to_string()],
                    verify_probe_ids: vec![
                        "daemon-binary-on-path".to_string(),
                        "daemon-health-probe".to_string(),
                        "daemon-identity-probe".to_string(),
                    ],
                },
                VerificationMatrixRow {
                    platform: "windows".to_string(),
                    pathway_ids: vec!["windows-powershell-install".to_string()],
                    verify_probe_ids: vec![
                        "daemon-binary-on-path".to_string(),
                        "daemon-health-probe".to_string(),
                    ],
                },
            ],
        },
        planned: vec![PlannedItem {
            id: "package-manager-distribution".to_string(),
            description: "Signed packages for homebrew, apt, and winget.".to_string(),
        }],
    }
}

fn first_use() -> FirstUseModel {
    FirstUseModel {
        contract_version: CONTRACT_VERSION.to_string(),
        daemon_base_url: "http://127.0.0.1:12700".to_string(),
        current: FirstUseCurrent {
            operations: vec![
                FirstUseOperation {
                    id: "publish-message".to_string(),
                    summary: "Publish a base64 payload to a topic.".to_string(),
                    request: OperationRequest {
                        method: "POST".to_string(),
                        path: "/topics/{topic}/publish".to_string(),
                        body: Some(json!({ "payload_base64": "aGVsbG8gd29ybGQ=" })),
                    },
                    expected_response: ExpectedResponse {
                        status_code: 202,
                        body: Some(json!({ "status": "accepted", "event_id": "<uuid>" })),
                    },
                    runnable_example: "curl -fsS -X POST http://127.0.0.1:12700/topics/demo/publish -H 'content-type: application/json' -d '{\"payload_base64\":\"aGVsbG8gd29ybGQ=\"}'".to_string(),
                },
                FirstUseOperation {
                    id: "subscribe-topic".to_string(),
                    summary: "Register interest in a topic before opening the event stream.".to_string(),
                    request: OperationRequest {
                        method: "POST".to_string(),
                        path: "/topics/{topic}/subscribe".to_string(),
                        body: None,
                    },
                    expected_response: ExpectedResponse {
                        status_code: 200,
                        body: Some(json!({ "status": "subscribed", "topic": "demo" })),
                    },
                    runnable_example: "curl -fsS -X POST http://127.0.0.1:12700/topics/demo/subscribe".to_string(),
                },
                FirstUseOperation {
                    id: "trust-contact".to_string(),
                    summary: "Raise a contact's trust level so its messages are accepted.".to_string(),
                    request: OperationRequest {
                        method: "PUT".to_string(),
                        path: "/contacts/{agent_id}/trust".to_string(),
                        body: Some(json!({ "level": "trusted" })),
                    },
                    expected_response: ExpectedResponse {
                        status_code: 200,
                        body: Some(json!({ "agent_id": "<agent id>", "level": "trusted" })),
                    },
                    runnable_example: "curl -fsS -X PUT http://127.0.0.1:12700/contacts/ag-1234/trust -H 'content-type: application/json' -d '{\"level\":\"trusted\"}'".to_string(),
                },
                FirstUseOperation {
                    id: "create-task-list".to_string(),
                    summary: "Create a shared task list other trusted agents can write to.".to_string(),
                    request: OperationRequest {
                        method: "POST".to_string(),
                        path: "/task-lists".to_string(),
                        body: Some(json!({ "title": "deploy checklist" })),
                    },
                    expected_response: ExpectedResponse {
                        status_code: 201,
                        body: Some(json!({ "id": "<uuid>", "title": "deploy checklist" })),
                    },
                    runnable_example: "curl -fsS -X POST http://127.0.0.1:12700/task-lists -H 'content-type: application/json' -d '{\"title\":\"deploy checklist\"}'".to_string(),
                },
            ],
        },
        planned: vec![PlannedItem {
            id: "scripted-onboarding".to_string(),
            description: "A single command that subscribes, trusts a bootstrap contact, and verifies the stream.".to_string(),
        }],
    }
}

fn integration() -> IntegrationModel {
    IntegrationModel {
        contract_version: CONTRACT_VERSION.to_string(),
        current: IntegrationCurrent {
            endpoint_groups: vec![
                EndpointGroup {
                    group: "core".to_string(),
                    endpoints: vec![
                        EndpointRef {
                            method: "GET".to_string(),
                            path: "/health".to_string(),
                            summary: "Daemon liveness.".to_string(),
                        },
                        EndpointRef {
                            method: "GET".to_string(),
                            path: "/identity".to_string(),
                            summary: "This daemon's agent identity.".to_string(),
                        },
                    ],
                },
                EndpointGroup {
                    group: "messaging".to_string(),
                    endpoints: vec![
                        EndpointRef {
                            method: "POST".to_string(),
                            path: "/topics/{topic}/publish".to_string(),
                            summary: "Publish a signed message.".to_string(),
                        },
                        EndpointRef {
                            method: "POST".to_string(),
                            path: "/topics/{topic}/subscribe".to_string(),
                            summary: "Register a topic subscription.".to_string(),
                        },
                        EndpointRef {
                            method: "GET".to_string(),
                            path: "/events".to_string(),
                            summary: "Server-sent event stream of subscribed topics.".to_string(),
                        },
                    ],
                },
                EndpointGroup {
                    group: "trust".to_string(),
                    endpoints: vec![
                        EndpointRef {
                            method: "GET".to_string(),
                            path: "/contacts".to_string(),
                            summary: "List known contacts with trust levels.".to_string(),
                        },
                        EndpointRef {
                            method: "PUT".to_string(),
                            path: "/contacts/{agent_id}/trust".to_string(),
                            summary: "Set a contact's trust level.".to_string(),
                        },
                    ],
                },
                EndpointGroup {
                    group: "task_lists".to_string(),
                    endpoints: vec![
                        EndpointRef {
                            method: "POST".to_string(),
                            path: "/task-lists".to_string(),
                            summary: "Create a task list.".to_string(),
                        },
                        EndpointRef {
                            method: "GET".to_string(),
                            path: "/task-lists/{id}".to_string(),
                            summary: "Fetch a task list.".to_string(),
                        },
                    ],
                },
            ],
            reliability: Reliability {
                retry_policy: RetryPolicy {
                    retry_status_codes: vec![500, 502, 503, 504],
                    do_not_retry_status_codes: vec![400, 404],
                    backoff: Backoff {
                        strategy: "exponential".to_string(),
                        initial_delay_ms: 500,
                        max_delay_ms: 30_000,
                        jitter: true,
                    },
                },
            },
            request_response_examples: vec![
                RequestResponseExample {
                    id: "publish-request".to_string(),
                    request: json!({
                        "method": "POST",
                        "path": "/topics/demo/publish",
                        "body": { "payload_base64": "aGVsbG8gd29ybGQ=" }
                    }),
                    response: json!({
                        "status_code": 202,
                        "body": { "status": "accepted", "event_id": "9b2e7c2a-0000-4000-8000-000000000000" }
                    }),
                },
                RequestResponseExample {
                    id: "invalid-base64-error".to_string(),
                    request: json!({
                        "method": "POST",
                        "path": "/topics/demo/publish",
                        "body": { "payload_base64": "!!not-base64!!" }
                    }),
                    response: json!({
                        "status_code": 400,
                        "body": { "error": "schema.invalid_payload", "detail": "payload_base64 is not valid base64" }
                    }),
                },
                RequestResponseExample {
                    id: "task-list-not-found".to_string(),
                    request: json!({
                        "method": "GET",
                        "path": "/task-lists/does-not-exist"
                    }),
                    response: json!({
                        "status_code": 404,
                        "body": { "error": "not_found" }
                    }),
                },
            ],
        },
        planned: vec![PlannedItem {
            id: "batch-publish".to_string(),
            description: "Publish multiple payloads in one request with per-item results.".to_string(),
        }],
    }
}

fn events() -> EventsModel {
    EventsModel {
        contract_version: CONTRACT_VERSION.to_string(),
        stream: EventStream {
            path: "/events".to_string(),
            method: "GET".to_string(),
            transport: "sse".to_string(),
        },
        envelope: Envelope {
            required_fields: vec![
                EnvelopeField {
                    name: "event_id".to_string(),
                    field_type: "string".to_string(),
                    description: "Unique id for deduplication across reconnects.".to_string(),
                },
                EnvelopeField {
                    name: "topic".to_string(),
                    field_type: "string".to_string(),
                    description: "Topic the message was published to.".to_string(),
                },
                EnvelopeField {
                    name: "publisher_agent_id".to_string(),
                    field_type: "string".to_string(),
                    description: "Agent id of the publisher.".to_string(),
                },
                EnvelopeField {
                    name: "payload_base64".to_string(),
                    field_type: "string".to_string(),
                    description: "Message payload, base64 encoded.".to_string(),
                },
                EnvelopeField {
                    name: "signature".to_string(),
                    field_type: "string".to_string(),
                    description: "Publisher signature over topic and payload.".to_string(),
                },
                EnvelopeField {
                    name: "received_at".to_string(),
                    field_type: "string".to_string(),
                    description: "RFC 3339 timestamp the daemon received the message.".to_string(),
                },
                EnvelopeField {
                    name: "trust_level".to_string(),
                    field_type: "string".to_string(),
                    description: "Trust level of the publisher at delivery time.".to_string(),
                },
            ],
        },
        delivery_semantics: DeliverySemantics {
            delivery_guarantee: "at-least-once".to_string(),
            ordering: "per-topic arrival order, no cross-topic guarantee".to_string(),
            reconnect: Reconnect {
                strategy: "incremental_backoff".to_string(),
                initial_delay_ms: 1_000,
                max_delay_ms: 30_000,
                jitter: true,
            },
        },
        transcript_examples: vec![json!({
            "id": "subscribe-then-stream",
            "steps": [
                {
                    "step": "subscribe",
                    "request": { "method": "POST", "path": "/topics/demo/subscribe" },
                    "expected_response": { "status_code": 200 }
                },
                {
                    "step": "open-events-stream",
                    "request": {
                        "method": "GET",
                        "path": "/events",
                        "headers": { "accept": "text/event-stream" }
                    },
                    "expected_frame": {
                        "event": "message",
                        "data_fields": [
                            "event_id",
                            "topic",
                            "publisher_agent_id",
                            "payload_base64",
                            "signature",
                            "received_at",
                            "trust_level"
                        ]
                    }
                }
            ]
        })],
    }
}

fn failure_modes() -> FailureModesModel {
    FailureModesModel {
        contract_version: CONTRACT_VERSION.to_string(),
        matrix: vec![
            FailureMode {
                code: "network.timeout".to_string(),
                failure_class: "transient".to_string(),
                retry_class: "retry".to_string(),
                retryable: true,
                retry_after_hint: "exponential backoff from 500ms".to_string(),
                recommended_action: "Retry the request; check daemon reachability if timeouts persist.".to_string(),
                escalation: "Escalate after 5 consecutive timeouts.".to_string(),
            },
            FailureMode {
                code: "auth.untrusted_sender".to_string(),
                failure_class: "policy".to_string(),
                retry_class: "no-retry".to_string(),
                retryable: false,
                retry_after_hint: "none".to_string(),
                recommended_action: "Raise the sender's trust level via /contacts/{agent_id}/trust before resending.".to_string(),
                escalation: "Requires a human or policy decision to change trust.".to_string(),
            },
            FailureMode {
                code: "signature.invalid".to_string(),
                failure_class: "integrity".to_string(),
                retry_class: "no-retry".to_string(),
                retryable: false,
                retry_after_hint: "none".to_string(),
                recommended_action: "Re-sign the message with the key registered for the publishing agent.".to_string(),
                escalation: "Repeated failures from one contact warrant a trust downgrade.".to_string(),
            },
            FailureMode {
                code: "permission.denied".to_string(),
                failure_class: "policy".to_string(),
                retry_class: "no-retry".to_string(),
                retryable: false,
                retry_after_hint: "none".to_string(),
                recommended_action: "Check the action gating matrix; the action class is blocked at the caller's trust level.".to_string(),
                escalation: "Request a policy change from the daemon operator.".to_string(),
            },
            FailureMode {
                code: "schema.invalid_payload".to_string(),
                failure_class: "caller".to_string(),
                retry_class: "no-retry".to_string(),
                retryable: false,
                retry_after_hint: "none".to_string(),
                recommended_action: "Fix the request body; retrying the same payload will fail again.".to_string(),
                escalation: "None; a caller-side bug.".to_string(),
            },
            FailureMode {
                code: "daemon.unavailable".to_string(),
                failure_class: "transient".to_string(),
                retry_class: "retry".to_string(),
                retryable: true,
                retry_after_hint: "incremental backoff from 1s".to_string(),
                recommended_action: "Start or restart the daemon, then re-run the health probe.".to_string(),
                escalation: "Escalate if the daemon stays down after restart.".to_string(),
            },
        ],
        planned: vec![PlannedItem {
            id: "structured-error-envelope".to_string(),
            description: "Every error response carries code, detail, and retry_class fields.".to_string(),
        }],
    }
}

fn trust() -> TrustModel {
    TrustModel {
        contract_version: CONTRACT_VERSION.to_string(),
        current: TrustCurrent {
            trust_levels: vec![
                TrustLevel {
                    id: "unknown".to_string(),
                    semantics: "No prior interaction and no operator decision.".to_string(),
                    operational_outcome: "Messages are held; publish and mutate actions are blocked.".to_string(),
                },
                TrustLevel {
                    id: "known".to_string(),
                    semantics: "Seen before and signature-verified at least once.".to_string(),
                    operational_outcome: "Messages accepted; privileged mutations still gated.".to_string(),
                },
                TrustLevel {
                    id: "trusted".to_string(),
                    semantics: "Explicit operator or policy decision to trust.".to_string(),
                    operational_outcome: "All gated actions permitted subject to signatures.".to_string(),
                },
                TrustLevel {
                    id: "blocked".to_string(),
                    semantics: "Explicit decision to reject all interaction.".to_string(),
                    operational_outcome: "All messages and actions rejected.".to_string(),
                },
            ],
            threat_assumptions: vec![
                "Any reachable peer can claim any agent id; only signatures bind identity.".to_string(),
                "The local daemon API is loopback-only and not exposed to the network.".to_string(),
                "Install artifacts may be tampered with in transit; signatures must be verified before execution.".to_string(),
            ],
            default_transitions: vec![
                TrustTransition {
                    from: "unknown".to_string(),
                    to: "known".to_string(),
                    trigger: "first signature-verified message".to_string(),
                    transition_class: "automatic".to_string(),
                },
                TrustTransition {
                    from: "known".to_string(),
                    to: "trusted".to_string(),
                    trigger: "operator approval".to_string(),
                    transition_class: "needs-human".to_string(),
                },
                TrustTransition {
                    from: "known".to_string(),
                    to: "blocked".to_string(),
                    trigger: "repeated signature failures".to_string(),
                    transition_class: "automatic".to_string(),
                },
                TrustTransition {
                    from: "trusted".to_string(),
                    to: "blocked".to_string(),
                    trigger: "operator revocation".to_string(),
                    transition_class: "needs-human".to_string(),
                },
                TrustTransition {
                    from: "blocked".to_string(),
                    to: "known".to_string(),
                    trigger: "operator reinstatement".to_string(),
                    transition_class: "needs-human".to_string(),
                },
            ],
            action_gating_matrix: vec![
                ActionGate {
                    action_class: "publish".to_string(),
                    allowed_levels: vec!["known".to_string(), "trusted".to_string()],
                    blocked_levels: vec!["unknown".to_string(), "blocked".to_string()],
                    required_signatures: true,
                    decision_default: "deny".to_string(),
                },
                ActionGate {
                    action_class: "subscribe".to_string(),
                    allowed_levels: vec![
                        "unknown".to_string(),
                        "known".to_string(),
                        "trusted".to_string(),
                    ],
                    blocked_levels: vec!["blocked".to_string()],
                    required_signatures: false,
                    decision_default: "allow".to_string(),
                },
                ActionGate {
                    action_class: "mutate_contacts".to_string(),
                    allowed_levels: vec!["trusted".to_string()],
                    blocked_levels: vec![
                        "unknown".to_string(),
                        "known".to_string(),
                        "blocked".to_string(),
                    ],
                    required_signatures: true,
                    decision_default: "needs-human".to_string(),
                },
                ActionGate {
                    action_class: "task_list_write".to_string(),
                    allowed_levels: vec!["known".to_string(), "trusted".to_string()],
                    blocked_levels: vec!["unknown".to_string(), "blocked".to_string()],
                    required_signatures: true,
                    decision_default: "deny".to_string(),
                },
            ],
            controls: json!({
                "message_signatures": { "status": "current" },
                "contact_trust_filtering": { "status": "current" },
                "install_signature_verification": { "status": "current" }
            }),
            controls_current_vs_planned: ControlLabels {
                current: vec![
                    ControlLabel {
                        control_id: "message_signatures".to_string(),
                        summary: "Every published message is signed and verified on receipt.".to_string(),
                    },
                    ControlLabel {
                        control_id: "contact_trust_filtering".to_string(),
                        summary: "Inbound messages are filtered by the sender's trust level.".to_string(),
                    },
                    ControlLabel {
                        control_id: "install_signature_verification".to_string(),
                        summary: "Install artifacts carry detached signatures verified against the release key.".to_string(),
                    },
                ],
                planned: vec![
                    ControlLabel {
                        control_id: "reputation_weighted_trust".to_string(),
                        summary: "Trust suggestions from signed interaction history.".to_string(),
                    },
                    ControlLabel {
                        control_id: "key_rotation".to_string(),
                        summary: "Scheduled agent key rotation with overlap windows.".to_string(),
                    },
                ],
            },
            disclosure: Disclosure {
                security_email: "security@saorsalabs.com".to_string(),
                issues_url: "https://github.com/saorsa-labs/x0x/issues".to_string(),
                docs_url: "https://x0x.md".to_string(),
            },
            policy_guidance: vec![
                "Treat unknown senders as hostile until signature-verified.".to_string(),
                "Never auto-promote to trusted; that transition needs a human or an explicit policy.".to_string(),
                "Verify the install signature before executing any fetched script.".to_string(),
            ],
        },
        planned: vec![PlannedItem {
            id: "reputation-weighted-trust".to_string(),
            description: "Weight trust transitions by signed interaction history.".to_string(),
        }],
    }
}
