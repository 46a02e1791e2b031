//! Provider exchange: prose in, graph payload out.
//!
//! Two interchangeable backends resolve to the identical response shape
//! before anything reaches the rendering core: a schema-constrained Gemini
//! `generateContent` call and an OpenRouter chat completion in JSON-object
//! mode. Every failure mode here — network, HTTP status, malformed JSON,
//! missing fields, empty responses — surfaces as one human-readable message.

use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::components::topology::GraphPayload;

/// Default Gemini model for schema-constrained generation.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Free-tier OpenRouter models offered in the picker.
pub const OPENROUTER_MODELS: &[&str] = &[
	"mistralai/mistral-7b-instruct:free",
	"google/gemma-7b-it:free",
	"nousresearch/nous-hermes-2-mixtral-8x7b-dpo:free",
	"openrouter/cinematika-7b:free",
	"gryphe/mythomist-7b:free",
];

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Selectable LLM backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
	Gemini,
	OpenRouter,
}

impl Provider {
	pub fn label(self) -> &'static str {
		match self {
			Self::Gemini => "Gemini",
			Self::OpenRouter => "OpenRouter",
		}
	}
}

/// Everything needed for one generation request.
#[derive(Clone, Debug)]
pub struct RequestConfig {
	pub provider: Provider,
	pub api_key: String,
	pub model: String,
}

/// Failure surface of the exchange, rendered to the user as one message.
#[derive(Debug, Error)]
pub enum ProviderError {
	#[error("the request could not be sent: {0}")]
	Network(String),
	#[error("the provider returned HTTP status {0}")]
	Status(u16),
	#[error("the provider returned an empty response")]
	Empty,
	#[error("the response could not be read as a topology: {0}")]
	Malformed(String),
}

/// Parsed provider response: a prose summary plus the graph payload the
/// rendering core consumes.
#[derive(Clone, Debug, Deserialize)]
pub struct TopologyResponse {
	pub description: String,
	pub graph: GraphPayload,
}

/// Sends the user's prose to the configured backend and parses the reply.
pub async fn generate_topology(
	config: &RequestConfig,
	description: &str,
) -> Result<TopologyResponse, ProviderError> {
	info!("requesting topology from {}", config.provider.label());
	let prompt = build_prompt(description);
	let raw = match config.provider {
		Provider::Gemini => {
			let model = if config.model.trim().is_empty() {
				GEMINI_MODEL
			} else {
				config.model.trim()
			};
			let url = format!(
				"https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent?key={}",
				config.api_key
			);
			let body = json!({
				"contents": [{"parts": [{"text": prompt}]}],
				"generationConfig": {
					"responseMimeType": "application/json",
					"responseSchema": response_schema(),
				},
			});
			let reply = post_json(&url, &[("Content-Type", "application/json")], &body).await?;
			extract_text(&reply, "/candidates/0/content/parts/0/text")?
		}
		Provider::OpenRouter => {
			let auth = format!("Bearer {}", config.api_key);
			let body = json!({
				"model": config.model,
				"messages": [{"role": "user", "content": prompt}],
				"response_format": {"type": "json_object"},
			});
			let reply = post_json(
				OPENROUTER_URL,
				&[("Content-Type", "application/json"), ("Authorization", &auth)],
				&body,
			)
			.await?;
			extract_text(&reply, "/choices/0/message/content")?
		}
	};
	parse_topology(&raw)
}

/// Parses a raw model reply into [`TopologyResponse`], tolerating a wrapping
/// markdown code fence.
pub fn parse_topology(raw: &str) -> Result<TopologyResponse, ProviderError> {
	let payload = strip_code_fence(raw);
	if payload.is_empty() {
		return Err(ProviderError::Empty);
	}
	serde_json::from_str(payload).map_err(|err| ProviderError::Malformed(err.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
	let trimmed = text.trim();
	let Some(inner) = trimmed.strip_prefix("```") else {
		return trimmed;
	};
	let inner = inner.strip_prefix("json").unwrap_or(inner);
	inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn extract_text(reply: &str, pointer: &str) -> Result<String, ProviderError> {
	let value: Value =
		serde_json::from_str(reply).map_err(|err| ProviderError::Malformed(err.to_string()))?;
	value
		.pointer(pointer)
		.and_then(Value::as_str)
		.map(str::to_string)
		.ok_or(ProviderError::Empty)
}

async fn post_json(
	url: &str,
	headers: &[(&str, &str)],
	body: &Value,
) -> Result<String, ProviderError> {
	let opts = RequestInit::new();
	opts.set_method("POST");
	opts.set_body(&JsValue::from_str(&body.to_string()));
	let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
	for (name, value) in headers {
		request.headers().set(name, value).map_err(js_error)?;
	}
	let window = web_sys::window().ok_or_else(|| ProviderError::Network("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_error)?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| ProviderError::Network("unexpected fetch result".into()))?;
	if !response.ok() {
		return Err(ProviderError::Status(response.status()));
	}
	let text = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	text.as_string().ok_or(ProviderError::Empty)
}

fn js_error(err: JsValue) -> ProviderError {
	ProviderError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn build_prompt(user_input: &str) -> String {
	format!(
		r#"Act as a senior network engineer. Design a network topology from the user's request and express it as graph data for visualization.

USER REQUEST: "{user_input}"

Follow these strict rules:
1. Analyze and design: understand the requested devices, connectivity and structure. Devise a logical IP addressing scheme if one is not provided.
2. Device naming: use standard abbreviations: 'R' for routers (R1, R2), 'S' for switches, 'PC' for PCs, 'SRV' for servers, 'FW' for firewalls, 'CLOUD' for the internet.
3. Interface naming: use standard names: GigabitEthernet (G0/0), FastEthernet (F0/1), Serial (S0/0/0).
4. IP addressing and data structure:
   - LAN subnets: for each LAN subnet, create a node whose 'type' is 'subnet'. Its 'id' and 'label' must be the network address in CIDR notation (e.g. "192.168.10.0/24"). Devices in that LAN set their 'parent' to the subnet node's 'id'.
   - Point-to-point links between infrastructure devices: do NOT create a subnet node; put the network's CIDR address in the edge's 'label' instead.
   - Assign full addresses ('ip') ONLY to end devices ('pc', 'server').
   - On routed interfaces (router, firewall), put the interface address in the edge's 'sourceIp'/'targetIp'. Do not add IPs for switch interfaces.
5. Description: provide a clear, bulleted summary of the topology, device roles and the IP scheme.
6. Output a single valid JSON object of the shape {{"description": string, "graph": {{"nodes": [...], "edges": [...]}}}} and nothing else.

Example node for a PC in a LAN: {{"id": "PC1", "label": "PC1", "type": "pc", "ip": "192.168.10.10/24", "parent": "192.168.10.0/24"}}
Example node for a LAN subnet: {{"id": "192.168.10.0/24", "label": "192.168.10.0/24", "type": "subnet"}}
Example edge for a point-to-point link: {{"id": "R1-R2", "source": "R1", "target": "R2", "label": "10.1.1.0/30", "sourceLabel": "S0/0/0", "targetLabel": "S0/0/0", "sourceIp": "10.1.1.1/30", "targetIp": "10.1.1.2/30"}}

Produce ONLY the JSON object. Do not add any text or formatting around it."#
	)
}

fn response_schema() -> Value {
	json!({
		"type": "OBJECT",
		"properties": {
			"description": {
				"type": "STRING",
				"description": "Bullet-point description of the proposed topology, including device counts, connection types, and IP addressing strategy."
			},
			"graph": {
				"type": "OBJECT",
				"properties": {
					"nodes": {
						"type": "ARRAY",
						"items": {
							"type": "OBJECT",
							"properties": {
								"id": {"type": "STRING", "description": "Unique node identifier. For devices, same as label. For subnets, the network CIDR."},
								"label": {"type": "STRING", "description": "Device name or network address."},
								"type": {"type": "STRING", "description": "'router', 'switch', 'pc', 'server', 'firewall', 'cloud', or 'subnet'."},
								"ip": {"type": "STRING", "description": "Assigned address with CIDR, only for end devices."},
								"parent": {"type": "STRING", "description": "For devices in a LAN, the id of the subnet node."}
							},
							"required": ["id", "label", "type"]
						}
					},
					"edges": {
						"type": "ARRAY",
						"items": {
							"type": "OBJECT",
							"properties": {
								"id": {"type": "STRING", "description": "Unique edge identifier, e.g. 'R1-S1'."},
								"source": {"type": "STRING", "description": "Id of the source node."},
								"target": {"type": "STRING", "description": "Id of the target node."},
								"sourceLabel": {"type": "STRING", "description": "Interface name on the source device."},
								"targetLabel": {"type": "STRING", "description": "Interface name on the target device."},
								"sourceIp": {"type": "STRING", "description": "Source interface address with CIDR, if routed."},
								"targetIp": {"type": "STRING", "description": "Target interface address with CIDR, if routed."},
								"label": {"type": "STRING", "description": "For point-to-point links, the network address."}
							},
							"required": ["id", "source", "target", "sourceLabel", "targetLabel"]
						}
					}
				},
				"required": ["nodes", "edges"]
			}
		},
		"required": ["description", "graph"]
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const GOOD: &str = r#"{
		"description": "* One router.",
		"graph": {
			"nodes": [{"id": "R1", "label": "R1", "type": "router"}],
			"edges": []
		}
	}"#;

	#[test]
	fn parses_a_bare_json_object() {
		let response = parse_topology(GOOD).unwrap();
		assert_eq!(response.graph.nodes.len(), 1);
		assert_eq!(response.description, "* One router.");
	}

	#[test]
	fn parses_a_fenced_json_object() {
		let fenced = format!("```json\n{GOOD}\n```");
		let response = parse_topology(&fenced).unwrap();
		assert_eq!(response.graph.nodes[0].id, "R1");
	}

	#[test]
	fn missing_fields_read_as_malformed() {
		let err = parse_topology(r#"{"description": "no graph"}"#).unwrap_err();
		assert!(matches!(err, ProviderError::Malformed(_)));
		assert!(err.to_string().contains("topology"));
	}

	#[test]
	fn empty_reply_is_its_own_error() {
		assert!(matches!(parse_topology("   "), Err(ProviderError::Empty)));
		assert!(matches!(
			parse_topology("```json\n```"),
			Err(ProviderError::Empty)
		));
	}

	#[test]
	fn extract_text_walks_provider_envelopes() {
		let gemini = r#"{"candidates": [{"content": {"parts": [{"text": "hi"}]}}]}"#;
		assert_eq!(
			extract_text(gemini, "/candidates/0/content/parts/0/text").unwrap(),
			"hi"
		);
		let openrouter = r#"{"choices": [{"message": {"content": "hello"}}]}"#;
		assert_eq!(
			extract_text(openrouter, "/choices/0/message/content").unwrap(),
			"hello"
		);
		assert!(matches!(
			extract_text("{}", "/choices/0/message/content"),
			Err(ProviderError::Empty)
		));
	}

	#[test]
	fn schema_names_both_required_payload_halves() {
		let schema = response_schema();
		assert_eq!(
			schema.pointer("/required").unwrap(),
			&serde_json::json!(["description", "graph"])
		);
	}
}
