use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

/// Wire shape of one node as produced by the providers.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePayload {
	pub id: String,
	pub label: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub ip: Option<String>,
	pub parent: Option<String>,
}

/// Wire shape of one link as produced by the providers.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePayload {
	pub id: String,
	pub source: String,
	pub target: String,
	pub source_label: String,
	pub target_label: String,
	pub source_ip: Option<String>,
	pub target_ip: Option<String>,
	pub label: Option<String>,
}

/// Raw graph payload, the shared output shape of every provider backend.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphPayload {
	pub nodes: Vec<NodePayload>,
	pub edges: Vec<EdgePayload>,
}

/// Closed set of device renderings. Unrecognized wire strings fall back to
/// [`DeviceKind::Unknown`] so forward-compatible payloads still draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceKind {
	Router,
	Switch,
	Pc,
	Server,
	Firewall,
	Cloud,
	Unknown,
}

impl DeviceKind {
	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"router" => Self::Router,
			"switch" => Self::Switch,
			"pc" => Self::Pc,
			"server" => Self::Server,
			"firewall" => Self::Firewall,
			"cloud" => Self::Cloud,
			_ => Self::Unknown,
		}
	}

	/// End devices carry their assigned address in the caption.
	pub fn shows_address(self) -> bool {
		matches!(self, Self::Pc | Self::Server)
	}
}

#[derive(Clone, Debug)]
pub struct Device {
	pub id: String,
	pub label: String,
	pub kind: DeviceKind,
	pub address: Option<String>,
	/// Index into [`TopologyGraph::subnets`], resolved at build time.
	pub subnet: Option<usize>,
}

/// A visual grouping container, never a dynamics-bearing body.
#[derive(Clone, Debug)]
pub struct Subnet {
	pub id: String,
	pub label: String,
}

#[derive(Clone, Debug)]
pub struct Link {
	pub source: usize,
	pub target: usize,
	pub source_label: String,
	pub target_label: String,
	pub source_address: Option<String>,
	pub target_address: Option<String>,
	pub network_label: Option<String>,
}

/// Immutable internal graph for one rendering pass.
///
/// Devices and subnets are separated by wire `type`; subnets are excluded
/// from the physics body set entirely. Links are stored as device indices,
/// so every surviving link resolves by construction.
#[derive(Clone, Debug, Default)]
pub struct TopologyGraph {
	pub devices: Vec<Device>,
	pub subnets: Vec<Subnet>,
	pub links: Vec<Link>,
}

impl TopologyGraph {
	/// Builds the internal graph, applying the sanitization policy: links
	/// whose endpoints do not both resolve to a device are silently dropped,
	/// and a `parent` that names no subnet leaves the device ungrouped.
	pub fn from_payload(payload: &GraphPayload) -> Self {
		let mut subnets = Vec::new();
		let mut subnet_idx = HashMap::new();
		for node in &payload.nodes {
			if node.kind.trim().eq_ignore_ascii_case("subnet") {
				subnet_idx.entry(node.id.clone()).or_insert(subnets.len());
				subnets.push(Subnet {
					id: node.id.clone(),
					label: node.label.clone(),
				});
			}
		}

		let mut devices = Vec::new();
		let mut device_idx = HashMap::new();
		for node in &payload.nodes {
			if node.kind.trim().eq_ignore_ascii_case("subnet") {
				continue;
			}
			device_idx.entry(node.id.clone()).or_insert(devices.len());
			devices.push(Device {
				id: node.id.clone(),
				label: node.label.clone(),
				kind: DeviceKind::parse(&node.kind),
				address: node.ip.clone(),
				subnet: node
					.parent
					.as_ref()
					.and_then(|p| subnet_idx.get(p))
					.copied(),
			});
		}

		let mut links = Vec::new();
		for edge in &payload.edges {
			let (Some(&source), Some(&target)) = (
				device_idx.get(&edge.source),
				device_idx.get(&edge.target),
			) else {
				debug!(
					"dropping link {} ({} -> {}): unresolved endpoint",
					edge.id, edge.source, edge.target
				);
				continue;
			};
			links.push(Link {
				source,
				target,
				source_label: edge.source_label.clone(),
				target_label: edge.target_label.clone(),
				source_address: edge.source_ip.clone(),
				target_address: edge.target_ip.clone(),
				network_label: edge.label.clone(),
			});
		}

		Self {
			devices,
			subnets,
			links,
		}
	}

	/// Device index pairs for the simulation's link force.
	pub fn link_pairs(&self) -> Vec<(usize, usize)> {
		self.links.iter().map(|l| (l.source, l.target)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, kind: &str, parent: Option<&str>) -> NodePayload {
		NodePayload {
			id: id.into(),
			label: id.into(),
			kind: kind.into(),
			ip: None,
			parent: parent.map(Into::into),
		}
	}

	fn edge(id: &str, source: &str, target: &str) -> EdgePayload {
		EdgePayload {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			source_label: "G0/0".into(),
			target_label: "G0/1".into(),
			source_ip: None,
			target_ip: None,
			label: None,
		}
	}

	#[test]
	fn dangling_links_are_dropped() {
		let payload = GraphPayload {
			nodes: vec![node("R1", "router", None), node("SW1", "switch", None)],
			edges: vec![
				edge("a", "R1", "SW1"),
				edge("b", "R1", "X1"),
				edge("c", "X1", "SW1"),
			],
		};
		let graph = TopologyGraph::from_payload(&payload);
		assert_eq!(graph.devices.len(), 2);
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].source, 0);
		assert_eq!(graph.links[0].target, 1);
	}

	#[test]
	fn links_to_subnet_nodes_do_not_resolve() {
		let payload = GraphPayload {
			nodes: vec![
				node("R1", "router", None),
				node("10.0.0.0/24", "subnet", None),
			],
			edges: vec![edge("a", "R1", "10.0.0.0/24")],
		};
		let graph = TopologyGraph::from_payload(&payload);
		assert_eq!(graph.subnets.len(), 1);
		assert!(graph.links.is_empty());
	}

	#[test]
	fn unresolved_parent_leaves_device_ungrouped() {
		let payload = GraphPayload {
			nodes: vec![node("PC1", "pc", Some("192.168.1.0/24"))],
			edges: vec![],
		};
		let graph = TopologyGraph::from_payload(&payload);
		assert_eq!(graph.devices[0].subnet, None);
	}

	#[test]
	fn parent_resolves_to_subnet_index() {
		let payload = GraphPayload {
			nodes: vec![
				node("SUB1", "subnet", None),
				node("PC1", "pc", Some("SUB1")),
				node("R1", "router", None),
			],
			edges: vec![],
		};
		let graph = TopologyGraph::from_payload(&payload);
		assert_eq!(graph.devices.len(), 2);
		assert_eq!(graph.devices[0].subnet, Some(0));
		assert_eq!(graph.devices[1].subnet, None);
	}

	#[test]
	fn unknown_kind_falls_back() {
		assert_eq!(DeviceKind::parse("load-balancer"), DeviceKind::Unknown);
		assert_eq!(DeviceKind::parse(" Router "), DeviceKind::Router);
	}

	#[test]
	fn payload_deserializes_camel_case() {
		let raw = r#"{
			"nodes": [{"id": "PC1", "label": "PC1", "type": "pc", "ip": "192.168.10.10/24", "parent": "192.168.10.0/24"}],
			"edges": [{"id": "e1", "source": "PC1", "target": "PC1", "sourceLabel": "F0/1", "targetLabel": "F0/2", "sourceIp": null, "label": "10.0.0.0/30"}]
		}"#;
		let payload: GraphPayload = serde_json::from_str(raw).unwrap();
		assert_eq!(payload.nodes[0].parent.as_deref(), Some("192.168.10.0/24"));
		assert_eq!(payload.edges[0].source_label, "F0/1");
		assert_eq!(payload.edges[0].label.as_deref(), Some("10.0.0.0/30"));
	}
}
