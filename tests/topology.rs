//! End-to-end scenarios over the public topology API: payload in, sanitized
//! graph, simulated positions, containment regions out.

use topology_canvas::components::topology::{
	DeviceKind, EdgePayload, GraphPayload, NodePayload, TopologyGraph, TopologyState,
	subnet_regions,
};

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

fn lan_payload() -> GraphPayload {
	GraphPayload {
		nodes: vec![
			node("R1", "router", None),
			node("SW1", "switch", None),
			node("PC1", "pc", Some("SUB1")),
			node("SUB1", "subnet", None),
		],
		edges: vec![edge("e1", "R1", "SW1"), edge("e2", "SW1", "PC1")],
	}
}

#[test]
fn lan_scenario_groups_only_the_member_device() {
	let graph = TopologyGraph::from_payload(&lan_payload());
	assert_eq!(graph.devices.len(), 3);
	assert_eq!(graph.subnets.len(), 1);
	assert_eq!(graph.links.len(), 2);
	assert_eq!(graph.devices[0].kind, DeviceKind::Router);
	assert_eq!(graph.devices[2].subnet, Some(0));

	let mut state = TopologyState::new(graph, 800.0, 600.0);
	state.sim.pin(0, 100.0, 100.0);
	state.sim.pin(1, 250.0, 100.0);
	state.sim.pin(2, 600.0, 400.0);
	state.tick();

	let regions = subnet_regions(&state.graph, &state.sim);
	assert_eq!(regions.len(), 1);
	let rect = regions[0].expect("populated subnet has a box");
	assert!(rect.contains(600.0, 400.0));
	assert!(!rect.contains(100.0, 100.0));
	assert!(!rect.contains(250.0, 100.0));
}

#[test]
fn dangling_edges_do_not_reach_the_renderer() {
	let mut payload = lan_payload();
	payload.edges.push(edge("e3", "X1", "SW1"));
	let graph = TopologyGraph::from_payload(&payload);
	// nodes.length devices (minus the subnet), edges.length - 1 links.
	assert_eq!(graph.devices.len(), 3);
	assert_eq!(graph.links.len(), 2);
}

#[test]
fn empty_subnet_renders_no_region() {
	let payload = GraphPayload {
		nodes: vec![node("R1", "router", None), node("SUB1", "subnet", None)],
		edges: vec![],
	};
	let graph = TopologyGraph::from_payload(&payload);
	let state = TopologyState::new(graph, 800.0, 600.0);
	assert_eq!(subnet_regions(&state.graph, &state.sim), vec![None]);
}

#[test]
fn rebuilding_from_the_same_payload_is_stable() {
	let payload = lan_payload();
	let first = TopologyGraph::from_payload(&payload);
	let second = TopologyGraph::from_payload(&payload);
	let ids = |g: &TopologyGraph| g.devices.iter().map(|d| d.id.clone()).collect::<Vec<_>>();
	assert_eq!(ids(&first), ids(&second));
	assert_eq!(first.links.len(), second.links.len());
	assert_eq!(first.subnets.len(), second.subnets.len());

	// Same seed geometry too: the simulation is deterministic per graph.
	let a = TopologyState::new(first, 800.0, 600.0);
	let b = TopologyState::new(second, 800.0, 600.0);
	for (na, nb) in a.sim.nodes().iter().zip(b.sim.nodes()) {
		assert_eq!(na.position(), nb.position());
	}
}

#[test]
fn simulation_settles_to_finite_positions() {
	let graph = TopologyGraph::from_payload(&lan_payload());
	let mut state = TopologyState::new(graph, 800.0, 600.0);
	for _ in 0..400 {
		state.tick();
	}
	for node in state.sim.nodes() {
		let (x, y) = node.position();
		assert!(x.is_finite() && y.is_finite());
	}
	let regions = subnet_regions(&state.graph, &state.sim);
	let rect = regions[0].expect("member device keeps its subnet box");
	let (px, py) = state.sim.nodes()[2].position();
	assert!(rect.contains(px, py));
}
