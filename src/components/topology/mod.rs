//! Topology rendering and layout engine.

mod component;
mod icons;
mod regions;
mod render;
mod simulation;
mod state;
mod types;

pub use component::TopologyCanvas;
pub use regions::{REGION_PADDING, Rect, bounding_rect, subnet_regions};
pub use render::{abbreviate_ip, interface_label, label_rotation_deg};
pub use simulation::{SimNode, SimParams, Simulation};
pub use state::{HIT_RADIUS, TopologyState, ViewTransform};
pub use types::{
	Device, DeviceKind, EdgePayload, GraphPayload, Link, NodePayload, Subnet, TopologyGraph,
};
