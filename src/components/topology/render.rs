//! Canvas projection of one tick's simulation state.
//!
//! Pure side-effecting draw: the whole frame is repainted from scratch every
//! tick, so re-invoking it never accumulates artifacts. Draw order is
//! subnets, then links, then device icons, so containment boxes sit under
//! everything and icons cover the line endpoints.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::icons;
use super::regions::subnet_regions;
use super::state::TopologyState;

const BACKGROUND: &str = "#111827";
const LINK_STROKE: &str = "#4b5563";
const CAPTION_FILL: &str = "#cbd5e1";
const INTERFACE_FILL: &str = "#9ca3af";
const ACCENT_FILL: &str = "#38bdf8";
const SUBNET_FILL: &str = "rgba(45, 55, 72, 0.3)";
const SUBNET_STROKE: &str = "#4a5568";

/// Shortens `a.b.c.d/nn` to `.d` for captions and interface labels.
pub fn abbreviate_ip(ip: &str) -> Option<String> {
	let addr = ip.split('/').next()?;
	let octets: Vec<&str> = addr.split('.').collect();
	(octets.len() == 4).then(|| format!(".{}", octets[3]))
}

/// Interface caption: name plus abbreviated address when one is assigned.
pub fn interface_label(name: &str, ip: Option<&str>) -> String {
	match ip.and_then(abbreviate_ip) {
		Some(abbr) => format!("{name} ({abbr})"),
		None => name.to_string(),
	}
}

/// Text rotation for a label along the edge vector, in degrees, normalized
/// into (-90, 90] so labels never render upside-down.
pub fn label_rotation_deg(dx: f64, dy: f64) -> f64 {
	let mut deg = dy.atan2(dx).to_degrees();
	if deg > 90.0 {
		deg -= 180.0;
	} else if deg < -90.0 {
		deg += 180.0;
	}
	deg
}

/// Repaints the full frame from the current simulation state.
pub fn render(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_subnets(state, ctx);
	draw_links(state, ctx);
	draw_devices(state, ctx);
	ctx.restore();
}

fn draw_subnets(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	let boxes = subnet_regions(&state.graph, &state.sim);
	for (subnet, rect) in state.graph.subnets.iter().zip(boxes) {
		let Some(rect) = rect else {
			continue;
		};
		ctx.set_fill_style_str(SUBNET_FILL);
		ctx.set_stroke_style_str(SUBNET_STROKE);
		ctx.set_line_width(2.0);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(5.0),
			&JsValue::from_f64(5.0),
		));
		rounded_rect_path(ctx, rect.x, rect.y, rect.width, rect.height, 10.0);
		ctx.fill();
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(ACCENT_FILL);
		ctx.set_font("bold 16px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&subnet.label, rect.x + rect.width / 2.0, rect.y + 20.0);
	}
}

fn draw_links(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	for link in &state.graph.links {
		let (x1, y1) = state.sim.nodes()[link.source].position();
		let (x2, y2) = state.sim.nodes()[link.target].position();

		ctx.set_stroke_style_str(LINK_STROKE);
		ctx.set_line_width(2.0);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		let (mid_x, mid_y) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		let rotation = label_rotation_deg(x2 - x1, y2 - y1).to_radians();
		ctx.save();
		let _ = ctx.translate(mid_x, mid_y);
		let _ = ctx.rotate(rotation);
		ctx.set_text_align("center");

		// Network label on the line, interface labels above and below.
		if let Some(network) = &link.network_label {
			ctx.set_fill_style_str(ACCENT_FILL);
			ctx.set_font("bold 14px sans-serif");
			let _ = ctx.fill_text(network, 0.0, 5.0);
		}
		ctx.set_fill_style_str(INTERFACE_FILL);
		ctx.set_font("11px sans-serif");
		let source = interface_label(&link.source_label, link.source_address.as_deref());
		if !source.is_empty() {
			let _ = ctx.fill_text(&source, 0.0, -9.0);
		}
		let target = interface_label(&link.target_label, link.target_address.as_deref());
		if !target.is_empty() {
			let _ = ctx.fill_text(&target, 0.0, 17.0);
		}
		ctx.restore();
	}
}

fn draw_devices(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	for (device, node) in state.graph.devices.iter().zip(state.sim.nodes()) {
		let (x, y) = node.position();
		icons::draw_device_icon(ctx, device.kind, x, y);

		ctx.set_fill_style_str(CAPTION_FILL);
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&device.label, x, y + 40.0);
		if device.kind.shows_address() {
			if let Some(abbr) = device.address.as_deref().and_then(abbreviate_ip) {
				let _ = ctx.fill_text(&abbr, x, y + 54.0);
			}
		}
	}
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rotation_is_zero_for_horizontal_edges() {
		assert_eq!(label_rotation_deg(100.0, 0.0), 0.0);
	}

	#[test]
	fn reversed_horizontal_edge_is_corrected() {
		// atan2 gives 180 degrees; upside-down text folds back to 0.
		assert_eq!(label_rotation_deg(-100.0, 0.0), 0.0);
	}

	#[test]
	fn steep_angles_fold_into_readable_range() {
		let deg = label_rotation_deg(-100.0, -100.0);
		assert!((deg - 45.0).abs() < 1e-9);
		let deg = label_rotation_deg(-100.0, 100.0);
		assert!((deg + 45.0).abs() < 1e-9);
		let deg = label_rotation_deg(100.0, 100.0);
		assert!((deg - 45.0).abs() < 1e-9);
	}

	#[test]
	fn abbreviates_dotted_quads() {
		assert_eq!(abbreviate_ip("192.168.10.10/24").as_deref(), Some(".10"));
		assert_eq!(abbreviate_ip("10.1.1.2").as_deref(), Some(".2"));
		assert_eq!(abbreviate_ip("fe80::1/64"), None);
		assert_eq!(abbreviate_ip(""), None);
	}

	#[test]
	fn interface_label_appends_abbreviated_address() {
		assert_eq!(interface_label("G0/1", Some("10.1.1.1/30")), "G0/1 (.1)");
		assert_eq!(interface_label("F0/2", None), "F0/2");
		assert_eq!(interface_label("S0/0/0", Some("not-an-ip")), "S0/0/0");
	}
}
