//! Vector glyphs for the device icon set, one per [`DeviceKind`].
//!
//! Drawn directly with canvas paths so no image assets are fetched. Each
//! glyph sits on a shared disc and is keyed to the same accent color the
//! device type uses elsewhere in the UI.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::types::DeviceKind;

/// Square bounding box of one icon, in world units.
pub const ICON_SIZE: f64 = 50.0;

const DISC_FILL: &str = "#374151";
const DISC_STROKE: &str = "#4b5563";

/// Accent color for a device type, shared by glyph and any future styling.
pub fn accent_color(kind: DeviceKind) -> &'static str {
	match kind {
		DeviceKind::Router => "#3b82f6",
		DeviceKind::Switch => "#10b981",
		DeviceKind::Pc => "#8b5cf6",
		DeviceKind::Server => "#f97316",
		DeviceKind::Firewall => "#ef4444",
		DeviceKind::Cloud => "#0ea5e9",
		DeviceKind::Unknown => "#9ca3af",
	}
}

/// Draws the icon for `kind` centered on `(x, y)`.
pub fn draw_device_icon(ctx: &CanvasRenderingContext2d, kind: DeviceKind, x: f64, y: f64) {
	let r = ICON_SIZE / 2.0 - 5.0;
	ctx.set_fill_style_str(DISC_FILL);
	ctx.set_stroke_style_str(DISC_STROKE);
	ctx.set_line_width(2.0);
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.stroke();

	ctx.set_stroke_style_str(accent_color(kind));
	ctx.set_fill_style_str(accent_color(kind));
	ctx.set_line_width(2.5);
	match kind {
		DeviceKind::Router => {
			arrow(ctx, x - 12.0, y, x + 12.0, y);
			arrow(ctx, x, y + 12.0, x, y - 12.0);
		}
		DeviceKind::Switch => {
			arrow(ctx, x - 12.0, y - 5.0, x + 12.0, y - 5.0);
			arrow(ctx, x + 12.0, y + 5.0, x - 12.0, y + 5.0);
		}
		DeviceKind::Pc => {
			ctx.stroke_rect(x - 11.0, y - 10.0, 22.0, 15.0);
			ctx.begin_path();
			ctx.move_to(x - 6.0, y + 10.0);
			ctx.line_to(x + 6.0, y + 10.0);
			ctx.stroke();
			ctx.begin_path();
			ctx.move_to(x, y + 5.0);
			ctx.line_to(x, y + 10.0);
			ctx.stroke();
		}
		DeviceKind::Server => {
			ctx.stroke_rect(x - 11.0, y - 11.0, 22.0, 9.0);
			ctx.stroke_rect(x - 11.0, y + 2.0, 22.0, 9.0);
			ctx.begin_path();
			let _ = ctx.arc(x - 7.0, y - 6.5, 1.5, 0.0, 2.0 * PI);
			ctx.fill();
			ctx.begin_path();
			let _ = ctx.arc(x - 7.0, y + 6.5, 1.5, 0.0, 2.0 * PI);
			ctx.fill();
		}
		DeviceKind::Firewall => {
			ctx.stroke_rect(x - 12.0, y - 9.0, 24.0, 18.0);
			for row in 0..2 {
				let ry = y - 3.0 + row as f64 * 6.0;
				ctx.begin_path();
				ctx.move_to(x - 12.0, ry);
				ctx.line_to(x + 12.0, ry);
				ctx.stroke();
			}
			ctx.begin_path();
			ctx.move_to(x, y - 9.0);
			ctx.line_to(x, y - 3.0);
			ctx.move_to(x - 6.0, y - 3.0);
			ctx.line_to(x - 6.0, y + 3.0);
			ctx.move_to(x + 6.0, y - 3.0);
			ctx.line_to(x + 6.0, y + 3.0);
			ctx.move_to(x, y + 3.0);
			ctx.line_to(x, y + 9.0);
			ctx.stroke();
		}
		DeviceKind::Cloud => {
			ctx.begin_path();
			let _ = ctx.arc(x - 6.0, y + 2.0, 6.0, PI / 2.0, 3.0 * PI / 2.0);
			let _ = ctx.arc(x - 2.0, y - 5.0, 6.5, PI, 0.2 * PI);
			let _ = ctx.arc(x + 7.0, y + 1.0, 5.5, 1.3 * PI, PI / 2.0);
			ctx.close_path();
			ctx.stroke();
		}
		DeviceKind::Unknown => {
			ctx.set_font("bold 18px sans-serif");
			ctx.set_text_align("center");
			let _ = ctx.fill_text("?", x, y + 6.0);
		}
	}
}

fn arrow(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len = (dx * dx + dy * dy).sqrt();
	if len < 0.001 {
		return;
	}
	let (ux, uy) = (dx / len, dy / len);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
	let head = 4.0;
	ctx.begin_path();
	ctx.move_to(x2, y2);
	ctx.line_to(x2 - ux * head - uy * head * 0.6, y2 - uy * head + ux * head * 0.6);
	ctx.line_to(x2 - ux * head + uy * head * 0.6, y2 - uy * head - ux * head * 0.6);
	ctx.close_path();
	ctx.fill();
}
