use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;

/// Draws one frame, graph origin at the canvas center.
pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let options = &state.options;
	ctx.set_fill_style_str(&options.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.width / 2.0, state.height / 2.0);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let radius = state.options.node_radius;
	let arrow_size = radius * 1.6;
	ctx.set_stroke_style_str(&state.options.edge_color);
	ctx.set_fill_style_str(&state.options.edge_color);
	ctx.set_line_width(1.5);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < radius * 2.0 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.begin_path();
		ctx.move_to(x1 + ux * radius, y1 + uy * radius);
		ctx.line_to(x2 - ux * (radius + arrow_size), y2 - uy * (radius + arrow_size));
		ctx.stroke();

		let (tip_x, tip_y) = (x2 - ux * radius, y2 - uy * radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let radius = state.options.node_radius;
	ctx.set_font("10px sans-serif");

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();

		if let Some(label) = &node.data.user_data.label {
			ctx.set_fill_style_str(&state.options.label_color);
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	});
}
