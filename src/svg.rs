//! SVG wireframe of an export plan.
//!
//! Draws the canvas, header chips, badges and labels as they will be painted,
//! with card and icon images shown as outlined boxes. No assets are loaded,
//! so this works without any art on hand.
//!
//! # Example
//!
//! ```
//! use deck_export::ExportPlan;
//! use deck_export::svg::render_plan_svg;
//!
//! fn dump(plan: &ExportPlan) -> String {
//!     render_plan_svg(plan)
//! }
//! ```

use crate::plan::{DrawCommand, ExportPlan, ImageRole};

/// Widest the output document gets; the canvas scales down to fit.
const MAX_W: f32 = 960.0;
const MARGIN: f32 = 20.0;

/// Render `plan` as a complete SVG document.
pub fn render_plan_svg(plan: &ExportPlan) -> String {
    let (cw, ch) = (plan.canvas.width as f32, plan.canvas.height as f32);
    let scale = if cw > MAX_W { MAX_W / cw } else { 1.0 };
    let total_w = cw * scale + 2.0 * MARGIN;
    let total_h = ch * scale + 2.0 * MARGIN;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "DejaVu Sans", sans-serif; }
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .layout-top { stroke: #c0392b; stroke-width: 1; stroke-dasharray: 6,3; }
  .card { fill: #6ba3d6; fill-opacity: 0.6; stroke: #2c6faa; stroke-width: 1; }
  .icon { fill: none; stroke: #7b5ea7; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .canvas { fill: #2d2d2d; stroke: #555; }
    .card { fill: #3a72a4; stroke: #5a9fd4; }
    .icon { stroke: #b39ddb; }
  }
</style>
"##,
    );

    svg.push_str(&format!(
        r#"<g transform="translate({MARGIN} {MARGIN}) scale({scale})">"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect class="canvas" x="0" y="0" width="{cw}" height="{ch}"/>"#
    ));
    svg.push('\n');

    for cmd in &plan.commands {
        match cmd {
            // Shown by the canvas rect.
            DrawCommand::Background { .. } => {}
            DrawCommand::Text {
                text,
                x,
                baseline,
                size,
                color,
            } => {
                svg.push_str(&format!(
                    r#"<text x="{x}" y="{baseline}" font-size="{size}" fill="{}">{}</text>"#,
                    color.to_hex(),
                    escape_xml(text)
                ));
            }
            DrawCommand::RoundedRect {
                rect,
                radius,
                color,
            } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" fill="{}"/>"#,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    color.to_hex()
                ));
            }
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                color,
            } => {
                svg.push_str(&format!(
                    r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="{}"/>"#,
                    color.to_hex()
                ));
            }
            DrawCommand::Image {
                reference,
                rect,
                role,
            } => {
                let class = match role {
                    ImageRole::Icon => "icon",
                    ImageRole::Card(_) => "card",
                };
                svg.push_str(&format!(
                    r#"<rect class="{class}" x="{}" y="{}" width="{}" height="{}"><title>{}</title></rect>"#,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    escape_xml(reference)
                ));
            }
        }
        svg.push('\n');
    }

    svg.push_str(&format!(
        r#"<line class="layout-top" x1="0" y1="{0}" x2="{cw}" y2="{0}"/>"#,
        plan.layout_top
    ));
    svg.push_str("\n</g>\n");
    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
