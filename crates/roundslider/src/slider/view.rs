use super::geometry::{ValueScale, polar_to_cartesian};
use super::{ARC_OPACITY, CLASS_NAME_PREFIX, TICK_WIDTH};
use crate::options::SliderOptions;
use crate::target::Point;

/// Everything needed to draw one frame of a slider.
pub struct RenderParams<'a> {
    pub options: &'a SliderOptions,
    pub scale: ValueScale,
    pub value: f64,
    pub instance_id: u64,
}

impl RenderParams<'_> {
    fn mask_id(&self) -> String {
        format!("{CLASS_NAME_PREFIX}_{}", self.instance_id)
    }

    fn size(&self) -> f64 {
        self.options.radius * 2.0
    }
}

/// Builds the SVG document: a notched background ring and the value arc on top of it.
pub fn render_markup(params: &RenderParams) -> String {
    let RenderParams { options, .. } = params;
    let (radius, size, mask_id) = (options.radius, params.size(), params.mask_id());

    format!(
        r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" class="{CLASS_NAME_PREFIX}" width="{size}" height="{size}">
  <defs>
    <mask id="{mask_id}">
      <rect x="0" y="0" width="{size}" height="{size}" fill="white" />
{ticks}
    </mask>
  </defs>
  <circle cx="{radius}" cy="{radius}" r="{path_radius}" fill="transparent" stroke-width="{stroke_width}" stroke="{background}" mask="url(#{mask_id})" />
  <path fill="none" stroke-width="{stroke_width}" stroke="{color}" opacity="{ARC_OPACITY}" d="{arc}" />
</svg>"#,
        ticks = tick_lines(&params.scale, radius),
        path_radius = options.path_radius(),
        stroke_width = options.stroke_width,
        background = options.background_color,
        color = options.color,
        arc = arc_path(&params.scale, radius, options.path_radius(), params.value),
    )
}

fn tick_lines(scale: &ValueScale, radius: f64) -> String {
    (0..scale.segment_count())
        .map(|i| {
            format!(
                r#"      <line x1="{radius}" y1="{radius}" x2="{x2}" y2="{radius}" stroke="black" stroke-width="{TICK_WIDTH}" transform="rotate({angle} {radius} {radius})" />"#,
                x2 = radius * 2.0,
                angle = scale.tick_angle(i),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Path data for the filled arc, running counter-clockwise from `value` back to the top.
pub fn arc_path(scale: &ValueScale, radius: f64, path_radius: f64, value: f64) -> String {
    let angle = scale.value_to_angle(scale.clamp(value));
    let center = Point::new(radius, radius);
    let start = polar_to_cartesian(center, path_radius, angle);
    let end = polar_to_cartesian(center, path_radius, 0.0);
    let large_arc = if angle > 180.0 { 1 } else { 0 };

    format!(
        "M {} {} A {path_radius} {path_radius} 0 {large_arc} 0 {} {}",
        start.x, start.y, end.x, end.y
    )
}
