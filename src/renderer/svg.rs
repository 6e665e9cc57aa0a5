//! SVG generation from map frames
//!
//! Shapes are projected with Web Mercator around the frame's viewport so the
//! preview matches what a tiled map would show at the same camera.

use crate::geometry::{project, CoordinateList, GeometryType, LatLng, ShapeDescriptor, Viewport};
use crate::orchestrator::MapFrame;
use crate::style::{IconSequence, SymbolPath};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a CSS rule to the style block
    pub fn add_style(&mut self, rule: impl Into<String>) {
        self.styles.push(rule.into());
    }

    /// Add the map background covering the whole canvas
    pub fn add_background(&mut self, fill: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            self.config.width,
            self.config.height,
            fill
        ));
    }

    /// Add a shape path, with an optional tooltip
    pub fn add_shape(
        &mut self,
        id: &str,
        kind: GeometryType,
        d: &str,
        styles: &str,
        title: Option<&str>,
    ) {
        let prefix = self.prefix();
        let kind_class = match kind {
            GeometryType::Polygon => "polygon",
            GeometryType::Polyline => "polyline",
        };
        let open = format!(
            r#"{}<path id="{}" class="{}shape {}{}" d="{}"{}"#,
            self.indent_str(),
            escape_xml(id),
            prefix,
            prefix,
            kind_class,
            d,
            styles
        );
        let element = match title {
            Some(title) => format!("{}><title>{}</title></path>", open, escape_xml(title)),
            None => format!("{}/>", open),
        };
        self.elements.push(element);
    }

    /// Finish the document
    pub fn build(self) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.config.width,
            h = self.config.height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Maps geographic positions to canvas pixels for one viewport
#[derive(Debug, Clone, Copy)]
pub struct CanvasProjection {
    origin: (f64, f64),
    half: (f64, f64),
    zoom: f64,
}

impl CanvasProjection {
    pub fn new(viewport: &Viewport, width: f64, height: f64) -> Self {
        let zoom = f64::from(viewport.zoom);
        Self {
            origin: project(viewport.center, zoom),
            half: (width / 2.0, height / 2.0),
            zoom,
        }
    }

    /// Canvas position of `point`, or `None` when it is not a number
    pub fn to_canvas(&self, point: LatLng) -> Option<(f64, f64)> {
        if !point.is_finite() {
            return None;
        }
        let (x, y) = project(point, self.zoom);
        Some((
            x - self.origin.0 + self.half.0,
            y - self.origin.1 + self.half.1,
        ))
    }
}

/// Render a map frame to SVG
pub fn render_svg(frame: &MapFrame, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let projection = CanvasProjection::new(&frame.viewport, config.width, config.height);

    builder.add_background("#e5e3df");

    for shape in &frame.shapes {
        render_shape(shape, &projection, config, &mut builder);
    }

    builder.build()
}

fn render_shape(
    shape: &ShapeDescriptor,
    projection: &CanvasProjection,
    config: &SvgConfig,
    builder: &mut SvgBuilder,
) {
    let (d, styles) = match shape.geometry_type {
        GeometryType::Polygon => {
            let mut d = ring_to_d(&shape.path, projection, true);
            for hole in &shape.holes {
                let hole_d = ring_to_d(hole, projection, true);
                if !hole_d.is_empty() {
                    d.push(' ');
                    d.push_str(&hole_d);
                }
            }
            (d, format_polygon_styles(shape))
        }
        GeometryType::Polyline => (
            ring_to_d(&shape.path, projection, false),
            format_polyline_styles(shape),
        ),
    };

    if d.is_empty() {
        tracing::debug!(id = %shape.id, "shape has no drawable points");
        return;
    }

    if let (GeometryType::Polygon, Some(hover)) = (shape.geometry_type, shape.hover_color) {
        builder.add_style(format!(
            r#"[id="{}"]:hover {{ fill: {}; }}"#,
            escape_css_string(&shape.id),
            hover
        ));
    }

    let title = shape
        .info_window
        .as_ref()
        .map(|text| format!("{}: {}", config.info_window_label, text));
    builder.add_shape(
        &shape.id,
        shape.geometry_type,
        &d,
        &styles,
        title.as_deref(),
    );
}

fn format_polygon_styles(shape: &ShapeDescriptor) -> String {
    format!(
        r#" fill="{}" fill-opacity="{}" fill-rule="evenodd" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
        shape.color,
        fmt_num(shape.opacity),
        shape.color,
        fmt_num(shape.stroke_opacity),
        fmt_num(shape.stroke_weight)
    )
}

fn format_polyline_styles(shape: &ShapeDescriptor) -> String {
    match shape.icons.first() {
        None => format!(
            r#" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
            shape.color,
            fmt_num(shape.stroke_opacity),
            fmt_num(shape.stroke_weight)
        ),
        Some(seq) => {
            let (width, dasharray, linecap) = icon_dash(seq);
            format!(
                r#" fill="none" stroke="{}" stroke-opacity="1" stroke-width="{}" stroke-dasharray="{}" stroke-linecap="{}""#,
                shape.color,
                fmt_num(width),
                dasharray,
                linecap
            )
        }
    }
}

/// Approximate a repeating symbol with a dash pattern
///
/// Circles become round-capped zero-length dashes with the symbol's
/// diameter; the dash symbol spans two units of its scale.
fn icon_dash(seq: &IconSequence) -> (f64, String, &'static str) {
    let repeat = seq.repeat_px().unwrap_or(20.0);
    match &seq.icon.path {
        SymbolPath::Circle => (
            2.0 * seq.icon.scale,
            format!("0,{}", fmt_num(repeat)),
            "round",
        ),
        SymbolPath::Path(_) => {
            let dash = 2.0 * seq.icon.scale;
            (
                seq.icon.stroke_weight,
                format!("{},{}", fmt_num(dash), fmt_num((repeat - dash).max(0.0))),
                "butt",
            )
        }
    }
}

/// Convert a path to SVG path data, skipping points that are not numbers
fn ring_to_d(path: &CoordinateList, projection: &CanvasProjection, close: bool) -> String {
    let points: Vec<(f64, f64)> = path
        .iter()
        .filter_map(|p| projection.to_canvas(*p))
        .collect();
    if points.is_empty() {
        return String::new();
    }
    let mut d = points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| {
            let cmd = if i == 0 { "M" } else { "L" };
            format!("{}{},{}", cmd, fmt_num(*x), fmt_num(*y))
        })
        .collect::<Vec<_>>()
        .join(" ");
    if close {
        d.push_str(" Z");
    }
    d
}

/// Round to two decimals for compact output
fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid "-0"
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape a value for a double-quoted CSS string inside a `<style>` element
fn escape_css_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LatLngBounds, ViewportDecision};
    use crate::style::{resolve_line_style, HexColor, LineStyle};

    fn frame(shapes: Vec<ShapeDescriptor>, viewport: Viewport) -> MapFrame {
        MapFrame {
            shapes,
            bounds: LatLngBounds::new(),
            decision: ViewportDecision::DefaultCenter {
                center: viewport.center,
                zoom: viewport.zoom,
            },
            viewport,
            skipped: vec![],
        }
    }

    fn shape(kind: GeometryType, points: &[(f64, f64)], line: LineStyle) -> ShapeDescriptor {
        let path = CoordinateList::new(points.iter().map(|(a, b)| LatLng::new(*a, *b)).collect());
        let stroke = resolve_line_style(line, 2.0, 1.0);
        ShapeDescriptor {
            id: "s1".to_string(),
            geometry_type: kind,
            bounds: path.bounds(),
            path,
            holes: vec![],
            color: HexColor::rgb(0x33, 0x66, 0x99),
            hover_color: None,
            opacity: 0.5,
            stroke_weight: stroke.weight,
            stroke_opacity: stroke.opacity,
            line_style: line,
            icons: stroke.icons,
            info_window: None,
        }
    }

    fn origin_viewport() -> Viewport {
        Viewport {
            center: LatLng::new(0.0, 0.0),
            zoom: 0,
        }
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(1.234), "1.23");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }

    #[test]
    fn test_escape_css_string() {
        assert_eq!(escape_css_string(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_css_string(r"a\b<"), r"a\\b&lt;");
    }

    #[test]
    fn test_center_maps_to_canvas_middle() {
        let projection = CanvasProjection::new(&origin_viewport(), 200.0, 100.0);
        assert_eq!(projection.to_canvas(LatLng::new(0.0, 0.0)), Some((100.0, 50.0)));
        assert_eq!(projection.to_canvas(LatLng::new(f64::NAN, 0.0)), None);
    }

    #[test]
    fn test_render_polygon() {
        let s = shape(
            GeometryType::Polygon,
            &[(0.0, 0.0), (0.0, 90.0), (45.0, 90.0)],
            LineStyle::Solid,
        );
        let config = SvgConfig::default().with_size(256.0, 256.0);
        let svg = render_svg(&frame(vec![s], origin_viewport()), &config);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"id="s1""#));
        assert!(svg.contains("mo-polygon"));
        assert!(svg.contains(r##"fill="#336699""##));
        assert!(svg.contains("fill-rule=\"evenodd\""));
        assert!(svg.contains("d=\"M128,128 L192,128"));
        assert!(svg.contains(" Z\""));
    }

    #[test]
    fn test_render_dashed_polyline() {
        let s = shape(
            GeometryType::Polyline,
            &[(0.0, 0.0), (0.0, 90.0)],
            LineStyle::Dashed,
        );
        let svg = render_svg(&frame(vec![s], origin_viewport()), &SvgConfig::default());
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r#"stroke-dasharray="8,12""#));
        assert!(!svg.contains(" Z\""));
    }

    #[test]
    fn test_render_dotted_polyline() {
        let s = shape(
            GeometryType::Polyline,
            &[(0.0, 0.0), (0.0, 90.0)],
            LineStyle::Dotted,
        );
        let svg = render_svg(&frame(vec![s], origin_viewport()), &SvgConfig::default());
        assert!(svg.contains(r#"stroke-dasharray="0,20""#));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"stroke-width="6""#));
    }

    #[test]
    fn test_render_hover_and_title() {
        let mut s = shape(
            GeometryType::Polygon,
            &[(0.0, 0.0), (0.0, 90.0), (45.0, 90.0)],
            LineStyle::Solid,
        );
        s.hover_color = Some(HexColor::WHITE);
        s.info_window = Some("Plot <7>".to_string());
        let svg = render_svg(&frame(vec![s], origin_viewport()), &SvgConfig::default());
        assert!(svg.contains(r#"[id="s1"]:hover { fill: #ffffff; }"#));
        assert!(svg.contains("<title>Name: Plot &lt;7&gt;</title>"));
    }

    #[test]
    fn test_hover_selector_escapes_quotes() {
        let mut s = shape(
            GeometryType::Polygon,
            &[(0.0, 0.0), (0.0, 90.0), (45.0, 90.0)],
            LineStyle::Solid,
        );
        s.id = r#"a"b"#.to_string();
        s.hover_color = Some(HexColor::rgb(0xff, 0x80, 0x80));
        let svg = render_svg(&frame(vec![s], origin_viewport()), &SvgConfig::default());
        assert!(svg.contains(r#"[id="a\"b"]:hover { fill: #ff8080; }"#));
        assert!(svg.contains(r#"id="a&quot;b""#));
    }

    #[test]
    fn test_render_compact() {
        let config = SvgConfig::default()
            .with_pretty_print(false)
            .with_standalone(false);
        let svg = render_svg(&frame(vec![], origin_viewport()), &config);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains('\n'));
        assert!(svg.ends_with("</svg>"));
    }
}
