//! SVG scene generation.
//!
//! A scene is one diagram: white background, title, directed edges, node markers,
//! node labels and the legend. World coordinates from [`Layout`] are mapped into the
//! plot area between the title band and the legend band; world `y` grows upward.

use crate::config::RenderConfig;
use crate::graph::{Node, TopologyGraph};

use super::layout::{Bounds, Layout, Point};
use super::legend::LegendEntry;

const LEGEND_COLUMNS: usize = 4;
const EDGE_COLOR: &str = "#333333";
const EDGE_WIDTH_PT: f64 = 1.2;
const LABEL_OPACITY: f64 = 0.85;
/// Average glyph advance as a fraction of the font size, used for box sizing.
const GLYPH_WIDTH: f64 = 0.6;
const LINE_HEIGHT: f64 = 1.2;

/// Pixel rectangle of the plot area.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

/// Writes one diagram as an SVG document.
pub struct SceneWriter<'a> {
    config: &'a RenderConfig,
}

impl<'a> SceneWriter<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Canvas size in pixels for `layout`.
    ///
    /// The configured width grows when the busiest tier would otherwise place
    /// markers closer than one diameter plus padding.
    pub fn canvas_size(&self, layout: &Layout) -> (f64, f64) {
        let r = self.config.node_radius_px();
        let slot = 2.0 * r + self.slot_padding();
        let needed = layout.widest_tier() as f64 * slot + 2.0 * self.margin_x();
        (self.config.width_px().max(needed.ceil()), self.config.height_px())
    }

    /// Render the full SVG document.
    pub fn write(
        &self,
        title: &str,
        graph: &TopologyGraph,
        layout: &Layout,
        legend: &[LegendEntry],
    ) -> String {
        let (width, height) = self.canvas_size(layout);
        let plot = self.plot_area(width, height, legend.len());
        let font = escape_xml(&self.config.font_family);

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="{font}">"#
        ));
        svg.push('\n');
        svg.push_str(&self.defs());
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{width:.0}" height="{height:.0}" fill="white"/>"#
        ));
        svg.push('\n');

        self.push_title(&mut svg, title, width);

        if let Some(bounds) = layout.bounds() {
            let to_screen = |p: Point| project(p, bounds, plot);
            self.push_edges(&mut svg, graph, layout, &to_screen);
            self.push_nodes(&mut svg, graph, layout, &to_screen);
            self.push_labels(&mut svg, graph, layout, &to_screen);
        }

        self.push_legend(&mut svg, legend, width, height);
        svg.push_str("</svg>\n");
        svg
    }

    fn slot_padding(&self) -> f64 {
        2.0 * self.config.font_px()
    }

    fn margin_x(&self) -> f64 {
        2.0 * self.config.node_radius_px()
    }

    fn title_band(&self) -> f64 {
        3.0 * self.config.title_font_px()
    }

    fn legend_row_height(&self) -> f64 {
        1.8 * self.config.legend_font_px()
    }

    fn legend_band(&self, entries: usize) -> f64 {
        let rows = entries.div_ceil(LEGEND_COLUMNS);
        rows as f64 * self.legend_row_height() + 1.5 * self.config.legend_font_px()
    }

    fn plot_area(&self, width: f64, height: f64, legend_entries: usize) -> PlotArea {
        let inset = self.config.node_radius_px() + 2.0 * self.config.font_px();
        let top = self.title_band() + inset;
        let bottom = height - self.legend_band(legend_entries) - inset;
        let left = self.margin_x();
        PlotArea {
            left,
            top,
            width: (width - 2.0 * left).max(0.0),
            height: (bottom - top).max(0.0),
        }
    }

    fn arrow_size(&self) -> f64 {
        4.0 * EDGE_WIDTH_PT * self.config.px_per_pt()
    }

    fn defs(&self) -> String {
        let size = self.arrow_size();
        format!(
            concat!(
                "<defs>\n",
                r#"<marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="{size:.1}" markerHeight="{size:.1}" markerUnits="userSpaceOnUse" orient="auto">"#,
                r#"<path d="M0,0 L10,5 L0,10 z" fill="{color}"/>"#,
                "</marker>\n</defs>\n"
            ),
            size = size,
            color = EDGE_COLOR
        )
    }

    fn push_title(&self, svg: &mut String, title: &str, width: f64) {
        let size = self.config.title_font_px();
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="{size:.1}" text-anchor="middle" fill="black">{text}</text>"#,
            x = width / 2.0,
            y = self.title_band() * 0.6,
            text = escape_xml(title)
        ));
        svg.push('\n');
    }

    fn push_edges(
        &self,
        svg: &mut String,
        graph: &TopologyGraph,
        layout: &Layout,
        project: &impl Fn(Point) -> Point,
    ) {
        let r = self.config.node_radius_px();
        let stroke = EDGE_WIDTH_PT * self.config.px_per_pt();

        for (from, to) in graph.edges() {
            let (Some(a), Some(b)) = (layout.position(from), layout.position(to)) else {
                continue;
            };
            let (a, b) = (project(a), project(b));
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let len = dx.hypot(dy);
            // Markers overlap; nothing visible to draw
            if len <= 2.0 * r {
                continue;
            }
            let (ux, uy) = (dx / len, dy / len);
            svg.push_str(&format!(
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{EDGE_COLOR}" stroke-width="{stroke:.2}" marker-end="url(#arrow)"/>"#,
                a.x + ux * r,
                a.y + uy * r,
                b.x - ux * r,
                b.y - uy * r,
            ));
            svg.push('\n');
        }
    }

    fn push_nodes(
        &self,
        svg: &mut String,
        graph: &TopologyGraph,
        layout: &Layout,
        project: &impl Fn(Point) -> Point,
    ) {
        let r = self.config.node_radius_px();
        for node in graph.nodes() {
            let Some(p) = layout.position(&node.id) else {
                continue;
            };
            let p = project(p);
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{r:.1}" fill="{}"/>"#,
                p.x,
                p.y,
                node.kind().color()
            ));
            svg.push('\n');
        }
    }

    fn push_labels(
        &self,
        svg: &mut String,
        graph: &TopologyGraph,
        layout: &Layout,
        project: &impl Fn(Point) -> Point,
    ) {
        let size = self.config.font_px();
        for node in graph.nodes() {
            let Some(p) = layout.position(&node.id) else {
                continue;
            };
            let p = project(p);
            let lines = label_lines(node);

            let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            let box_w = longest as f64 * GLYPH_WIDTH * size + size * 0.6;
            let box_h = lines.len() as f64 * LINE_HEIGHT * size + size * 0.4;
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{box_w:.1}" height="{box_h:.1}" fill="white" fill-opacity="{LABEL_OPACITY}"/>"#,
                p.x - box_w / 2.0,
                p.y - box_h / 2.0,
            ));
            svg.push('\n');

            let first_center = p.y - (lines.len() as f64 - 1.0) * LINE_HEIGHT * size / 2.0;
            for (i, line) in lines.iter().enumerate() {
                let baseline = first_center + i as f64 * LINE_HEIGHT * size + 0.35 * size;
                svg.push_str(&format!(
                    r#"<text x="{:.1}" y="{baseline:.1}" font-size="{size:.1}" text-anchor="middle" fill="black">{}</text>"#,
                    p.x,
                    escape_xml(line)
                ));
                svg.push('\n');
            }
        }
    }

    fn push_legend(&self, svg: &mut String, legend: &[LegendEntry], width: f64, height: f64) {
        if legend.is_empty() {
            return;
        }
        let size = self.config.legend_font_px();
        let patch_w = 1.6 * size;
        let patch_h = 0.8 * size;
        let gap = 0.6 * size;
        let longest = legend.iter().map(|e| e.caption.chars().count()).max().unwrap_or(0);
        let column_w = patch_w + gap + longest as f64 * GLYPH_WIDTH * size + 2.0 * size;
        let row_h = self.legend_row_height();
        let top = height - self.legend_band(legend.len()) + 0.5 * size;

        for (row, chunk) in legend.chunks(LEGEND_COLUMNS).enumerate() {
            let start_x = (width - chunk.len() as f64 * column_w) / 2.0;
            let center_y = top + row as f64 * row_h + row_h / 2.0;
            for (col, entry) in chunk.iter().enumerate() {
                let x = start_x + col as f64 * column_w;
                svg.push_str(&format!(
                    r#"<rect x="{x:.1}" y="{:.1}" width="{patch_w:.1}" height="{patch_h:.1}" fill="{}"/>"#,
                    center_y - patch_h / 2.0,
                    entry.color
                ));
                svg.push_str(&format!(
                    r#"<text x="{:.1}" y="{:.1}" font-size="{size:.1}" fill="black">{}</text>"#,
                    x + patch_w + gap,
                    center_y + 0.35 * size,
                    escape_xml(&entry.caption)
                ));
                svg.push('\n');
            }
        }
    }
}

/// Label lines: kind label, optional detail, then the short identifier.
fn label_lines(node: &Node) -> Vec<String> {
    let mut lines: Vec<String> = node.display_label().lines().map(str::to_string).collect();
    lines.push(node.id.short_name());
    lines
}

/// Map a world point into the plot area. A degenerate axis is centered.
fn project(p: Point, bounds: Bounds, plot: PlotArea) -> Point {
    let x = if bounds.width() > 0.0 {
        plot.left + (p.x - bounds.min_x) / bounds.width() * plot.width
    } else {
        plot.left + plot.width / 2.0
    };
    let y = if bounds.height() > 0.0 {
        plot.top + (bounds.max_y - p.y) / bounds.height() * plot.height
    } else {
        plot.top + plot.height / 2.0
    };
    Point { x, y }
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
