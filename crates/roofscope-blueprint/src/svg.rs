//! SVG serialization of a composed blueprint.

use std::fmt::Write;

use crate::types::Blueprint;

/// Font size for shape labels, in px.
const LABEL_FONT_PX: f64 = 13.0;

/// Line spacing for multi-line text blocks, in px.
const LINE_HEIGHT_PX: f64 = 16.0;

impl Blueprint {
    /// Serialize the blueprint as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing to a String cannot fail; unwraps are infallible.
        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        )
        .unwrap();
        writeln!(svg, r#"  <title>Roof measurement blueprint</title>"#).unwrap();
        writeln!(
            svg,
            r##"  <rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
            self.width, self.height
        )
        .unwrap();

        for shape in &self.shapes {
            let mut points = String::new();
            for p in &shape.points {
                if !points.is_empty() {
                    points.push(' ');
                }
                write!(points, "{:.2},{:.2}", p.x, p.y).unwrap();
            }
            writeln!(
                svg,
                r#"  <polygon id="section-{}" points="{}" fill="{}" fill-opacity="0.45" stroke="{}" stroke-width="2"/>"#,
                shape.section, points, shape.color, shape.color
            )
            .unwrap();

            for (i, line) in shape.label.lines.iter().enumerate() {
                writeln!(
                    svg,
                    r##"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" text-anchor="middle" fill="#1a1a1a">{}</text>"##,
                    shape.label.anchor.x,
                    shape.label.anchor.y + i as f64 * LINE_HEIGHT_PX,
                    LABEL_FONT_PX,
                    xml_escape(line)
                )
                .unwrap();
            }
        }

        self.write_legend(&mut svg);
        writeln!(svg, "</svg>").unwrap();
        svg
    }

    fn write_legend(&self, svg: &mut String) {
        let x = 24.0;
        let height = 88.0;
        let y = self.height as f64 - height - 8.0;
        writeln!(
            svg,
            r##"  <rect x="{x:.1}" y="{y:.1}" width="300" height="{height:.1}" fill="#f5f5f5" stroke="#888888"/>"##
        )
        .unwrap();
        let lines = [
            format!("Sections: {}", self.legend.section_count),
            format!("Total area: {:.2} sq ft", self.legend.total_adjusted_sqft),
            format!("Squares: {:.2}", self.legend.squares),
            format!(
                "Live map: {}   Captured: {}",
                self.legend.live_sections, self.legend.captured_sections
            ),
        ];
        for (i, line) in lines.iter().enumerate() {
            writeln!(
                svg,
                r##"  <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{}" fill="#1a1a1a">{}</text>"##,
                x + 10.0,
                y + 20.0 + i as f64 * LINE_HEIGHT_PX,
                LABEL_FONT_PX,
                xml_escape(line)
            )
            .unwrap();
        }
    }
}

/// Minimal XML text escaping for user-supplied names.
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
