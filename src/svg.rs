//! SVG serialization backend
//!
//! A reference [`RenderSurface`] that serializes scenes to standalone SVG
//! markup with the scale-to-fit contract the charts declare: `width="100%"
//! height="100%"`, an explicit `viewBox`, and `preserveAspectRatio="xMidYMid
//! meet"`. Presentation is monochrome; hosts with their own theming draw
//! scenes directly instead.

use std::fmt::Write;

use crate::scene::{RenderError, RenderSurface, Scene, Shape, TextAnchor, TextBaseline};

/// Serializes scenes to SVG markup
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the most recently rendered scene
    pub fn svg(&self) -> &str {
        &self.output
    }

    /// Take ownership of the markup, leaving the renderer empty
    pub fn take_svg(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    fn write_shape(out: &mut String, shape: &Shape) -> Result<(), RenderError> {
        match shape {
            Shape::Circle { cx, cy, r, filled } => {
                if *filled {
                    write!(
                        out,
                        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"grey\" stroke=\"#fff\" stroke-width=\"1.5\"/>"
                    )?;
                } else {
                    write!(
                        out,
                        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"none\" stroke=\"#ccc\" stroke-width=\"0.5\"/>"
                    )?;
                }
            }
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                opacity,
            } => {
                write!(
                    out,
                    "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"#999\" stroke-width=\"{width:.2}\" stroke-opacity=\"{opacity}\"/>"
                )?;
            }
            Shape::Polygon { points, filled } => {
                let fill = if *filled { "rgba(0,0,0,0.1)" } else { "none" };
                write!(out, "<path d=\"")?;
                for (i, (x, y)) in points.iter().enumerate() {
                    let op = if i == 0 { 'M' } else { 'L' };
                    write!(out, "{op} {x:.2} {y:.2} ")?;
                }
                write!(
                    out,
                    "Z\" fill=\"{fill}\" stroke=\"black\" stroke-width=\"1.5\"/>"
                )?;
            }
            Shape::Text {
                x,
                y,
                content,
                size,
                anchor,
                baseline,
            } => {
                let anchor = match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let baseline = match baseline {
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                };
                write!(
                    out,
                    "<text x=\"{x:.2}\" y=\"{y:.2}\" font-size=\"{size:.2}px\" text-anchor=\"{anchor}\" alignment-baseline=\"{baseline}\" fill=\"#333\">{}</text>",
                    escape_xml(content)
                )?;
            }
        }
        Ok(())
    }
}

impl RenderSurface for SvgRenderer {
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let mut out = String::new();
        let vb = scene.view_box;

        write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"100%\" viewBox=\"{} {} {} {}\" preserveAspectRatio=\"xMidYMid meet\">",
            vb.min_x, vb.min_y, vb.width, vb.height
        )?;

        for shape in &scene.shapes {
            Self::write_shape(&mut out, shape)?;
        }

        out.push_str("</svg>");
        self.output = out;
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
