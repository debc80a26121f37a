use std::io::Write;

use geo::Coord;

use super::proj::CanvasProjection;
use crate::Error;

/// Write the XML declaration, opening <svg> tag and background.
pub(crate) fn write_header(writer: &mut impl Write, width: f64, height: f64) -> Result<(), Error> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write styles and the clip path of the plot area.
pub(crate) fn write_styles(
    writer: &mut impl Write,
    plot_origin: Coord<f64>,
    plot_size: f64,
) -> Result<(), Error> {
    writeln!(
        writer,
        r##"<defs>
<style>
    .edge {{ stroke: #6b7280; stroke-opacity: 0.8; stroke-width: 1.2; stroke-linecap: round; }}
    .amenity {{ stroke: #111827; stroke-width: 0.4; fill-opacity: 0.9; }}
    .origin {{ fill: #111827; stroke: #ffffff; stroke-width: 1.5; }}
    .frame {{ fill: none; stroke: #d1d5db; stroke-width: 1; }}
    .title {{ font-family: sans-serif; font-size: 22px; fill: #111827; text-anchor: middle; }}
    .legend {{ font-family: sans-serif; font-size: 14px; fill: #111827; dominant-baseline: middle; }}
</style>
<clipPath id="plot"><rect x="{x:.3}" y="{y:.3}" width="{plot_size:.3}" height="{plot_size:.3}"/></clipPath>
</defs>"##,
        x = plot_origin.x,
        y = plot_origin.y,
    )?;
    Ok(())
}

pub(crate) fn write_footer(writer: &mut impl Write) -> Result<(), Error> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

pub(crate) fn draw_title(
    writer: &mut impl Write,
    lines: &[String],
    center_x: f64,
    top: f64,
    line_height: f64,
) -> Result<(), Error> {
    for (i, line) in lines.iter().enumerate() {
        let y = top + line_height * (i as f64 + 1.0);
        writeln!(
            writer,
            r#"<text class="title" x="{center_x:.3}" y="{y:.3}">{}</text>"#,
            escape_xml(line)
        )?;
    }
    Ok(())
}

pub(crate) fn draw_frame(writer: &mut impl Write, origin: Coord<f64>, size: f64) -> Result<(), Error> {
    writeln!(
        writer,
        r#"<rect class="frame" x="{:.3}" y="{:.3}" width="{size:.3}" height="{size:.3}"/>"#,
        origin.x, origin.y
    )?;
    Ok(())
}

pub(crate) fn draw_edges(
    writer: &mut impl Write,
    edges: &[(Coord<f64>, Coord<f64>)],
    projection: &CanvasProjection,
) -> Result<(), Error> {
    for (from, to) in edges {
        let (x1, y1) = projection.project(from);
        let (x2, y2) = projection.project(to);
        writeln!(
            writer,
            r#"<line class="edge" x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}"/>"#
        )?;
    }
    Ok(())
}

pub(crate) fn draw_marker(
    writer: &mut impl Write,
    x: f64,
    y: f64,
    radius: f64,
    fill: &str,
    title: &str,
) -> Result<(), Error> {
    writeln!(
        writer,
        r#"<circle class="amenity" cx="{x:.3}" cy="{y:.3}" r="{radius:.2}" style="fill:{fill}"><title>{}</title></circle>"#,
        escape_xml(title)
    )?;
    Ok(())
}

pub(crate) fn draw_origin(writer: &mut impl Write, x: f64, y: f64, radius: f64) -> Result<(), Error> {
    writeln!(
        writer,
        r#"<circle class="origin" cx="{x:.3}" cy="{y:.3}" r="{radius:.2}"/>"#
    )?;
    Ok(())
}

pub(crate) fn draw_legend_entry(
    writer: &mut impl Write,
    x: f64,
    y: f64,
    radius: f64,
    fill: &str,
    label: &str,
) -> Result<(), Error> {
    writeln!(
        writer,
        r#"<g class="legend-entry"><circle class="amenity" cx="{cx:.3}" cy="{y:.3}" r="{radius:.2}" style="fill:{fill}"/><text class="legend" x="{tx:.3}" y="{y:.3}">{}</text></g>"#,
        escape_xml(label),
        cx = x + radius,
        tx = x + radius * 2.0 + 6.0,
    )?;
    Ok(())
}

/// Escape text for use in element content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
