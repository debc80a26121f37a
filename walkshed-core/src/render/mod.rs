//! SVG figure of an isochrone: reachable streets, amenities colored by
//! category, a legend below the plot and a two-line title.

mod color;
mod proj;
mod svg;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geo::{Coord, coord};
use hashbrown::{HashMap, HashSet};
use log::info;

pub use color::{Hsl, category_color};
pub use svg::escape_xml;
use proj::CanvasProjection;

use crate::{Error, Isochrone};

/// Figure layout, in SVG user units
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Total figure width; the plot area is square
    pub width: f64,
    pub margin: f64,
    pub title_height: f64,
    pub legend_columns: usize,
    pub legend_row_height: f64,
    pub marker_radius: f64,
    /// Draw a marker on the street node the walk starts from
    pub mark_origin: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            margin: 40.0,
            title_height: 80.0,
            legend_columns: 4,
            legend_row_height: 26.0,
            marker_radius: 5.0,
            mark_origin: false,
        }
    }
}

impl RenderOptions {
    fn plot_size(&self) -> f64 {
        (self.width - 2.0 * self.margin).max(1.0)
    }

    fn legend_rows(&self, categories: usize) -> usize {
        categories.div_ceil(self.legend_columns.max(1))
    }
}

/// The two title lines of an isochrone figure
pub fn figure_title(isochrone: &Isochrone) -> [String; 2] {
    [
        format!("Amenities within a {} minute walk of", isochrone.budget),
        isochrone.label.clone(),
    ]
}

/// Renders `isochrone` to an SVG document
///
/// # Errors
///
/// Returns an error if writing the document fails
pub fn render_isochrone_svg(isochrone: &Isochrone, options: &RenderOptions) -> Result<String, Error> {
    let mut out = Vec::new();
    write_isochrone_svg(isochrone, options, &mut out)?;
    String::from_utf8(out).map_err(|e| Error::Serialization(e.to_string()))
}

/// Renders `isochrone` to an SVG file at `path`
pub fn save_isochrone_svg(
    isochrone: &Isochrone,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_isochrone_svg(isochrone, options, &mut writer)?;
    writer.flush()?;
    info!("Wrote {} minute map of {} to {}", isochrone.budget, isochrone.label, path.display());
    Ok(())
}

/// Streams the SVG document of `isochrone` into `writer`
pub fn write_isochrone_svg(
    isochrone: &Isochrone,
    options: &RenderOptions,
    writer: &mut impl Write,
) -> Result<(), Error> {
    let tally = isochrone.tally();
    let colors: HashMap<&str, String> = tally
        .counts()
        .iter()
        .enumerate()
        .map(|(i, c)| (c.category.as_str(), category_color(i).to_string()))
        .collect();

    let plot_size = options.plot_size();
    let plot_origin = coord! { x: options.margin, y: options.title_height };
    let legend_top = plot_origin.y + plot_size + options.margin / 2.0;
    let legend_height = options.legend_rows(tally.len()) as f64 * options.legend_row_height;
    let height = legend_top + legend_height + options.margin;

    let projection = CanvasProjection::fit(isochrone.bbox.to_rect(), plot_origin, plot_size);

    svg::write_header(writer, options.width, height)?;
    svg::write_styles(writer, plot_origin, plot_size)?;
    svg::draw_title(
        writer,
        &figure_title(isochrone),
        options.width / 2.0,
        options.margin / 4.0,
        options.title_height / 2.5,
    )?;
    svg::draw_frame(writer, plot_origin, plot_size)?;

    writeln!(writer, r#"<g clip-path="url(#plot)">"#)?;
    svg::draw_edges(writer, &street_segments(isochrone), &projection)?;

    for amenity in &isochrone.amenities {
        let Some(point) = amenity.representative_point() else {
            continue;
        };
        let (x, y) = projection.project(&point.0);
        let fill = colors
            .get(amenity.category.as_str())
            .map_or("#9ca3af", String::as_str);
        let title = match &amenity.name {
            Some(name) => format!("{name} ({})", amenity.category),
            None => amenity.category.clone(),
        };
        svg::draw_marker(writer, x, y, options.marker_radius, fill, &title)?;
    }

    if options.mark_origin {
        let origin = isochrone.subgraph.streets.graph()[isochrone.subgraph.origin].geometry;
        let (x, y) = projection.project(&origin.0);
        svg::draw_origin(writer, x, y, options.marker_radius * 1.6)?;
    }
    writeln!(writer, "</g>")?;

    let columns = options.legend_columns.max(1);
    let column_width = plot_size / columns as f64;
    for (i, count) in tally.counts().iter().enumerate() {
        let x = plot_origin.x + (i % columns) as f64 * column_width;
        let y = legend_top + ((i / columns) as f64 + 0.5) * options.legend_row_height;
        svg::draw_legend_entry(
            writer,
            x,
            y,
            options.marker_radius,
            &colors[count.category.as_str()],
            &format!("{} ({})", count.category, count.count),
        )?;
    }

    svg::write_footer(writer)?;
    Ok(())
}

/// Reachable street segments with both directions of a two-way street
/// collapsed into one
fn street_segments(isochrone: &Isochrone) -> Vec<(Coord<f64>, Coord<f64>)> {
    let graph = isochrone.subgraph.streets.graph();
    let mut seen = HashSet::with_capacity(graph.edge_count());

    graph
        .raw_edges()
        .iter()
        .filter_map(|edge| {
            let (a, b) = (edge.source(), edge.target());
            let pair = if a <= b { (a, b) } else { (b, a) };
            seen.insert(pair)
                .then(|| (graph[a].geometry.0, graph[b].geometry.0))
        })
        .collect()
}
