//! HTML of the amenity finder page

use std::fmt::Write;

use walkshed_core::config::Garage;
use walkshed_core::render::escape_xml;
use walkshed_core::summary::AmenityTally;

use crate::routes::{MAX_MINUTES, MIN_MINUTES};

const TITLE: &str = "Detroit Amenity Finder";

const STYLE: &str = "
body { font-family: sans-serif; margin: 2rem auto; max-width: 1240px; color: #111827; }
.controls { display: flex; gap: 2rem; margin-bottom: 1.5rem; }
.controls label { display: flex; flex-direction: column; gap: 0.4rem; flex: 1; font-weight: 600; }
.controls select, .controls input { font-size: 1rem; padding: 0.3rem; }
.map svg { max-width: 100%; height: auto; }
table { border-collapse: collapse; margin-top: 0.5rem; }
th, td { border: 1px solid #d1d5db; padding: 0.3rem 0.6rem; text-align: center; }
";

/// Everything shown below the input widgets
pub struct PageResult<'a> {
    pub svg: &'a str,
    pub tally: &'a AmenityTally,
}

pub fn amenity_page(
    garages: &[Garage],
    selected: &Garage,
    minutes: u32,
    result: &PageResult<'_>,
) -> String {
    let mut html = String::new();
    open_document(&mut html);

    html.push_str(r#"<form class="controls" method="get" action="/">"#);
    html.push_str(r#"<label>Choose a Bedrock Detroit Parking Structure<select name="garage" onchange="this.form.submit()">"#);
    for garage in garages {
        let name = escape_xml(&garage.name);
        let selected_attr = if garage.name == selected.name { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{name}"{selected_attr}>{name}</option>"#);
    }
    html.push_str("</select></label>");
    let _ = write!(
        html,
        r#"<label>How Far Are You Willing to Walk?<input type="number" name="minutes" min="{MIN_MINUTES}" max="{MAX_MINUTES}" step="1" value="{minutes}" onchange="this.form.submit()"></label>"#
    );
    html.push_str("<noscript><button type=\"submit\">Update</button></noscript></form>");

    // inline the figure without its XML declaration
    let svg = result.svg.find("<svg").map_or(result.svg, |i| &result.svg[i..]);
    let _ = write!(html, r#"<div class="map">{svg}</div>"#);

    let _ = write!(
        html,
        "<p>The following amenities can be within {minutes} minutes of {}.</p>",
        escape_xml(&selected.name)
    );
    tally_table(&mut html, result.tally);

    close_document(&mut html);
    html
}

/// One-row table: categories as the header, counts below
fn tally_table(html: &mut String, tally: &AmenityTally) {
    if tally.is_empty() {
        html.push_str("<p>No amenities found.</p>");
        return;
    }
    html.push_str("<table><thead><tr>");
    for count in tally.counts() {
        let _ = write!(html, "<th>{}</th>", escape_xml(&count.category));
    }
    html.push_str("</tr></thead><tbody><tr>");
    for count in tally.counts() {
        let _ = write!(html, "<td>{}</td>", count.count);
    }
    html.push_str("</tr></tbody></table>");
}

pub fn failure_page(message: &str) -> String {
    let mut html = String::new();
    open_document(&mut html);
    let _ = write!(
        html,
        r#"<p class="error">{}</p><p><a href="/">Back</a></p>"#,
        escape_xml(message)
    );
    close_document(&mut html);
    html
}

fn open_document(html: &mut String) {
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{TITLE}</title><style>{STYLE}</style></head><body><h1>{TITLE}</h1>"
    );
}

fn close_document(html: &mut String) {
    html.push_str("</body></html>\n");
}

#[cfg(test)]
mod tests {
    use walkshed_core::config::default_garages;

    use super::*;

    #[test]
    fn page_has_controls_sentence_and_table() {
        let garages = default_garages();
        let tally = AmenityTally::default();
        let html = amenity_page(
            &garages,
            &garages[2],
            7,
            &PageResult {
                svg: "<?xml version=\"1.0\"?>\n<svg></svg>",
                tally: &tally,
            },
        );

        assert!(html.contains("<h1>Detroit Amenity Finder</h1>"));
        assert!(html.contains("Choose a Bedrock Detroit Parking Structure"));
        assert!(html.contains("How Far Are You Willing to Walk?"));
        assert!(html.contains(r#"<option value="Bricktown Parking Garage" selected>"#));
        assert!(html.contains(r#"min="1" max="15" step="1" value="7""#));
        assert!(html.contains(r#"<div class="map"><svg></svg></div>"#));
        assert!(!html.contains("<?xml"));
        assert!(html.contains(
            "The following amenities can be within 7 minutes of Bricktown Parking Garage."
        ));
        assert!(html.contains("No amenities found."));
    }

    #[test]
    fn failure_page_escapes_message() {
        let html = failure_page("bad <input>");
        assert!(html.contains("bad &lt;input&gt;"));
    }
}
