use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Amenities within walking distance of downtown Detroit parking structures
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML settings file shared with the web server
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub op: Operation,
}

#[derive(Subcommand, Debug)]
pub enum Operation {
    /// list the configured parking structures and their addresses
    Garages,

    /// map the amenities within a walk of one parking structure
    Render {
        /// parking structure name, as listed by `garages`
        #[arg(short, long)]
        garage: String,

        /// walking time budget
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=15))]
        minutes: u32,

        /// SVG file to write the map to
        #[arg(short, long)]
        out: PathBuf,

        /// also write the filtered amenities as a GeoJSON FeatureCollection
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// also write the category counts as a one-row CSV table
        #[arg(long)]
        tally_csv: Option<PathBuf>,
    },

    /// map every configured parking structure, one SVG per structure
    RenderAll {
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=15))]
        minutes: u32,

        /// directory receiving `<garage>.svg` files; created if missing
        #[arg(short, long)]
        out_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_defaults_to_five_minutes() {
        let cli = Cli::try_parse_from([
            "walkshed",
            "render",
            "--garage",
            "1188 Farmer St",
            "--out",
            "farmer.svg",
        ])
        .unwrap();

        match cli.op {
            Operation::Render {
                garage,
                minutes,
                geojson,
                ..
            } => {
                assert_eq!(garage, "1188 Farmer St");
                assert_eq!(minutes, 5);
                assert!(geojson.is_none());
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn minutes_outside_range_are_rejected() {
        for minutes in ["0", "16", "abc"] {
            let parsed = Cli::try_parse_from([
                "walkshed",
                "render-all",
                "--minutes",
                minutes,
                "--out-dir",
                "maps",
            ]);
            assert!(parsed.is_err(), "accepted {minutes}");
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["walkshed", "garages", "--config", "walkshed.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("walkshed.toml")));
    }
}
