//! Per-category amenity counts

use std::io::Write;

use itertools::Itertools;
use serde::Serialize;

use crate::{Error, model::Amenity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Amenity counts by category, most frequent first (ties by name)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AmenityTally {
    counts: Vec<CategoryCount>,
}

impl AmenityTally {
    pub fn from_amenities(amenities: &[Amenity]) -> Self {
        let counts = amenities
            .iter()
            .map(|amenity| amenity.category.as_str())
            .counts()
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .sorted_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.category.cmp(&b.category))
            })
            .collect();

        Self { counts }
    }

    pub fn counts(&self) -> &[CategoryCount] {
        &self.counts
    }

    pub fn get(&self, category: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Number of distinct categories
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Writes the tally as a one-row table: categories as the header,
    /// counts as the single data row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.counts.iter().map(|c| c.category.as_str()))?;
        csv.write_record(self.counts.iter().map(|c| c.count.to_string()))?;
        csv.flush()?;
        Ok(())
    }
}
