//! Result rendering - console text or JSON
//!
//! Text output is one line per facility:
//! `Central Fill 003 - $12.30, Medication B, Distance 4`

use crate::domain::types::{Facility, FacilityId, GridPoint, QueryPoint, RankedResult};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: QueryPoint,
    results: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    result: &'a RankedResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<GridPoint>,
}

/// Renders ranked results for one query
pub struct Report<'a> {
    query: QueryPoint,
    results: &'a [RankedResult],
    locations: FxHashMap<&'a FacilityId, GridPoint>,
    show_coords: bool,
}

impl<'a> Report<'a> {
    pub fn new(query: QueryPoint, results: &'a [RankedResult]) -> Self {
        Self { query, results, locations: FxHashMap::default(), show_coords: false }
    }

    /// Also print each facility's coordinates so the distance can be checked
    pub fn with_coordinates(mut self, facilities: &'a [Facility]) -> Self {
        self.locations = facilities.iter().map(|f| (f.id(), f.location())).collect();
        self.show_coords = true;
        self
    }

    fn location_of(&self, id: &FacilityId) -> Option<GridPoint> {
        if !self.show_coords {
            return None;
        }
        self.locations.get(id).copied()
    }

    pub fn write<W: Write>(&self, format: OutputFormat, out: W) -> io::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => self.write_json(out),
        }
    }

    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        if self.results.is_empty() {
            writeln!(out, "No Central Fills found.")?;
            return Ok(());
        }

        writeln!(out, "Closest Central Fills to {}:", self.query)?;
        for result in self.results {
            writeln!(
                out,
                "Central Fill {} - ${}, Medication {}, Distance {}",
                result.facility_id,
                result.cheapest_item_price,
                result.cheapest_item_name,
                result.distance
            )?;
            if let Some(location) = self.location_of(&result.facility_id) {
                writeln!(out, "  With coordinates of X: {}, Y: {}", location.x, location.y)?;
            }
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, mut out: W) -> io::Result<()> {
        let report = JsonReport {
            query: self.query,
            results: self
                .results
                .iter()
                .map(|result| JsonRow { result, location: self.location_of(&result.facility_id) })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)
    }
}
