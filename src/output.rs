//! Data structures for representing the output.
//!
//! These are what the presentation layer consumes, serialized as JSON: one
//! marker per surviving Find with its popup content, plus the facet options
//! needed to populate the filter controls.

use crate::input::Year;
use serde::{Deserialize, Serialize};

/// One line of a popup: one Group, resolved to display form.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OGroupLine {
    pub denomination: String,
    pub mint: String,
    pub dates: String,
    pub count: i64,
}

/// Display-ready popup content for one Find.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OPopup {
    pub title: String,
    pub lines: Vec<OGroupLine>,
    pub total: i64,
    pub summary: String,
}

/// One map marker.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OMarker {
    pub id: String,
    pub lat: f64,
    pub long: f64,
    pub place: String,
    pub number: i64,
    pub popup: OPopup,
}

/// Available choices for the filter controls, derived from the cleaned
/// (pre-filter) data.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OFacets {
    pub denominations: Vec<String>,
    pub materials: Vec<String>,
    pub mints: Vec<String>,
    pub dates: (Year, Year),
    pub counts: (i64, i64),
}

/// Everything the map page needs for one render.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ViewModel {
    pub markers: Vec<OMarker>,
    pub facets: OFacets,
}

/// Format a date window in the BCE convention: the sign carries no meaning
/// for display, so `(-300, -250)` renders as `300-250 BCE`.
pub fn pretty_date_range(from_date: Year, to_date: Year) -> String {
    format!("{}-{} BCE", from_date.abs(), to_date.abs())
}
