//! Raw input rows, one struct per workbook sheet.
//!
//! The same shape is accepted as JSON, which is what the integration tests
//! and the `.json` input path of the CLI use.

use serde::{Deserialize, Serialize};

/// A year in the BCE convention: negative, and larger magnitude is earlier.
pub type Year = i32;

/// One row of the "Deposit Dates" sheet.
#[derive(Clone, Deserialize, Serialize)]
pub struct RawDate {
    pub id: String,
    pub from_date: Option<Year>,
    pub to_date: Option<Year>,
}

/// One row of the "Findspots" sheet.
#[derive(Clone, Deserialize, Serialize)]
pub struct RawPlace {
    pub id: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub place: Option<String>,
}

/// One row of the "Hoard Total Count" sheet.
#[derive(Clone, Deserialize, Serialize)]
pub struct RawTotal {
    pub id: String,
    /// Raw cell text; non-numeric placeholders are coerced to 0 later.
    pub number: Option<String>,
}

/// One row of the "Hoard Contents" sheet.
#[derive(Clone, Deserialize, Serialize)]
pub struct RawGroup {
    pub id: String,
    pub denomination: Option<String>,
    pub mint: Option<String>,
    pub material: Option<String>,
    /// Raw cell text; non-numeric placeholders are coerced to 0 later.
    pub count: Option<String>,
    pub from_date: Option<Year>,
    pub to_date: Option<Year>,
}

/// The whole workbook. The "Disposition, Refs, and Notes" sheet must exist
/// in the workbook but carries nothing the view needs, so it has no rows
/// here.
#[derive(Clone, Deserialize, Serialize)]
pub struct Input {
    pub dates: Vec<RawDate>,
    pub places: Vec<RawPlace>,
    pub totals: Vec<RawTotal>,
    pub groups: Vec<RawGroup>,
}
