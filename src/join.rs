//! Joining and cleaning the raw sheets into [Find]s and [Group]s.

use crate::input::{Input, Year};
use itertools::Itertools;
use log::info;
use std::collections::HashMap;

/// Sentinel for missing categorical values, so that every row stays
/// filterable.
pub const UNKNOWN: &str = "Unknown";

/// One findspot, denormalized across the date, findspot and total sheets.
#[derive(Clone, Debug, PartialEq)]
pub struct Find {
    pub id: String,
    pub place: String,
    pub lat: f64,
    pub long: f64,
    pub from_date: Year,
    pub to_date: Year,
    pub number: i64,
}

/// One denomination/mint/count entry within a Find's hoard composition.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub id: String,
    pub denomination: String,
    pub mint: String,
    pub material: String,
    pub count: i64,
    pub from_date: Year,
    pub to_date: Year,
}

/// Left-join totals with dates and findspots on `id`. A Find without
/// coordinates cannot be mapped and a Find without date bounds cannot be
/// placed on the slider, so such rows are excluded outright.
pub fn join_finds(input: &Input) -> Vec<Find> {
    let dates: HashMap<&str, _> = input.dates.iter().map(|d| (d.id.as_str(), d)).collect();
    let places: HashMap<&str, _> = input.places.iter().map(|p| (p.id.as_str(), p)).collect();
    let finds = input
        .totals
        .iter()
        .filter_map(|total| {
            let date = dates.get(total.id.as_str())?;
            let place = places.get(total.id.as_str())?;
            Some(Find {
                id: total.id.clone(),
                place: place.place.clone().unwrap_or_else(|| UNKNOWN.to_owned()),
                lat: place.lat?,
                long: place.long?,
                from_date: date.from_date?,
                to_date: date.to_date?,
                number: coerce_count(total.number.as_deref()),
            })
        })
        .collect_vec();
    info!(
        "finds: {} of {} have coordinates and date bounds",
        finds.len(),
        input.totals.len()
    );
    finds
}

/// Clean the hoard-contents rows: drop Groups without date bounds, fill
/// missing categoricals with [UNKNOWN], coerce counts, and unify the URI
/// scheme so equal logical identifiers compare equal downstream.
pub fn clean_groups(input: &Input) -> Vec<Group> {
    let groups = input
        .groups
        .iter()
        .filter_map(|g| {
            Some(Group {
                id: g.id.clone(),
                denomination: categorical(g.denomination.as_deref()),
                mint: categorical(g.mint.as_deref()),
                material: categorical(g.material.as_deref()),
                count: coerce_count(g.count.as_deref()),
                from_date: g.from_date?,
                to_date: g.to_date?,
            })
        })
        .collect_vec();
    info!(
        "groups: {} of {} have date bounds",
        groups.len(),
        input.groups.len()
    );
    groups
}

fn categorical(value: Option<&str>) -> String {
    match value {
        None => UNKNOWN.to_owned(),
        Some(v) => normalize_scheme(v),
    }
}

/// Some source rows carry `http://` URIs; unify on `https://` so the same
/// mint or denomination never appears as two distinct filter options.
fn normalize_scheme(value: &str) -> String {
    match value.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => value.to_owned(),
    }
}

/// Coerce a count cell to a number; placeholders such as `"?"` or
/// `"Unknown"` (and absent cells) become 0.
pub fn coerce_count(value: Option<&str>) -> i64 {
    let Some(value) = value else { return 0 };
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        n
    } else if let Ok(x) = value.parse::<f64>() {
        x as i64
    } else {
        0
    }
}
