//! The facet filter engine.
//!
//! Applies a conjunction of independent predicates to the Groups, then
//! keeps exactly the Finds that still own at least one surviving Group.

use crate::input::Year;
use crate::join::{Find, Group};
use crate::lookup::{Lookup, Lookups};
use itertools::Itertools;
use log::debug;
use std::collections::HashSet;

/// The current state of the filter controls.
///
/// Every predicate is optional. An empty label selection means the user has
/// cleared that control, which is "no restriction", never "match nothing".
#[derive(Clone, Debug, Default)]
pub struct FilterSpec {
    /// Selected denomination labels.
    pub denominations: Vec<String>,
    /// Selected material labels.
    pub materials: Vec<String>,
    /// Selected mint labels.
    pub mints: Vec<String>,
    /// `(date_min, date_max)`: keep Groups lying strictly within the window
    /// on both ends. Groups partially overlapping the window are excluded.
    pub dates: Option<(Year, Year)>,
    /// `(number_min, number_max)`: strict inequality at both ends; a Group
    /// whose count equals a bound is excluded.
    pub counts: Option<(i64, i64)>,
}

/// Translate selected display labels back to raw codes. A label missing
/// from the lookup resolves to itself.
fn selected_raws<'a>(labels: &'a [String], lookup: &'a Lookup) -> HashSet<&'a str> {
    labels.iter().map(|l| lookup.raw_for(l)).collect()
}

/// Run every active predicate over the Groups, then restrict the Finds to
/// the owners of the survivors. The predicates commute; equality filters
/// run first only because they are cheap.
pub fn apply<'a>(
    spec: &FilterSpec,
    finds: &'a [Find],
    groups: &'a [Group],
    lookups: &Lookups,
) -> (Vec<&'a Find>, Vec<&'a Group>) {
    let mut groups = groups.iter().collect_vec();
    if !spec.denominations.is_empty() {
        let raws = selected_raws(&spec.denominations, &lookups.denominations);
        groups.retain(|g| raws.contains(g.denomination.as_str()));
        debug!("denomination filter: {} groups left", groups.len());
    }
    if !spec.materials.is_empty() {
        let raws = selected_raws(&spec.materials, &lookups.materials);
        groups.retain(|g| raws.contains(g.material.as_str()));
        debug!("material filter: {} groups left", groups.len());
    }
    if !spec.mints.is_empty() {
        let raws = selected_raws(&spec.mints, &lookups.mints);
        groups.retain(|g| raws.contains(g.mint.as_str()));
        debug!("mint filter: {} groups left", groups.len());
    }
    if let Some((date_min, date_max)) = spec.dates {
        groups.retain(|g| g.from_date > date_min && g.to_date < date_max);
        debug!("date filter: {} groups left", groups.len());
    }
    if let Some((number_min, number_max)) = spec.counts {
        groups.retain(|g| g.count > number_min && g.count < number_max);
        debug!("count filter: {} groups left", groups.len());
    }
    let survivors: HashSet<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    let finds = finds
        .iter()
        .filter(|f| survivors.contains(f.id.as_str()))
        .collect_vec();
    (finds, groups)
}
