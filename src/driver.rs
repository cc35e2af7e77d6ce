//! Main entry point for computing the map view.

use crate::errors::{Result, invalid_input_ref};
use crate::filter::{self, FilterSpec};
use crate::input::Input;
use crate::join::{self, Find, Group};
use crate::lookup::{self, Lookup, Lookups};
use crate::output::{OFacets, OMarker, ViewModel};
use crate::popup;
use itertools::Itertools;
use log::info;
use std::collections::HashMap;

/// The joined, cleaned dataset plus its facet lookups.
///
/// Built once per load; every filter-control change recomputes the view
/// from here without touching the source data again.
pub struct Dataset {
    pub finds: Vec<Find>,
    pub groups: Vec<Group>,
    pub lookups: Lookups,
}

impl Dataset {
    pub fn build(input: &Input) -> Result<Dataset> {
        let finds = join::join_finds(input);
        if finds.is_empty() {
            return Err(invalid_input_ref("no mappable finds"));
        }
        let groups = join::clean_groups(input);
        let lookups = Lookups {
            denominations: Lookup::from_observed(groups.iter().map(|g| g.denomination.as_str())),
            mints: Lookup::from_observed(groups.iter().map(|g| g.mint.as_str())),
            materials: lookup::material_lookup(),
        };
        Ok(Dataset {
            finds,
            groups,
            lookups,
        })
    }

    /// Choices for the filter controls, from the cleaned pre-filter data:
    /// sorted label lists plus the slider bounds.
    fn facets(&self) -> OFacets {
        let dates = (
            self.finds
                .iter()
                .map(|f| f.from_date)
                .min()
                .expect("there are finds"),
            self.finds
                .iter()
                .map(|f| f.to_date)
                .max()
                .expect("there are finds"),
        );
        let counts = (
            self.groups.iter().map(|g| g.count).min().unwrap_or(0),
            self.groups.iter().map(|g| g.count).max().unwrap_or(0),
        );
        // The material vocabulary is a fixed table; offer only the values
        // actually observed in the data.
        let materials = self
            .groups
            .iter()
            .map(|g| g.material.as_str())
            .unique()
            .map(|raw| self.lookups.materials.label_for(raw).to_owned())
            .sorted()
            .collect_vec();
        OFacets {
            denominations: self.lookups.denominations.labels(),
            materials,
            mints: self.lookups.mints.labels(),
            dates,
            counts,
        }
    }
}

/// Run the whole pipeline for one filter state: filter the Groups, restrict
/// the Finds, aggregate popups, and attach the facet options.
///
/// This is the main entry point for the library.
pub fn compute_view(dataset: &Dataset, spec: &FilterSpec) -> ViewModel {
    let (finds, groups) = filter::apply(spec, &dataset.finds, &dataset.groups, &dataset.lookups);
    info!(
        "filtered: {} of {} finds, {} of {} groups",
        finds.len(),
        dataset.finds.len(),
        groups.len(),
        dataset.groups.len()
    );
    let mut by_find: HashMap<&str, Vec<&Group>> = HashMap::new();
    for &g in &groups {
        by_find.entry(g.id.as_str()).or_default().push(g);
    }
    let markers = finds
        .iter()
        .map(|&f| {
            let find_groups = by_find.get(f.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            OMarker {
                id: f.id.clone(),
                lat: f.lat,
                long: f.long,
                place: f.place.clone(),
                number: f.number,
                popup: popup::aggregate(f, find_groups, &dataset.lookups),
            }
        })
        .collect_vec();
    ViewModel {
        markers,
        facets: dataset.facets(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{RawDate, RawGroup, RawPlace, RawTotal};

    fn sample_input() -> Input {
        let date = |id: &str, a, b| RawDate {
            id: id.to_owned(),
            from_date: Some(a),
            to_date: Some(b),
        };
        let place = |id: &str, lat, long, name: &str| RawPlace {
            id: id.to_owned(),
            lat: Some(lat),
            long: Some(long),
            place: Some(name.to_owned()),
        };
        let total = |id: &str, n: &str| RawTotal {
            id: id.to_owned(),
            number: Some(n.to_owned()),
        };
        let group = |id: &str, denom: &str, count: &str, a, b| RawGroup {
            id: id.to_owned(),
            denomination: Some(denom.to_owned()),
            mint: Some("https://nomisma.org/id/olbia".to_owned()),
            material: Some("https://nomisma.org/id/ar".to_owned()),
            count: Some(count.to_owned()),
            from_date: Some(a),
            to_date: Some(b),
        };
        Input {
            dates: vec![date("cfu1", -480, -450), date("cfu2", -400, -350)],
            places: vec![
                place("cfu1", 46.5, 30.7, "Odesa"),
                place("cfu2", 46.7, 32.8, "Kherson"),
            ],
            totals: vec![total("cfu1", "8"), total("cfu2", "3")],
            groups: vec![
                group("cfu1", "https://nomisma.org/id/drachm", "8", -480, -450),
                group("cfu2", "https://nomisma.org/id/stater", "3", -400, -350),
            ],
        }
    }

    #[test]
    fn build_and_compute() {
        let dataset = Dataset::build(&sample_input()).unwrap();
        let view = compute_view(&dataset, &FilterSpec::default());
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.facets.denominations, vec!["Drachm", "Stater"]);
        assert_eq!(view.facets.materials, vec!["Silver"]);
        assert_eq!(view.facets.mints, vec!["Olbia"]);
        assert_eq!(view.facets.dates, (-480, -350));
        assert_eq!(view.facets.counts, (3, 8));
    }

    #[test]
    fn facet_options_survive_filtering() {
        let dataset = Dataset::build(&sample_input()).unwrap();
        let spec = FilterSpec {
            denominations: vec!["Drachm".to_owned()],
            ..FilterSpec::default()
        };
        let view = compute_view(&dataset, &spec);
        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].id, "cfu1");
        // Options repopulate from the cleaned data, not the filtered data.
        assert_eq!(view.facets.denominations, vec!["Drachm", "Stater"]);
    }

    #[test]
    fn build_rejects_unmappable_input() {
        let mut input = sample_input();
        for p in &mut input.places {
            p.lat = None;
        }
        assert!(Dataset::build(&input).is_err());
    }
}
