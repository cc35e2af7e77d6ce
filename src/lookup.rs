//! Two-way lookups between raw coded values and display labels.

use itertools::Itertools;
use log::warn;
use std::collections::HashMap;

const URI_ID_MARKER: &str = "://nomisma.org/id/";

/// Derive a display label from a raw coded value: strip the URI scheme and
/// host if present, then capitalize the remainder.
pub fn display_label(raw: &str) -> String {
    let tail = match raw.find(URI_ID_MARKER) {
        Some(i) => &raw[i + URI_ID_MARKER.len()..],
        None => raw,
    };
    capitalize(tail)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// A bidirectional raw ↔ label map for one facet.
///
/// Labels are kept unique: the reverse direction assumes injectivity.
pub struct Lookup {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl Lookup {
    fn new() -> Lookup {
        Lookup {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Build a lookup from the distinct raw values observed in one column,
    /// deriving labels with [display_label].
    pub fn from_observed<'a>(values: impl IntoIterator<Item = &'a str>) -> Lookup {
        let mut lookup = Lookup::new();
        for raw in values.into_iter().unique() {
            let label = display_label(raw);
            lookup.insert(raw, &label);
        }
        lookup
    }

    /// Build a lookup from a fixed hand-authored table.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Lookup {
        let mut lookup = Lookup::new();
        for &(raw, label) in pairs {
            lookup.insert(raw, label);
        }
        lookup
    }

    /// Two raw values can produce the same label (e.g. two codes that
    /// capitalize identically); the later one gets its raw code appended so
    /// that no filter option is silently dropped.
    fn insert(&mut self, raw: &str, label: &str) {
        let label = if let Some(other) = self.reverse.get(label) {
            let disambiguated = format!("{label} ({raw})");
            warn!("label '{label}' maps to both '{other}' and '{raw}', using '{disambiguated}'");
            disambiguated
        } else {
            label.to_owned()
        };
        self.reverse.insert(label.clone(), raw.to_owned());
        self.forward.insert(raw.to_owned(), label);
    }

    /// Raw → label; an unknown raw value passes through unchanged.
    pub fn label_for<'a>(&'a self, raw: &'a str) -> &'a str {
        self.forward.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// Label → raw; an unknown label passes through unchanged.
    pub fn raw_for<'a>(&'a self, label: &'a str) -> &'a str {
        self.reverse.get(label).map(String::as_str).unwrap_or(label)
    }

    /// All labels, sorted, for populating a filter control.
    pub fn labels(&self) -> Vec<String> {
        self.forward.values().cloned().sorted().collect_vec()
    }
}

/// The per-facet lookups, built once per dataset load.
pub struct Lookups {
    pub denominations: Lookup,
    pub mints: Lookup,
    pub materials: Lookup,
}

/// Metal codes use periodic-table symbols, so their names cannot be derived
/// from the data itself; this closed set is maintained by hand.
pub fn material_lookup() -> Lookup {
    Lookup::from_pairs(&[
        ("https://nomisma.org/id/ae", "Bronze"),
        ("https://nomisma.org/id/ar", "Silver"),
        ("https://nomisma.org/id/av", "Gold"),
        ("https://nomisma.org/id/cu", "Copper"),
        ("https://nomisma.org/id/el", "Electrum"),
        (
            "https://nomisma.org/id/an_or_av_issuer_rrc",
            "Silver (AN or AV, Republican Moneyer)",
        ),
        ("Unknown", "Unknown"),
    ])
}
