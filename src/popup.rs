//! Aggregating a Find's surviving Groups into popup content.

use crate::join::{Find, Group};
use crate::lookup::Lookups;
use crate::output::{self, OGroupLine, OPopup};
use itertools::Itertools;

/// Build the popup for one Find from its surviving Groups. Lines keep the
/// input order of the Groups.
pub fn aggregate(find: &Find, groups: &[&Group], lookups: &Lookups) -> OPopup {
    let lines = groups
        .iter()
        .map(|g| OGroupLine {
            denomination: lookups.denominations.label_for(&g.denomination).to_owned(),
            mint: lookups.mints.label_for(&g.mint).to_owned(),
            dates: output::pretty_date_range(g.from_date, g.to_date),
            count: g.count,
        })
        .collect_vec();
    let total: i64 = groups.iter().map(|g| g.count).sum();
    let were_was = if total == 1 { "coin was" } else { "coins were" };
    OPopup {
        title: format!("CFU Coin Find {}", find.id.replace("cfu", "")),
        lines,
        total,
        summary: format!(
            "This coin find was found in {}. In total, {} {} found.",
            find.place, total, were_was
        ),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::Year;
    use crate::lookup::{self, Lookup};

    fn find(id: &str, place: &str) -> Find {
        Find {
            id: id.to_owned(),
            place: place.to_owned(),
            lat: 46.5,
            long: 30.7,
            from_date: -400,
            to_date: -350,
            number: 10,
        }
    }

    fn group(denomination: &str, mint: &str, count: i64, from_date: Year, to_date: Year) -> Group {
        Group {
            id: "cfu1".to_owned(),
            denomination: denomination.to_owned(),
            mint: mint.to_owned(),
            material: "https://nomisma.org/id/ar".to_owned(),
            count,
            from_date,
            to_date,
        }
    }

    fn lookups(groups: &[Group]) -> Lookups {
        Lookups {
            denominations: Lookup::from_observed(groups.iter().map(|g| g.denomination.as_str())),
            mints: Lookup::from_observed(groups.iter().map(|g| g.mint.as_str())),
            materials: lookup::material_lookup(),
        }
    }

    #[test]
    fn aggregate_basic() {
        let find = find("cfu17", "Olbia");
        let groups = vec![
            group(
                "https://nomisma.org/id/drachm",
                "https://nomisma.org/id/olbia",
                5,
                -400,
                -350,
            ),
            group(
                "https://nomisma.org/id/stater",
                "https://nomisma.org/id/pantikapaion",
                7,
                -380,
                -340,
            ),
        ];
        let lookups = lookups(&groups);
        let popup = aggregate(&find, &groups.iter().collect::<Vec<_>>(), &lookups);
        assert_eq!(popup.title, "CFU Coin Find 17");
        assert_eq!(popup.total, 12);
        assert_eq!(
            popup.summary,
            "This coin find was found in Olbia. In total, 12 coins were found."
        );
        assert_eq!(
            popup.lines,
            vec![
                OGroupLine {
                    denomination: "Drachm".to_owned(),
                    mint: "Olbia".to_owned(),
                    dates: "400-350 BCE".to_owned(),
                    count: 5,
                },
                OGroupLine {
                    denomination: "Stater".to_owned(),
                    mint: "Pantikapaion".to_owned(),
                    dates: "380-340 BCE".to_owned(),
                    count: 7,
                },
            ]
        );
    }

    #[test]
    fn aggregate_singular() {
        let find = find("cfu3", "Odesa");
        let groups = vec![group(
            "https://nomisma.org/id/obol",
            "https://nomisma.org/id/olbia",
            1,
            -400,
            -350,
        )];
        let lookups = lookups(&groups);
        let popup = aggregate(&find, &groups.iter().collect::<Vec<_>>(), &lookups);
        assert_eq!(
            popup.summary,
            "This coin find was found in Odesa. In total, 1 coin was found."
        );
    }

    #[test]
    fn aggregate_zero_is_plural() {
        let find = find("cfu3", "Odesa");
        let groups = vec![group(
            "https://nomisma.org/id/obol",
            "https://nomisma.org/id/olbia",
            0,
            -400,
            -350,
        )];
        let lookups = lookups(&groups);
        let popup = aggregate(&find, &groups.iter().collect::<Vec<_>>(), &lookups);
        assert_eq!(
            popup.summary,
            "This coin find was found in Odesa. In total, 0 coins were found."
        );
    }

    #[test]
    fn aggregate_unmapped_code_renders_raw() {
        let find = find("cfu3", "Odesa");
        let groups = vec![group("Unknown", "mystery-mint", 2, -400, -350)];
        // Lookups built from other data entirely.
        let lookups = Lookups {
            denominations: Lookup::from_observed(vec!["https://nomisma.org/id/drachm"]),
            mints: Lookup::from_observed(vec!["https://nomisma.org/id/olbia"]),
            materials: lookup::material_lookup(),
        };
        let popup = aggregate(&find, &groups.iter().collect::<Vec<_>>(), &lookups);
        assert_eq!(popup.lines[0].denomination, "Unknown");
        assert_eq!(popup.lines[0].mint, "mystery-mint");
    }
}
