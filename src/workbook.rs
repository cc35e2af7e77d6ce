//! Loading the master-sheet workbook.
//!
//! Sheet names and column headers are contractual (exact, case-sensitive);
//! a missing sheet or column is a fatal load error.

use crate::errors::{Result, invalid_input};
use crate::input::{Input, RawDate, RawGroup, RawPlace, RawTotal, Year};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use itertools::Itertools;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const SHEET_DATES: &str = "Deposit Dates";
const SHEET_DISPOSITION: &str = "Disposition, Refs, and Notes";
const SHEET_PLACES: &str = "Findspots";
const SHEET_GROUPS: &str = "Hoard Contents";
const SHEET_TOTALS: &str = "Hoard Total Count";

pub fn load(path: &Path) -> Result<Input> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    // The disposition sheet carries nothing the view needs, but a workbook
    // without it is not the master sheet we expect.
    sheet(&mut workbook, SHEET_DISPOSITION)?;
    let input = Input {
        dates: parse_dates(&sheet(&mut workbook, SHEET_DATES)?)?,
        places: parse_places(&sheet(&mut workbook, SHEET_PLACES)?)?,
        totals: parse_totals(&sheet(&mut workbook, SHEET_TOTALS)?)?,
        groups: parse_groups(&sheet(&mut workbook, SHEET_GROUPS)?)?,
    };
    info!(
        "read {}: {} dates, {} findspots, {} totals, {} groups",
        path.display(),
        input.dates.len(),
        input.places.len(),
        input.totals.len(),
        input.groups.len()
    );
    Ok(input)
}

struct Sheet {
    name: &'static str,
    range: Range<Data>,
}

fn sheet(workbook: &mut Xlsx<BufReader<File>>, name: &'static str) -> Result<Sheet> {
    let range = workbook
        .worksheet_range(name)
        .map_err(|_| invalid_input(format!("missing sheet '{name}'")))?;
    Ok(Sheet { name, range })
}

impl Sheet {
    fn column(&self, header: &str) -> Result<usize> {
        self.range
            .rows()
            .next()
            .and_then(|row| {
                row.iter()
                    .position(|c| matches!(c, Data::String(s) if s == header))
            })
            .ok_or_else(|| {
                invalid_input(format!("sheet '{}': missing column '{header}'", self.name))
            })
    }

    fn data_rows(&self) -> impl Iterator<Item = &[Data]> {
        self.range.rows().skip(1)
    }
}

fn parse_dates(sheet: &Sheet) -> Result<Vec<RawDate>> {
    let id = sheet.column("id")?;
    let from_date = sheet.column("fromDate")?;
    let to_date = sheet.column("toDate")?;
    Ok(sheet
        .data_rows()
        .filter_map(|row| {
            Some(RawDate {
                id: cell_str(row.get(id)?)?,
                from_date: row.get(from_date).and_then(cell_year),
                to_date: row.get(to_date).and_then(cell_year),
            })
        })
        .collect_vec())
}

fn parse_places(sheet: &Sheet) -> Result<Vec<RawPlace>> {
    let id = sheet.column("id")?;
    let lat = sheet.column("IGCH lat")?;
    let long = sheet.column("IGCH long")?;
    let place = sheet.column("place")?;
    Ok(sheet
        .data_rows()
        .filter_map(|row| {
            Some(RawPlace {
                id: cell_str(row.get(id)?)?,
                lat: row.get(lat).and_then(cell_number),
                long: row.get(long).and_then(cell_number),
                place: row.get(place).and_then(cell_str),
            })
        })
        .collect_vec())
}

fn parse_totals(sheet: &Sheet) -> Result<Vec<RawTotal>> {
    let id = sheet.column("id")?;
    let number = sheet.column("total count")?;
    Ok(sheet
        .data_rows()
        .filter_map(|row| {
            Some(RawTotal {
                id: cell_str(row.get(id)?)?,
                number: row.get(number).and_then(cell_str),
            })
        })
        .collect_vec())
}

fn parse_groups(sheet: &Sheet) -> Result<Vec<RawGroup>> {
    // The id column of this sheet has a blank header in the master sheet,
    // so it is addressed by position.
    let id = 0;
    let denomination = sheet.column("Denomination 1 URI")?;
    let mint = sheet.column("Mint 1 URI")?;
    let material = sheet.column("Material 1 URI")?;
    let count = sheet.column("count")?;
    let from_date = sheet.column("from_date")?;
    let to_date = sheet.column("to_date")?;
    Ok(sheet
        .data_rows()
        .filter_map(|row| {
            Some(RawGroup {
                id: cell_str(row.get(id)?)?,
                denomination: row.get(denomination).and_then(cell_str),
                mint: row.get(mint).and_then(cell_str),
                material: row.get(material).and_then(cell_str),
                count: row.get(count).and_then(cell_str),
                from_date: row.get(from_date).and_then(cell_year),
                to_date: row.get(to_date).and_then(cell_year),
            })
        })
        .collect_vec())
}

/// A cell as text; empty cells are absent. Integral floats render without
/// the trailing `.0` so count cells read back as the numbers they are.
fn cell_str(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_owned()) }
        }
        Data::Float(x) if x.fract() == 0.0 => Some(format!("{}", *x as i64)),
        Data::Float(x) => Some(x.to_string()),
        Data::Int(n) => Some(n.to_string()),
        _ => None,
    }
}

fn cell_year(cell: &Data) -> Option<Year> {
    match cell {
        Data::Float(x) => Some(*x as Year),
        Data::Int(n) => Some(*n as Year),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(x) => Some(*x),
        Data::Int(n) => Some(*n as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
