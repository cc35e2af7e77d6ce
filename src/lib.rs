pub mod driver;
pub mod errors;
pub mod filter;
pub mod input;
pub mod join;
pub mod lookup;
pub mod output;
pub mod popup;
pub mod workbook;
