//! Inlezen van roof-exports naar getypeerde records en het [`crate::model::RoofDocument`].

pub mod number;
pub mod records;
pub mod roof_xml;

pub use number::{parse_float, parse_lenient_float};
pub use roof_xml::{ParseError, ParseOptions, ParseResult, parse_records, parse_str, parse_with_options};
