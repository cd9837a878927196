//! Parser voor roof-measurement XML-exports.

use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;

use crate::model::RoofDocument;

use super::records::RoofRecords;

/// Result type voor het parsen van roof-exports.
pub type ParseResult<T> = Result<T, ParseError>;

/// Fouten op documentniveau. Problemen met losse punten, lijnen of faces
/// worden nooit als fout gemeld.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Het XML-document kon niet gede-serialiseerd worden.
    #[error("XML parsefout: {0}")]
    Xml(#[from] quick_xml::DeError),
    /// Een verplichte sectie (`STRUCTURES` of `ROOF`) ontbreekt.
    #[error("sectie {0} ontbreekt in het document")]
    MissingSection(&'static str),
    /// Het document bevat geen enkele bruikbare face.
    #[error("geen dakvlakken (faces) gevonden in het document")]
    NoFaces,
}

/// Instellingen voor een parse-aanroep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Behandel een document zonder faces als fout ([`ParseError::NoFaces`]).
    pub require_faces: bool,
}

impl ParseOptions {
    /// Opties zoals het dashboard ze gebruikt: een leeg dak is een fout.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            require_faces: true,
        }
    }
}

/// Leest een export en reconstrueert het [`RoofDocument`].
pub fn parse_str(input: &str) -> ParseResult<RoofDocument> {
    parse_with_options(input, ParseOptions::default())
}

/// Zoals [`parse_str`], maar met expliciete [`ParseOptions`].
pub fn parse_with_options(input: &str, options: ParseOptions) -> ParseResult<RoofDocument> {
    let records = parse_records(input)?;
    let document = RoofDocument::from_records(&records);

    if options.require_faces && document.faces.is_empty() {
        return Err(ParseError::NoFaces);
    }

    Ok(document)
}

/// Leest alleen de getypeerde records van de eerste `ROOF`-sectie.
pub fn parse_records(input: &str) -> ParseResult<RoofRecords> {
    log::debug!("Start parsing roof export ({} bytes)", input.len());
    let input = input.trim_start_matches('\u{feff}');
    let document: ExportDocument = from_str(input)?;

    let structures_count = document.structures.len();
    let structures = document
        .structures
        .into_iter()
        .next()
        .ok_or(ParseError::MissingSection("STRUCTURES"))?;
    if structures_count > 1 {
        log::warn!("{structures_count} STRUCTURES secties gevonden, alleen de eerste wordt gebruikt");
    }

    let roof_count = structures.roofs.len();
    let roof = structures
        .roofs
        .into_iter()
        .next()
        .ok_or(ParseError::MissingSection("ROOF"))?;
    if roof_count > 1 {
        log::warn!("{roof_count} ROOF secties gevonden, alleen de eerste wordt gebruikt");
    }

    log::debug!(
        "Found {} points, {} lines, {} faces",
        roof.points.points.len(),
        roof.lines.lines.len(),
        roof.faces.faces.len()
    );

    Ok(roof)
}

#[derive(Debug, Deserialize)]
struct ExportDocument {
    #[serde(default, rename = "STRUCTURES")]
    structures: Vec<StructuresSection>,
}

#[derive(Debug, Default, Deserialize)]
struct StructuresSection {
    #[serde(default, rename = "ROOF")]
    roofs: Vec<RoofRecords>,
}
