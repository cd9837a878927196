//! Edges per face: lengte, classificatie en totalen per lijntype.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::topology::classify_edge;
use crate::model::{Face, LineKind, RoofDocument, RoofLine};

use super::{MeasureError, edge_length};

/// Lengte per lijntype.
pub type LineTotals = BTreeMap<LineKind, f64>;

/// Eén edge van een face-pad.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceEdge {
    pub start: String,
    pub end: String,
    pub length: f64,
    #[serde(rename = "type")]
    pub kind: LineKind,
    /// Id van de lijn waarop de edge gematcht is.
    pub line_id: Option<String>,
}

/// Metingen van één face.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceMeasurement {
    pub face_id: String,
    pub designator: String,
    pub area: f64,
    pub pitch: f64,
    pub orientation: String,
    /// Som van alle edges, ook ongeclassificeerde.
    pub perimeter: f64,
    pub edges: Vec<FaceEdge>,
    /// Totalen per type; ongeclassificeerde edges tellen niet mee.
    pub line_totals: LineTotals,
}

/// Alle edges van `face`, inclusief de sluitende edge.
#[must_use]
pub fn face_edges(face: &Face, lines: &[RoofLine]) -> Vec<FaceEdge> {
    face.edges()
        .map(|(start, end)| {
            let matched = classify_edge(lines, &start.id, &end.id);
            FaceEdge {
                start: start.id.clone(),
                end: end.id.clone(),
                length: edge_length(start, end),
                kind: matched.map_or(LineKind::Unknown, |line| line.kind.clone()),
                line_id: matched.map(|line| line.id.clone()),
            }
        })
        .collect()
}

#[must_use]
pub fn measure_face(face: &Face, lines: &[RoofLine]) -> FaceMeasurement {
    let edges = face_edges(face, lines);
    let perimeter = edges.iter().map(|edge| edge.length).sum();

    let mut line_totals = LineTotals::new();
    for edge in edges.iter().filter(|edge| !edge.kind.is_unknown()) {
        *line_totals.entry(edge.kind.clone()).or_default() += edge.length;
    }

    FaceMeasurement {
        face_id: face.id.clone(),
        designator: face.designator.clone(),
        area: face.size,
        pitch: face.pitch,
        orientation: face.orientation.clone(),
        perimeter,
        edges,
        line_totals,
    }
}

impl RoofDocument {
    /// Meet de face met het gegeven id.
    pub fn measure_face(&self, face_id: &str) -> Result<FaceMeasurement, MeasureError> {
        self.face(face_id)
            .map(|face| measure_face(face, &self.lines))
            .ok_or_else(|| MeasureError::UnknownFace(face_id.to_owned()))
    }
}

/// Totale oppervlakte van de geselecteerde faces. Onbekende id's tellen niet
/// mee.
#[must_use]
pub fn selection_area<S: AsRef<str>>(document: &RoofDocument, selected: &[S]) -> f64 {
    document
        .faces
        .iter()
        .filter(|face| selected.iter().any(|id| id.as_ref() == face.id))
        .map(|face| face.size)
        .sum()
}
