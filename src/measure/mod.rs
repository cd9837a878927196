//! Afgeleide metingen over een [`crate::model::RoofDocument`].
//!
//! Alles hier is een pure functie van het model; er wordt niets gecachet.

pub mod combine;
pub mod edges;
pub mod summary;

use thiserror::Error;

use crate::model::Point;

pub use combine::{CombineOp, CombinedMeasurement, combine};
pub use edges::{FaceEdge, FaceMeasurement, LineTotals, face_edges, measure_face, selection_area};
pub use summary::{RoofSummary, summarize};

/// Fouten bij het opvragen van metingen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeasureError {
    #[error("onbekende face: {0}")]
    UnknownFace(String),
    #[error("onbekende bewerking: {0} (verwacht add of subtract)")]
    UnknownOperator(String),
}

/// Afstand in het (lng, lat)-vlak; hoogte telt niet mee.
#[must_use]
pub fn edge_length(a: &Point, b: &Point) -> f64 {
    (a.lng - b.lng).hypot(a.lat - b.lat)
}

#[cfg(test)]
mod tests {
    use super::edge_length;
    use crate::model::Point;

    fn point(lng: f64, lat: f64, ele: f64) -> Point {
        Point {
            id: String::new(),
            lng,
            lat,
            ele,
        }
    }

    #[test]
    fn edge_length_ignores_elevation() {
        assert_eq!(edge_length(&point(0.0, 0.0, 0.0), &point(3.0, 4.0, 0.0)), 5.0);
        assert_eq!(edge_length(&point(0.0, 0.0, -20.0), &point(3.0, 4.0, 99.0)), 5.0);
    }
}
