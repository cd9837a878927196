//! Het gereconstrueerde geometrische model van één roof-export.

pub mod face;
pub mod line;
pub mod point;
pub mod topology;

use serde::Serialize;

use crate::parse::records::RoofRecords;

pub use face::Face;
pub use line::{LineKind, LineTable, RoofLine};
pub use point::{Point, PointRegistry};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Resultaat van één parse-aanroep: faces en opgeloste lijnen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoofDocument {
    pub faces: Vec<Face>,
    pub lines: Vec<RoofLine>,
}

/// Labelpositie van een face voor de 2D- en 3D-weergave.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceLabel {
    pub face_id: String,
    pub designator: String,
    /// Zwaartepunt van de hoekpunten, als `[lng, lat, ele]`.
    pub anchor: [f64; 3],
}

/// Omhullende doos over alle punten van een document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_ele: f64,
    pub max_ele: f64,
}

impl Bounds {
    fn from_point(point: &Point) -> Self {
        Self {
            min_lng: point.lng,
            max_lng: point.lng,
            min_lat: point.lat,
            max_lat: point.lat,
            min_ele: point.ele,
            max_ele: point.ele,
        }
    }

    fn include(mut self, point: &Point) -> Self {
        self.min_lng = self.min_lng.min(point.lng);
        self.max_lng = self.max_lng.max(point.lng);
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lat = self.max_lat.max(point.lat);
        self.min_ele = self.min_ele.min(point.ele);
        self.max_ele = self.max_ele.max(point.ele);
        self
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_ele - self.min_ele
    }
}

impl RoofDocument {
    /// Reconstrueert het model uit de getypeerde records.
    #[must_use]
    pub fn from_records(records: &RoofRecords) -> Self {
        let registry = PointRegistry::from_records(&records.points.points);
        let table = LineTable::from_records(&records.lines.lines);
        log::debug!(
            "Registry met {} punten en {} lijnpaden opgebouwd",
            registry.len(),
            table.len()
        );

        let faces = build_faces(&records.faces.faces, &table, &registry);
        let lines = line::resolve_lines(&records.lines.lines, &registry);

        let gap_faces = faces.iter().filter(|face| face.has_gaps()).count();
        if gap_faces > 0 {
            log::warn!("{gap_faces} face(s) bevatten niet-aansluitende lijnfragmenten");
        }
        log::debug!(
            "{} van {} faces gereconstrueerd",
            faces.len(),
            records.faces.faces.len()
        );

        Self { faces, lines }
    }

    #[must_use]
    pub fn face(&self, id: &str) -> Option<&Face> {
        self.faces.iter().find(|face| face.id == id)
    }

    /// Faces op aflopende oppervlakte; grote vlakken worden eerst getekend.
    #[must_use]
    pub fn faces_by_size_desc(&self) -> Vec<&Face> {
        let mut faces: Vec<&Face> = self.faces.iter().collect();
        faces.sort_by(|a, b| b.size.total_cmp(&a.size));
        faces
    }

    #[must_use]
    pub fn face_labels(&self) -> Vec<FaceLabel> {
        self.faces
            .iter()
            .map(|face| FaceLabel {
                face_id: face.id.clone(),
                designator: face.designator.clone(),
                anchor: face.centroid(),
            })
            .collect()
    }

    /// Omhullende van alle face- en lijnpunten, `None` voor een leeg document.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self
            .faces
            .iter()
            .flat_map(|face| face.path.iter())
            .chain(self.lines.iter().flat_map(|line| line.path.iter()));
        let first = Bounds::from_point(points.next()?);
        Some(points.fold(first, Bounds::include))
    }
}

#[cfg(feature = "parallel")]
fn build_faces(
    records: &[crate::parse::records::FaceRecord],
    table: &LineTable,
    registry: &PointRegistry,
) -> Vec<Face> {
    records
        .par_iter()
        .filter_map(|record| Face::from_record(record, table, registry))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_faces(
    records: &[crate::parse::records::FaceRecord],
    table: &LineTable,
    registry: &PointRegistry,
) -> Vec<Face> {
    records
        .iter()
        .filter_map(|record| Face::from_record(record, table, registry))
        .collect()
}
