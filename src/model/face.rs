//! Dakvlakken (faces) en hun opbouw uit records.

use serde::Serialize;

use crate::parse::number::parse_lenient_float;
use crate::parse::records::{FaceRecord, non_empty, split_id_list};

use super::line::LineTable;
use super::point::{Point, PointRegistry};
use super::topology::stitch_face_path;

/// Minimaal aantal punten voor een polygoon.
pub const MIN_FACE_POINTS: usize = 3;

const DEFAULT_FACE_KIND: &str = "ROOF";
const DEFAULT_ORIENTATION: &str = "0";

/// Een vlak dakdeel met gesloten, geordend pad.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Face {
    pub id: String,
    /// Korte label, bv. `"A"`.
    pub designator: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Oriëntatie in graden, als tekst overgenomen.
    pub orientation: String,
    /// Helling als stijging per 12 eenheden.
    pub pitch: f64,
    /// Oppervlakte in de eenheid van het document.
    pub size: f64,
    /// Gesloten pad; eerste en laatste punt zijn buren maar niet gelijk.
    pub path: Vec<Point>,
    /// Aantal lijnfragmenten dat niet op het pad aansloot.
    pub gaps: usize,
}

impl Face {
    /// Bouwt een face uit een record. Geeft `None` als er geen polygoonpad is
    /// of als er minder dan [`MIN_FACE_POINTS`] bekende punten overblijven.
    #[must_use]
    pub fn from_record(record: &FaceRecord, table: &LineTable, registry: &PointRegistry) -> Option<Self> {
        let id = record.id.clone().unwrap_or_default();
        let polygon = record.polygon()?;
        let Some(path) = non_empty(polygon.path.as_ref()) else {
            log::debug!("face {id} heeft geen polygoonpad");
            return None;
        };

        let stitched = stitch_face_path(&id, &split_id_list(path), table);
        let mut points = registry.resolve(&stitched.point_ids);
        // Weggevallen id's kunnen alsnog een dubbel slotpunt blootleggen.
        let repeats_start = points.len() > 1
            && points.first().map(|point| &point.id) == points.last().map(|point| &point.id);
        if repeats_start {
            points.pop();
        }
        if points.len() < MIN_FACE_POINTS {
            log::debug!(
                "face {id} overgeslagen: {} punt(en) na het oplossen van verwijzingen",
                points.len()
            );
            return None;
        }

        Some(Self {
            designator: record.designator.clone().unwrap_or_default(),
            kind: non_empty(record.kind.as_ref())
                .unwrap_or(DEFAULT_FACE_KIND)
                .to_owned(),
            orientation: non_empty(polygon.orientation.as_ref())
                .unwrap_or(DEFAULT_ORIENTATION)
                .to_owned(),
            pitch: polygon.pitch.as_deref().map_or(0.0, parse_lenient_float),
            size: polygon.size.as_deref().map_or(0.0, parse_lenient_float),
            path: points,
            gaps: stitched.gaps,
            id,
        })
    }

    /// Gemiddelde van de hoekpunten, gebruikt als labelpositie.
    #[must_use]
    pub fn centroid(&self) -> [f64; 3] {
        if self.path.is_empty() {
            return [0.0; 3];
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.path.len() as f64;
        let sum = self.path.iter().fold([0.0; 3], |acc, point| {
            [acc[0] + point.lng, acc[1] + point.lat, acc[2] + point.ele]
        });
        [sum[0] / count, sum[1] / count, sum[2] / count]
    }

    /// Opeenvolgende puntparen, inclusief de sluitende edge.
    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        let count = self.path.len();
        (0..count).map(move |index| (&self.path[index], &self.path[(index + 1) % count]))
    }

    /// `true` als het pad op basis van de brondata niet volledig bewezen is.
    #[must_use]
    pub fn has_gaps(&self) -> bool {
        self.gaps > 0
    }
}

#[cfg(test)]
mod tests {
    use super::Face;
    use crate::model::line::LineTable;
    use crate::model::point::PointRegistry;
    use crate::parse::records::{FaceRecord, LineRecord, PointRecord, PolygonRecord};

    fn fixture() -> (LineTable, PointRegistry) {
        let points: Vec<PointRecord> = [("P1", "0,0"), ("P2", "4,0"), ("P3", "4,3"), ("P4", "0,3")]
            .iter()
            .map(|(id, data)| PointRecord {
                id: Some((*id).to_owned()),
                data: Some((*data).to_owned()),
                ..PointRecord::default()
            })
            .collect();
        let lines: Vec<LineRecord> = [("L1", "P1,P2"), ("L2", "P2,P3"), ("L3", "P4,P3"), ("L4", "P4,P1")]
            .iter()
            .map(|(id, path)| LineRecord {
                id: Some((*id).to_owned()),
                kind: None,
                path: Some((*path).to_owned()),
            })
            .collect();
        (LineTable::from_records(&lines), PointRegistry::from_records(&points))
    }

    fn face(path: Option<&str>) -> FaceRecord {
        FaceRecord {
            id: Some("F1".to_owned()),
            designator: Some("A".to_owned()),
            kind: None,
            polygons: vec![PolygonRecord {
                path: path.map(str::to_owned),
                pitch: Some("\u{2212}6".to_owned()),
                size: Some("bogus".to_owned()),
                ..PolygonRecord::default()
            }],
        }
    }

    #[test]
    fn builds_face_with_defaults() {
        let (table, registry) = fixture();
        let face = Face::from_record(&face(Some("L1,L2,L3,L4")), &table, &registry).expect("face");
        assert_eq!(face.kind, "ROOF");
        assert_eq!(face.orientation, "0");
        assert_eq!(face.pitch, -6.0);
        assert_eq!(face.size, 0.0);
        assert_eq!(face.path.len(), 4);
        assert!(!face.has_gaps());
        assert_eq!(face.centroid(), [2.0, 1.5, 0.0]);
    }

    #[test]
    fn closing_edge_is_included() {
        let (table, registry) = fixture();
        let face = Face::from_record(&face(Some("L1,L2,L3,L4")), &table, &registry).expect("face");
        let edges: Vec<(&str, &str)> = face
            .edges()
            .map(|(a, b)| (a.id.as_str(), b.id.as_str()))
            .collect();
        assert_eq!(edges, vec![("P1", "P2"), ("P2", "P3"), ("P3", "P4"), ("P4", "P1")]);
    }

    #[test]
    fn face_without_polygon_path_is_dropped() {
        let (table, registry) = fixture();
        assert!(Face::from_record(&face(None), &table, &registry).is_none());

        let no_polygon = FaceRecord {
            polygons: Vec::new(),
            ..face(None)
        };
        assert!(Face::from_record(&no_polygon, &table, &registry).is_none());
    }

    #[test]
    fn closing_point_before_dangling_id_is_not_repeated() {
        let (_, registry) = fixture();
        let table = LineTable::from_records(&[
            LineRecord {
                id: Some("L1".to_owned()),
                kind: None,
                path: Some("P1,P2,P3".to_owned()),
            },
            LineRecord {
                id: Some("L2".to_owned()),
                kind: None,
                path: Some("P3,P1,X".to_owned()),
            },
        ]);
        let face = Face::from_record(&face(Some("L1,L2")), &table, &registry).expect("face");
        let ids: Vec<&str> = face.path.iter().map(|point| point.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn face_with_too_few_resolved_points_is_dropped() {
        let (table, registry) = fixture();
        assert!(Face::from_record(&face(Some("L1")), &table, &registry).is_none());
        assert!(Face::from_record(&face(Some("L9,L8")), &table, &registry).is_none());
    }
}
