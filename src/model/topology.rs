//! Reconstructie van gesloten face-paden uit losse lijnfragmenten, en het
//! terugkoppelen van face-edges naar hun lijnsegment.
//!
//! Een face verwijst alleen naar een ongeordende set lijn-id's. Lijnen kunnen
//! in willekeurige richting opgeslagen zijn; [`PathStitcher`] legt ze kop aan
//! staart en keert ze om waar nodig.

use super::line::{LineKind, LineTable, RoofLine};

/// Hoe een lijn aan het lopende pad is gekoppeld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Eerste lijn: het pad wordt ermee gestart.
    Seed,
    /// Staart van het pad == kop van de lijn.
    Forward,
    /// Staart van het pad == staart van de lijn; lijn omgekeerd toegevoegd.
    Reversed,
    /// Geen gedeeld eindpunt; de lijn is ongewijzigd toegevoegd.
    Disconnected,
}

/// Toestandsmachine die lijnfragmenten tot één punt-id pad samenvoegt.
///
/// Toestand is het opgebouwde pad; het laatste element is de huidige staart.
#[derive(Debug, Clone, Default)]
pub struct PathStitcher {
    path: Vec<String>,
    gaps: usize,
}

impl PathStitcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Voegt de punt-id's van één lijn toe.
    pub fn push<S: AsRef<str>>(&mut self, line: &[S]) -> Join {
        let (Some(head), Some(line_tail)) = (line.first(), line.last()) else {
            return Join::Seed;
        };
        let Some(tail) = self.path.last() else {
            self.extend(line.iter());
            return Join::Seed;
        };

        if tail == line_tail.as_ref() {
            self.extend(line.iter().rev().skip(1));
            Join::Reversed
        } else if tail == head.as_ref() {
            self.extend(line.iter().skip(1));
            Join::Forward
        } else {
            self.gaps += 1;
            self.extend(line.iter());
            Join::Disconnected
        }
    }

    fn extend<'a, S: AsRef<str> + 'a>(&mut self, ids: impl Iterator<Item = &'a S>) {
        self.path.extend(ids.map(|id| id.as_ref().to_owned()));
    }

    /// Aantal fragmenten dat niet aansloot.
    #[must_use]
    pub fn gaps(&self) -> usize {
        self.gaps
    }

    /// Sluit het pad af. Als het pad terugkeert naar zijn startpunt wordt het
    /// dubbele slotpunt verwijderd.
    #[must_use]
    pub fn finish(mut self) -> Vec<String> {
        if self.path.len() > 1 && self.path.first() == self.path.last() {
            self.path.pop();
        }
        self.path
    }
}

/// Resultaat van het stitchen van één face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchedPath {
    pub point_ids: Vec<String>,
    /// Aantal niet-aansluitende fragmenten.
    pub gaps: usize,
}

/// Stitcht de lijnen waarnaar `line_ids` verwijst. Onbekende lijnen worden
/// overgeslagen.
#[must_use]
pub fn stitch_face_path<S: AsRef<str>>(face_id: &str, line_ids: &[S], table: &LineTable) -> StitchedPath {
    let mut stitcher = PathStitcher::new();

    for line_id in line_ids {
        let line_id = line_id.as_ref();
        let Some(points) = table.get(line_id) else {
            log::debug!("face {face_id}: onbekende lijn {line_id} overgeslagen");
            continue;
        };
        if stitcher.push(points) == Join::Disconnected {
            log::warn!(
                "face {face_id}: lijn {line_id} sluit niet aan op het pad, punten ongewijzigd toegevoegd"
            );
        }
    }

    let gaps = stitcher.gaps();
    StitchedPath {
        point_ids: stitcher.finish(),
        gaps,
    }
}

/// Zoekt de lijn waarvan `a` en `b` opeenvolgende punten zijn, in beide
/// richtingen. Bij meerdere kandidaten wint de eerste in documentvolgorde.
#[must_use]
pub fn classify_edge<'a>(lines: &'a [RoofLine], a: &str, b: &str) -> Option<&'a RoofLine> {
    lines.iter().find(|line| line.connects(a, b))
}

/// Zoals [`classify_edge`], maar geeft direct het type terug
/// ([`LineKind::Unknown`] zonder match).
#[must_use]
pub fn edge_kind(lines: &[RoofLine], a: &str, b: &str) -> LineKind {
    classify_edge(lines, a, b).map_or(LineKind::Unknown, |line| line.kind.clone())
}

#[cfg(test)]
mod tests {
    use super::{Join, PathStitcher, classify_edge, edge_kind, stitch_face_path};
    use crate::model::line::{LineKind, LineTable, RoofLine};
    use crate::model::point::Point;
    use crate::parse::records::LineRecord;

    fn table(lines: &[(&str, &str)]) -> LineTable {
        let records: Vec<LineRecord> = lines
            .iter()
            .map(|(id, path)| LineRecord {
                id: Some((*id).to_owned()),
                kind: None,
                path: Some((*path).to_owned()),
            })
            .collect();
        LineTable::from_records(&records)
    }

    #[test]
    fn closing_line_does_not_duplicate_start() {
        let table = table(&[("A", "P1,P2,P3"), ("B", "P3,P4,P1")]);
        let stitched = stitch_face_path("F1", &["A", "B"], &table);
        assert_eq!(stitched.point_ids, vec!["P1", "P2", "P3", "P4"]);
        assert_eq!(stitched.gaps, 0);
    }

    #[test]
    fn reversed_lines_are_flipped() {
        let table = table(&[("L1", "P1,P2"), ("L2", "P3,P2"), ("L3", "P3,P4"), ("L4", "P1,P4")]);
        let stitched = stitch_face_path("F1", &["L1", "L2", "L3", "L4"], &table);
        assert_eq!(stitched.point_ids, vec!["P1", "P2", "P3", "P4"]);
    }

    #[test]
    fn transitions_follow_head_and_tail_comparison() {
        let mut stitcher = PathStitcher::new();
        assert_eq!(stitcher.push(&["P1", "P2"]), Join::Seed);
        assert_eq!(stitcher.push(&["P2", "P3"]), Join::Forward);
        assert_eq!(stitcher.push(&["P4", "P3"]), Join::Reversed);
        assert_eq!(stitcher.push(&["P9", "P8"]), Join::Disconnected);
        assert_eq!(stitcher.gaps(), 1);
        assert_eq!(
            stitcher.finish(),
            vec!["P1", "P2", "P3", "P4", "P9", "P8"]
        );
    }

    #[test]
    fn disconnected_fragment_is_appended_whole() {
        let table = table(&[("L1", "P1,P2"), ("L2", "P5,P6"), ("L3", "P6,P7")]);
        let stitched = stitch_face_path("F1", &["L1", "L2", "L3"], &table);
        assert_eq!(stitched.point_ids, vec!["P1", "P2", "P5", "P6", "P7"]);
        assert_eq!(stitched.gaps, 1);
    }

    #[test]
    fn unknown_lines_are_skipped_and_first_resolved_line_seeds() {
        let table = table(&[("L1", "P1,P2"), ("L2", "P2,P3")]);
        let stitched = stitch_face_path("F1", &["missing", "L1", "L2"], &table);
        assert_eq!(stitched.point_ids, vec!["P1", "P2", "P3"]);
        assert_eq!(stitched.gaps, 0);
    }

    #[test]
    fn single_point_path_is_kept() {
        let mut stitcher = PathStitcher::new();
        stitcher.push(&["P1"]);
        assert_eq!(stitcher.finish(), vec!["P1"]);
    }

    fn roof_line(id: &str, kind: LineKind, ids: &[&str]) -> RoofLine {
        RoofLine {
            id: id.to_owned(),
            kind,
            path: ids
                .iter()
                .map(|id| Point {
                    id: (*id).to_owned(),
                    lng: 0.0,
                    lat: 0.0,
                    ele: 0.0,
                })
                .collect(),
        }
    }

    #[test]
    fn classification_matches_either_direction() {
        let lines = vec![
            roof_line("L1", LineKind::Eave, &["P1", "P2"]),
            roof_line("L2", LineKind::Ridge, &["P3", "P2"]),
        ];
        assert_eq!(edge_kind(&lines, "P1", "P2"), LineKind::Eave);
        assert_eq!(edge_kind(&lines, "P2", "P3"), LineKind::Ridge);
        assert_eq!(edge_kind(&lines, "P1", "P3"), LineKind::Unknown);
    }

    #[test]
    fn first_line_in_input_order_wins_ties() {
        let lines = vec![
            roof_line("L1", LineKind::Hip, &["P1", "P2"]),
            roof_line("L2", LineKind::Valley, &["P2", "P1"]),
        ];
        let matched = classify_edge(&lines, "P2", "P1").expect("match");
        assert_eq!(matched.id, "L1");
    }
}
