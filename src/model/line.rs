//! Lijnsegmenten: semantisch type, ruwe id-tabel en opgeloste paden.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::parse::records::{LineRecord, non_empty, split_id_list};

use super::point::{Point, PointRegistry};

/// Semantisch type van een lijnsegment.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineKind {
    Ridge,
    Hip,
    Valley,
    Rake,
    Eave,
    StepFlash,
    Wall,
    /// Een tag die niet herkend wordt; de originele tekst blijft bewaard.
    Other(String),
    /// Geen type opgegeven, of een edge zonder bijbehorende lijn.
    #[default]
    Unknown,
}

impl LineKind {
    /// Leest een `type`-attribuut. Alleen de exacte hoofdlettertags worden
    /// herkend; andere tekst blijft letterlijk bewaard in [`LineKind::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "" | "UNKNOWN" => Self::Unknown,
            "RIDGE" => Self::Ridge,
            "HIP" => Self::Hip,
            "VALLEY" => Self::Valley,
            "RAKE" => Self::Rake,
            "EAVE" => Self::Eave,
            "STEPFLASH" => Self::StepFlash,
            "WALL" => Self::Wall,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ridge => "RIDGE",
            Self::Hip => "HIP",
            Self::Valley => "VALLEY",
            Self::Rake => "RAKE",
            Self::Eave => "EAVE",
            Self::StepFlash => "STEPFLASH",
            Self::Wall => "WALL",
            Self::Other(tag) => tag,
            Self::Unknown => "UNKNOWN",
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Eaves en rakes vormen samen de dakrand.
    #[must_use]
    pub fn is_perimeter(&self) -> bool {
        matches!(self, Self::Eave | Self::Rake)
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LineKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Lijn-id → geordende punt-id's, gebruikt bij het stitchen van faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTable {
    paths: HashMap<String, Vec<String>>,
}

impl LineTable {
    /// Neemt alleen records met een id en een niet-leeg pad op.
    #[must_use]
    pub fn from_records(records: &[LineRecord]) -> Self {
        let mut paths = HashMap::with_capacity(records.len());
        for record in records {
            let (Some(id), Some(path)) = (non_empty(record.id.as_ref()), non_empty(record.path.as_ref()))
            else {
                continue;
            };
            let point_ids = split_id_list(path);
            if point_ids.is_empty() {
                continue;
            }
            paths.insert(id.to_owned(), point_ids);
        }
        Self { paths }
    }

    #[must_use]
    pub fn get(&self, line_id: &str) -> Option<&[String]> {
        self.paths.get(line_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Een lijnsegment met opgeloste punten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoofLine {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub path: Vec<Point>,
}

impl RoofLine {
    /// `true` als `a` en `b` opeenvolgende punten van deze lijn zijn, in
    /// willekeurige richting.
    #[must_use]
    pub fn connects(&self, a: &str, b: &str) -> bool {
        self.path.windows(2).any(|pair| {
            let (first, second) = (pair[0].id.as_str(), pair[1].id.as_str());
            (first == a && second == b) || (first == b && second == a)
        })
    }
}

/// Lost elk lijnrecord los op tot een [`RoofLine`] met minstens twee punten.
#[must_use]
pub fn resolve_lines(records: &[LineRecord], registry: &PointRegistry) -> Vec<RoofLine> {
    let lines: Vec<RoofLine> = records
        .iter()
        .filter_map(|record| {
            let path = non_empty(record.path.as_ref())?;
            let points = registry.resolve(&split_id_list(path));
            if points.len() < 2 {
                log::debug!(
                    "lijn {:?} heeft minder dan twee bekende punten en wordt overgeslagen",
                    record.id
                );
                return None;
            }
            Some(RoofLine {
                id: record.id.clone().unwrap_or_default(),
                kind: record
                    .kind
                    .as_deref()
                    .map_or(LineKind::Unknown, LineKind::from_tag),
                path: points,
            })
        })
        .collect();

    log::debug!("{} van {} lijnen opgelost", lines.len(), records.len());
    lines
}
