//! Totalen over het hele document.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{LineKind, RoofDocument};

/// Samenvatting zoals het measurements-paneel die toont.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofSummary {
    pub total_area: f64,
    pub average_pitch: f64,
    pub face_count: usize,
    pub line_count: usize,
    /// Eaves plus rakes.
    pub perimeter_lines: usize,
    pub ridge_lines: usize,
    pub valley_lines: usize,
    pub hip_lines: usize,
    pub lines_by_kind: BTreeMap<LineKind, usize>,
}

#[must_use]
pub fn summarize(document: &RoofDocument) -> RoofSummary {
    let total_area = document.faces.iter().map(|face| face.size).sum();
    let average_pitch = if document.faces.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let count = document.faces.len() as f64;
        document.faces.iter().map(|face| face.pitch).sum::<f64>() / count
    };

    let mut lines_by_kind: BTreeMap<LineKind, usize> = BTreeMap::new();
    for line in &document.lines {
        *lines_by_kind.entry(line.kind.clone()).or_default() += 1;
    }
    let count_of = |kind: &LineKind| lines_by_kind.get(kind).copied().unwrap_or_default();

    RoofSummary {
        total_area,
        average_pitch,
        face_count: document.faces.len(),
        line_count: document.lines.len(),
        perimeter_lines: document
            .lines
            .iter()
            .filter(|line| line.kind.is_perimeter())
            .count(),
        ridge_lines: count_of(&LineKind::Ridge),
        valley_lines: count_of(&LineKind::Valley),
        hip_lines: count_of(&LineKind::Hip),
        lines_by_kind,
    }
}
