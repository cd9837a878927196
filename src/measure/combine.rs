//! Optellen en aftrekken van twee geselecteerde faces.

use std::str::FromStr;

use serde::Serialize;

use super::MeasureError;
use super::edges::{FaceMeasurement, LineTotals};

/// Bewerking tussen twee faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineOp {
    Add,
    Subtract,
}

impl FromStr for CombineOp {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(Self::Add),
            "subtract" | "sub" | "-" | "\u{2212}" => Ok(Self::Subtract),
            _ => Err(MeasureError::UnknownOperator(trimmed.to_owned())),
        }
    }
}

/// Resultaat van [`combine`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedMeasurement {
    pub op: CombineOp,
    pub area: f64,
    pub pitch: f64,
    pub line_totals: LineTotals,
}

/// Combineert twee face-metingen.
///
/// - `Add`: oppervlakte opgeteld, helling als oppervlakte-gewogen gemiddelde
///   afgerond op een geheel getal, lijntotalen per type opgeteld.
/// - `Subtract`: oppervlakte en lijntotalen per type `max(0, a - b)`; de
///   helling van `first` blijft ongewijzigd.
#[must_use]
pub fn combine(first: &FaceMeasurement, second: &FaceMeasurement, op: CombineOp) -> CombinedMeasurement {
    match op {
        CombineOp::Add => CombinedMeasurement {
            op,
            area: first.area + second.area,
            pitch: weighted_pitch(first, second),
            line_totals: merge_totals(&first.line_totals, &second.line_totals, |a, b| a + b),
        },
        CombineOp::Subtract => CombinedMeasurement {
            op,
            area: (first.area - second.area).max(0.0),
            pitch: first.pitch,
            line_totals: merge_totals(&first.line_totals, &second.line_totals, |a, b| {
                (a - b).max(0.0)
            }),
        },
    }
}

fn weighted_pitch(first: &FaceMeasurement, second: &FaceMeasurement) -> f64 {
    let total = first.area + second.area;
    if total == 0.0 {
        // No area to weight by.
        return f64::midpoint(first.pitch, second.pitch).round();
    }
    ((first.pitch * first.area + second.pitch * second.area) / total).round()
}

fn merge_totals(first: &LineTotals, second: &LineTotals, apply: impl Fn(f64, f64) -> f64) -> LineTotals {
    first
        .keys()
        .chain(second.keys())
        .map(|kind| {
            let a = first.get(kind).copied().unwrap_or_default();
            let b = second.get(kind).copied().unwrap_or_default();
            (kind.clone(), apply(a, b))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CombineOp, combine};
    use crate::measure::edges::{FaceMeasurement, LineTotals};
    use crate::measure::MeasureError;
    use crate::model::LineKind;

    fn measurement(area: f64, pitch: f64, totals: &[(LineKind, f64)]) -> FaceMeasurement {
        FaceMeasurement {
            face_id: String::new(),
            designator: String::new(),
            area,
            pitch,
            orientation: "0".to_owned(),
            perimeter: 0.0,
            edges: Vec::new(),
            line_totals: totals.iter().cloned().collect::<LineTotals>(),
        }
    }

    #[test]
    fn add_weights_pitch_by_area() {
        let a = measurement(100.0, 6.0, &[(LineKind::Ridge, 10.0)]);
        let b = measurement(50.0, 4.0, &[(LineKind::Ridge, 4.0)]);
        let combined = combine(&a, &b, CombineOp::Add);
        assert_eq!(combined.area, 150.0);
        assert_eq!(combined.pitch, 5.0);
        assert_eq!(combined.line_totals.get(&LineKind::Ridge), Some(&14.0));
    }

    #[test]
    fn subtract_keeps_first_pitch() {
        let a = measurement(100.0, 6.0, &[(LineKind::Ridge, 10.0)]);
        let b = measurement(50.0, 4.0, &[(LineKind::Ridge, 4.0)]);
        let combined = combine(&a, &b, CombineOp::Subtract);
        assert_eq!(combined.area, 50.0);
        assert_eq!(combined.pitch, 6.0);
        assert_eq!(combined.line_totals.get(&LineKind::Ridge), Some(&6.0));
    }

    #[test]
    fn subtract_never_goes_negative() {
        let a = measurement(20.0, 6.0, &[(LineKind::Eave, 3.0)]);
        let b = measurement(50.0, 4.0, &[(LineKind::Eave, 8.0), (LineKind::Valley, 2.0)]);
        let combined = combine(&a, &b, CombineOp::Subtract);
        assert_eq!(combined.area, 0.0);
        assert_eq!(combined.line_totals.get(&LineKind::Eave), Some(&0.0));
        assert_eq!(combined.line_totals.get(&LineKind::Valley), Some(&0.0));
    }

    #[test]
    fn kinds_from_either_face_pass_through_on_add() {
        let a = measurement(10.0, 6.0, &[(LineKind::Hip, 3.0)]);
        let b = measurement(10.0, 6.0, &[(LineKind::Rake, 2.5)]);
        let combined = combine(&a, &b, CombineOp::Add);
        assert_eq!(combined.line_totals.len(), 2);
        assert_eq!(combined.line_totals.get(&LineKind::Hip), Some(&3.0));
        assert_eq!(combined.line_totals.get(&LineKind::Rake), Some(&2.5));

        let reduced = combine(&a, &b, CombineOp::Subtract);
        assert_eq!(reduced.line_totals.get(&LineKind::Hip), Some(&3.0));
    }

    #[test]
    fn zero_area_add_uses_plain_mean() {
        let a = measurement(0.0, 7.0, &[]);
        let b = measurement(0.0, 4.0, &[]);
        assert_eq!(combine(&a, &b, CombineOp::Add).pitch, 6.0);
    }

    #[test]
    fn operators_parse_from_text() {
        assert_eq!("add".parse::<CombineOp>(), Ok(CombineOp::Add));
        assert_eq!(" Subtract ".parse::<CombineOp>(), Ok(CombineOp::Subtract));
        assert_eq!("-".parse::<CombineOp>(), Ok(CombineOp::Subtract));
        assert_eq!(
            "multiply".parse::<CombineOp>(),
            Err(MeasureError::UnknownOperator("multiply".to_owned()))
        );
    }
}
