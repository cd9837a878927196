//! Getypeerde tussenrecords voor de ROOF-sectie van een export.
//!
//! De reconstructie in [`crate::model`] werkt uitsluitend op deze records en
//! kent de XML-structuur zelf niet.

use serde::Deserialize;

/// Alle records uit één `<ROOF>`-sectie, in documentvolgorde.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoofRecords {
    #[serde(default, rename = "POINTS")]
    pub points: PointsSection,
    #[serde(default, rename = "LINES")]
    pub lines: LinesSection,
    #[serde(default, rename = "FACES")]
    pub faces: FacesSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PointsSection {
    #[serde(default, rename = "POINT")]
    pub points: Vec<PointRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinesSection {
    #[serde(default, rename = "LINE")]
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FacesSection {
    #[serde(default, rename = "FACE")]
    pub faces: Vec<FaceRecord>,
}

/// Een `<POINT>` met één van de ondersteunde coördinaat-coderingen.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PointRecord {
    #[serde(default, rename = "@id")]
    pub id: Option<String>,
    /// Gecombineerd veld `"X,Y[,Z]"`.
    #[serde(default, rename = "@data")]
    pub data: Option<String>,
    #[serde(default, rename = "@x")]
    pub x: Option<String>,
    #[serde(default, rename = "@y")]
    pub y: Option<String>,
    #[serde(default, rename = "@z")]
    pub z: Option<String>,
    #[serde(default, rename = "@lat")]
    pub lat: Option<String>,
    #[serde(default, rename = "@lng")]
    pub lng: Option<String>,
    #[serde(default, rename = "@long")]
    pub long: Option<String>,
    #[serde(default, rename = "@ele")]
    pub ele: Option<String>,
}

/// Een `<LINE>`: getypeerd segment over een lijst punt-id's.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LineRecord {
    #[serde(default, rename = "@id")]
    pub id: Option<String>,
    #[serde(default, rename = "@type")]
    pub kind: Option<String>,
    /// Kommagescheiden punt-id's.
    #[serde(default, rename = "@path")]
    pub path: Option<String>,
}

/// Een `<FACE>` met zijn polygonen.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaceRecord {
    #[serde(default, rename = "@id")]
    pub id: Option<String>,
    #[serde(default, rename = "@designator")]
    pub designator: Option<String>,
    #[serde(default, rename = "@type")]
    pub kind: Option<String>,
    #[serde(default, rename = "POLYGON")]
    pub polygons: Vec<PolygonRecord>,
}

impl FaceRecord {
    /// Alleen het eerste polygoon beschrijft de face.
    #[must_use]
    pub fn polygon(&self) -> Option<&PolygonRecord> {
        self.polygons.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PolygonRecord {
    #[serde(default, rename = "@id")]
    pub id: Option<String>,
    /// Kommagescheiden *lijn*-id's.
    #[serde(default, rename = "@path")]
    pub path: Option<String>,
    #[serde(default, rename = "@orientation")]
    pub orientation: Option<String>,
    #[serde(default, rename = "@pitch")]
    pub pitch: Option<String>,
    #[serde(default, rename = "@size")]
    pub size: Option<String>,
}

/// Splitst een kommagescheiden id-lijst; lege items vallen weg.
#[must_use]
pub fn split_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Geeft een getrimde, niet-lege attribuutwaarde terug.
#[must_use]
pub fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}
