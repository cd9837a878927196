//! Punten en de registry van punt-id naar coördinaat.

use std::collections::HashMap;

use serde::Serialize;

use crate::parse::number::{parse_float, parse_lenient_float};
use crate::parse::records::{PointRecord, non_empty};

/// Een punt in het document-lokale assenstelsel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub id: String,
    /// Geprojecteerde X.
    pub lng: f64,
    /// Geprojecteerde Y.
    pub lat: f64,
    /// Hoogte.
    pub ele: f64,
}

/// Gedecodeerde coördinaat zonder id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
    pub ele: f64,
}

/// Uitkomst van één decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded {
    /// Het record gebruikt deze codering niet; de volgende decoder is aan de beurt.
    NotApplicable,
    /// De codering is aanwezig maar onleesbaar; het punt vervalt.
    Unusable,
    Coordinate(Coordinate),
}

impl Decoded {
    #[must_use]
    pub fn coordinate(self) -> Option<Coordinate> {
        match self {
            Self::Coordinate(coordinate) => Some(coordinate),
            Self::NotApplicable | Self::Unusable => None,
        }
    }
}

pub type CoordinateDecoder = fn(&PointRecord) -> Decoded;

/// Alle ondersteunde coderingen, in volgorde van prioriteit.
pub const DECODERS: [CoordinateDecoder; 3] = [decode_data, decode_xyz, decode_lat_long];

/// Gecombineerd `data="X,Y[,Z]"` veld. Zodra het veld bestaat is dit de enige
/// codering die telt; zonder geldige X en Y is het punt onbruikbaar.
#[must_use]
pub fn decode_data(record: &PointRecord) -> Decoded {
    let Some(data) = record.data.as_deref() else {
        return Decoded::NotApplicable;
    };
    let mut parts = data.split(',');
    let (Some(lng), Some(lat)) = (
        parts.next().and_then(parse_float),
        parts.next().and_then(parse_float),
    ) else {
        return Decoded::Unusable;
    };
    let ele = parts.next().and_then(parse_float).unwrap_or(0.0);
    Decoded::Coordinate(Coordinate { lng, lat, ele })
}

/// Losse `x`/`y`/`z` attributen, met `lng`/`lat`/`ele` als alias.
#[must_use]
pub fn decode_xyz(record: &PointRecord) -> Decoded {
    if record.x.is_none() && record.y.is_none() {
        return Decoded::NotApplicable;
    }
    Decoded::Coordinate(Coordinate {
        lng: lenient(first_of(&[&record.x, &record.lng])),
        lat: lenient(first_of(&[&record.y, &record.lat])),
        ele: lenient(first_of(&[&record.z, &record.ele])),
    })
}

/// Geografische `lat`/`long` attributen; `lng` telt alleen als alias voor
/// `long`, niet als trigger.
#[must_use]
pub fn decode_lat_long(record: &PointRecord) -> Decoded {
    if record.lat.is_none() && record.long.is_none() {
        return Decoded::NotApplicable;
    }
    Decoded::Coordinate(Coordinate {
        lng: lenient(first_of(&[&record.long, &record.lng])),
        lat: lenient(first_of(&[&record.lat])),
        ele: lenient(first_of(&[&record.ele, &record.z])),
    })
}

/// De eerste decoder die van toepassing is beslist.
#[must_use]
pub fn decode_coordinate(record: &PointRecord) -> Option<Coordinate> {
    DECODERS
        .iter()
        .map(|decode| decode(record))
        .find(|decoded| *decoded != Decoded::NotApplicable)
        .and_then(Decoded::coordinate)
}

fn first_of<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|candidate| non_empty(Option::as_ref(*candidate)))
}

fn lenient(value: Option<&str>) -> f64 {
    value.map_or(0.0, parse_lenient_float)
}

/// Lookup van punt-id naar [`Point`] voor één document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointRegistry {
    points: HashMap<String, Point>,
}

impl PointRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bouwt de registry op. Records zonder id of bruikbare coördinaat
    /// worden overgeslagen; bij dubbele id's wint het laatste record.
    #[must_use]
    pub fn from_records(records: &[PointRecord]) -> Self {
        let mut registry = Self::new();
        let mut dropped = 0usize;

        for record in records {
            let Some(id) = non_empty(record.id.as_ref()) else {
                dropped += 1;
                continue;
            };
            let Some(coordinate) = decode_coordinate(record) else {
                dropped += 1;
                continue;
            };
            registry.insert(Point {
                id: id.to_owned(),
                lng: coordinate.lng,
                lat: coordinate.lat,
                ele: coordinate.ele,
            });
        }

        if dropped > 0 {
            log::debug!("{dropped} punt(en) zonder id of coördinaat overgeslagen");
        }
        registry
    }

    pub fn insert(&mut self, point: Point) {
        if let Some(previous) = self.points.insert(point.id.clone(), point) {
            log::debug!("dubbel punt-id {}, laatste definitie wint", previous.id);
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Point> {
        self.points.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertaalt id's naar punten; onbekende id's vallen weg, volgorde blijft.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Point> {
        ids.iter()
            .filter_map(|id| self.get(id.as_ref()).cloned())
            .collect()
    }
}
