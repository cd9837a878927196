#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod measure;
pub mod model;
pub mod parse;

use std::fmt;

use measure::{CombineOp, CombinedMeasurement, FaceMeasurement, MeasureError, RoofSummary};
use model::RoofDocument;
use parse::{ParseOptions, ParseResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), wasm_bindgen::JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| wasm_bindgen::JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

/// Publieke entry point voor de presentatielaag.
///
/// Houdt hooguit één geladen document vast; elke `load_xml` vervangt het
/// vorige document alleen als het parsen slaagt.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct Engine {
    document: Option<RoofDocument>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectionExport {
    face_count: usize,
    area: f64,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Engine {
        Engine { document: None }
    }

    /// Geeft terug of er een document geladen is.
    #[wasm_bindgen]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Laad een roof-export. Een document zonder faces geldt als fout.
    #[wasm_bindgen]
    pub fn load_xml(&mut self, xml: &str) -> Result<(), JsValue> {
        self.load_document(xml).map_err(to_js_error)?;
        Ok(())
    }

    /// Het volledige model (`faces` en `lines`).
    #[wasm_bindgen]
    pub fn get_document(&self) -> Result<JsValue, JsValue> {
        to_js(self.loaded()?)
    }

    /// Totalen voor het measurements-paneel.
    #[wasm_bindgen]
    pub fn get_summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.summary().map_err(to_js_error)?)
    }

    /// Faces op aflopende oppervlakte, voor de tekenvolgorde.
    #[wasm_bindgen]
    pub fn get_draw_order(&self) -> Result<JsValue, JsValue> {
        let document = self.loaded()?;
        let ids: Vec<&str> = document
            .faces_by_size_desc()
            .into_iter()
            .map(|face| face.id.as_str())
            .collect();
        to_js(&ids)
    }

    /// Omhullende van het model, of `null` voor een leeg model.
    #[wasm_bindgen]
    pub fn get_bounds(&self) -> Result<JsValue, JsValue> {
        to_js(&self.loaded()?.bounds())
    }

    /// Labelposities (zwaartepunten) per face.
    #[wasm_bindgen]
    pub fn get_face_labels(&self) -> Result<JsValue, JsValue> {
        to_js(&self.loaded()?.face_labels())
    }

    /// Edges, lengtes en totalen per lijntype van één face.
    #[wasm_bindgen]
    pub fn get_face_measurement(&self, face_id: &str) -> Result<JsValue, JsValue> {
        to_js(&self.face_measurement(face_id).map_err(to_js_error)?)
    }

    /// Totale oppervlakte van een selectie face-id's.
    #[wasm_bindgen]
    pub fn get_selection_area(&self, face_ids: Vec<String>) -> Result<JsValue, JsValue> {
        let document = self.loaded()?;
        let face_count = document
            .faces
            .iter()
            .filter(|face| face_ids.contains(&face.id))
            .count();
        to_js(&SelectionExport {
            face_count,
            area: measure::selection_area(document, &face_ids),
        })
    }

    /// Combineert twee faces met `"add"` of `"subtract"`.
    #[wasm_bindgen]
    pub fn combine_faces(&self, first_id: &str, second_id: &str, op: &str) -> Result<JsValue, JsValue> {
        let op: CombineOp = op.parse().map_err(to_js_error)?;
        to_js(&self.combine(first_id, second_id, op).map_err(to_js_error)?)
    }
}

impl Engine {
    /// Parse `xml` en bewaar het resultaat.
    pub fn load_document(&mut self, xml: &str) -> ParseResult<&RoofDocument> {
        let document = parse::parse_with_options(xml, ParseOptions::strict())?;
        log::debug!(
            "Document geladen: {} faces, {} lijnen",
            document.faces.len(),
            document.lines.len()
        );
        Ok(self.document.insert(document))
    }

    #[must_use]
    pub fn document(&self) -> Option<&RoofDocument> {
        self.document.as_ref()
    }

    pub fn summary(&self) -> Result<RoofSummary, EngineError> {
        let document = self.document.as_ref().ok_or(EngineError::NotLoaded)?;
        Ok(measure::summarize(document))
    }

    pub fn face_measurement(&self, face_id: &str) -> Result<FaceMeasurement, EngineError> {
        let document = self.document.as_ref().ok_or(EngineError::NotLoaded)?;
        Ok(document.measure_face(face_id)?)
    }

    pub fn combine(
        &self,
        first_id: &str,
        second_id: &str,
        op: CombineOp,
    ) -> Result<CombinedMeasurement, EngineError> {
        let first = self.face_measurement(first_id)?;
        let second = self.face_measurement(second_id)?;
        Ok(measure::combine(&first, &second, op))
    }

    fn loaded(&self) -> Result<&RoofDocument, JsValue> {
        self.document
            .as_ref()
            .ok_or_else(|| to_js_error(EngineError::NotLoaded))
    }
}

/// Fouten van de [`Engine`] buiten het parsen zelf.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("er is geen roof-export geladen")]
    NotLoaded,
    #[error(transparent)]
    Measure(#[from] MeasureError),
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen::JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
