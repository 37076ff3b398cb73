use std::collections::HashMap;

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{COMPONENT_UUID, CONTENT_MODE, EDITOR_AREA};
use crate::error::{EditorError, Result};
use crate::recipe_doc::RecipeDocument;

#[wasm_bindgen]
extern "C" {
    /// The host's component relay, loaded by the page before this module.
    #[wasm_bindgen(js_namespace = window, js_name = Component)]
    pub type ComponentRelay;

    #[wasm_bindgen(constructor, js_namespace = window, js_class = "Component", catch)]
    fn new(options: &JsValue) -> std::result::Result<ComponentRelay, JsValue>;
}

/// Where persisted content goes.
pub trait NoteHost {
    fn write_note(&mut self, doc: &RecipeDocument) -> Result<()>;
}

#[derive(Serialize)]
struct RelayOptions<'a> {
    uuid: &'a str,
    areas: HashMap<&'a str, AreaOptions<'a>>,
}

#[derive(Serialize)]
struct AreaOptions<'a> {
    mode: &'a str,
}

/// A note object handed over by the relay. Content lives at `note.content.json`.
#[derive(Clone, Debug)]
pub struct RelayNote {
    note: JsValue,
}

impl RelayNote {
    pub fn new(note: JsValue) -> Self {
        Self { note }
    }

    fn content(&self) -> Result<JsValue> {
        let content = Reflect::get(&self.note, &JsValue::from_str("content")).map_err(js_error)?;
        if content.is_object() {
            Ok(content)
        } else {
            Err(EditorError::Js("note has no content object".to_string()))
        }
    }

    pub fn content_json(&self) -> Result<Option<serde_json::Value>> {
        let json = Reflect::get(&self.content()?, &JsValue::from_str("json")).map_err(js_error)?;
        if json.is_undefined() || json.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_wasm_bindgen::from_value(json)?))
    }

    pub fn set_content_json(&self, doc: &RecipeDocument) -> Result<()> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let value = doc.serialize(&serializer)?;
        Reflect::set(&self.content()?, &JsValue::from_str("json"), &value).map_err(js_error)?;
        Ok(())
    }
}

fn js_error(value: JsValue) -> EditorError {
    EditorError::Js(format!("{value:?}"))
}

/// Registers the editor with the relay. `on_note` runs each time the host
/// delivers a note.
pub fn register(on_note: impl FnMut(RelayNote) + 'static) -> Result<ComponentRelay> {
    let options = RelayOptions {
        uuid: COMPONENT_UUID,
        areas: HashMap::from([(EDITOR_AREA, AreaOptions { mode: CONTENT_MODE })]),
    };
    let options = options.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;

    let mut on_note = on_note;
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |note: JsValue| {
        on_note(RelayNote::new(note));
    });
    let content = Object::new();
    Reflect::set(&content, &JsValue::from_str("handler"), handler.as_ref()).map_err(js_error)?;
    handler.forget();

    let area = Reflect::get(&options, &JsValue::from_str("areas"))
        .and_then(|areas| Reflect::get(&areas, &JsValue::from_str(EDITOR_AREA)))
        .map_err(js_error)?;
    Reflect::set(&area, &JsValue::from_str("content"), &content).map_err(js_error)?;

    ComponentRelay::new(&options).map_err(|err| EditorError::RelayUnavailable(format!("{err:?}")))
}

/// Browser-side host: the relay plus the note it most recently delivered.
#[derive(Default)]
pub struct ComponentHost {
    relay: Option<ComponentRelay>,
    note: Option<RelayNote>,
}

impl ComponentHost {
    pub fn set_relay(&mut self, relay: ComponentRelay) {
        self.relay = Some(relay);
    }

    pub fn is_connected(&self) -> bool {
        self.relay.is_some()
    }

    pub fn attach(&mut self, note: RelayNote) {
        self.note = Some(note);
    }
}

impl NoteHost for ComponentHost {
    fn write_note(&mut self, doc: &RecipeDocument) -> Result<()> {
        self.note
            .as_ref()
            .ok_or(EditorError::NoNote)?
            .set_content_json(doc)
    }
}
