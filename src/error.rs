use thiserror::Error;

use crate::recipe_core::RowId;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("no ingredient row with id {0}")]
    UnknownRow(RowId),

    #[error("component relay is not available: {0}")]
    RelayUnavailable(String),

    #[error("no note has been received from the host yet")]
    NoNote,

    #[error("host boundary conversion failed: {0}")]
    Js(String),
}

impl From<serde_wasm_bindgen::Error> for EditorError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::Js(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
