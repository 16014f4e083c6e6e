// Error types for building a particle field.

use std::fmt;

use wasm_bindgen::JsValue;

// Errors that can occur while configuring or mounting a particle field.
#[derive(Debug)]
pub enum FieldError {
    // A configuration value is out of its accepted range.
    InvalidConfig(String),
    // The configuration JSON could not be parsed.
    ConfigParse(serde_json::Error),
    // A required host object (window, document, canvas, 2D context) is missing.
    MissingSurface(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidConfig(msg) => write!(f, "Invalid particle field config: {}", msg),
            FieldError::ConfigParse(e) => write!(f, "Failed to parse particle field config: {}", e),
            FieldError::MissingSurface(what) => write!(f, "No drawing surface: {}", what),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        FieldError::ConfigParse(e)
    }
}

impl From<FieldError> for JsValue {
    fn from(e: FieldError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
