//! Widget Errors

use wasm_bindgen::JsValue;

/// Common result type for widget operations
pub type DocketResult<T> = Result<T, DocketError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocketError {
    /// Bad or unresolvable options, raised at construction
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("dom error: {0}")]
    Dom(String),
    #[error("cookie error: {0}")]
    Cookie(String),
}

impl DocketError {
    /// Wrap a value thrown by a browser API
    pub fn dom(context: &str, err: JsValue) -> Self {
        DocketError::Dom(format!("{}: {:?}", context, err))
    }
}

impl From<DocketError> for JsValue {
    fn from(err: DocketError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
