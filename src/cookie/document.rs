//! `document.cookie` backed store

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use super::CookieStore;
use crate::error::{DocketError, DocketResult};

pub struct DocumentCookieStore {
    document: HtmlDocument,
}

impl DocumentCookieStore {
    pub fn new(document: HtmlDocument) -> Self {
        Self { document }
    }

    /// Store for the current window's document
    pub fn current() -> DocketResult<Self> {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .ok_or_else(|| DocketError::Dom("no document available".to_string()))?;
        let document = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| DocketError::Dom("document is not an HTML document".to_string()))?;
        Ok(Self::new(document))
    }
}

impl CookieStore for DocumentCookieStore {
    fn raw(&self) -> DocketResult<String> {
        self.document
            .cookie()
            .map_err(|e| DocketError::dom("read document.cookie", e))
    }

    fn set_raw(&mut self, cookie: &str) -> DocketResult<()> {
        self.document
            .set_cookie(cookie)
            .map_err(|e| DocketError::dom("write document.cookie", e))
    }
}
