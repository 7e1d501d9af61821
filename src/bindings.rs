//! JavaScript API
//!
//! `new Docket({ target: "#news", targetPage: "/news" })` builds the widget
//! against the live document and initializes it immediately. A scheduled
//! removal still runs if the returned object is collected first.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;

use crate::config::DocketConfig;
use crate::cookie::DocumentCookieStore;
use crate::error::DocketError;
use crate::page::DomPage;
use crate::schedule::ScheduledTask;
use crate::widget::Docket;

type DomDocket = Docket<DomPage, DocumentCookieStore>;

#[wasm_bindgen(js_name = Docket)]
pub struct DocketWidget {
    inner: Rc<RefCell<DomDocket>>,
    removal: Option<ScheduledTask>,
}

#[wasm_bindgen(js_class = Docket)]
impl DocketWidget {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<DocketWidget, JsValue> {
        let config: DocketConfig = serde_wasm_bindgen::from_value(options)
            .map_err(|e| DocketError::Configuration(e.to_string()))?;
        let page = DomPage::current()?;
        let cookies = DocumentCookieStore::current()?;

        let mut docket = Docket::new(config, page, cookies)?;
        docket.initialize()?;
        let pending = docket.pending_removal();
        let document = docket.page().document().clone();
        let inner = Rc::new(RefCell::new(docket));

        let removal = match pending {
            Some(task) => {
                let target = Rc::clone(&inner);
                let scheduled =
                    ScheduledTask::after_interactive(&document, task.delay, move || {
                        let result = target.borrow_mut().remove();
                        if let Err(err) = result {
                            warn!("[docket] removal failed: {}", err);
                        }
                    })?;
                Some(scheduled)
            }
            None => None,
        };

        Ok(Self { inner, removal })
    }

    /// Number of unseen items
    pub fn count(&self) -> u32 {
        u32::try_from(self.inner.borrow().unseen_count()).unwrap_or(u32::MAX)
    }

    pub fn state(&self) -> String {
        self.inner.borrow().state().as_str().to_string()
    }

    /// Remove the badge now, skipping any pending delay
    pub fn remove(&mut self) -> Result<bool, JsValue> {
        if let Some(task) = self.removal.take() {
            task.cancel();
        }
        let removed = self.inner.borrow_mut().remove()?;
        Ok(removed)
    }

    /// Stop a pending removal. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        if let Some(task) = self.removal.take() {
            task.cancel();
        }
        self.inner.borrow_mut().cancel_removal()
    }
}
