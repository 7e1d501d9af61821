//! Docket
//!
//! Badge widget that counts the items on a page the visitor has not seen
//! yet, remembering seen items in a cookie.

pub mod badge;
pub mod bindings;
pub mod config;
pub mod cookie;
pub mod error;
pub mod items;
pub mod location;
pub mod page;
pub mod schedule;
pub mod styles;
pub mod widget;

use wasm_bindgen::prelude::*;

pub use config::{DocketConfig, Margin, Position};
pub use cookie::{
    CookieOptions, CookieStore, DocumentCookieStore, Expiry, MemoryCookieStore, SameSite,
};
pub use error::{DocketError, DocketResult};
pub use items::{ItemList, SeenSet};
pub use page::{DomPage, Page};
pub use widget::{Docket, DocketState};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_logger::init(log::LevelFilter::Info) {
        // another logger owns the `log` facade
        web_sys::console::warn_1(&format!("[docket] logger not installed: {}", err).into());
    }
}
