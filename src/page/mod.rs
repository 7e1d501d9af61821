//! Page Access
//!
//! The handful of DOM operations the widget needs. `DomPage` talks to the
//! browser; tests use an in-memory page.

mod dom;
#[cfg(test)]
pub(crate) mod fake;

use crate::error::DocketResult;

pub use dom::DomPage;

pub trait Page {
    /// Handle to an element owned by the page
    type Node: Clone;

    /// First element matching `selector`
    fn query(&self, selector: &str) -> DocketResult<Option<Self::Node>>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_element_id(&self, id: &str) -> bool;

    /// Append a `<style id=...>` element holding `css`
    fn inject_style(&self, id: &str, css: &str) -> DocketResult<()>;

    /// Create a `div` under `host` and return it
    fn append_badge(
        &self,
        host: &Self::Node,
        class: &str,
        style: &str,
        text: &str,
    ) -> DocketResult<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str) -> DocketResult<()>;

    /// Path of the current location, as reported by the browser
    fn current_path(&self) -> DocketResult<String>;
}
