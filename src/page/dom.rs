//! Browser DOM page

use web_sys::{Document, Element, Window};

use super::Page;
use crate::error::{DocketError, DocketResult};

pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub fn current() -> DocketResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| DocketError::Dom("no window available".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| DocketError::Dom("no document available".to_string()))?;
        Ok(Self::new(window, document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Page for DomPage {
    type Node = Element;

    fn query(&self, selector: &str) -> DocketResult<Option<Element>> {
        // querySelector only throws on a syntax error
        self.document.query_selector(selector).map_err(|e| {
            DocketError::Configuration(format!("invalid selector {:?}: {:?}", selector, e))
        })
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_element_id(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn inject_style(&self, id: &str, css: &str) -> DocketResult<()> {
        let style = self
            .document
            .create_element("style")
            .map_err(|e| DocketError::dom("create style", e))?;
        style.set_id(id);
        style.set_text_content(Some(css));

        let appended = match self.document.head() {
            Some(head) => head.append_child(&style),
            None => self
                .document
                .body()
                .ok_or_else(|| DocketError::Dom("document has no head or body".to_string()))?
                .append_child(&style),
        };
        appended.map_err(|e| DocketError::dom("append style", e))?;
        Ok(())
    }

    fn append_badge(
        &self,
        host: &Element,
        class: &str,
        style: &str,
        text: &str,
    ) -> DocketResult<Element> {
        let badge = self
            .document
            .create_element("div")
            .map_err(|e| DocketError::dom("create badge", e))?;
        badge.set_class_name(class);
        badge
            .set_attribute("style", style)
            .map_err(|e| DocketError::dom("style badge", e))?;
        badge.set_text_content(Some(text));
        host.append_child(&badge)
            .map_err(|e| DocketError::dom("append badge", e))?;
        Ok(badge)
    }

    fn add_class(&self, node: &Element, class: &str) -> DocketResult<()> {
        node.class_list()
            .add_1(class)
            .map_err(|e| DocketError::dom("add class", e))
    }

    fn current_path(&self) -> DocketResult<String> {
        self.window
            .location()
            .pathname()
            .map_err(|e| DocketError::dom("read location", e))
    }
}
