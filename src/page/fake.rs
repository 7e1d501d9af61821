//! In-memory page for controller tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::Page;
use crate::error::{DocketError, DocketResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeElement {
    pub attributes: HashMap<String, String>,
    pub class: String,
    pub style: String,
    pub text: String,
    pub parent: Option<usize>,
}

impl FakeElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}

#[derive(Debug, Default)]
pub struct FakePage {
    selectors: HashMap<String, usize>,
    elements: RefCell<Vec<FakeElement>>,
    styles: RefCell<Vec<(String, String)>>,
    path: String,
}

impl FakePage {
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    /// Register an element reachable through `selector`
    pub fn with_host(mut self, selector: &str, attributes: &[(&str, &str)]) -> Self {
        let element = FakeElement {
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..FakeElement::default()
        };
        let elements = self.elements.get_mut();
        elements.push(element);
        let id = elements.len() - 1;
        self.selectors.insert(selector.to_string(), id);
        self
    }

    pub fn element(&self, id: usize) -> FakeElement {
        self.elements.borrow()[id].clone()
    }

    /// Elements appended under `host`
    pub fn children(&self, host: usize) -> Vec<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.parent == Some(host))
            .cloned()
            .collect()
    }

    pub fn style_count(&self) -> usize {
        self.styles.borrow().len()
    }
}

impl Page for FakePage {
    type Node = usize;

    fn query(&self, selector: &str) -> DocketResult<Option<usize>> {
        if selector.contains("[[") {
            return Err(DocketError::Configuration(format!("invalid selector {:?}", selector)));
        }
        Ok(self.selectors.get(selector).copied())
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.elements.borrow()[*node].attributes.get(name).cloned()
    }

    fn has_element_id(&self, id: &str) -> bool {
        self.styles.borrow().iter().any(|(style_id, _)| style_id == id)
    }

    fn inject_style(&self, id: &str, css: &str) -> DocketResult<()> {
        self.styles.borrow_mut().push((id.to_string(), css.to_string()));
        Ok(())
    }

    fn append_badge(
        &self,
        host: &usize,
        class: &str,
        style: &str,
        text: &str,
    ) -> DocketResult<usize> {
        let mut elements = self.elements.borrow_mut();
        elements.push(FakeElement {
            class: class.to_string(),
            style: style.to_string(),
            text: text.to_string(),
            parent: Some(*host),
            ..FakeElement::default()
        });
        Ok(elements.len() - 1)
    }

    fn add_class(&self, node: &usize, class: &str) -> DocketResult<()> {
        let mut elements = self.elements.borrow_mut();
        let element = &mut elements[*node];
        if !element.has_class(class) {
            element.class.push(' ');
            element.class.push_str(class);
        }
        Ok(())
    }

    fn current_path(&self) -> DocketResult<String> {
        Ok(self.path.clone())
    }
}
