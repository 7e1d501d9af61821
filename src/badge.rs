//! Badge Handle
//!
//! The counter element pinned to the host. The handle is the only reference
//! to the node; disposing it starts the exit transition.

use crate::config::{Margin, Position};
use crate::error::DocketResult;
use crate::page::Page;
use crate::styles::{badge_class, badge_style, REMOVED_CLASS, STYLESHEET, STYLE_ELEMENT_ID};

/// Inject the shared stylesheet unless the page already has it.
/// Returns whether a new element was added.
pub fn ensure_stylesheet<P: Page>(page: &P) -> DocketResult<bool> {
    if page.has_element_id(STYLE_ELEMENT_ID) {
        return Ok(false);
    }
    page.inject_style(STYLE_ELEMENT_ID, STYLESHEET)?;
    Ok(true)
}

#[derive(Debug)]
pub struct Badge<N> {
    node: N,
    count: usize,
}

impl<N: Clone> Badge<N> {
    /// Append a badge showing `count` to `host`
    pub fn render<P>(
        page: &P,
        host: &N,
        position: Position,
        margin: Margin,
        count: usize,
    ) -> DocketResult<Self>
    where
        P: Page<Node = N>,
    {
        let node = page.append_badge(
            host,
            &badge_class(position),
            &badge_style(position, margin),
            &count.to_string(),
        )?;
        Ok(Self { node, count })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    /// Switch the badge to its removed state
    pub fn dispose<P>(self, page: &P) -> DocketResult<()>
    where
        P: Page<Node = N>,
    {
        page.add_class(&self.node, REMOVED_CLASS)
    }
}
