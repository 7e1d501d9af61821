//! Badge Styles
//!
//! Stylesheet injected once per page plus per-badge class and inline style.

use crate::config::{Margin, Position};

/// Id of the injected `<style>` element
pub const STYLE_ELEMENT_ID: &str = "docket-styles";
pub const BADGE_CLASS: &str = "docket-pin";
/// Applied when the badge leaves
pub const REMOVED_CLASS: &str = "docket-removed";

pub const STYLESHEET: &str = r#".docket-pin {
  position: absolute; z-index: 10; min-width: 18px; height: 18px; padding: 0 5px;
  box-sizing: border-box; border-radius: 9px; background: #e74c3c; color: #fff;
  font: bold 11px/18px sans-serif; text-align: center; pointer-events: none;
  transition: transform 0.3s ease, opacity 0.3s ease;
}
.docket-pin.right-top { transform-origin: 100% 0; }
.docket-pin.right-bottom { transform-origin: 100% 100%; }
.docket-pin.left-bottom { transform-origin: 0 100%; }
.docket-pin.left-top { transform-origin: 0 0; }
.docket-pin.docket-removed { transform: scale(0); opacity: 0; }
"#;

/// `class` attribute of a badge at `position`
pub fn badge_class(position: Position) -> String {
    format!("{} {}", BADGE_CLASS, position.class_name())
}

/// Inline offsets of a badge at `position`
pub fn badge_style(position: Position, margin: Margin) -> String {
    let (horizontal, vertical) = position.edges();
    format!("{}: {}px; {}: {}px;", horizontal, margin.x, vertical, margin.y)
}
