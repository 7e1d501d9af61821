//! Widget Configuration
//!
//! Options passed from JavaScript, deserialized with serde.

use serde::{Deserialize, Serialize};

use crate::error::{DocketError, DocketResult};

/// Host attribute holding the comma-separated item list
pub const DEFAULT_ITEMS_ATTRIBUTE: &str = "data-posts";

/// Largest accepted `expires`, in either direction (about 10,000 years)
pub const MAX_EXPIRES_SECS: i64 = 10_000 * 365 * 86_400;

/// Badge corner relative to the host element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    RightTop,
    RightBottom,
    LeftBottom,
    LeftTop,
}

impl Position {
    /// Corner class applied next to `docket-pin`
    pub fn class_name(self) -> &'static str {
        match self {
            Position::RightTop => "right-top",
            Position::RightBottom => "right-bottom",
            Position::LeftBottom => "left-bottom",
            Position::LeftTop => "left-top",
        }
    }

    /// CSS properties the margin pair is applied to: (horizontal, vertical)
    pub fn edges(self) -> (&'static str, &'static str) {
        match self {
            Position::RightTop => ("right", "top"),
            Position::RightBottom => ("right", "bottom"),
            Position::LeftBottom => ("left", "bottom"),
            Position::LeftTop => ("left", "top"),
        }
    }
}

/// Pixel offsets from the badge corner, given as `[x, y]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Margin {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Margin {
    fn from((x, y): (i32, i32)) -> Self {
        Margin { x, y }
    }
}

impl From<Margin> for (i32, i32) {
    fn from(m: Margin) -> Self {
        (m.x, m.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocketConfig {
    /// Selector of the host element
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub margin: Margin,
    /// Cookie lifetime in seconds, 0 for a session cookie
    #[serde(default)]
    pub expires: i64,
    /// Visiting this path marks every listed item as seen
    #[serde(default)]
    pub target_page: Option<String>,
    /// Reserved, accepted but not acted on
    #[serde(default)]
    pub target_item: Option<String>,
    #[serde(default = "default_attribute")]
    pub attribute: String,
}

fn default_attribute() -> String {
    DEFAULT_ITEMS_ATTRIBUTE.to_string()
}

impl DocketConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            position: Position::default(),
            margin: Margin::default(),
            expires: 0,
            target_page: None,
            target_item: None,
            attribute: default_attribute(),
        }
    }

    pub fn validate(&self) -> DocketResult<()> {
        if self.target.trim().is_empty() {
            return Err(DocketError::Configuration(
                "you must specify the target element".to_string(),
            ));
        }
        if self.expires.abs() > MAX_EXPIRES_SECS {
            return Err(DocketError::Configuration(format!(
                "expires of {}s is out of range",
                self.expires
            )));
        }
        if self.attribute.trim().is_empty() {
            return Err(DocketError::Configuration(
                "items attribute name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
