// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub String);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for PortId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PortId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PortId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port (edge target only)
    Input,
    /// Output port (edge source only)
    Output,
}

/// Kind of data that flows through a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortCategory {
    /// Still image
    Image,
    /// Video clip
    Video,
    /// Audio clip
    Audio,
    /// Plain text / prompt
    Text,
    /// Style reference
    Style,
    /// Identity reference (face, character)
    Identity,
    /// 3-D mesh
    Mesh3d,
    /// Wildcard, compatible with every category
    Any,
}

impl PortCategory {
    /// All categories, wildcard last
    pub const ALL: [PortCategory; 8] = [
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::Text,
        Self::Style,
        Self::Identity,
        Self::Mesh3d,
        Self::Any,
    ];

    /// Get the color for this category (for edge and port rendering)
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Image => [100, 150, 220],
            Self::Video => [200, 100, 200],
            Self::Audio => [80, 200, 120],
            Self::Text => [220, 190, 90],
            Self::Style => [230, 130, 80],
            Self::Identity => [200, 80, 80],
            Self::Mesh3d => [90, 200, 200],
            Self::Any => [150, 150, 150],
        }
    }

    /// Whether the wildcard category
    pub fn is_wildcard(self) -> bool {
        self == Self::Any
    }

    /// Check if an output of this category may feed an input of `target`.
    ///
    /// Strict mode only accepts identical categories or the wildcard. Relaxed
    /// mode additionally lets an image feed the reference inputs that consume
    /// images (style and identity).
    pub fn can_feed(self, target: PortCategory, strict: bool) -> bool {
        if self.is_wildcard() || target.is_wildcard() || self == target {
            return true;
        }
        if strict {
            return false;
        }

        matches!(
            (self, target),
            (Self::Image, Self::Style) | (Self::Image, Self::Identity)
        )
    }
}

impl fmt::Display for PortCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Style => "style",
            Self::Identity => "identity",
            Self::Mesh3d => "mesh3d",
            Self::Any => "any",
        };
        f.write_str(name)
    }
}

/// A port on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port name
    #[serde(default)]
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Data category
    pub category: PortCategory,
    /// Whether more than one edge may terminate here
    #[serde(default)]
    pub accepts_multiple: bool,
}

impl Port {
    /// Create a new input port. Inputs take a single edge by default.
    pub fn input(id: impl Into<PortId>, category: PortCategory) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            direction: PortDirection::Input,
            category,
            accepts_multiple: false,
        }
    }

    /// Create a new output port. Outputs fan out by default.
    pub fn output(id: impl Into<PortId>, category: PortCategory) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            direction: PortDirection::Output,
            category,
            accepts_multiple: true,
        }
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether the port accepts several edges
    pub fn with_multiple(mut self, accepts_multiple: bool) -> Self {
        self.accepts_multiple = accepts_multiple;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_wildcard_in_both_modes() {
        for strict in [false, true] {
            for category in PortCategory::ALL {
                assert!(category.can_feed(category, strict));
                assert!(category.can_feed(PortCategory::Any, strict));
                assert!(PortCategory::Any.can_feed(category, strict));
            }
        }
    }

    #[test]
    fn test_reference_inputs_only_relaxed() {
        assert!(PortCategory::Image.can_feed(PortCategory::Style, false));
        assert!(PortCategory::Image.can_feed(PortCategory::Identity, false));
        assert!(!PortCategory::Image.can_feed(PortCategory::Style, true));
        // One-way: a style output is not an image
        assert!(!PortCategory::Style.can_feed(PortCategory::Image, false));
    }

    #[test]
    fn test_unrelated_categories_rejected() {
        assert!(!PortCategory::Image.can_feed(PortCategory::Text, false));
        assert!(!PortCategory::Audio.can_feed(PortCategory::Video, false));
        assert!(!PortCategory::Mesh3d.can_feed(PortCategory::Image, true));
    }

    #[test]
    fn test_port_defaults() {
        let input = Port::input("in", PortCategory::Text);
        let output = Port::output("out", PortCategory::Text);
        assert_eq!(input.direction, PortDirection::Input);
        assert!(!input.accepts_multiple);
        assert!(output.accepts_multiple);
        assert_eq!(input.name, "in");
        assert!(input.with_multiple(true).accepts_multiple);
    }

    #[test]
    fn test_colors_distinct() {
        let mut colors: Vec<[u8; 3]> =
            PortCategory::ALL.into_iter().map(PortCategory::color).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), PortCategory::ALL.len());
    }
}
