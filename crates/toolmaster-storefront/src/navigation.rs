//! In-page anchor navigation.

use std::collections::HashMap;

/// Layout facts needed to scroll to a section.
pub trait PageLayout {
    /// Vertical offset of the element with this id, if it exists.
    fn offset_of(&self, id: &str) -> Option<f64>;

    /// Height of the fixed navbar, 0 when there is none.
    fn navbar_height(&self) -> f64;
}

/// A layout described up front, e.g. measured once after render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticLayout {
    offsets: HashMap<String, f64>,
    navbar_height: f64,
}

impl StaticLayout {
    pub fn new(navbar_height: f64) -> Self {
        Self {
            offsets: HashMap::new(),
            navbar_height,
        }
    }

    pub fn with_section(mut self, id: impl Into<String>, offset: f64) -> Self {
        self.offsets.insert(id.into(), offset);
        self
    }
}

impl PageLayout for StaticLayout {
    fn offset_of(&self, id: &str) -> Option<f64> {
        self.offsets.get(id).copied()
    }

    fn navbar_height(&self) -> f64 {
        self.navbar_height
    }
}

/// Smooth scroll request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTo {
    pub top: f64,
}

/// Where a click on an `#anchor` link should scroll.
///
/// `None` means the click is left alone: the link is a bare `#`, is not an
/// in-page link, or points at a missing element.
pub fn scroll_target(href: &str, layout: &impl PageLayout) -> Option<ScrollTo> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    let offset = layout.offset_of(id)?;
    Some(ScrollTo {
        top: offset - layout.navbar_height(),
    })
}
