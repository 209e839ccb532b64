//! Scroll-driven effects as pure decisions.
//!
//! Scroll-spy highlighting, sticky-header elevation, and smooth-scroll
//! targets all reduce to arithmetic over the scroll offset and section
//! geometry; the embedder applies the resulting classes and styles.

/// Vertical allowance for the fixed header when scrolling to an anchor
pub const HEADER_OFFSET: f64 = 80.0;

/// Lead distance before a section top at which it becomes active
pub const SECTION_LEAD: f64 = 100.0;

/// Scroll offset past which the sticky header casts its stronger shadow
pub const HEADER_SHADOW_THRESHOLD: f64 = 20.0;

/// Geometry of one `section[id]` on the page
#[derive(Debug, Clone)]
pub struct Section {
    /// Section element id (the anchor target)
    pub id: String,
    /// Document offset of the section top, px
    pub top: f64,
    /// Section height, px
    pub height: f64,
}

impl Section {
    pub fn new(id: &str, top: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            top,
            height,
        }
    }
}

/// The section the navigation should highlight at the given scroll offset.
///
/// A section is active while the scroll offset sits inside its extent,
/// pulled forward by [`SECTION_LEAD`]. Overlapping candidates resolve to
/// the last one in document order.
pub fn active_section(sections: &[Section], scroll_y: f64) -> Option<&str> {
    let mut active = None;
    for section in sections {
        let lead_top = section.top - SECTION_LEAD;
        if scroll_y > lead_top && scroll_y <= lead_top + section.height {
            active = Some(section.id.as_str());
        }
    }
    active
}

/// Whether the sticky header shows its scrolled shadow
pub fn header_elevated(scroll_y: f64) -> bool {
    scroll_y > HEADER_SHADOW_THRESHOLD
}

/// Document position to scroll to for an anchor target.
///
/// `viewport_top` is the element's position relative to the viewport;
/// adding the current scroll offset and subtracting the header allowance
/// lands the section just below the fixed header.
pub fn smooth_scroll_target(viewport_top: f64, scroll_y: f64) -> f64 {
    viewport_top + scroll_y - HEADER_OFFSET
}

/// Resolve an anchor href to its target element id.
///
/// Bare `#` and `#!` links navigate nowhere and resolve to `None`, as do
/// non-anchor hrefs.
pub fn anchor_target(href: &str) -> Option<&str> {
    let target = href.strip_prefix('#')?;
    if target.is_empty() || target == "!" {
        return None;
    }
    Some(target)
}
