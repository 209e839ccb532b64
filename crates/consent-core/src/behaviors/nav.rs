//! Mobile navigation menu.
//!
//! A two-state toggle over the nav menu element: opening adds the active
//! class and suppresses background scrolling, closing reverses both.
//! Escape presses and clicks outside the navbar both map to
//! [`MobileMenu::close`].

use crate::page::{dom, Page};

/// Open/closed state of the mobile navigation menu
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Create a closed menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the menu is currently open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu open or closed
    pub fn toggle(&mut self, page: &dyn Page) {
        self.open = !self.open;
        self.apply(page);
    }

    /// Close the menu; harmless when already closed
    pub fn close(&mut self, page: &dyn Page) {
        self.open = false;
        self.apply(page);
    }

    fn apply(&self, page: &dyn Page) {
        if self.open {
            page.add_class(dom::NAV_MENU, dom::ACTIVE_CLASS);
            page.lock_scroll();
        } else {
            page.remove_class(dom::NAV_MENU, dom::ACTIVE_CLASS);
            page.unlock_scroll();
        }
    }
}
