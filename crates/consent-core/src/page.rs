//! Page adapter.
//!
//! The consent manager never touches a real document; it talks to a
//! [`Page`] implementation that can find elements by id, flip CSS classes,
//! read and write checkbox state, and lock background scrolling. Missing
//! markup is the normal case for a partially-rendered or headless page, so
//! every operation silently no-ops when the element does not exist.
//!
//! [`MemoryPage`] is the in-memory implementation used by tests and by the
//! CLI, which runs against an empty page.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;

/// Element ids and class names of the consent markup contract
pub mod dom {
    /// Consent modal container
    pub const CONSENT_MODAL: &str = "cookieConsentModal";
    /// Class that makes the modal visible
    pub const ACTIVE_CLASS: &str = "active";
    /// Class that expands the settings view inside the modal
    pub const SHOW_SETTINGS_CLASS: &str = "show-settings";

    /// Accept-all button in the initial view
    pub const ACCEPT_ALL_BUTTON: &str = "acceptAllCookies";
    /// Reject-all button in the initial view
    pub const REJECT_ALL_BUTTON: &str = "rejectAllCookies";
    /// Reject-all button inside the settings view
    pub const REJECT_ALL_FROM_SETTINGS_BUTTON: &str = "rejectAllFromSettings";
    /// Button that expands the settings view
    pub const MANAGE_PREFERENCES_BUTTON: &str = "manageCookiePreferences";
    /// Save button inside the settings view
    pub const SAVE_PREFERENCES_BUTTON: &str = "saveCookiePreferences";
    /// Back button inside the settings view
    pub const BACK_FROM_SETTINGS_BUTTON: &str = "backFromSettings";
    /// Footer link that re-opens the modal after a choice was made
    pub const SETTINGS_TRIGGER: &str = "cookieSettingsTrigger";

    /// Analytics category checkbox
    pub const ANALYTICS_CHECKBOX: &str = "cookie-analytics";
    /// Marketing category checkbox
    pub const MARKETING_CHECKBOX: &str = "cookie-marketing";
    /// Preference-cookies category checkbox
    pub const PREFERENCES_CHECKBOX: &str = "cookie-preferences";

    /// Dismissible promotional banner
    pub const PREVIEW_BANNER: &str = "previewBanner";
    /// Mobile navigation menu
    pub const NAV_MENU: &str = "navMenu";
    /// Mobile navigation toggle button
    pub const NAV_TOGGLE: &str = "mobileMenuToggle";
}

/// The document, as seen by the consent engine.
///
/// Elements are addressed by id. Operations on absent elements are silent
/// no-ops (reads return `None`/`false`); absence is never a fault.
pub trait Page {
    /// Whether an element with the given id exists
    fn element_exists(&self, id: &str) -> bool;

    /// Add a CSS class to an element
    fn add_class(&self, id: &str, class: &str);

    /// Remove a CSS class from an element
    fn remove_class(&self, id: &str, class: &str);

    /// Whether an element currently carries a CSS class
    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Read checkbox state; `None` if the element is absent or not a checkbox
    fn checkbox_checked(&self, id: &str) -> Option<bool>;

    /// Set checkbox state
    fn set_checkbox_checked(&self, id: &str, checked: bool);

    /// Remove an element from the document
    fn remove_element(&self, id: &str);

    /// Suppress background scrolling (modal or menu open)
    fn lock_scroll(&self);

    /// Restore background scrolling
    fn unlock_scroll(&self);

    /// Whether background scrolling is currently suppressed
    fn scroll_locked(&self) -> bool;
}

#[derive(Default)]
struct ElementState {
    classes: BTreeSet<String>,
    checkbox: Option<bool>,
}

#[derive(Default)]
struct PageInner {
    elements: HashMap<String, ElementState>,
    scroll_locked: bool,
}

/// In-memory [`Page`] implementation.
///
/// Clones share the same document, so a test can hand one handle to a
/// manager and keep another for assertions. A freshly-constructed page is
/// empty, which doubles as the headless mode the CLI runs in.
#[derive(Clone, Default)]
pub struct MemoryPage {
    inner: Arc<Mutex<PageInner>>,
}

impl MemoryPage {
    /// Create an empty page
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain element with the given id
    pub fn with_element(self, id: &str) -> Self {
        self.inner
            .lock()
            .elements
            .insert(id.to_string(), ElementState::default());
        self
    }

    /// Add a checkbox element with the given id and initial state
    pub fn with_checkbox(self, id: &str, checked: bool) -> Self {
        self.inner.lock().elements.insert(
            id.to_string(),
            ElementState {
                checkbox: Some(checked),
                ..ElementState::default()
            },
        );
        self
    }

    /// Page with the full consent markup: modal, control buttons, and the
    /// three category checkboxes (all unchecked)
    pub fn with_consent_markup(self) -> Self {
        self.with_element(dom::CONSENT_MODAL)
            .with_element(dom::ACCEPT_ALL_BUTTON)
            .with_element(dom::REJECT_ALL_BUTTON)
            .with_element(dom::REJECT_ALL_FROM_SETTINGS_BUTTON)
            .with_element(dom::MANAGE_PREFERENCES_BUTTON)
            .with_element(dom::SAVE_PREFERENCES_BUTTON)
            .with_element(dom::BACK_FROM_SETTINGS_BUTTON)
            .with_element(dom::SETTINGS_TRIGGER)
            .with_checkbox(dom::ANALYTICS_CHECKBOX, false)
            .with_checkbox(dom::MARKETING_CHECKBOX, false)
            .with_checkbox(dom::PREFERENCES_CHECKBOX, false)
    }
}

impl Page for MemoryPage {
    fn element_exists(&self, id: &str) -> bool {
        self.inner.lock().elements.contains_key(id)
    }

    fn add_class(&self, id: &str, class: &str) {
        if let Some(el) = self.inner.lock().elements.get_mut(id) {
            el.classes.insert(class.to_string());
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        if let Some(el) = self.inner.lock().elements.get_mut(id) {
            el.classes.remove(class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.inner
            .lock()
            .elements
            .get(id)
            .map(|el| el.classes.contains(class))
            .unwrap_or(false)
    }

    fn checkbox_checked(&self, id: &str) -> Option<bool> {
        self.inner
            .lock()
            .elements
            .get(id)
            .and_then(|el| el.checkbox)
    }

    fn set_checkbox_checked(&self, id: &str, checked: bool) {
        if let Some(el) = self.inner.lock().elements.get_mut(id) {
            if el.checkbox.is_some() {
                el.checkbox = Some(checked);
            }
        }
    }

    fn remove_element(&self, id: &str) {
        self.inner.lock().elements.remove(id);
    }

    fn lock_scroll(&self) {
        self.inner.lock().scroll_locked = true;
    }

    fn unlock_scroll(&self) {
        self.inner.lock().scroll_locked = false;
    }

    fn scroll_locked(&self) -> bool {
        self.inner.lock().scroll_locked
    }
}
