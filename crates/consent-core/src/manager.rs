//! Consent manager - the primary entry point of the consent engine
//!
//! `ConsentManager` coordinates the storage adapter, the page adapter, and
//! the category hooks for:
//! - Reading and persisting the consent record
//! - Driving the consent modal through its visibility states
//! - Applying preferences and notifying in-page listeners
//!
//! # Example
//!
//! ```
//! use consent_core::{ConsentManager, MemoryPage, MemoryStore, ModalState};
//!
//! let page = MemoryPage::new().with_consent_markup();
//! let mut manager = ConsentManager::new(MemoryStore::new(), page);
//!
//! // First visit: nothing stored, so the modal opens
//! manager.initialize();
//! assert_eq!(manager.modal_state(), ModalState::Visible);
//!
//! // The user accepts everything
//! manager.accept_all();
//! assert_eq!(manager.modal_state(), ModalState::Hidden);
//! assert!(manager.current_preferences().analytics);
//! ```

use tracing::{debug, error, info, warn};

use crate::hooks::{CategoryHooks, LoggingHooks};
use crate::page::{dom, Page};
use crate::storage::KeyValueStore;
use crate::types::{
    ConsentCategory, ConsentPreferences, ConsentRecord, CONSENT_STORAGE_KEY, CONSENT_UPDATED_EVENT,
};

/// Visibility state of the consent modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// Modal not shown
    Hidden,
    /// Initial choice view shown
    Visible,
    /// Modal shown with the per-category settings view expanded
    SettingsExpanded,
}

/// A control surface of the consent markup, one variant per bound element.
///
/// This is the dispatch table the page wires click events through: markup
/// resolves a clicked element id via [`ConsentControl::from_element_id`]
/// and hands the control to [`ConsentManager::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentControl {
    /// Accept-all button in the initial view
    AcceptAll,
    /// Reject-all button in the initial view
    RejectAll,
    /// Reject-all button inside the settings view
    RejectAllFromSettings,
    /// Expand the settings view
    ManagePreferences,
    /// Save the checkbox selection
    SavePreferences,
    /// Collapse the settings view
    BackFromSettings,
    /// Footer link that re-opens the modal
    OpenSettings,
}

impl ConsentControl {
    /// Resolve a control from its element id, `None` for unbound ids
    pub fn from_element_id(id: &str) -> Option<Self> {
        match id {
            dom::ACCEPT_ALL_BUTTON => Some(Self::AcceptAll),
            dom::REJECT_ALL_BUTTON => Some(Self::RejectAll),
            dom::REJECT_ALL_FROM_SETTINGS_BUTTON => Some(Self::RejectAllFromSettings),
            dom::MANAGE_PREFERENCES_BUTTON => Some(Self::ManagePreferences),
            dom::SAVE_PREFERENCES_BUTTON => Some(Self::SavePreferences),
            dom::BACK_FROM_SETTINGS_BUTTON => Some(Self::BackFromSettings),
            dom::SETTINGS_TRIGGER => Some(Self::OpenSettings),
            _ => None,
        }
    }

    /// The element id this control is bound to
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::AcceptAll => dom::ACCEPT_ALL_BUTTON,
            Self::RejectAll => dom::REJECT_ALL_BUTTON,
            Self::RejectAllFromSettings => dom::REJECT_ALL_FROM_SETTINGS_BUTTON,
            Self::ManagePreferences => dom::MANAGE_PREFERENCES_BUTTON,
            Self::SavePreferences => dom::SAVE_PREFERENCES_BUTTON,
            Self::BackFromSettings => dom::BACK_FROM_SETTINGS_BUTTON,
            Self::OpenSettings => dom::SETTINGS_TRIGGER,
        }
    }
}

/// Listener invoked with the applied preference set
pub type ConsentListener = Box<dyn Fn(&ConsentPreferences)>;

/// Coordinates consent persistence, the modal state machine, category
/// hooks, and change notification.
///
/// One manager exists per page; construct it once at startup and call
/// [`initialize`](ConsentManager::initialize) exactly once. All operations
/// are synchronous and fail soft: storage trouble degrades to "no consent
/// recorded" on read and a `false` outcome on write, and missing page
/// markup is silently skipped.
pub struct ConsentManager {
    store: Box<dyn KeyValueStore>,
    page: Box<dyn Page>,
    hooks: Box<dyn CategoryHooks>,
    /// Mirror of the last applied preference set
    current: ConsentPreferences,
    modal: ModalState,
    listeners: Vec<ConsentListener>,
    initialized: bool,
}

impl ConsentManager {
    /// Create a manager over the given store and page, with log-only
    /// category hooks
    pub fn new(store: impl KeyValueStore + 'static, page: impl Page + 'static) -> Self {
        Self::with_hooks(store, page, LoggingHooks)
    }

    /// Create a manager with custom category hooks
    pub fn with_hooks(
        store: impl KeyValueStore + 'static,
        page: impl Page + 'static,
        hooks: impl CategoryHooks + 'static,
    ) -> Self {
        Self {
            store: Box::new(store),
            page: Box::new(page),
            hooks: Box::new(hooks),
            current: ConsentPreferences::default(),
            modal: ModalState::Hidden,
            listeners: Vec::new(),
            initialized: false,
        }
    }

    /// Run the page-load sequence.
    ///
    /// With no stored record the modal opens; with a stored record the
    /// saved preferences are re-applied and the modal stays hidden. Safe
    /// against repeat calls: a second invocation logs a warning and does
    /// nothing, so listeners are never double-notified.
    pub fn initialize(&mut self) {
        if self.initialized {
            warn!("consent manager already initialized, ignoring repeat call");
            return;
        }
        self.initialized = true;

        match self.consent() {
            Some(record) => {
                info!(version = %record.version, "stored consent found, re-applying");
                self.apply_preferences(&record.preferences);
            }
            None => {
                info!("no stored consent, prompting for a choice");
                self.show_modal();
            }
        }
    }

    /// Read the stored consent record.
    ///
    /// Returns `None` when no record exists, when storage is unreadable,
    /// or when the stored value does not parse as a complete record - a
    /// corrupted record is indistinguishable from absence by design.
    pub fn consent(&self) -> Option<ConsentRecord> {
        let raw = match self.store.get_item(CONSENT_STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read consent record, treating as absent");
                return None;
            }
        };

        match serde_json::from_str::<ConsentRecord>(&raw) {
            Ok(mut record) => {
                record.preferences = record.preferences.normalize();
                Some(record)
            }
            Err(e) => {
                warn!(error = %e, "stored consent record is malformed, treating as absent");
                None
            }
        }
    }

    /// Persist a preference set as a fresh record.
    ///
    /// Stamps the current version constant and save time, then overwrites
    /// the stored record. Returns `false` on write failure; the failure is
    /// logged and never retried.
    pub fn save_consent(&self, preferences: &ConsentPreferences) -> bool {
        let record = ConsentRecord::new(preferences.normalize());
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize consent record");
                return false;
            }
        };

        match self.store.set_item(CONSENT_STORAGE_KEY, &json) {
            Ok(()) => {
                debug!("consent record saved");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to save consent record");
                false
            }
        }
    }

    /// Apply a preference set: dispatch enable/disable hooks for the three
    /// optional categories, update the in-memory mirror, then emit exactly
    /// one `cookieConsentUpdated` notification to all listeners in
    /// subscription order.
    pub fn apply_preferences(&mut self, preferences: &ConsentPreferences) {
        let preferences = preferences.normalize();

        for category in ConsentCategory::OPTIONAL {
            if preferences.is_enabled(category) {
                self.hooks.enable(category);
            } else {
                self.hooks.disable(category);
            }
        }

        self.current = preferences;

        debug!(
            event = CONSENT_UPDATED_EVENT,
            listeners = self.listeners.len(),
            "notifying consent listeners"
        );
        for listener in &self.listeners {
            listener(&preferences);
        }
    }

    /// Accept all four categories
    pub fn accept_all(&mut self) {
        self.finish_choice(ConsentPreferences::accept_all());
    }

    /// Reject everything but the necessary category.
    ///
    /// Reachable from both the initial view and the expanded settings
    /// view, with identical effect.
    pub fn reject_all(&mut self) {
        self.finish_choice(ConsentPreferences::reject_all());
    }

    /// Save the selection currently shown in the settings checkboxes.
    ///
    /// A missing checkbox counts as opted out; `necessary` is forced on.
    pub fn save_custom_preferences(&mut self) {
        let preferences = ConsentPreferences::custom(
            self.page
                .checkbox_checked(dom::ANALYTICS_CHECKBOX)
                .unwrap_or(false),
            self.page
                .checkbox_checked(dom::MARKETING_CHECKBOX)
                .unwrap_or(false),
            self.page
                .checkbox_checked(dom::PREFERENCES_CHECKBOX)
                .unwrap_or(false),
        );
        self.finish_choice(preferences);
    }

    /// Save, apply, and close - shared tail of the three terminal choices
    fn finish_choice(&mut self, preferences: ConsentPreferences) {
        info!(
            analytics = preferences.analytics,
            marketing = preferences.marketing,
            preferences = preferences.preferences,
            "consent choice made"
        );
        self.save_consent(&preferences);
        self.apply_preferences(&preferences);
        self.hide_modal();
    }

    /// Show the consent modal and suppress background scrolling.
    ///
    /// The state transition happens even when the modal element is missing
    /// from the page; the class and scroll effects are best-effort.
    pub fn show_modal(&mut self) {
        self.page.add_class(dom::CONSENT_MODAL, dom::ACTIVE_CLASS);
        self.page.lock_scroll();
        if self.modal == ModalState::Hidden {
            self.modal = ModalState::Visible;
        }
    }

    /// Hide the consent modal, collapse the settings view, and restore
    /// background scrolling
    pub fn hide_modal(&mut self) {
        self.page.remove_class(dom::CONSENT_MODAL, dom::ACTIVE_CLASS);
        self.page
            .remove_class(dom::CONSENT_MODAL, dom::SHOW_SETTINGS_CLASS);
        self.page.unlock_scroll();
        self.modal = ModalState::Hidden;
    }

    /// Flip between the initial view and the expanded settings view.
    ///
    /// Does nothing while the modal is hidden and never touches persisted
    /// state.
    pub fn toggle_settings(&mut self) {
        match self.modal {
            ModalState::Hidden => {}
            ModalState::Visible => {
                self.page
                    .add_class(dom::CONSENT_MODAL, dom::SHOW_SETTINGS_CLASS);
                self.modal = ModalState::SettingsExpanded;
            }
            ModalState::SettingsExpanded => {
                self.page
                    .remove_class(dom::CONSENT_MODAL, dom::SHOW_SETTINGS_CLASS);
                self.modal = ModalState::Visible;
            }
        }
    }

    /// Re-open the modal from an external trigger (footer link).
    ///
    /// When a prior record exists the settings view is expanded and the
    /// three checkboxes are pre-populated from it, so re-opening never
    /// loses the earlier choice.
    pub fn open_settings(&mut self) {
        self.show_modal();

        if let Some(record) = self.consent() {
            if self.modal == ModalState::Visible {
                self.toggle_settings();
            }
            let prefs = record.preferences;
            self.page
                .set_checkbox_checked(dom::ANALYTICS_CHECKBOX, prefs.analytics);
            self.page
                .set_checkbox_checked(dom::MARKETING_CHECKBOX, prefs.marketing);
            self.page
                .set_checkbox_checked(dom::PREFERENCES_CHECKBOX, prefs.preferences);
        }
    }

    /// Register a listener for the `cookieConsentUpdated` notification.
    ///
    /// Listeners run synchronously, in subscription order, every time a
    /// preference set is applied.
    pub fn subscribe(&mut self, listener: impl Fn(&ConsentPreferences) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Route a control activation to its operation
    pub fn dispatch(&mut self, control: ConsentControl) {
        debug!(?control, "consent control activated");
        match control {
            ConsentControl::AcceptAll => self.accept_all(),
            ConsentControl::RejectAll | ConsentControl::RejectAllFromSettings => self.reject_all(),
            ConsentControl::ManagePreferences | ConsentControl::BackFromSettings => {
                self.toggle_settings()
            }
            ConsentControl::SavePreferences => self.save_custom_preferences(),
            ConsentControl::OpenSettings => self.open_settings(),
        }
    }

    /// The last applied preference set (reject-all until anything applies)
    pub fn current_preferences(&self) -> ConsentPreferences {
        self.current
    }

    /// Current modal visibility state
    pub fn modal_state(&self) -> ModalState {
        self.modal
    }

    /// Whether `initialize` has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
