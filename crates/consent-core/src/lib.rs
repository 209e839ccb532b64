//! Consent Engine Core Library
//!
//! Cookie-consent preference lifecycle for a marketing site, built headless:
//! the browser page and origin storage are injected adapters, so the whole
//! lifecycle runs and tests without a rendered document.
//!
//! ## Overview
//!
//! One [`ConsentManager`] exists per page. On load it reads the persisted
//! consent record: absent means the consent modal opens, present means the
//! stored preferences are re-applied. User choices (accept all, reject all,
//! or a custom selection) overwrite the record, fire the category hooks,
//! notify subscribed listeners, and close the modal.
//!
//! ## Core principles
//!
//! - **Fail soft**: storage trouble degrades to "no consent recorded" on
//!   read and a reported-but-unretried failure on write; nothing panics
//! - **Missing markup is normal**: every page effect silently no-ops when
//!   its element is absent
//! - **One record**: a single versioned envelope under one storage key,
//!   overwritten whole on every save
//!
//! ## Quick Start
//!
//! ```
//! use consent_core::{ConsentManager, MemoryPage, MemoryStore, ModalState};
//!
//! let mut manager = ConsentManager::new(
//!     MemoryStore::new(),
//!     MemoryPage::new().with_consent_markup(),
//! );
//!
//! manager.subscribe(|prefs| {
//!     println!("analytics consent: {}", prefs.analytics);
//! });
//!
//! manager.initialize();
//! assert_eq!(manager.modal_state(), ModalState::Visible);
//!
//! manager.reject_all();
//! assert_eq!(manager.modal_state(), ModalState::Hidden);
//! ```

pub mod behaviors;
pub mod error;
pub mod hooks;
pub mod manager;
pub mod page;
pub mod storage;
pub mod types;

// Re-exports
pub use error::{ConsentError, ConsentResult};
pub use hooks::{CategoryHooks, LoggingHooks};
pub use manager::{ConsentControl, ConsentListener, ConsentManager, ModalState};
pub use page::{dom, MemoryPage, Page};
pub use storage::{KeyValueStore, MemoryStore, RedbStore};
pub use types::{
    ConsentCategory, ConsentPreferences, ConsentRecord, CONSENT_STORAGE_KEY,
    CONSENT_UPDATED_EVENT, CONSENT_VERSION,
};
