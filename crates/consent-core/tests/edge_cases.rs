//! Edge case and failure-path tests
//!
//! Corrupted records, unavailable or quota-limited storage, missing page
//! markup, and repeated initialization. None of these may panic or surface
//! an error past the manager; the worst allowed outcome is the modal
//! reappearing as if no consent had been given.

use consent_core::{
    ConsentManager, ConsentPreferences, KeyValueStore, MemoryPage, MemoryStore, ModalState,
    CONSENT_STORAGE_KEY,
};

// ============================================================================
// Corrupted Storage
// ============================================================================

#[test]
fn test_malformed_json_treated_as_absent() {
    let corrupt_values = [
        "",
        "not json",
        "{",
        "42",
        "[]",
        "null",
        r#"{"version": "1.0"}"#,
    ];

    for value in corrupt_values {
        let store = MemoryStore::new();
        store.set_item(CONSENT_STORAGE_KEY, value).unwrap();

        let mut manager = ConsentManager::new(store, MemoryPage::new().with_consent_markup());
        assert!(manager.consent().is_none(), "value {:?} should read as absent", value);

        // And initialization prompts as on a first visit
        manager.initialize();
        assert_eq!(manager.modal_state(), ModalState::Visible);
    }
}

#[test]
fn test_partial_preferences_treated_as_absent() {
    let store = MemoryStore::new();
    store
        .set_item(
            CONSENT_STORAGE_KEY,
            r#"{
                "version": "1.0",
                "timestamp": "2026-03-01T12:30:00Z",
                "preferences": {"necessary": true, "analytics": true}
            }"#,
        )
        .unwrap();

    let manager = ConsentManager::new(store, MemoryPage::new());
    assert!(manager.consent().is_none());
}

#[test]
fn test_hand_edited_necessary_flag_is_normalized() {
    let store = MemoryStore::new();
    store
        .set_item(
            CONSENT_STORAGE_KEY,
            r#"{
                "version": "1.0",
                "timestamp": "2026-03-01T12:30:00Z",
                "preferences": {
                    "necessary": false,
                    "analytics": true,
                    "marketing": false,
                    "preferences": false
                }
            }"#,
        )
        .unwrap();

    let manager = ConsentManager::new(store, MemoryPage::new());
    let record = manager.consent().expect("record parses");
    assert!(record.preferences.necessary);
    assert!(record.preferences.analytics);
}

#[test]
fn test_unknown_version_still_reads() {
    // Version is written, never validated: an old record keeps working
    let store = MemoryStore::new();
    store
        .set_item(
            CONSENT_STORAGE_KEY,
            r#"{
                "version": "0.3",
                "timestamp": "2024-01-01T00:00:00Z",
                "preferences": {
                    "necessary": true,
                    "analytics": false,
                    "marketing": true,
                    "preferences": false
                }
            }"#,
        )
        .unwrap();

    let manager = ConsentManager::new(store, MemoryPage::new());
    let record = manager.consent().unwrap();
    assert_eq!(record.version, "0.3");
    assert!(record.preferences.marketing);
}

// ============================================================================
// Storage Failures
// ============================================================================

#[test]
fn test_unreadable_storage_prompts_like_first_visit() {
    let store = MemoryStore::new();
    let mut manager = ConsentManager::new(store.clone(), MemoryPage::new().with_consent_markup());
    manager.accept_all();

    store.set_fail_reads(true);
    assert!(manager.consent().is_none());
}

#[test]
fn test_unwritable_storage_reports_false_and_continues() {
    let store = MemoryStore::new();
    store.set_fail_writes(true);

    let mut manager = ConsentManager::new(store.clone(), MemoryPage::new().with_consent_markup());
    manager.initialize();

    assert!(!manager.save_consent(&ConsentPreferences::accept_all()));

    // The choice flow still applies preferences and closes the modal
    manager.accept_all();
    assert_eq!(manager.modal_state(), ModalState::Hidden);
    assert_eq!(manager.current_preferences(), ConsentPreferences::accept_all());

    // Nothing persisted: next load prompts again
    store.set_fail_writes(false);
    assert!(manager.consent().is_none());
}

#[test]
fn test_quota_exceeded_reports_false() {
    let store = MemoryStore::new();
    store.set_quota_bytes(Some(16));

    let manager = ConsentManager::new(store, MemoryPage::new());
    assert!(!manager.save_consent(&ConsentPreferences::reject_all()));
    assert!(manager.consent().is_none());
}

// ============================================================================
// Missing Markup
// ============================================================================

#[test]
fn test_lifecycle_on_empty_page() {
    let mut manager = ConsentManager::new(MemoryStore::new(), MemoryPage::new());

    manager.initialize();
    assert_eq!(manager.modal_state(), ModalState::Visible);

    manager.toggle_settings();
    assert_eq!(manager.modal_state(), ModalState::SettingsExpanded);

    manager.save_custom_preferences();
    assert_eq!(manager.modal_state(), ModalState::Hidden);

    // Missing checkboxes default every optional category to opted out
    assert_eq!(
        manager.consent().unwrap().preferences,
        ConsentPreferences::reject_all()
    );
}

#[test]
fn test_open_settings_on_empty_page() {
    let store = MemoryStore::new();
    let mut manager = ConsentManager::new(store.clone(), MemoryPage::new());
    manager.accept_all();

    let mut reopened = ConsentManager::new(store, MemoryPage::new());
    reopened.initialize();
    reopened.open_settings();
    assert_eq!(reopened.modal_state(), ModalState::SettingsExpanded);
}

// ============================================================================
// Initialization Guard
// ============================================================================

#[test]
fn test_repeat_initialize_does_not_reopen_modal() {
    let store = MemoryStore::new();
    let mut manager = ConsentManager::new(store, MemoryPage::new().with_consent_markup());

    manager.initialize();
    manager.accept_all();
    assert_eq!(manager.modal_state(), ModalState::Hidden);

    manager.initialize();
    manager.initialize();
    assert_eq!(manager.modal_state(), ModalState::Hidden);
}

#[test]
fn test_repeat_initialize_does_not_replay_notifications() {
    let store = MemoryStore::new();
    {
        let mut manager = ConsentManager::new(store.clone(), MemoryPage::new());
        manager.accept_all();
    }

    let mut manager = ConsentManager::new(store, MemoryPage::new());
    let seen = std::sync::Arc::new(std::sync::Mutex::new(0usize));
    let sink = seen.clone();
    manager.subscribe(move |_| *sink.lock().unwrap() += 1);

    manager.initialize();
    manager.initialize();

    assert_eq!(*seen.lock().unwrap(), 1);
}
