//! Dismissible promotional banner.
//!
//! Dismissal is remembered in origin storage under its own key, separate
//! from the consent record. Storage trouble degrades the same way consent
//! reads do: an unreadable flag means the banner shows again.

use tracing::{debug, warn};

use crate::page::{dom, Page};
use crate::storage::KeyValueStore;

/// Storage key recording that the banner was dismissed
pub const BANNER_DISMISSED_KEY: &str = "previewBannerDismissed";

/// Apply a previously-stored dismissal on page load.
///
/// Removes the banner element when the dismissal flag is set; an absent or
/// unreadable flag leaves the banner in place.
pub fn sync(store: &dyn KeyValueStore, page: &dyn Page) {
    let dismissed = match store.get_item(BANNER_DISMISSED_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            debug!(error = %e, "could not read banner dismissal flag");
            false
        }
    };

    if dismissed {
        page.remove_element(dom::PREVIEW_BANNER);
    }
}

/// Dismiss the banner and remember the dismissal.
///
/// The element is removed regardless of storage health; the return value
/// reports whether the flag persisted (a `false` means the banner will be
/// back on next load).
pub fn dismiss(store: &dyn KeyValueStore, page: &dyn Page) -> bool {
    page.remove_element(dom::PREVIEW_BANNER);

    match store.set_item(BANNER_DISMISSED_KEY, "true") {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to persist banner dismissal");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::storage::MemoryStore;

    #[test]
    fn test_banner_stays_without_flag() {
        let store = MemoryStore::new();
        let page = MemoryPage::new().with_element(dom::PREVIEW_BANNER);

        sync(&store, &page);
        assert!(page.element_exists(dom::PREVIEW_BANNER));
    }

    #[test]
    fn test_dismiss_removes_and_persists() {
        let store = MemoryStore::new();
        let page = MemoryPage::new().with_element(dom::PREVIEW_BANNER);

        assert!(dismiss(&store, &page));
        assert!(!page.element_exists(dom::PREVIEW_BANNER));
        assert_eq!(
            store.get_item(BANNER_DISMISSED_KEY).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_sync_removes_after_earlier_dismissal() {
        let store = MemoryStore::new();
        store.set_item(BANNER_DISMISSED_KEY, "true").unwrap();

        let page = MemoryPage::new().with_element(dom::PREVIEW_BANNER);
        sync(&store, &page);
        assert!(!page.element_exists(dom::PREVIEW_BANNER));
    }

    #[test]
    fn test_dismiss_with_failing_store_still_removes() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let page = MemoryPage::new().with_element(dom::PREVIEW_BANNER);

        assert!(!dismiss(&store, &page));
        assert!(!page.element_exists(dom::PREVIEW_BANNER));
    }

    #[test]
    fn test_sync_with_failing_store_keeps_banner() {
        let store = MemoryStore::new();
        store.set_item(BANNER_DISMISSED_KEY, "true").unwrap();
        store.set_fail_reads(true);
        let page = MemoryPage::new().with_element(dom::PREVIEW_BANNER);

        sync(&store, &page);
        assert!(page.element_exists(dom::PREVIEW_BANNER));
    }
}
