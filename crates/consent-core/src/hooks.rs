//! Category activation hooks.
//!
//! Applying a preference set dispatches one enable or disable call per
//! optional category. These are the extension points where a site
//! integrator activates or deactivates real third-party scripts; the
//! default implementation only logs, which is the shipped behavior.

use tracing::info;

use crate::types::ConsentCategory;

/// Effects invoked when a category is granted or withdrawn
pub trait CategoryHooks {
    /// The category was granted
    fn enable(&self, category: ConsentCategory);

    /// The category was withdrawn
    fn disable(&self, category: ConsentCategory);
}

/// Log-only [`CategoryHooks`] implementation.
///
/// Replace this with a real implementation to wire analytics, marketing
/// pixels, or preference cookies to consent state.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHooks;

impl CategoryHooks for LoggingHooks {
    fn enable(&self, category: ConsentCategory) {
        info!(category = category.as_str(), "category cookies enabled");
    }

    fn disable(&self, category: ConsentCategory) {
        info!(category = category.as_str(), "category cookies disabled");
    }
}
