//! Page subscriber trait

use super::NavigationContext;

/// Trait for components that mirror the current page (indicator dots, page hooks)
pub trait PageSubscriber {
    /// Called after the current page or the transition state changes
    fn on_page_change(&self, context: &NavigationContext);
}
