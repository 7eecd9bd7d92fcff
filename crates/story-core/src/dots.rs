//! Indicator dots model: one marker per page, exactly one active

use parking_lot::RwLock;

use crate::navigation::{NavigationContext, PageSubscriber};

pub struct IndicatorDots {
    count: usize,
    active: RwLock<usize>,
}

impl IndicatorDots {
    /// One dot per page, the first one active
    pub fn new(count: usize) -> Self {
        Self {
            count,
            active: RwLock::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn active_index(&self) -> usize {
        *self.active.read()
    }

    pub fn is_active(&self, idx: usize) -> bool {
        idx < self.count && idx == self.active_index()
    }

    pub fn states(&self) -> Vec<bool> {
        let active = self.active_index();
        (0..self.count).map(|idx| idx == active).collect()
    }
}

impl PageSubscriber for IndicatorDots {
    fn on_page_change(&self, context: &NavigationContext) {
        if context.current_page < self.count {
            *self.active.write() = context.current_page;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(page: usize) -> NavigationContext {
        NavigationContext {
            current_page: page,
            page_count: 5,
            transitioning: false,
        }
    }

    #[test]
    fn test_first_dot_active() {
        let dots = IndicatorDots::new(5);
        assert_eq!(dots.states(), vec![true, false, false, false, false]);
        assert!(dots.is_active(0));
        assert!(!dots.is_active(7));
    }

    #[test]
    fn test_mirrors_page_changes() {
        let dots = IndicatorDots::new(5);
        dots.on_page_change(&context(3));
        assert_eq!(dots.active_index(), 3);
        assert_eq!(dots.states().iter().filter(|active| **active).count(), 1);

        // An index the strip does not have leaves it untouched
        dots.on_page_change(&context(9));
        assert_eq!(dots.active_index(), 3);
    }
}
