//! DOM-backed collaborators for the scroll controller

use std::cell::Cell;
use std::time::Duration;
use story_core::{
    Clock, NavigationContext, PageSubscriber, ScrollBehavior, ScrollRequest, ScrollSurface,
    TransitionTicket,
};
use web_sys::{Element, HtmlElement, Performance, ScrollToOptions, Window};

/// `performance.now()` as a [`Clock`]
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Self {
        Self {
            performance: window.performance(),
        }
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> Duration {
        let ms = self.performance.as_ref().map_or(0.0, |p| p.now());
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }
}

/// The `#scroll-container` element. Pages are one window height tall.
pub struct ContainerSurface {
    window: Window,
    container: HtmlElement,
    pending: Cell<Option<TransitionTicket>>,
}

impl ContainerSurface {
    pub fn new(window: Window, container: HtmlElement) -> Self {
        Self {
            window,
            container,
            pending: Cell::new(None),
        }
    }

    pub fn scroll_top(&self) -> f64 {
        self.container.scroll_top() as f64
    }

    /// Ticket of the last scroll command, consumed by the `scrollend` handler
    pub fn take_pending(&self) -> Option<TransitionTicket> {
        self.pending.take()
    }
}

impl ScrollSurface for ContainerSurface {
    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, request: ScrollRequest) {
        let options = ScrollToOptions::new();
        options.set_top(request.offset);
        options.set_behavior(match request.behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.pending.set(Some(request.ticket));
        self.container.scroll_to_with_scroll_to_options(&options);
    }
}

/// The `.dot` elements inside `#dots-container`
pub struct DomDots {
    dots: Vec<Element>,
}

impl DomDots {
    pub fn new(dots: Vec<Element>) -> Self {
        Self { dots }
    }
}

impl PageSubscriber for DomDots {
    fn on_page_change(&self, context: &NavigationContext) {
        for (idx, dot) in self.dots.iter().enumerate() {
            let _ = dot
                .class_list()
                .toggle_with_force("active", idx == context.current_page);
        }
    }
}
