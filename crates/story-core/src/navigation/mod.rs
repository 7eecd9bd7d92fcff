mod engine;
mod position;
mod subscriber;

pub use engine::PageScrollController;
pub use position::{PageInfo, PageSet};
pub use subscriber::PageSubscriber;

/// Direction of a scroll intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Towards higher page indices (wheel delta > 0)
    Forward,
    /// Towards lower page indices (wheel delta < 0)
    Backward,
}

impl ScrollDirection {
    /// Direction of a signed delta; zero and non-finite deltas have none
    pub fn from_delta(delta: f64) -> Option<Self> {
        if !delta.is_finite() || delta == 0.0 {
            None
        } else if delta > 0.0 {
            Some(ScrollDirection::Forward)
        } else {
            Some(ScrollDirection::Backward)
        }
    }
}

/// Animation hint passed to the scroll surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Identifies one scroll command issued by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionTicket(pub u64);

/// A request to move the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Target vertical offset: page index times viewport height
    pub offset: f64,
    pub behavior: ScrollBehavior,
    pub ticket: TransitionTicket,
}

/// The scrollable container the controller drives
pub trait ScrollSurface {
    /// Height of one page in the surface's units
    fn viewport_height(&self) -> f64;

    /// Start moving to `request.offset`. Completion, if the surface can
    /// observe it, is reported back through `transition_settled`.
    fn scroll_to(&self, request: ScrollRequest);
}

/// What triggered a page change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    Wheel,
    Step,
    DotClick,
    Restart,
    Programmatic,
    Resize,
}

/// Result of a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Moved { page: usize },
    /// The requested index was out of range and was clamped
    Clamped { requested: usize, page: usize },
    /// Refused because a transition is in flight (`ClickPolicy::RespectLock`)
    Locked,
}

impl JumpOutcome {
    pub fn page(&self) -> Option<usize> {
        match self {
            JumpOutcome::Moved { page } | JumpOutcome::Clamped { page, .. } => Some(*page),
            JumpOutcome::Locked => None,
        }
    }
}

/// Why a directional input was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Locked,
    NoDirection,
}

/// Result of a directional input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Committed { from: usize, to: usize },
    /// Below threshold; the running sum is `total`
    Accumulated { total: f64 },
    /// Direction pointed past the first or last page
    AtBoundary,
    Ignored(IgnoreReason),
}

/// Snapshot passed to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationContext {
    pub current_page: usize,
    pub page_count: usize,
    pub transitioning: bool,
}
