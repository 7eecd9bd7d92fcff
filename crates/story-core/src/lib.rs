//! Core functionality for the scroll-driven story viewer
//!
//! This crate owns the page model and the scroll-paging controller that maps
//! wheel, keyboard and dot-click input to a single current page.

pub mod clock;
pub mod config;
pub mod dots;
pub mod error;
pub mod navigation;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClickPolicy, DebouncePolicy, ScrollSettings, SettleMode, StoryConfig};
pub use dots::IndicatorDots;
pub use error::StoryError;
pub use navigation::{
    InputOutcome, IgnoreReason, JumpOutcome, NavigationContext, PageInfo, PageScrollController,
    PageSet, PageSubscriber, ScrollBehavior, ScrollDirection, ScrollRequest, ScrollSurface,
    TransitionCause, TransitionTicket,
};
