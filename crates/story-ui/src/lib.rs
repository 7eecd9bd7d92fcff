//! egui host for the story viewer
//!
//! Provides the animated scroll surface, the indicator dot strip and the
//! pager view that ties them to the core scroll controller.

pub mod page_dots;
pub mod pager;
pub mod surface;
pub mod theme;

/// Re-export commonly used types
pub use page_dots::PageDots;
pub use pager::{PagerConfig, StoryPager};
pub use surface::{AnimatedScrollSurface, SurfaceFrame};
pub use theme::{Theme, apply_theme};
