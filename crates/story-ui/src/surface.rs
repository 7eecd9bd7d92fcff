//! Animated scroll surface for the egui host
//!
//! Plays the role the browser's smooth `scrollTo` plays on the web: it eases
//! the page stack towards the requested offset and reports when it got there.

use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;
use story_core::{Clock, ScrollBehavior, ScrollRequest, ScrollSurface, TransitionTicket};

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f64,
    to: f64,
    started_at: Duration,
    ticket: TransitionTicket,
}

#[derive(Debug)]
struct SurfaceState {
    viewport_height: f64,
    offset: f64,
    animation: Option<Animation>,
    /// Finished but not yet reported
    settled: Option<TransitionTicket>,
}

/// Offset and completion produced by one animation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    pub offset: f64,
    pub settled: Option<TransitionTicket>,
}

pub struct AnimatedScrollSurface {
    clock: Arc<dyn Clock>,
    duration: Duration,
    state: Mutex<SurfaceState>,
}

impl AnimatedScrollSurface {
    pub fn new(clock: Arc<dyn Clock>, duration: Duration) -> Self {
        Self {
            clock,
            duration,
            state: Mutex::new(SurfaceState {
                viewport_height: 0.0,
                offset: 0.0,
                animation: None,
                settled: None,
            }),
        }
    }

    /// Returns true if the height actually changed
    pub fn set_viewport_height(&self, height: f64) -> bool {
        let mut state = self.state.lock();
        if (state.viewport_height - height).abs() < 0.5 {
            return false;
        }
        state.viewport_height = height;
        true
    }

    pub fn offset(&self) -> f64 {
        self.state.lock().offset
    }

    pub fn is_animating(&self) -> bool {
        self.state.lock().animation.is_some()
    }

    /// Step the animation to the current time
    pub fn advance(&self) -> SurfaceFrame {
        let now = self.clock.now();
        let mut state = self.state.lock();

        if let Some(animation) = state.animation {
            let elapsed = now.saturating_sub(animation.started_at);
            let t = if self.duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
            };
            state.offset = animation.from + (animation.to - animation.from) * ease_in_out_cubic(t);
            if t >= 1.0 {
                state.offset = animation.to;
                state.animation = None;
                state.settled = Some(animation.ticket);
            }
        }

        SurfaceFrame {
            offset: state.offset,
            settled: state.settled.take(),
        }
    }
}

impl ScrollSurface for AnimatedScrollSurface {
    fn viewport_height(&self) -> f64 {
        self.state.lock().viewport_height
    }

    fn scroll_to(&self, request: ScrollRequest) {
        let now = self.clock.now();
        let mut state = self.state.lock();
        match request.behavior {
            ScrollBehavior::Instant => {
                state.offset = request.offset;
                state.animation = None;
                state.settled = Some(request.ticket);
            }
            // A new target replaces whatever was playing
            ScrollBehavior::Smooth => {
                state.animation = Some(Animation {
                    from: state.offset,
                    to: request.offset,
                    started_at: now,
                    ticket: request.ticket,
                });
                state.settled = None;
            }
        }
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
