//! Page scroll controller implementation

use std::sync::{Arc, Weak};
use std::time::Duration;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use super::{
    IgnoreReason, InputOutcome, JumpOutcome, NavigationContext, PageSet, PageSubscriber,
    ScrollBehavior, ScrollDirection, ScrollRequest, ScrollSurface, TransitionCause,
    TransitionTicket,
};
use crate::clock::Clock;
use crate::config::{ClickPolicy, DebouncePolicy, ScrollSettings, SettleMode};
use crate::error::StoryError;

/// A scroll command that has not settled yet
#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: TransitionTicket,
    deadline: Duration,
    /// Set for directional commits; blocks further directional input
    locking: bool,
}

#[derive(Debug, Default)]
struct Accumulator {
    total: f64,
    last_at: Option<Duration>,
}

impl Accumulator {
    fn reset(&mut self) {
        self.total = 0.0;
        self.last_at = None;
    }
}

/// Navigation state stored internally
#[derive(Debug)]
struct NavigationState {
    current_page: usize,
    accumulator: Accumulator,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

impl NavigationState {
    fn take_ticket(&mut self) -> TransitionTicket {
        let ticket = TransitionTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    fn is_locked(&self) -> bool {
        self.in_flight.map_or(false, |flight| flight.locking)
    }

    /// Drop an in-flight transition whose deadline has passed
    fn expire(&mut self, now: Duration) -> bool {
        if self.in_flight.map_or(false, |flight| now >= flight.deadline) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

/// Side effects computed under the state lock and applied after releasing it
#[derive(Debug, Default)]
struct Effects {
    scroll: Option<(usize, ScrollBehavior, TransitionTicket)>,
    notify: bool,
}

/// Maps wheel, keyboard and dot input to a single current page and drives
/// the scroll surface to it.
pub struct PageScrollController {
    pages: PageSet,
    settings: ScrollSettings,
    surface: Arc<dyn ScrollSurface>,
    clock: Arc<dyn Clock>,
    state: RwLock<NavigationState>,
    subscribers: RwLock<Vec<Weak<dyn PageSubscriber>>>,
}

impl PageScrollController {
    /// Create a controller resting on page 0
    pub fn new(
        pages: PageSet,
        settings: ScrollSettings,
        surface: Arc<dyn ScrollSurface>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoryError> {
        settings.validate()?;
        if pages.is_empty() {
            return Err(StoryError::EmptyStory);
        }

        debug!(pages = pages.len(), ?settings.debounce, "scroll controller ready");

        Ok(Self {
            pages,
            settings,
            surface,
            clock,
            state: RwLock::new(NavigationState {
                current_page: 0,
                accumulator: Accumulator::default(),
                in_flight: None,
                next_ticket: 1,
            }),
            subscribers: RwLock::new(Vec::new()),
        })
    }

    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn settings(&self) -> &ScrollSettings {
        &self.settings
    }

    pub fn current_page(&self) -> usize {
        self.state.read().current_page
    }

    /// Whether directional input is currently blocked
    pub fn is_transitioning(&self) -> bool {
        let now = self.clock.now();
        self.state
            .read()
            .in_flight
            .map_or(false, |flight| flight.locking && now < flight.deadline)
    }

    /// Unconsumed wheel delta (accumulating policy only)
    pub fn accumulated_delta(&self) -> f64 {
        self.state.read().accumulator.total
    }

    pub fn context(&self) -> NavigationContext {
        NavigationContext {
            current_page: self.current_page(),
            page_count: self.pages.len(),
            transitioning: self.is_transitioning(),
        }
    }

    /// Add a subscriber. Only a weak reference is kept.
    pub fn add_subscriber(&self, subscriber: Arc<dyn PageSubscriber>) {
        self.subscribers.write().push(Arc::downgrade(&subscriber));
    }

    /// Move to `target`, clamping it into range.
    ///
    /// Never blocked by the transition lock and never acquires it.
    pub fn jump_to_page(&self, target: usize) -> JumpOutcome {
        self.jump(target, TransitionCause::Programmatic)
    }

    /// Return to the first page
    pub fn restart(&self) -> JumpOutcome {
        self.jump(0, TransitionCause::Restart)
    }

    pub fn handle_dot_click(&self, dot: usize) -> JumpOutcome {
        if self.settings.click_policy == ClickPolicy::RespectLock {
            let now = self.clock.now();
            let mut state = self.state.write();
            let released = state.expire(now);
            if state.is_locked() {
                drop(state);
                trace!(dot, "dot click ignored during transition");
                return JumpOutcome::Locked;
            }
            drop(state);
            if released {
                self.notify_subscribers();
            }
        }
        debug!(dot, "dot clicked");
        self.jump(dot, TransitionCause::DotClick)
    }

    /// Handle a wheel event. Positive `delta_y` scrolls forward.
    pub fn handle_wheel(&self, delta_y: f64) -> InputOutcome {
        let now = self.clock.now();
        let (outcome, effects) = {
            let mut state = self.state.write();
            let released = state.expire(now);
            let (outcome, mut effects) = self.plan_wheel(&mut state, delta_y, now);
            effects.notify |= released;
            (outcome, effects)
        };
        self.apply(effects);
        outcome
    }

    /// Handle a discrete step (arrow keys, page keys). Subject to the
    /// transition lock but not to the accumulator.
    pub fn handle_step(&self, direction: ScrollDirection) -> InputOutcome {
        let now = self.clock.now();
        let (outcome, effects) = {
            let mut state = self.state.write();
            let released = state.expire(now);
            let (outcome, mut effects) = if state.is_locked() {
                trace!(?direction, "step ignored during transition");
                (InputOutcome::Ignored(IgnoreReason::Locked), Effects::default())
            } else {
                self.commit(&mut state, direction, now, TransitionCause::Step)
            };
            effects.notify |= released;
            (outcome, effects)
        };
        self.apply(effects);
        outcome
    }

    /// Completion signal from the surface. Returns true if it released the
    /// in-flight transition.
    pub fn transition_settled(&self, ticket: TransitionTicket) -> bool {
        if self.settings.settle == SettleMode::Cooldown {
            return false;
        }

        let mut state = self.state.write();
        if state.in_flight.map(|flight| flight.ticket) != Some(ticket) {
            return false;
        }
        state.in_flight = None;
        drop(state);

        debug!(ticket = ticket.0, "transition settled");
        self.notify_subscribers();
        true
    }

    /// Release an in-flight transition whose cooldown has elapsed
    pub fn poll(&self) -> bool {
        let now = self.clock.now();
        let released = self.state.write().expire(now);
        if released {
            debug!("transition cooldown elapsed");
            self.notify_subscribers();
        }
        released
    }

    /// Adopt the page under `scroll_top` after the surface scrolled on its own.
    /// Ignored while a programmatic scroll is in flight.
    pub fn sync_to_offset(&self, scroll_top: f64) -> Option<usize> {
        let height = self.surface.viewport_height();
        if !scroll_top.is_finite() || height.is_nan() || height <= 0.0 {
            return None;
        }
        let page = ((scroll_top / height).round().max(0.0) as usize).min(self.pages.last_index());

        let now = self.clock.now();
        let (changed, notify) = {
            let mut state = self.state.write();
            let released = state.expire(now);
            if state.in_flight.is_some() || state.current_page == page {
                (false, released)
            } else {
                state.current_page = page;
                state.accumulator.reset();
                (true, true)
            }
        };

        if notify {
            self.notify_subscribers();
        }
        if changed {
            debug!(page, "page synced from scroll offset");
            Some(page)
        } else {
            None
        }
    }

    /// Re-align the surface with the current page after the viewport height changed
    pub fn handle_resize(&self) {
        let effects = {
            let mut state = self.state.write();
            let ticket = state.take_ticket();
            if let Some(flight) = state.in_flight.as_mut() {
                flight.ticket = ticket;
            }
            Effects {
                scroll: Some((state.current_page, ScrollBehavior::Instant, ticket)),
                notify: false,
            }
        };
        trace!(cause = ?TransitionCause::Resize, "re-aligning viewport");
        self.apply(effects);
    }

    fn jump(&self, target: usize, cause: TransitionCause) -> JumpOutcome {
        let now = self.clock.now();
        let page = target.min(self.pages.last_index());
        let outcome = if page == target {
            JumpOutcome::Moved { page }
        } else {
            warn!(requested = target, page, "jump target out of range, clamped");
            JumpOutcome::Clamped {
                requested: target,
                page,
            }
        };

        let effects = {
            let mut state = self.state.write();
            state.expire(now);
            let ticket = state.take_ticket();
            state.current_page = page;
            state.accumulator.reset();
            if state.is_locked() {
                // Overriding a locked transition moves the lock onto the new scroll
                if let Some(flight) = state.in_flight.as_mut() {
                    flight.ticket = ticket;
                }
            } else {
                state.in_flight = Some(InFlight {
                    ticket,
                    deadline: now + self.settings.cooldown(),
                    locking: false,
                });
            }
            Effects {
                scroll: Some((page, ScrollBehavior::Smooth, ticket)),
                notify: true,
            }
        };

        debug!(page, ?cause, "jump to page");
        self.apply(effects);
        outcome
    }

    fn plan_wheel(
        &self,
        state: &mut NavigationState,
        delta_y: f64,
        now: Duration,
    ) -> (InputOutcome, Effects) {
        if state.is_locked() {
            trace!(delta_y, "wheel ignored during transition");
            return (InputOutcome::Ignored(IgnoreReason::Locked), Effects::default());
        }
        if ScrollDirection::from_delta(delta_y).is_none() {
            return (InputOutcome::Ignored(IgnoreReason::NoDirection), Effects::default());
        }

        let direction = match self.settings.debounce {
            DebouncePolicy::Immediate => ScrollDirection::from_delta(delta_y),
            DebouncePolicy::Accumulate { threshold } => {
                let acc = &mut state.accumulator;
                if let (Some(idle), Some(last)) = (self.settings.idle_reset(), acc.last_at) {
                    if now.saturating_sub(last) > idle {
                        trace!(stale = acc.total, "discarding idle scroll delta");
                        acc.total = 0.0;
                    }
                }
                acc.total += delta_y;
                acc.last_at = Some(now);

                if acc.total.abs() < threshold {
                    trace!(total = acc.total, threshold, "scroll delta accumulated");
                    return (
                        InputOutcome::Accumulated { total: acc.total },
                        Effects::default(),
                    );
                }
                ScrollDirection::from_delta(acc.total)
            }
        };

        match direction {
            Some(direction) => self.commit(state, direction, now, TransitionCause::Wheel),
            None => {
                state.accumulator.reset();
                (InputOutcome::Ignored(IgnoreReason::NoDirection), Effects::default())
            }
        }
    }

    fn commit(
        &self,
        state: &mut NavigationState,
        direction: ScrollDirection,
        now: Duration,
        cause: TransitionCause,
    ) -> (InputOutcome, Effects) {
        state.accumulator.reset();

        let from = state.current_page;
        let to = match direction {
            ScrollDirection::Forward if from < self.pages.last_index() => from + 1,
            ScrollDirection::Backward if from > 0 => from - 1,
            _ => {
                trace!(page = from, ?direction, "already at boundary");
                return (InputOutcome::AtBoundary, Effects::default());
            }
        };

        let ticket = state.take_ticket();
        state.current_page = to;
        state.in_flight = Some(InFlight {
            ticket,
            deadline: now + self.settings.cooldown(),
            locking: true,
        });

        debug!(from, to, ?cause, ticket = ticket.0, "page transition committed");
        (
            InputOutcome::Committed { from, to },
            Effects {
                scroll: Some((to, ScrollBehavior::Smooth, ticket)),
                notify: true,
            },
        )
    }

    fn apply(&self, effects: Effects) {
        if let Some((page, behavior, ticket)) = effects.scroll {
            let offset = page as f64 * self.surface.viewport_height();
            self.surface.scroll_to(ScrollRequest {
                offset,
                behavior,
                ticket,
            });
        }
        if effects.notify {
            self.notify_subscribers();
        }
    }

    /// Notify all subscribers of a navigation change
    fn notify_subscribers(&self) {
        let context = self.context();
        let live: Vec<Arc<dyn PageSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in live {
            subscriber.on_page_change(&context);
        }
    }
}
