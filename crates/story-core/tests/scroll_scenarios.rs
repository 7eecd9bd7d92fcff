use std::sync::Arc;

use parking_lot::Mutex;
use story_core::{
    InputOutcome, IndicatorDots, JumpOutcome, ManualClock, PageScrollController, PageSet,
    ScrollRequest, ScrollSettings, ScrollSurface, StoryConfig,
};

const VIEWPORT: f64 = 900.0;

#[derive(Default)]
struct FakeContainer {
    scrolls: Mutex<Vec<ScrollRequest>>,
}

impl FakeContainer {
    fn last_offset(&self) -> Option<f64> {
        self.scrolls.lock().last().map(|r| r.offset)
    }
}

impl ScrollSurface for FakeContainer {
    fn viewport_height(&self) -> f64 {
        VIEWPORT
    }

    fn scroll_to(&self, request: ScrollRequest) {
        self.scrolls.lock().push(request);
    }
}

struct Story {
    controller: PageScrollController,
    container: Arc<FakeContainer>,
    clock: Arc<ManualClock>,
    dots: Arc<IndicatorDots>,
}

fn six_page_story(settings: ScrollSettings) -> Story {
    let container = Arc::new(FakeContainer::default());
    let clock = Arc::new(ManualClock::new());
    let controller = PageScrollController::new(
        PageSet::with_count(6).unwrap(),
        settings,
        container.clone(),
        clock.clone(),
    )
    .unwrap();
    let dots = Arc::new(IndicatorDots::new(controller.page_count()));
    controller.add_subscriber(dots.clone());

    Story {
        controller,
        container,
        clock,
        dots,
    }
}

#[test]
fn three_wheel_ticks_land_on_page_three() {
    let story = six_page_story(ScrollSettings::accumulate(100.0));

    for _ in 0..3 {
        assert!(matches!(
            story.controller.handle_wheel(120.0),
            InputOutcome::Committed { .. }
        ));
        story.clock.advance_ms(1100);
    }

    assert_eq!(story.controller.current_page(), 3);
    assert_eq!(
        story.dots.states(),
        vec![false, false, false, true, false, false]
    );
    assert_eq!(story.container.last_offset(), Some(3.0 * VIEWPORT));
}

#[test]
fn forward_tick_on_last_page_stays() {
    let story = six_page_story(ScrollSettings::immediate());
    story.controller.jump_to_page(5);
    story.clock.advance_ms(1100);
    let scrolls_before = story.container.scrolls.lock().len();

    assert_eq!(story.controller.handle_wheel(40.0), InputOutcome::AtBoundary);
    assert_eq!(story.controller.current_page(), 5);
    assert_eq!(story.container.scrolls.lock().len(), scrolls_before);
    assert!(!story.controller.is_transitioning());
}

#[test]
fn backward_tick_on_first_page_stays() {
    let story = six_page_story(ScrollSettings::immediate());
    assert_eq!(story.controller.handle_wheel(-40.0), InputOutcome::AtBoundary);
    assert_eq!(story.controller.current_page(), 0);
    assert!(story.container.scrolls.lock().is_empty());
}

#[test]
fn rapid_ticks_within_cooldown_advance_once() {
    let story = six_page_story(ScrollSettings::immediate());
    for _ in 0..25 {
        story.controller.handle_wheel(8.0);
        story.clock.advance_ms(20);
    }
    assert_eq!(story.controller.current_page(), 1);
    assert_eq!(story.dots.active_index(), 1);
}

#[test]
fn click_first_dot_from_last_page() {
    let story = six_page_story(ScrollSettings::immediate());
    story.controller.jump_to_page(5);

    assert_eq!(story.controller.handle_dot_click(0), JumpOutcome::Moved { page: 0 });
    assert_eq!(story.controller.current_page(), 0);
    assert_eq!(story.container.last_offset(), Some(0.0));
    assert!(story.dots.is_active(0));
}

#[test]
fn restart_matches_jump_to_first_page() {
    let story = six_page_story(ScrollSettings::immediate());
    story.controller.handle_wheel(1.0);
    story.clock.advance_ms(1000);
    story.controller.handle_wheel(1.0);

    assert_eq!(story.controller.restart(), JumpOutcome::Moved { page: 0 });
    assert_eq!(story.controller.current_page(), 0);
    assert_eq!(story.container.last_offset(), Some(0.0));
    assert_eq!(story.dots.active_index(), 0);
}

#[test]
fn dot_click_during_lock_wins() {
    let story = six_page_story(ScrollSettings::immediate());
    story.controller.handle_wheel(1.0);
    assert!(story.controller.is_transitioning());

    story.controller.handle_dot_click(4);
    assert_eq!(story.controller.current_page(), 4);
    assert_eq!(story.dots.active_index(), 4);
}

#[test]
fn default_story_walkthrough() {
    let config = StoryConfig::default_story();
    let container = Arc::new(FakeContainer::default());
    let clock = Arc::new(ManualClock::new());
    let controller = PageScrollController::new(
        config.page_set().unwrap(),
        config.scroll.clone(),
        container.clone(),
        clock.clone(),
    )
    .unwrap();

    // Default settle mode waits for the surface; settle every scroll right away
    for _ in 0..20 {
        controller.handle_wheel(60.0);
        controller.handle_wheel(60.0);
        let last_scroll = container.scrolls.lock().last().copied();
        if let Some(request) = last_scroll {
            controller.transition_settled(request.ticket);
        }
        clock.advance_ms(10);
    }

    assert_eq!(controller.current_page(), controller.page_count() - 1);
    let last = controller.pages().get(controller.current_page()).unwrap();
    assert_eq!(last.id, "reflection");
}
