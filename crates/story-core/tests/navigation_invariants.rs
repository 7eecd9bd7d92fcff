use std::sync::Arc;

use proptest::prelude::*;
use story_core::{
    ClickPolicy, IndicatorDots, ManualClock, PageScrollController, PageSet, ScrollDirection,
    ScrollRequest, ScrollSettings, ScrollSurface,
};

struct NullSurface;

impl ScrollSurface for NullSurface {
    fn viewport_height(&self) -> f64 {
        720.0
    }

    fn scroll_to(&self, _request: ScrollRequest) {}
}

#[derive(Debug, Clone)]
enum Action {
    Wheel(f64),
    Step(bool),
    Dot(usize),
    Jump(usize),
    Restart,
    Sync(f64),
    Wait(u64),
    Poll,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (-300.0f64..300.0).prop_map(Action::Wheel),
        any::<bool>().prop_map(Action::Step),
        (0usize..12).prop_map(Action::Dot),
        (0usize..30).prop_map(Action::Jump),
        Just(Action::Restart),
        (-1_000.0f64..20_000.0).prop_map(Action::Sync),
        (0u64..1_500).prop_map(Action::Wait),
        Just(Action::Poll),
    ]
}

fn settings() -> impl Strategy<Value = ScrollSettings> {
    prop_oneof![
        Just(ScrollSettings::immediate()),
        (1.0f64..250.0).prop_map(ScrollSettings::accumulate),
        (1.0f64..250.0).prop_map(|threshold| {
            ScrollSettings::accumulate(threshold).with_click_policy(ClickPolicy::RespectLock)
        }),
    ]
}

proptest! {
    #[test]
    fn current_page_stays_in_range_and_matches_single_active_dot(
        page_count in 1usize..10,
        settings in settings(),
        actions in prop::collection::vec(action(), 0..80),
    ) {
        let clock = Arc::new(ManualClock::new());
        let controller = PageScrollController::new(
            PageSet::with_count(page_count).unwrap(),
            settings,
            Arc::new(NullSurface),
            clock.clone(),
        )
        .unwrap();
        let dots = Arc::new(IndicatorDots::new(page_count));
        controller.add_subscriber(dots.clone());

        for action in actions {
            match action {
                Action::Wheel(delta) => { controller.handle_wheel(delta); }
                Action::Step(forward) => {
                    let direction = if forward { ScrollDirection::Forward } else { ScrollDirection::Backward };
                    controller.handle_step(direction);
                }
                Action::Dot(dot) => { controller.handle_dot_click(dot); }
                Action::Jump(page) => { controller.jump_to_page(page); }
                Action::Restart => { controller.restart(); }
                Action::Sync(offset) => { controller.sync_to_offset(offset); }
                Action::Wait(ms) => clock.advance_ms(ms),
                Action::Poll => { controller.poll(); }
            }

            let page = controller.current_page();
            prop_assert!(page < page_count);

            let states = dots.states();
            prop_assert_eq!(states.iter().filter(|active| **active).count(), 1);
            prop_assert!(states[page]);
        }
    }

    #[test]
    fn rapid_forward_input_advances_at_most_once_per_cooldown(
        ticks in 1usize..50,
        spacing_ms in 0u64..20,
    ) {
        let clock = Arc::new(ManualClock::new());
        let controller = PageScrollController::new(
            PageSet::with_count(6).unwrap(),
            ScrollSettings::immediate(),
            Arc::new(NullSurface),
            clock.clone(),
        )
        .unwrap();

        for _ in 0..ticks {
            controller.handle_wheel(5.0);
            clock.advance_ms(spacing_ms);
        }
        prop_assert_eq!(controller.current_page(), 1);
    }
}
