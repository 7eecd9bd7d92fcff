//! Full-window story pager
//!
//! Renders the page stack at the surface's current offset and routes wheel,
//! keyboard and dot input into the scroll controller.

use std::sync::Arc;
use std::time::Duration;
use egui::{Align2, Color32, FontId, Key, Rect, Vec2, pos2, vec2};
use story_core::{
    Clock, IndicatorDots, PageScrollController, ScrollDirection, StoryConfig, StoryError,
    SystemClock,
};
use tracing::info;

use crate::page_dots::PageDots;
use crate::surface::AnimatedScrollSurface;
use crate::theme;

/// Pager configuration
#[derive(Debug, Clone)]
pub struct PagerConfig {
    /// Duration of the smooth page animation
    pub animation: Duration,

    /// Width reserved for the dot strip on the right edge
    pub dots_width: f32,

    /// Caption of the button shown on the last page
    pub restart_label: String,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            animation: Duration::from_millis(700),
            dots_width: 36.0,
            restart_label: "Restart Story".to_string(),
        }
    }
}

pub struct StoryPager {
    title: String,
    controller: Arc<PageScrollController>,
    surface: Arc<AnimatedScrollSurface>,
    dots: Arc<IndicatorDots>,
    config: PagerConfig,
}

impl StoryPager {
    pub fn new(story: StoryConfig) -> Result<Self, StoryError> {
        Self::with_clock(story, PagerConfig::default(), Arc::new(SystemClock::new()))
    }

    pub fn with_clock(
        story: StoryConfig,
        config: PagerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoryError> {
        let pages = story.page_set()?;
        let surface = Arc::new(AnimatedScrollSurface::new(clock.clone(), config.animation));
        let controller = Arc::new(PageScrollController::new(
            pages,
            story.scroll.clone(),
            surface.clone(),
            clock,
        )?);

        let dots = Arc::new(IndicatorDots::new(controller.page_count()));
        controller.add_subscriber(dots.clone());

        info!(title = %story.title, pages = controller.page_count(), "story pager created");

        Ok(Self {
            title: story.title,
            controller,
            surface,
            dots,
            config,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn controller(&self) -> &Arc<PageScrollController> {
        &self.controller
    }

    pub fn dots(&self) -> &IndicatorDots {
        &self.dots
    }

    /// Show the pager filling the available space
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let rect = ui.available_rect_before_wrap();
        ui.allocate_rect(rect, egui::Sense::hover());

        if self.surface.set_viewport_height(rect.height() as f64) {
            self.controller.handle_resize();
        }

        self.handle_input(ui, rect);

        let frame = self.surface.advance();
        if let Some(ticket) = frame.settled {
            self.controller.transition_settled(ticket);
        }
        self.controller.poll();
        if self.surface.is_animating() || self.controller.is_transitioning() {
            ui.ctx().request_repaint();
        }

        self.draw_pages(ui, rect, frame.offset as f32);

        let dots_area = Rect::from_min_max(pos2(rect.right() - self.config.dots_width, rect.top()), rect.max);
        if let Some(dot) = PageDots::new(&self.dots, self.controller.pages()).show(ui, dots_area) {
            self.controller.handle_dot_click(dot);
        }
    }

    fn handle_input(&self, ui: &egui::Ui, rect: Rect) {
        let (wheel, forward, backward, home, end) = ui.input(|i| {
            (
                i.scroll_delta.y,
                i.key_pressed(Key::ArrowDown) || i.key_pressed(Key::PageDown) || i.key_pressed(Key::Space),
                i.key_pressed(Key::ArrowUp) || i.key_pressed(Key::PageUp),
                i.key_pressed(Key::Home),
                i.key_pressed(Key::End),
            )
        });

        // egui reports wheel-down as negative; the controller expects DOM sign
        if wheel != 0.0 && ui.rect_contains_pointer(rect) {
            self.controller.handle_wheel(-wheel as f64);
        }
        if forward {
            self.controller.handle_step(ScrollDirection::Forward);
        }
        if backward {
            self.controller.handle_step(ScrollDirection::Backward);
        }
        if home {
            self.controller.restart();
        }
        if end {
            self.controller.jump_to_page(self.controller.page_count() - 1);
        }
    }

    fn draw_pages(&self, ui: &mut egui::Ui, rect: Rect, offset: f32) {
        let height = rect.height();
        let painter = ui.painter_at(rect);
        let last = self.controller.page_count() - 1;

        for (idx, page) in self.controller.pages().iter().enumerate() {
            let top = rect.top() + idx as f32 * height - offset;
            let page_rect = Rect::from_min_size(pos2(rect.left(), top), vec2(rect.width(), height));
            if !page_rect.intersects(rect) {
                continue;
            }

            painter.rect_filled(page_rect, 0.0, theme::page_background(idx));
            painter.text(
                page_rect.center() - Vec2::new(0.0, 40.0),
                Align2::CENTER_CENTER,
                &page.title,
                FontId::proportional(34.0),
                Color32::from_gray(235),
            );
            if !page.summary.is_empty() {
                painter.text(
                    page_rect.center() + Vec2::new(0.0, 10.0),
                    Align2::CENTER_CENTER,
                    &page.summary,
                    FontId::proportional(17.0),
                    Color32::from_gray(180),
                );
            }
            painter.text(
                pos2(page_rect.left() + 24.0, page_rect.bottom() - 24.0),
                Align2::LEFT_BOTTOM,
                format!("{} / {}", idx + 1, last + 1),
                FontId::proportional(13.0),
                Color32::from_gray(130),
            );

            if idx == last {
                let button_rect = Rect::from_center_size(
                    page_rect.center() + Vec2::new(0.0, 90.0),
                    vec2(180.0, 40.0),
                );
                let mut child = ui.child_ui(rect, *ui.layout());
                child.set_clip_rect(rect);
                let restart = child.put(button_rect, egui::Button::new(self.config.restart_label.as_str()));
                if restart.clicked() {
                    self.controller.restart();
                }
            }
        }
    }
}
