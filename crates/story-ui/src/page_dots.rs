//! Vertical strip of page indicator dots

use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};
use story_core::{IndicatorDots, PageSet};

use crate::theme;

/// Indicator dot widget. Returns the clicked dot from [`PageDots::show`].
pub struct PageDots<'a> {
    dots: &'a IndicatorDots,
    pages: &'a PageSet,
    radius: f32,
    spacing: f32,
}

impl<'a> PageDots<'a> {
    pub fn new(dots: &'a IndicatorDots, pages: &'a PageSet) -> Self {
        Self {
            dots,
            pages,
            radius: 5.0,
            spacing: 22.0,
        }
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Lay the strip out vertically centred in `area`
    pub fn show(self, ui: &mut egui::Ui, area: Rect) -> Option<usize> {
        let mut clicked = None;
        let active = self.dots.active_index();

        for idx in 0..self.dots.len() {
            let center = dot_center(area, idx, self.dots.len(), self.spacing);
            let hit = Rect::from_center_size(center, Vec2::splat(self.radius * 3.0));
            let response = ui.interact(hit, ui.id().with(("page_dot", idx)), Sense::click());

            let (fill, radius) = if idx == active {
                (theme::accent_color(), self.radius * 1.3)
            } else if response.hovered() {
                (Color32::from_gray(200), self.radius)
            } else {
                (Color32::from_gray(110), self.radius)
            };
            let painter = ui.painter();
            painter.circle_filled(center, radius, fill);
            painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::from_black_alpha(120)));

            let response = match self.pages.get(idx) {
                Some(page) => response.on_hover_text(page.title.as_str()),
                None => response,
            };
            if response.clicked() {
                clicked = Some(idx);
            }
        }

        clicked
    }
}

/// Centre of dot `idx` when `count` dots are stacked in the middle of `area`
pub fn dot_center(area: Rect, idx: usize, count: usize, spacing: f32) -> Pos2 {
    let strip_height = spacing * count.saturating_sub(1) as f32;
    let top = area.center().y - strip_height / 2.0;
    Pos2::new(area.center().x, top + spacing * idx as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_dots_are_centred_vertically() {
        let area = Rect::from_min_max(pos2(0.0, 0.0), pos2(20.0, 400.0));
        assert_eq!(dot_center(area, 0, 5, 20.0), pos2(10.0, 160.0));
        assert_eq!(dot_center(area, 2, 5, 20.0), pos2(10.0, 200.0));
        assert_eq!(dot_center(area, 4, 5, 20.0), pos2(10.0, 240.0));
    }

    #[test]
    fn test_single_dot_sits_in_the_middle() {
        let area = Rect::from_min_max(pos2(0.0, 100.0), pos2(30.0, 300.0));
        assert_eq!(dot_center(area, 0, 1, 20.0), pos2(15.0, 200.0));
    }
}
