//! Story viewer entry point

use anyhow::{Context as _, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use story_core::StoryConfig;
use story_ui::{StoryPager, Theme};

/// Main application state
struct StoryApp {
    pager: StoryPager,
}

impl eframe::App for StoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.pager.ui(ui));
    }
}

/// Load the manifest named on the command line, or the built-in story
fn load_story() -> Result<StoryConfig> {
    match std::env::args().nth(1) {
        Some(path) => StoryConfig::load(&path)
            .with_context(|| format!("failed to load story manifest {}", path)),
        None => Ok(StoryConfig::default_story()),
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let story = load_story()?;
    info!(title = %story.title, pages = story.pages.len(), "starting story viewer");

    let title = story.title.clone();
    let pager = StoryPager::new(story)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            story_ui::apply_theme(&cc.egui_ctx, &Theme::default());
            Box::new(StoryApp { pager })
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
