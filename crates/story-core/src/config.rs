//! Story manifest and scroll settings

use std::path::Path;
use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::error::StoryError;
use crate::navigation::{PageInfo, PageSet};

/// How wheel input is debounced into page transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DebouncePolicy {
    /// Every wheel event with a direction commits a transition
    Immediate,
    /// Wheel deltas are summed until their magnitude reaches `threshold`
    Accumulate { threshold: f64 },
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        DebouncePolicy::Accumulate { threshold: 100.0 }
    }
}

/// What releases the transition lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleMode {
    /// Only the cooldown deadline releases the lock
    Cooldown,
    /// The surface reports completion; the cooldown is a ceiling
    #[default]
    Completion,
}

/// Whether dot clicks honor an in-flight transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickPolicy {
    #[default]
    Override,
    RespectLock,
}

/// Scroll controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub debounce: DebouncePolicy,

    /// Lock duration after a committed transition. Must exceed the
    /// surface's animation time when `settle` is `Cooldown`.
    pub cooldown_ms: u64,

    pub settle: SettleMode,

    pub click_policy: ClickPolicy,

    /// Sub-threshold delta older than this is discarded; `None` keeps it forever
    pub accumulator_idle_reset_ms: Option<u64>,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            debounce: DebouncePolicy::default(),
            cooldown_ms: 1000,
            settle: SettleMode::default(),
            click_policy: ClickPolicy::default(),
            accumulator_idle_reset_ms: Some(250),
        }
    }
}

impl ScrollSettings {
    /// Settings matching the immediate-debounce controller
    pub fn immediate() -> Self {
        Self {
            debounce: DebouncePolicy::Immediate,
            ..Self::default()
        }
    }

    /// Settings matching the accumulating controller with the given threshold
    pub fn accumulate(threshold: f64) -> Self {
        Self {
            debounce: DebouncePolicy::Accumulate { threshold },
            ..Self::default()
        }
    }

    pub fn with_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_settle(mut self, settle: SettleMode) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_click_policy(mut self, click_policy: ClickPolicy) -> Self {
        self.click_policy = click_policy;
        self
    }

    pub fn with_idle_reset_ms(mut self, idle_reset_ms: Option<u64>) -> Self {
        self.accumulator_idle_reset_ms = idle_reset_ms;
        self
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn idle_reset(&self) -> Option<Duration> {
        self.accumulator_idle_reset_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), StoryError> {
        if let DebouncePolicy::Accumulate { threshold } = self.debounce {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(StoryError::invalid(
                    "debounce.threshold",
                    format!("must be a positive number, got {}", threshold),
                ));
            }
        }
        if self.cooldown_ms == 0 {
            return Err(StoryError::invalid("cooldown_ms", "must be greater than zero"));
        }
        Ok(())
    }
}

/// A story manifest: ordered pages plus scroll behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryConfig {
    pub title: String,

    pub pages: Vec<PageInfo>,

    #[serde(default)]
    pub scroll: ScrollSettings,
}

impl StoryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, StoryError> {
        let config: StoryConfig = serde_json::from_str(json)?;
        config.scroll.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Build the immutable page set, rejecting empty stories and repeated ids
    pub fn page_set(&self) -> Result<PageSet, StoryError> {
        PageSet::new(self.pages.clone())
    }

    /// The built-in environmental narrative
    pub fn default_story() -> Self {
        let pages = [
            ("intro", "Our Planet in Data", "Scroll down to walk through four stories about the environment we share."),
            ("climate-change-img", "Climate Change", "Rising temperatures, melting ice caps and a sea that keeps climbing."),
            ("climate-change-vis", "Temperature, CO2 and Sea Level", "Global temperature anomaly plotted against atmospheric CO2 and mean sea level."),
            ("air-quality-img", "Air Quality", "What we breathe in the cities we live in."),
            ("air-quality-vis", "Pollutants by Country", "Particulate matter and ozone concentrations over time."),
            ("water-quality-img", "Water Quality", "Acidifying oceans and the ecosystems that depend on them."),
            ("water-quality-vis", "Ocean pH", "Monthly surface pH across measuring stations."),
            ("plastic-waste-img", "Plastic Waste", "Where the plastic we throw away ends up."),
            ("plastic-waste-vis", "Composition of Plastic Waste", "Share of plastic waste by polymer type."),
            ("reflection", "Reflection", "What can we change? Restart the story to look again."),
        ];

        Self {
            title: "Our Planet in Data".to_string(),
            pages: pages
                .iter()
                .map(|(id, title, summary)| PageInfo::new(*id, *title).with_summary(*summary))
                .collect(),
            scroll: ScrollSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_uses_defaults_for_missing_scroll_fields() {
        let json = r#"{
            "title": "Short",
            "pages": [{ "id": "a", "title": "A" }, { "id": "b", "title": "B" }],
            "scroll": { "cooldown_ms": 600 }
        }"#;
        let config = StoryConfig::from_json_str(json).unwrap();
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[1].summary, "");
        assert_eq!(config.scroll.cooldown_ms, 600);
        assert_eq!(config.scroll.debounce, DebouncePolicy::Accumulate { threshold: 100.0 });
        assert_eq!(config.scroll.settle, SettleMode::Completion);
    }

    #[test]
    fn test_manifest_debounce_modes() {
        let json = r#"{
            "title": "Immediate",
            "pages": [{ "id": "a", "title": "A" }],
            "scroll": {
                "debounce": { "mode": "immediate" },
                "settle": "cooldown",
                "click_policy": "respect_lock",
                "accumulator_idle_reset_ms": null
            }
        }"#;
        let config = StoryConfig::from_json_str(json).unwrap();
        assert_eq!(config.scroll.debounce, DebouncePolicy::Immediate);
        assert_eq!(config.scroll.settle, SettleMode::Cooldown);
        assert_eq!(config.scroll.click_policy, ClickPolicy::RespectLock);
        assert_eq!(config.scroll.idle_reset(), None);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let json = r#"{
            "title": "Bad",
            "pages": [{ "id": "a", "title": "A" }],
            "scroll": { "debounce": { "mode": "accumulate", "threshold": -5.0 } }
        }"#;
        let err = StoryConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, StoryError::InvalidSetting { name: "debounce.threshold", .. }));
    }

    #[test]
    fn test_zero_cooldown_rejected() {
        let err = ScrollSettings::immediate().with_cooldown_ms(0).validate().unwrap_err();
        assert!(matches!(err, StoryError::InvalidSetting { name: "cooldown_ms", .. }));
    }

    #[test]
    fn test_malformed_manifest() {
        assert!(matches!(
            StoryConfig::from_json_str("{ \"title\": 3 }"),
            Err(StoryError::Json(_))
        ));
    }

    #[test]
    fn test_default_story() {
        let config = StoryConfig::default_story();
        let pages = config.page_set().unwrap();
        assert_eq!(pages.len(), 10);
        assert_eq!(pages.get(0).map(|p| p.id.as_str()), Some("intro"));
        assert_eq!(pages.get(9).map(|p| p.id.as_str()), Some("reflection"));
        assert!(config.scroll.validate().is_ok());
    }
}
