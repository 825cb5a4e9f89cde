//! Takeover configuration

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_DURATION: f64 = 0.5;
const DEFAULT_ARIA_LABEL: &str = "Takeover Navigation";

/// Resolved configuration, immutable after construction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TakeoverConfig {
    /// Length of each open/close phase, in seconds
    pub duration: f64,

    /// Treat a takeover without triggers as missing markup
    pub require_triggers: bool,

    /// `aria-label` applied to the panel
    pub aria_label: String,
}

impl Default for TakeoverConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            require_triggers: false,
            aria_label: DEFAULT_ARIA_LABEL.to_string(),
        }
    }
}

impl TakeoverConfig {
    /// Merge defaults, the panel's duration attribute and caller options, in
    /// increasing precedence. Unusable durations fall back to the default.
    pub fn resolve(panel_duration: Option<&str>, options: &TakeoverOptions) -> Self {
        let mut config = Self::default();

        if let Some(raw) = panel_duration {
            match raw.trim().parse::<f64>() {
                Ok(secs) => config.duration = secs,
                Err(_) => tracing::warn!("DG Takeover: ignoring unparsable duration attribute {:?}", raw),
            }
        }
        if let Some(secs) = options.duration {
            config.duration = secs;
        }
        if let Some(require) = options.require_triggers {
            config.require_triggers = require;
        }
        if let Some(label) = &options.aria_label {
            config.aria_label = label.clone();
        }

        if step_duration(config.duration).is_none() {
            tracing::warn!(
                "DG Takeover: duration {} is not a positive number of seconds, using {}",
                config.duration,
                DEFAULT_DURATION
            );
            config.duration = DEFAULT_DURATION;
        }
        config
    }

    /// Phase length as a `Duration`
    pub fn step_duration(&self) -> Duration {
        step_duration(self.duration)
            .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_DURATION))
    }
}

fn step_duration(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

/// Caller overrides; `None` keeps the lower-precedence value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TakeoverOptions {
    pub duration: Option<f64>,
    pub require_triggers: Option<bool>,
    pub aria_label: Option<String>,
}

impl TakeoverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    pub fn with_required_triggers(mut self, require: bool) -> Self {
        self.require_triggers = Some(require);
        self
    }

    pub fn with_aria_label(mut self, label: &str) -> Self {
        self.aria_label = Some(label.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TakeoverConfig::resolve(None, &TakeoverOptions::new());
        assert_eq!(config, TakeoverConfig::default());
        assert_eq!(config.step_duration(), Duration::from_millis(500));
        assert_eq!(config.aria_label, "Takeover Navigation");
    }

    #[test]
    fn test_precedence() {
        let from_attr = TakeoverConfig::resolve(Some("0.25"), &TakeoverOptions::new());
        assert_eq!(from_attr.step_duration(), Duration::from_millis(250));

        let options = TakeoverOptions::new().with_duration(1.5);
        let from_options = TakeoverConfig::resolve(Some("0.25"), &options);
        assert_eq!(from_options.step_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_durations_fall_back() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e300] {
            let config = TakeoverConfig::resolve(None, &TakeoverOptions::new().with_duration(secs));
            assert_eq!(config.duration, 0.5, "duration {secs} should fall back");
        }
        let config = TakeoverConfig::resolve(Some("fast"), &TakeoverOptions::new());
        assert_eq!(config.duration, 0.5);
    }

    #[test]
    fn test_deserialize_options() {
        let options: TakeoverOptions =
            serde_json::from_str(r#"{ "duration": 0.3, "aria_label": "Site menu" }"#).unwrap();
        assert_eq!(
            options,
            TakeoverOptions::new().with_duration(0.3).with_aria_label("Site menu")
        );

        let empty: TakeoverOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, TakeoverOptions::default());
    }

    #[test]
    fn test_deserialize_config_fills_defaults() {
        let config: TakeoverConfig = serde_json::from_str(r#"{ "require_triggers": true }"#).unwrap();
        assert!(config.require_triggers);
        assert_eq!(config.duration, 0.5);
    }
}
