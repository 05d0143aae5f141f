//! Tunables for the carousel, its transitions and the hero slideshow.
//!
//! Every struct has a `Default` carrying the page's stock constants and a
//! `from_env()` constructor reading `SHOWCASE_*` overrides.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Minimum drag distance (exclusive) that commits a carousel swipe.
const DEFAULT_SWIPE_THRESHOLD: f64 = 70.0;
/// Fraction of the finger delta applied to the image while dragging.
const DEFAULT_DRAG_DAMPING: f64 = 0.5;
/// Vertical distance over which the dismiss preview fades out.
const DEFAULT_FADE_DISTANCE: f64 = 500.0;
/// Floor for the dismiss preview opacity.
const DEFAULT_MIN_PREVIEW_OPACITY: f64 = 0.3;
const DEFAULT_SLIDE_MS: u64 = 300;
const DEFAULT_SETTLE_MS: u64 = 50;
const DEFAULT_AUTOPLAY_MS: u64 = 2000;
const DEFAULT_HERO_SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// What happens to an in-flight transition when a newer one is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Timers of earlier sequences keep firing; rapid swipes may overlap visually.
    #[default]
    Overlap,
    /// A newer commit drops the remaining steps of every older sequence.
    Supersede,
}

impl FromStr for TransitionPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overlap" => Ok(Self::Overlap),
            "supersede" => Ok(Self::Supersede),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub swipe_threshold: f64,
    pub drag_damping: f64,
    pub fade_distance: f64,
    pub min_preview_opacity: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            drag_damping: DEFAULT_DRAG_DAMPING,
            fade_distance: DEFAULT_FADE_DISTANCE,
            min_preview_opacity: DEFAULT_MIN_PREVIEW_OPACITY,
        }
    }
}

impl CarouselConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(threshold) = env_positive_f64("SHOWCASE_SWIPE_THRESHOLD")? {
            config.swipe_threshold = threshold;
        }
        Ok(config)
    }

    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring carousel overrides");
            Self::default()
        })
    }

    /// Opacity shown while dragging vertically by `dy`.
    pub fn preview_opacity(&self, dy: f64) -> f64 {
        (1.0 - dy.abs() / self.fade_distance).max(self.min_preview_opacity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTiming {
    /// Duration of the slide-out (and of the dismiss animation).
    pub slide: Duration,
    /// Pause between jumping to the opposite side and sliding back in.
    pub settle: Duration,
    pub policy: TransitionPolicy,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            slide: Duration::from_millis(DEFAULT_SLIDE_MS),
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            policy: TransitionPolicy::default(),
        }
    }
}

impl TransitionTiming {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let mut timing = Self::default();
        if let Some(ms) = env_u64("SHOWCASE_SLIDE_MS")? {
            timing.slide = Duration::from_millis(ms);
        }
        if let Some(ms) = env_u64("SHOWCASE_SETTLE_MS")? {
            timing.settle = Duration::from_millis(ms);
        }
        if let Some(value) = env_string("SHOWCASE_TRANSITIONS") {
            timing.policy = value.parse().map_err(|_| ConfigError::Invalid {
                var: "SHOWCASE_TRANSITIONS",
                value,
                reason: "expected `overlap` or `supersede`",
            })?;
        }
        Ok(timing)
    }

    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring transition overrides");
            Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowConfig {
    pub autoplay_interval: Duration,
    pub swipe_threshold: f64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(DEFAULT_AUTOPLAY_MS),
            swipe_threshold: DEFAULT_HERO_SWIPE_THRESHOLD,
        }
    }
}

impl SlideshowConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(ms) = env_u64("SHOWCASE_AUTOPLAY_MS")? {
            if ms == 0 {
                return Err(ConfigError::Invalid {
                    var: "SHOWCASE_AUTOPLAY_MS",
                    value: ms.to_string(),
                    reason: "must be greater than 0",
                });
            }
            config.autoplay_interval = Duration::from_millis(ms);
        }
        if let Some(threshold) = env_positive_f64("SHOWCASE_HERO_SWIPE_THRESHOLD")? {
            config.swipe_threshold = threshold;
        }
        Ok(config)
    }

    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring slideshow overrides");
            Self::default()
        })
    }
}

fn env_string(var: &'static str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_u64(var: &'static str) -> Result<Option<u64>, ConfigError> {
    env_string(var)
        .map(|value| {
            value.parse::<u64>().map_err(|_| ConfigError::Invalid {
                var,
                value,
                reason: "expected a non-negative integer",
            })
        })
        .transpose()
}

fn env_positive_f64(var: &'static str) -> Result<Option<f64>, ConfigError> {
    env_string(var)
        .map(|value| match value.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
            _ => Err(ConfigError::Invalid {
                var,
                value,
                reason: "expected a positive number",
            }),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carousel_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.swipe_threshold, 70.0);
        assert_eq!(config.drag_damping, 0.5);
    }

    #[test]
    fn test_preview_opacity_floor() {
        let config = CarouselConfig::default();
        assert_eq!(config.preview_opacity(0.0), 1.0);
        assert!((config.preview_opacity(-100.0) - 0.8).abs() < 1e-9);
        assert_eq!(config.preview_opacity(450.0), 0.3);
        assert_eq!(config.preview_opacity(5000.0), 0.3);
    }

    #[test]
    fn test_transition_defaults() {
        let timing = TransitionTiming::default();
        assert_eq!(timing.slide, Duration::from_millis(300));
        assert_eq!(timing.settle, Duration::from_millis(50));
        assert_eq!(timing.policy, TransitionPolicy::Overlap);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Supersede".parse(), Ok(TransitionPolicy::Supersede));
        assert_eq!(" overlap ".parse(), Ok(TransitionPolicy::Overlap));
        assert!("cancel".parse::<TransitionPolicy>().is_err());
    }

    #[test]
    fn test_slideshow_defaults() {
        let config = SlideshowConfig::default();
        assert_eq!(config.autoplay_interval, Duration::from_secs(2));
        assert_eq!(config.swipe_threshold, 50.0);
    }

    #[test]
    fn test_env_overrides() {
        // Variables unique to this test so parallel tests are unaffected.
        std::env::set_var("SHOWCASE_HERO_SWIPE_THRESHOLD", "bogus");
        let err = SlideshowConfig::try_from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "SHOWCASE_HERO_SWIPE_THRESHOLD",
                ..
            }
        ));
        assert_eq!(SlideshowConfig::from_env(), SlideshowConfig::default());

        std::env::set_var("SHOWCASE_HERO_SWIPE_THRESHOLD", "80");
        assert_eq!(SlideshowConfig::from_env().swipe_threshold, 80.0);
        std::env::remove_var("SHOWCASE_HERO_SWIPE_THRESHOLD");
    }

    #[test]
    fn test_carousel_env_overrides() {
        std::env::set_var("SHOWCASE_SWIPE_THRESHOLD", "-5");
        let err = CarouselConfig::try_from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "SHOWCASE_SWIPE_THRESHOLD",
                ..
            }
        ));
        assert_eq!(CarouselConfig::from_env(), CarouselConfig::default());

        std::env::set_var("SHOWCASE_SWIPE_THRESHOLD", " 120 ");
        let config = CarouselConfig::try_from_env().unwrap();
        assert_eq!(config.swipe_threshold, 120.0);
        assert_eq!(config.drag_damping, 0.5);
        std::env::remove_var("SHOWCASE_SWIPE_THRESHOLD");
    }

    #[test]
    fn test_transition_env_overrides() {
        std::env::set_var("SHOWCASE_SLIDE_MS", "120");
        std::env::set_var("SHOWCASE_SETTLE_MS", "0");
        std::env::set_var("SHOWCASE_TRANSITIONS", "Supersede");
        assert_eq!(
            TransitionTiming::try_from_env(),
            Ok(TransitionTiming {
                slide: Duration::from_millis(120),
                settle: Duration::ZERO,
                policy: TransitionPolicy::Supersede,
            })
        );

        std::env::set_var("SHOWCASE_TRANSITIONS", "cancel");
        assert_eq!(
            TransitionTiming::try_from_env(),
            Err(ConfigError::Invalid {
                var: "SHOWCASE_TRANSITIONS",
                value: "cancel".to_string(),
                reason: "expected `overlap` or `supersede`",
            })
        );
        assert_eq!(TransitionTiming::from_env(), TransitionTiming::default());

        std::env::remove_var("SHOWCASE_TRANSITIONS");
        std::env::set_var("SHOWCASE_SLIDE_MS", "fast");
        assert!(matches!(
            TransitionTiming::try_from_env(),
            Err(ConfigError::Invalid {
                var: "SHOWCASE_SLIDE_MS",
                ..
            })
        ));
        std::env::remove_var("SHOWCASE_SLIDE_MS");
        std::env::remove_var("SHOWCASE_SETTLE_MS");
    }
}
