use std::time::Duration;

use crate::logging::{LogLevel, DEFAULT_LOG_LEVEL};

const DEFAULT_TYPING_SPEED_MS: u64 = 100;
const DEFAULT_PAUSE_DELAY_MS: u64 = 1_500;
const DEFAULT_LOADING_DELAY_MS: u64 = 2_000;
const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.1;
const DEFAULT_PARALLAX_MULTIPLIER: f64 = 40.0;

const TYPING_SPEED_MS_BOUNDS: (u64, u64) = (10, 2_000);
const PAUSE_DELAY_MS_BOUNDS: (u64, u64) = (100, 10_000);
const LOADING_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const VISIBILITY_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const PARALLAX_MULTIPLIER_BOUNDS: (f64, f64) = (0.0, 200.0);

pub const TYPING_SPEED_KEY: &str = "typing-speed-ms";
pub const PAUSE_DELAY_KEY: &str = "pause-delay-ms";
pub const LOADING_DELAY_KEY: &str = "loading-delay-ms";
pub const VISIBILITY_THRESHOLD_KEY: &str = "visibility-threshold";
pub const PARALLAX_MULTIPLIER_KEY: &str = "parallax-multiplier";
pub const LOG_LEVEL_KEY: &str = "log-level";

/// Tunables for the page's timers and effects.
///
/// Values come from a string lookup (the mount element's `data-*` attributes
/// in the browser). Missing, unparseable and out-of-range values fall back to
/// the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub typing_speed: Duration,
    pub pause_delay: Duration,
    pub loading_delay: Duration,
    pub visibility_threshold: f64,
    pub parallax_multiplier: f64,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            typing_speed: Duration::from_millis(DEFAULT_TYPING_SPEED_MS),
            pause_delay: Duration::from_millis(DEFAULT_PAUSE_DELAY_MS),
            loading_delay: Duration::from_millis(DEFAULT_LOADING_DELAY_MS),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            parallax_multiplier: DEFAULT_PARALLAX_MULTIPLIER,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let typing_speed_ms = parse_u64_with_bounds(
            &lookup,
            TYPING_SPEED_KEY,
            DEFAULT_TYPING_SPEED_MS,
            TYPING_SPEED_MS_BOUNDS,
        );
        let pause_delay_ms = parse_u64_with_bounds(
            &lookup,
            PAUSE_DELAY_KEY,
            DEFAULT_PAUSE_DELAY_MS,
            PAUSE_DELAY_MS_BOUNDS,
        );
        let loading_delay_ms = parse_u64_with_bounds(
            &lookup,
            LOADING_DELAY_KEY,
            DEFAULT_LOADING_DELAY_MS,
            LOADING_DELAY_MS_BOUNDS,
        );
        let visibility_threshold = parse_f64_with_bounds(
            &lookup,
            VISIBILITY_THRESHOLD_KEY,
            DEFAULT_VISIBILITY_THRESHOLD,
            VISIBILITY_THRESHOLD_BOUNDS,
        );
        let parallax_multiplier = parse_f64_with_bounds(
            &lookup,
            PARALLAX_MULTIPLIER_KEY,
            DEFAULT_PARALLAX_MULTIPLIER,
            PARALLAX_MULTIPLIER_BOUNDS,
        );
        let log_level = non_empty(&lookup, LOG_LEVEL_KEY)
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            typing_speed: Duration::from_millis(typing_speed_ms),
            pause_delay: Duration::from_millis(pause_delay_ms),
            loading_delay: Duration::from_millis(loading_delay_ms),
            visibility_threshold,
            parallax_multiplier,
            log_level,
        }
    }

    /// How long the loading indicator stays up, or `None` to mount the page
    /// straight away.
    pub fn loading_gate(&self) -> Option<Duration> {
        (!self.loading_delay.is_zero()).then_some(self.loading_delay)
    }

    pub fn to_log_fields(&self) -> serde_json::Value {
        serde_json::json!({
            "typingSpeedMs": self.typing_speed.as_millis() as u64,
            "pauseDelayMs": self.pause_delay.as_millis() as u64,
            "loadingDelayMs": self.loading_delay.as_millis() as u64,
            "visibilityThreshold": self.visibility_threshold,
            "parallaxMultiplier": self.parallax_multiplier,
            "logLevel": self.log_level.as_str(),
        })
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64_with_bounds<F>(lookup: &F, name: &str, default: u64, bounds: (u64, u64)) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, name)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds<F>(lookup: &F, name: &str, default: f64, bounds: (f64, f64)) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
