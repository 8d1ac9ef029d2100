use std::cmp::Ordering;

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
                LogLevel::Error => 3,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Emits one JSON object per event, dropping anything below `min_level`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL)
    }
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if let Some(line) = self.render(level, event, fields, now_unix_millis()) {
            emit(level, &line);
        }
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn error(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Error, event, fields);
    }

    fn render(
        &self,
        level: LogLevel,
        event: &str,
        fields: serde_json::Value,
        ts: u64,
    ) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let mut payload = serde_json::Map::new();
        payload.insert(
            "ts".to_string(),
            serde_json::Value::Number(serde_json::Number::from(ts)),
        );
        payload.insert(
            "level".to_string(),
            serde_json::Value::String(level.as_str().to_string()),
        );
        payload.insert(
            "event".to_string(),
            serde_json::Value::String(event.to_string()),
        );

        if let serde_json::Value::Object(extra) = fields {
            for (key, value) in extra {
                payload.insert(key, value);
            }
        }

        Some(serde_json::Value::Object(payload).to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Debug => gloo::console::debug!(line),
        LogLevel::Info => gloo::console::log!(line),
        LogLevel::Warn => gloo::console::warn!(line),
        LogLevel::Error => gloo::console::error!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_below_minimum_are_dropped() {
        let logger = Logger::new(LogLevel::Warn);

        assert!(logger
            .render(LogLevel::Info, "theme.toggled", json!({}), 1)
            .is_none());
        assert!(logger
            .render(LogLevel::Error, "startup.failed", json!({}), 1)
            .is_some());
    }

    #[test]
    fn rendered_event_merges_fields_into_payload() {
        let logger = Logger::default();
        let line = logger
            .render(
                LogLevel::Info,
                "theme.toggled",
                json!({ "theme": "dark", "persisted": true }),
                1_700_000_000_000,
            )
            .expect("info is enabled by default");

        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");
        assert_eq!(parsed["ts"], 1_700_000_000_000u64);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "theme.toggled");
        assert_eq!(parsed["theme"], "dark");
        assert_eq!(parsed["persisted"], true);
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let logger = Logger::new(LogLevel::Debug);
        let line = logger
            .render(LogLevel::Debug, "tick", json!("stray"), 0)
            .expect("debug enabled");

        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");
        assert_eq!(parsed.as_object().map(|object| object.len()), Some(3));
    }

    #[test]
    fn level_parsing_is_case_insensitive() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
        assert!(LogLevel::Error > LogLevel::Info);
    }
}
