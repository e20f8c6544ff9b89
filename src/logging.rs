use crate::config::InteractionConfig;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
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
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

pub fn log_event(config: &InteractionConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let payload = event_payload(now_millis(), level, event, fields);
    emit(level, &payload.to_string());
}

fn event_payload(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::Number(serde_json::Number::from(ts)));
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::info_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_sorts_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert_eq!(LogLevel::Info.max(LogLevel::Debug), LogLevel::Info);
    }

    #[test]
    fn payload_carries_envelope_and_fields() {
        let payload = event_payload(
            1_700_000_000_000,
            LogLevel::Debug,
            "particles_generated",
            serde_json::json!({ "count": 20 }),
        );

        assert_eq!(payload["ts"], 1_700_000_000_000_u64);
        assert_eq!(payload["level"], "debug");
        assert_eq!(payload["event"], "particles_generated");
        assert_eq!(payload["count"], 20);
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = event_payload(0, LogLevel::Info, "controller_installed", serde_json::Value::Null);

        let object = payload.as_object().expect("payload is an object");
        assert_eq!(object.len(), 3);
    }
}
