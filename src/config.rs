use crate::logging::LogLevel;

const DEFAULT_HEADING_TYPEWRITER_SPEED_MS: u32 = 80;
const DEFAULT_HEADING_TYPEWRITER_DELAY_MS: u32 = 500;
const DEFAULT_REVEAL_STAGGER_MS: u32 = 200;
const DEFAULT_REVEAL_FALLBACK_MS: u32 = 2_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TYPEWRITER_SPEED_MS_BOUNDS: (u32, u32) = (10, 1_000);
const TYPEWRITER_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const REVEAL_STAGGER_MS_BOUNDS: (u32, u32) = (0, 2_000);
const REVEAL_FALLBACK_MS_BOUNDS: (u32, u32) = (0, 30_000);

pub const PARTICLE_CONTAINER_ID: &str = "particles";
pub const NAVBAR_ID: &str = "navbar";
pub const HEADING_SELECTOR: &str = ".intro h1";
pub const NAV_LINK_SELECTOR: &str = ".nav-links a";
pub const PENDING_SELECTOR: &str = ".loading";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

pub const PENDING_CLASS: &str = "loading";
pub const REVEALED_CLASS: &str = "loaded";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const PARTICLE_CLASS: &str = "particle";

pub const WIDE_VIEWPORT_BREAKPOINT: f64 = 768.0;
pub const WIDE_PARTICLE_COUNT: usize = 50;
pub const NARROW_PARTICLE_COUNT: usize = 20;
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 100.0;
pub const REVEAL_VIEWPORT_OFFSET: f64 = 100.0;
pub const OBSERVER_THRESHOLD: f64 = 0.1;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Runtime knobs for the page controller.
///
/// Overrides come from `data-*` attributes on the document element. Anything
/// missing, unparseable or out of bounds falls back to the default.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub typewriter_speed_ms: u32,
    pub typewriter_delay_ms: u32,
    pub reveal_stagger_ms: u32,
    pub reveal_fallback_ms: u32,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            typewriter_speed_ms: DEFAULT_HEADING_TYPEWRITER_SPEED_MS,
            typewriter_delay_ms: DEFAULT_HEADING_TYPEWRITER_DELAY_MS,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            reveal_fallback_ms: DEFAULT_REVEAL_FALLBACK_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl InteractionConfig {
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let typewriter_speed_ms = parse_attr_u32_with_bounds(
            lookup("data-typewriter-speed-ms"),
            DEFAULT_HEADING_TYPEWRITER_SPEED_MS,
            TYPEWRITER_SPEED_MS_BOUNDS,
        );
        let typewriter_delay_ms = parse_attr_u32_with_bounds(
            lookup("data-typewriter-delay-ms"),
            DEFAULT_HEADING_TYPEWRITER_DELAY_MS,
            TYPEWRITER_DELAY_MS_BOUNDS,
        );
        let reveal_stagger_ms = parse_attr_u32_with_bounds(
            lookup("data-reveal-stagger-ms"),
            DEFAULT_REVEAL_STAGGER_MS,
            REVEAL_STAGGER_MS_BOUNDS,
        );
        let reveal_fallback_ms = parse_attr_u32_with_bounds(
            lookup("data-reveal-fallback-ms"),
            DEFAULT_REVEAL_FALLBACK_MS,
            REVEAL_FALLBACK_MS_BOUNDS,
        );
        let log_level = parse_log_level(lookup("data-log-level"), DEFAULT_LOG_LEVEL);

        Self {
            typewriter_speed_ms,
            typewriter_delay_ms,
            reveal_stagger_ms,
            reveal_fallback_ms,
            log_level,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_document(document: &web_sys::Document) -> Self {
        let Some(root) = document.document_element() else {
            return Self::default();
        };

        Self::from_attributes(|name| root.get_attribute(name))
    }
}

fn parse_attr_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(raw: Option<String>, default: LogLevel) -> LogLevel {
    raw.map(|value| value.trim().to_ascii_lowercase())
        .and_then(|value| LogLevel::from_str(&value))
        .unwrap_or(default)
}
