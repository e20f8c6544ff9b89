//! Platform-independent pieces of the page effects.
//!
//! Everything here is a pure function of its inputs so the DOM wiring in
//! `controller` stays a thin layer of lookups and listener registration.

use crate::config::{
    NARROW_PARTICLE_COUNT, NAVBAR_SCROLL_THRESHOLD, REVEAL_VIEWPORT_OFFSET,
    WIDE_PARTICLE_COUNT, WIDE_VIEWPORT_BREAKPOINT,
};

const PARTICLE_LEFT_RANGE: (f64, f64) = (0.0, 100.0);
const PARTICLE_DURATION_SECS_RANGE: (f64, f64) = (10.0, 20.0);
const PARTICLE_DELAY_SECS_RANGE: (f64, f64) = (0.0, 15.0);

pub const DEFAULT_TYPEWRITER_SPEED_MS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub left_percent: f64,
    pub duration_secs: f64,
    pub delay_secs: f64,
}

impl Particle {
    pub fn sample(rng: &mut fastrand::Rng) -> Self {
        Self {
            left_percent: sample_half_open(rng, PARTICLE_LEFT_RANGE),
            duration_secs: sample_half_open(rng, PARTICLE_DURATION_SECS_RANGE),
            delay_secs: sample_half_open(rng, PARTICLE_DELAY_SECS_RANGE),
        }
    }

    /// Inline style properties, in the order they are applied.
    pub fn style(&self) -> [(&'static str, String); 3] {
        [
            ("left", format!("{}%", self.left_percent)),
            ("animation-duration", format!("{}s", self.duration_secs)),
            ("animation-delay", format!("{}s", self.delay_secs)),
        ]
    }
}

fn sample_half_open(rng: &mut fastrand::Rng, (start, end): (f64, f64)) -> f64 {
    let value = start + rng.f64() * (end - start);
    // rounding can land exactly on `end`
    if value < end {
        value
    } else {
        start
    }
}

pub fn particle_count(viewport_width: f64) -> usize {
    if viewport_width > WIDE_VIEWPORT_BREAKPOINT {
        WIDE_PARTICLE_COUNT
    } else {
        NARROW_PARTICLE_COUNT
    }
}

pub fn particle_field(viewport_width: f64, rng: &mut fastrand::Rng) -> Vec<Particle> {
    (0..particle_count(viewport_width))
        .map(|_| Particle::sample(rng))
        .collect()
}

/// Successive contents of a type-writer target, one per character.
pub fn typewriter_frames(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.char_indices()
        .map(move |(index, character)| &text[..index + character.len_utf8()])
}

/// Elapsed milliseconds at which each frame of `text` is shown.
pub fn typewriter_schedule(text: &str, speed_ms: u32) -> Vec<(u32, &str)> {
    typewriter_frames(text)
        .zip(1u32..)
        .map(|(frame, step)| (step.saturating_mul(speed_ms), frame))
        .collect()
}

pub fn navbar_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

pub fn should_reveal(element_top: f64, viewport_height: f64) -> bool {
    element_top < viewport_height - REVEAL_VIEWPORT_OFFSET
}

pub fn stagger_delay_ms(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(stagger_ms)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTrigger {
    Stagger,
    ScrollPoll,
    Intersection,
    Fallback,
}

impl RevealTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stagger => "stagger",
            Self::ScrollPoll => "scroll_poll",
            Self::Intersection => "intersection",
            Self::Fallback => "fallback",
        }
    }
}

/// Inline styles forced onto an element when it is revealed.
pub const REVEALED_STYLE: &[(&str, &str)] = &[("opacity", "1"), ("transform", "translateY(0)")];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverCategory {
    Button,
    ProjectCard,
    SkillItem,
    ContactItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverPhase {
    Enter,
    Leave,
}

impl HoverPhase {
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Enter => "mouseenter",
            Self::Leave => "mouseleave",
        }
    }
}

impl HoverCategory {
    pub const ALL: [Self; 4] = [
        Self::Button,
        Self::ProjectCard,
        Self::SkillItem,
        Self::ContactItem,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Self::Button => ".btn",
            Self::ProjectCard => ".project-card",
            Self::SkillItem => ".skill-item",
            Self::ContactItem => ".contact-item",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::ProjectCard => "project_card",
            Self::SkillItem => "skill_item",
            Self::ContactItem => "contact_item",
        }
    }

    /// Style properties to set for `phase`. Leave always restores every
    /// property enter touched.
    pub fn style(self, phase: HoverPhase) -> &'static [(&'static str, &'static str)] {
        match (self, phase) {
            (Self::Button, HoverPhase::Enter) => &[("transform", "translateY(-3px)")],
            (Self::ProjectCard, HoverPhase::Enter) => &[("transform", "translateY(-12px)")],
            (Self::ContactItem, HoverPhase::Enter) => &[("transform", "translateY(-8px)")],
            (Self::SkillItem, HoverPhase::Enter) => &[
                ("transform", "translateY(-2px)"),
                ("background", "rgba(100, 255, 218, 0.1)"),
                ("border-color", "var(--text-accent)"),
                ("color", "var(--text-accent)"),
            ],
            (Self::SkillItem, HoverPhase::Leave) => &[
                ("transform", "translateY(0)"),
                ("background", "rgba(255, 255, 255, 0.05)"),
                ("border-color", "var(--border-color)"),
                ("color", "var(--text-primary)"),
            ],
            (Self::Button | Self::ProjectCard | Self::ContactItem, HoverPhase::Leave) => {
                &[("transform", "translateY(0)")]
            }
        }
    }
}

/// Active marker for each nav link after `clicked` was clicked.
pub fn active_link_flags(link_count: usize, clicked: usize) -> Vec<bool> {
    (0..link_count).map(|index| index == clicked).collect()
}

/// Selector an in-page anchor scrolls to, if `href` is a fragment link.
pub fn anchor_target_selector(href: &str) -> Option<&str> {
    href.starts_with('#').then_some(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_follows_viewport_breakpoint() {
        assert_eq!(particle_count(320.0), 20);
        assert_eq!(particle_count(768.0), 20);
        assert_eq!(particle_count(768.5), 50);
        assert_eq!(particle_count(1920.0), 50);
    }

    #[test]
    fn particle_field_stays_within_ranges() {
        let mut rng = fastrand::Rng::with_seed(7);

        for width in [375.0, 1280.0] {
            let field = particle_field(width, &mut rng);
            assert_eq!(field.len(), particle_count(width));

            for particle in field {
                assert!((0.0..100.0).contains(&particle.left_percent));
                assert!((10.0..20.0).contains(&particle.duration_secs));
                assert!((0.0..15.0).contains(&particle.delay_secs));
            }
        }
    }

    #[test]
    fn particle_style_uses_css_units() {
        let particle = Particle {
            left_percent: 12.5,
            duration_secs: 14.25,
            delay_secs: 3.0,
        };

        assert_eq!(
            particle.style(),
            [
                ("left", "12.5%".to_string()),
                ("animation-duration", "14.25s".to_string()),
                ("animation-delay", "3s".to_string()),
            ]
        );
    }

    #[test]
    fn typewriter_reveals_one_character_per_tick() {
        assert_eq!(typewriter_schedule("Hi", 80), vec![(80, "H"), (160, "Hi")]);
        assert!(typewriter_schedule("", 80).is_empty());
    }

    #[test]
    fn typewriter_frames_respect_char_boundaries() {
        let frames: Vec<&str> = typewriter_frames("né✓").collect();
        assert_eq!(frames, vec!["n", "né", "né✓"]);
    }

    #[test]
    fn navbar_threshold_is_strict() {
        assert!(!navbar_is_scrolled(0.0));
        assert!(!navbar_is_scrolled(100.0));
        assert!(navbar_is_scrolled(100.5));
    }

    #[test]
    fn reveal_uses_viewport_offset() {
        assert!(should_reveal(50.0, 800.0));
        assert!(should_reveal(-400.0, 800.0));
        assert!(!should_reveal(700.0, 800.0));
        assert!(!should_reveal(950.0, 800.0));
    }

    #[test]
    fn stagger_grows_linearly() {
        let delays: Vec<u32> = (0..4).map(|index| stagger_delay_ms(index, 200)).collect();
        assert_eq!(delays, vec![0, 200, 400, 600]);
        assert_eq!(stagger_delay_ms(usize::MAX, 200), u32::MAX);
    }

    #[test]
    fn hover_leave_restores_every_property_enter_sets() {
        for category in HoverCategory::ALL {
            let entered: Vec<&str> = category
                .style(HoverPhase::Enter)
                .iter()
                .map(|(property, _)| *property)
                .collect();
            let left: Vec<&str> = category
                .style(HoverPhase::Leave)
                .iter()
                .map(|(property, _)| *property)
                .collect();

            assert_eq!(entered, left, "{}", category.as_str());
        }
    }

    #[test]
    fn project_card_hover_round_trips_to_baseline() {
        assert_eq!(
            HoverCategory::ProjectCard.style(HoverPhase::Enter),
            &[("transform", "translateY(-12px)")]
        );
        assert_eq!(
            HoverCategory::ProjectCard.style(HoverPhase::Leave),
            &[("transform", "translateY(0)")]
        );
    }

    #[test]
    fn clicked_link_is_the_only_active_one() {
        for link_count in 2..6 {
            for clicked in 0..link_count {
                let flags = active_link_flags(link_count, clicked);
                assert_eq!(flags.iter().filter(|active| **active).count(), 1);
                assert!(flags[clicked]);
            }
        }
    }

    #[test]
    fn only_fragment_hrefs_are_intercepted() {
        assert_eq!(anchor_target_selector("#projects"), Some("#projects"));
        assert_eq!(anchor_target_selector("#"), Some("#"));
        assert_eq!(anchor_target_selector("/resume.pdf"), None);
        assert_eq!(anchor_target_selector("https://example.com/#top"), None);
    }
}
