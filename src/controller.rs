use crate::config::{
    InteractionConfig, ACTIVE_CLASS, ANCHOR_SELECTOR, HEADING_SELECTOR, NAVBAR_ID,
    NAV_LINK_SELECTOR, OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLD, PARTICLE_CLASS,
    PARTICLE_CONTAINER_ID, PENDING_CLASS, PENDING_SELECTOR, REVEALED_CLASS, SCROLLED_CLASS,
};
use crate::effects::{
    active_link_flags, anchor_target_selector, navbar_is_scrolled, particle_field,
    should_reveal, stagger_delay_ms, typewriter_schedule, HoverCategory, HoverPhase,
    RevealTrigger, DEFAULT_TYPEWRITER_SPEED_MS, REVEALED_STYLE,
};
use crate::logging::{log_event, LogLevel};
use gloo_timers::{callback::Timeout, future::TimeoutFuture};
use js_sys::Array;
use serde::Serialize;
use std::{collections::BTreeMap, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Document, Element, Event, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

#[derive(Serialize)]
struct InstallSummary {
    pending: usize,
    nav_links: usize,
    hover_targets: BTreeMap<&'static str, usize>,
    intersection_observer: bool,
}

/// Owns the page handles every listener closes over.
pub struct Controller {
    window: Window,
    document: Document,
    config: InteractionConfig,
}

/// Wires every page behavior once. Missing window or document is a no-op.
pub fn install() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = InteractionConfig::from_document(&document);
    Controller::new(window, document, config).install_all();
}

/// Empties `element`, then shows `text` one character every `speed_ms`.
///
/// Nothing cancels a running writer; a second call on the same element
/// interleaves with the first.
pub fn type_writer(element: Option<HtmlElement>, text: String, speed_ms: Option<u32>) {
    let Some(element) = element else {
        return;
    };
    let speed_ms = speed_ms.unwrap_or(DEFAULT_TYPEWRITER_SPEED_MS);

    element.set_text_content(Some(""));
    spawn_local(async move {
        let mut elapsed_ms = 0;
        for (at_ms, frame) in typewriter_schedule(&text, speed_ms) {
            TimeoutFuture::new(at_ms.saturating_sub(elapsed_ms)).await;
            elapsed_ms = at_ms;
            element.set_text_content(Some(frame));
        }
    });
}

fn apply_style(element: &HtmlElement, properties: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in properties {
        let _ = style.set_property(property, value);
    }
}

fn browser_rng() -> fastrand::Rng {
    fastrand::Rng::with_seed((js_sys::Math::random() * u64::MAX as f64) as u64)
}

impl Controller {
    pub fn new(window: Window, document: Document, config: InteractionConfig) -> Rc<Self> {
        Rc::new(Self {
            window,
            document,
            config,
        })
    }

    fn install_all(self: &Rc<Self>) {
        self.generate_particles();

        let intersection_observer = self.observe_pending();
        let pending = self.stagger_initial_reveal();
        let nav_links = self.bind_nav_links();
        let hover_targets = HoverCategory::ALL
            .into_iter()
            .map(|category| (category.as_str(), self.bind_hover(category)))
            .collect();

        self.bind_scroll();
        self.bind_resize();
        self.sync_navbar();
        self.poll_reveal();

        self.schedule_heading_typewriter();
        self.bind_anchor_scroll();
        self.schedule_fallback_reveal();

        let summary = InstallSummary {
            pending,
            nav_links,
            hover_targets,
            intersection_observer,
        };
        log_event(
            &self.config,
            LogLevel::Info,
            "controller_installed",
            serde_json::to_value(summary).unwrap_or(serde_json::Value::Null),
        );
    }

    fn viewport_size(&self) -> (f64, f64) {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(1280.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(720.0);

        (width, height)
    }

    fn select_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn element_missing(&self, selector: &str) {
        log_event(
            &self.config,
            LogLevel::Debug,
            "element_missing",
            serde_json::json!({ "selector": selector }),
        );
    }

    /// Replaces the contents of `#particles` with a fresh particle batch.
    pub fn generate_particles(&self) {
        let Some(container) = self.document.get_element_by_id(PARTICLE_CONTAINER_ID) else {
            self.element_missing(PARTICLE_CONTAINER_ID);
            return;
        };

        container.set_inner_html("");

        let (viewport_width, _) = self.viewport_size();
        let field = particle_field(viewport_width, &mut browser_rng());

        for particle in &field {
            let Some(node) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };

            node.set_class_name(PARTICLE_CLASS);
            let style = node.style();
            for (property, value) in particle.style() {
                let _ = style.set_property(property, &value);
            }
            let _ = container.append_child(&node);
        }

        log_event(
            &self.config,
            LogLevel::Debug,
            "particles_generated",
            serde_json::json!({ "count": field.len(), "viewport_width": viewport_width }),
        );
    }

    fn schedule_heading_typewriter(&self) {
        let Some(heading) = self
            .document
            .query_selector(HEADING_SELECTOR)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            self.element_missing(HEADING_SELECTOR);
            return;
        };

        // clearing is destructive, capture first
        let text = heading.text_content().unwrap_or_default();
        let speed_ms = self.config.typewriter_speed_ms;

        Timeout::new(self.config.typewriter_delay_ms, move || {
            type_writer(Some(heading), text, Some(speed_ms));
        })
        .forget();
    }

    pub fn sync_navbar(&self) {
        let Some(navbar) = self.document.get_element_by_id(NAVBAR_ID) else {
            return;
        };

        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let classes = navbar.class_list();
        let _ = if navbar_is_scrolled(scroll_y) {
            classes.add_1(SCROLLED_CLASS)
        } else {
            classes.remove_1(SCROLLED_CLASS)
        };
    }

    /// Moves `element` from pending to revealed. Returns whether it was still
    /// pending; repeating the call only re-applies the same classes and styles.
    pub fn reveal(&self, element: &HtmlElement, trigger: RevealTrigger) -> bool {
        let classes = element.class_list();
        let was_pending = classes.contains(PENDING_CLASS);

        let _ = classes.remove_1(PENDING_CLASS);
        let _ = classes.add_1(REVEALED_CLASS);
        apply_style(element, REVEALED_STYLE);

        if was_pending {
            log_event(
                &self.config,
                LogLevel::Debug,
                "element_revealed",
                serde_json::json!({ "trigger": trigger.as_str(), "id": element.id() }),
            );
        }

        was_pending
    }

    pub fn poll_reveal(&self) {
        let (_, viewport_height) = self.viewport_size();

        for element in self.select_all(PENDING_SELECTOR) {
            let top = element.get_bounding_client_rect().top();
            if should_reveal(top, viewport_height) {
                self.reveal(&element, RevealTrigger::ScrollPoll);
            }
        }
    }

    pub fn reveal_all_pending(&self, trigger: RevealTrigger) -> usize {
        self.select_all(PENDING_SELECTOR)
            .iter()
            .filter(|element| self.reveal(element, trigger))
            .count()
    }

    fn stagger_initial_reveal(self: &Rc<Self>) -> usize {
        let pending = self.select_all(PENDING_SELECTOR);
        let count = pending.len();

        for (index, element) in pending.into_iter().enumerate() {
            let this = Rc::clone(self);
            Timeout::new(stagger_delay_ms(index, self.config.reveal_stagger_ms), move || {
                this.reveal(&element, RevealTrigger::Stagger);
            })
            .forget();
        }

        count
    }

    /// Observes the pending elements present right now. Elements added later
    /// are left to the scroll poll and the fallback timer.
    fn observe_pending(self: &Rc<Self>) -> bool {
        let this = Rc::clone(self);
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                if let Ok(element) = entry.target().dyn_into::<HtmlElement>() {
                    this.reveal(&element, RevealTrigger::Intersection);
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
        options.set_root_margin(OBSERVER_ROOT_MARGIN);

        let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        else {
            log_event(
                &self.config,
                LogLevel::Debug,
                "intersection_observer_unavailable",
                serde_json::json!({}),
            );
            return false;
        };

        for element in self.select_all(PENDING_SELECTOR) {
            observer.observe(&element);
        }
        callback.forget();
        true
    }

    fn schedule_fallback_reveal(self: &Rc<Self>) {
        if self.document.ready_state() == "complete" {
            self.start_fallback_timer();
            return;
        }

        let this = Rc::clone(self);
        let listener = Closure::<dyn FnMut()>::new(move || this.start_fallback_timer());
        let _ = self
            .window
            .add_event_listener_with_callback("load", listener.as_ref().unchecked_ref());
        listener.forget();
    }

    fn start_fallback_timer(self: &Rc<Self>) {
        let this = Rc::clone(self);
        Timeout::new(self.config.reveal_fallback_ms, move || {
            this.reveal_all_pending(RevealTrigger::Fallback);
        })
        .forget();
    }

    pub fn bind_nav_links(&self) -> usize {
        let links = Rc::new(self.select_all(NAV_LINK_SELECTOR));

        for (clicked, link) in links.iter().enumerate() {
            let siblings = Rc::clone(&links);
            let listener = Closure::<dyn FnMut()>::new(move || {
                let flags = active_link_flags(siblings.len(), clicked);
                for (sibling, active) in siblings.iter().zip(flags) {
                    let classes = sibling.class_list();
                    let _ = if active {
                        classes.add_1(ACTIVE_CLASS)
                    } else {
                        classes.remove_1(ACTIVE_CLASS)
                    };
                }
            });
            let _ = link.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
            listener.forget();
        }

        links.len()
    }

    pub fn bind_hover(&self, category: HoverCategory) -> usize {
        let elements = self.select_all(category.selector());

        for element in &elements {
            for phase in [HoverPhase::Enter, HoverPhase::Leave] {
                let target = element.clone();
                let listener = Closure::<dyn FnMut()>::new(move || {
                    apply_style(&target, category.style(phase));
                });
                let _ = element
                    .add_event_listener_with_callback(phase.event_name(), listener.as_ref().unchecked_ref());
                listener.forget();
            }
        }

        elements.len()
    }

    fn bind_scroll(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let listener = Closure::<dyn FnMut()>::new(move || {
            this.sync_navbar();
            this.poll_reveal();
        });
        let _ = self
            .window
            .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref());
        listener.forget();
    }

    fn bind_resize(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let listener = Closure::<dyn FnMut()>::new(move || this.generate_particles());
        let _ = self
            .window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        listener.forget();
    }

    pub fn bind_anchor_scroll(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            this.intercept_anchor_click(&event);
        });
        let _ = self
            .document
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        listener.forget();
    }

    fn intercept_anchor_click(&self, event: &Event) {
        let Some(anchor) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        if !anchor.matches(ANCHOR_SELECTOR).unwrap_or(false) {
            return;
        }

        // suppressed even when nothing matches below
        event.prevent_default();

        let Some(href) = anchor.get_attribute("href") else {
            return;
        };
        let Some(selector) = anchor_target_selector(&href) else {
            return;
        };
        let Some(target) = self.document.query_selector(selector).ok().flatten() else {
            log_event(
                &self.config,
                LogLevel::Debug,
                "anchor_target_missing",
                serde_json::json!({ "href": href }),
            );
            return;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
