use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use web_sys::{Event, EventTarget};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self {
            passive: true,
            capture: false,
        }
    }
}

impl EventOptions {
    /// Handlers that call `prevent_default` must not be passive.
    pub fn active() -> Self {
        Self {
            passive: false,
            ..Self::default()
        }
    }
}

impl From<&EventOptions> for EventListenerOptions {
    fn from(options: &EventOptions) -> Self {
        EventListenerOptions {
            phase: if options.capture {
                EventListenerPhase::Capture
            } else {
                EventListenerPhase::Bubble
            },
            passive: options.passive,
        }
    }
}

/// Register `cb` for `event` on `target`. The listener is removed when the
/// returned handle is dropped.
pub fn event_listener_with_options(
    target: &EventTarget,
    event: &'static str,
    options: &EventOptions,
    cb: impl FnMut(&Event) + 'static,
) -> EventListener {
    EventListener::new_with_options(target, event, options.into(), cb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_passive_bubble() {
        let options: EventListenerOptions = (&EventOptions::default()).into();
        assert!(options.passive);
        assert!(matches!(options.phase, EventListenerPhase::Bubble));
        let active: EventListenerOptions = (&EventOptions::active()).into();
        assert!(!active.passive);
    }
}
