use crate::event_utils::{EventOptions, event_listener_with_options};
use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent, WheelEvent};

/// Pointer input relevant to the chart, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { x: f64 },
    Move { x: f64 },
    Up,
    Leave,
    Wheel { delta_y: f64 },
}

/// Mouse and wheel listeners on one canvas. Dropping this removes them all.
pub struct PointerListeners {
    _listeners: Vec<EventListener>,
}

impl PointerListeners {
    pub fn attach(target: &EventTarget, on_input: impl Fn(PointerInput) + 'static) -> Self {
        let on_input: Rc<dyn Fn(PointerInput)> = Rc::new(on_input);
        let passive = EventOptions::default();

        let mouse = |event: &'static str, to_input: fn(&MouseEvent) -> PointerInput| {
            let on_input = Rc::clone(&on_input);
            event_listener_with_options(target, event, &passive, move |event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    on_input(to_input(mouse));
                }
            })
        };

        let mut listeners = vec![
            mouse("mousedown", |e| PointerInput::Down {
                x: e.offset_x() as f64,
            }),
            mouse("mousemove", |e| PointerInput::Move {
                x: e.offset_x() as f64,
            }),
            mouse("mouseup", |_| PointerInput::Up),
            mouse("mouseleave", |_| PointerInput::Leave),
        ];

        let on_wheel = Rc::clone(&on_input);
        listeners.push(event_listener_with_options(
            target,
            "wheel",
            &EventOptions::active(),
            move |event| {
                if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                    wheel.prevent_default();
                    on_wheel(PointerInput::Wheel {
                        delta_y: wheel.delta_y(),
                    });
                }
            },
        ));

        Self {
            _listeners: listeners,
        }
    }
}
