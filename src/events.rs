use crate::dom;
use crate::input::{self, PointerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM listener that can be detached again. The closure is retained here
/// instead of `forget()`-ing it so `dispose` can unhook cleanly without
/// leaking the instance.
pub struct EventListener<T: ?Sized> {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<T>,
}

impl<T: ?Sized> EventListener<T> {
    pub fn attach(target: &web::EventTarget, event: &'static str, closure: Closure<T>) -> Self {
        _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    pub fn detach(&self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

impl<T: ?Sized> Drop for EventListener<T> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Pointer moves scoped to the canvas: convert to NDC against the current
/// bounding rect and stamp the move time. Every event is handled at
/// dispatch, no rate limiting.
pub fn wire_pointermove(
    canvas: &web::HtmlCanvasElement,
    pointer: Rc<RefCell<PointerState>>,
) -> EventListener<dyn FnMut(web::PointerEvent)> {
    let canvas_for_rect = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = canvas_for_rect.get_bounding_client_rect();
        let ndc = input::pointer_ndc(
            ev.client_x() as f32 - rect.left() as f32,
            ev.client_y() as f32 - rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        pointer.borrow_mut().note_move(ndc);
    }) as Box<dyn FnMut(_)>);
    EventListener::attach(canvas.as_ref(), "pointermove", closure)
}

/// Window resize keeps the canvas backing store in sync; the frame loop
/// picks the new size up on its next tick.
pub fn wire_resize(canvas: &web::HtmlCanvasElement) -> anyhow::Result<EventListener<dyn FnMut()>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    Ok(EventListener::attach(window.as_ref(), "resize", closure))
}
