use crate::constants::IDLE_TIMEOUT_MS;
use crate::field::{ParticleField, PlaneSize};
use crate::input::PointerState;
use crate::lifecycle::LoopGate;
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub field: ParticleField,
    pub pointer: Rc<RefCell<PointerState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState<'static>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let width = self.canvas.width();
        let height = self.canvas.height();
        // Zero-area container: skip the tick instead of feeding NaNs into
        // the transform buffer.
        let Some(plane) = PlaneSize::from_viewport(width as f32, height as f32) else {
            return;
        };

        let time_sec = self.started.elapsed().as_secs_f32();
        let pointer = *self.pointer.borrow();
        let idle =
            self.field.options().auto_animate && pointer.idle_longer_than(IDLE_TIMEOUT_MS);

        self.field.step(plane, pointer.ndc, idle, time_sec);

        self.gpu.resize_if_needed(width, height);
        if let Err(e) = self.gpu.render(self.field.transforms()) {
            log::error!("[frame] render error: {:?}", e);
        }
    }
}

/// Handle to a running frame loop. The tick closure holds a clone of the
/// `Rc` it is stored in (it must look itself up to reschedule), so only
/// `cancel` can break that cycle and release the closure together with
/// everything it captures.
pub struct LoopHandle {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    raf_id: Rc<Cell<i32>>,
}

impl LoopHandle {
    /// Cancel the pending animation frame and drop the tick closure.
    /// Must not be called from inside the tick itself; `dispose` only runs
    /// from JS, never mid-frame.
    pub fn cancel(&self) {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(self.raf_id.get());
        }
        self.tick.borrow_mut().take();
    }
}

/// Drive `frame()` from requestAnimationFrame while the gate permits it.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, gate: Rc<LoopGate>) -> LoopHandle {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(0));
    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !gate.permits_tick() {
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id_tick.set(id);
                }
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                raf_id.set(id);
            }
        }
    }
    LoopHandle { tick, raf_id }
}
