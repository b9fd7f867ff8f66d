#![cfg(target_arch = "wasm32")]
//! Pointer-reactive particle ring effect, embeddable in any container
//! element. Particles drift at seeded rest positions until the smoothed
//! pointer target comes near, then orbit it on a rippling ring; one
//! GPU-instanced draw per frame.

use crate::config::{FieldOptions, FieldOptionsPatch, ParticleShape};
use crate::field::{ParticleField, PlaneSize};
use crate::input::PointerState;
use crate::lifecycle::LoopGate;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod config;
mod constants;
mod dom;
mod events;
mod field;
mod frame;
mod geometry;
mod input;
mod lifecycle;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}

/// One running effect instance. Instances are fully independent; nothing
/// is shared statically, so several can coexist on a page.
#[wasm_bindgen]
pub struct RingField {
    gate: Rc<LoopGate>,
    loop_handle: frame::LoopHandle,
    ctx: Rc<RefCell<frame::FrameContext>>,
    pointermove: events::EventListener<dyn FnMut(web::PointerEvent)>,
    resize: events::EventListener<dyn FnMut()>,
}

#[wasm_bindgen]
impl RingField {
    /// Build an instance bound to `container` and start its frame loop.
    /// `options` is a plain JS object; recognized keys override defaults,
    /// unrecognized keys are ignored. Fails fast (with a descriptive
    /// error) when the document or a WebGPU device is unavailable.
    pub async fn create(container: web::HtmlElement, options: JsValue) -> Result<RingField, JsValue> {
        let opts = FieldOptions::resolved(patch_from_js(&options));
        build(container, opts)
            .await
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Swap the base mesh and reseed the field (reinitialization hook).
    /// Unknown names fall back to the capsule.
    #[wasm_bindgen(js_name = setShape)]
    pub fn set_shape(&self, name: &str) {
        let shape = ParticleShape::from_name(name);
        let mesh = geometry::build(shape);
        let mut ctx = self.ctx.borrow_mut();
        ctx.gpu.set_mesh(&mesh);
        let plane =
            PlaneSize::from_viewport(ctx.canvas.width() as f32, ctx.canvas.height() as f32)
                .unwrap_or_else(PlaneSize::fallback);
        let mut rng = StdRng::from_entropy();
        ctx.field.reseed(plane, &mut rng);
        ctx.field.set_shape(shape);
    }

    /// Stop the frame loop and detach the pointer/resize listeners. After
    /// this returns no further frames are produced, pointer events are no
    /// longer observed and the tick closure (with the GPU state it
    /// captures) is released.
    pub fn dispose(&mut self) {
        self.gate.stop();
        self.loop_handle.cancel();
        self.pointermove.detach();
        self.resize.detach();
        log::info!("[ringfield] disposed");
    }
}

async fn build(container: web::HtmlElement, opts: FieldOptions) -> anyhow::Result<RingField> {
    let document = dom::window_document()?;
    let canvas = dom::create_canvas(&document)?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("cannot attach canvas to container: {:?}", e))?;
    dom::sync_canvas_backing_size(&canvas);

    let mesh = geometry::build(opts.shape);
    let color = config::parse_hex_color(&opts.color).unwrap_or_else(|| {
        log::warn!("[ringfield] bad color {:?}, using default", opts.color);
        config::parse_hex_color(&FieldOptions::default().color).unwrap_or([1.0, 1.0, 1.0])
    });

    // Leak a canvas clone to satisfy the 'static surface lifetime.
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(leaked_canvas, &mesh, opts.count as u32, color).await?;

    let plane = PlaneSize::from_viewport(canvas.width() as f32, canvas.height() as f32)
        .unwrap_or_else(PlaneSize::fallback);
    let mut rng = StdRng::from_entropy();
    let field = ParticleField::new(opts, plane, &mut rng);

    let pointer = Rc::new(RefCell::new(PointerState::new()));
    let pointermove = events::wire_pointermove(&canvas, pointer.clone());
    let resize = events::wire_resize(&canvas)?;

    log::info!(
        "[ringfield] started: count={} shape={:?}",
        field.options().count,
        field.options().shape
    );

    let gate = Rc::new(LoopGate::new());
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        field,
        pointer,
        canvas,
        gpu,
        started: Instant::now(),
    }));
    let loop_handle = frame::start_loop(frame_ctx.clone(), gate.clone());

    Ok(RingField {
        gate,
        loop_handle,
        ctx: frame_ctx,
        pointermove,
        resize,
    })
}

fn patch_from_js(v: &JsValue) -> FieldOptionsPatch {
    let mut patch = FieldOptionsPatch::default();
    if !v.is_object() {
        return patch;
    }
    patch.count = get_f64(v, "count").map(|n| n.max(0.0) as usize);
    patch.magnet_radius = get_f32(v, "magnetRadius");
    patch.ring_radius = get_f32(v, "ringRadius");
    patch.wave_speed = get_f32(v, "waveSpeed");
    patch.wave_amplitude = get_f32(v, "waveAmplitude");
    patch.particle_size = get_f32(v, "particleSize");
    patch.lerp_speed = get_f32(v, "lerpSpeed");
    patch.color = get_string(v, "color");
    patch.auto_animate = get_bool(v, "autoAnimate");
    patch.particle_variance = get_f32(v, "particleVariance");
    patch.rotation_speed = get_f32(v, "rotationSpeed");
    patch.depth_factor = get_f32(v, "depthFactor");
    patch.pulse_speed = get_f32(v, "pulseSpeed");
    patch.shape = get_string(v, "particleShape")
        .as_deref()
        .map(ParticleShape::from_name);
    patch.field_strength = get_f32(v, "fieldStrength");
    patch
}

fn get_f64(v: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(v, &JsValue::from_str(key))
        .ok()
        .and_then(|x| x.as_f64())
}

fn get_f32(v: &JsValue, key: &str) -> Option<f32> {
    get_f64(v, key).map(|n| n as f32)
}

fn get_bool(v: &JsValue, key: &str) -> Option<bool> {
    js_sys::Reflect::get(v, &JsValue::from_str(key))
        .ok()
        .and_then(|x| x.as_bool())
}

fn get_string(v: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(v, &JsValue::from_str(key))
        .ok()
        .and_then(|x| x.as_string())
}
