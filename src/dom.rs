use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use web_sys as web;

#[inline]
pub fn window_document() -> anyhow::Result<web::Document> {
    web::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow::anyhow!("no window/document"))
}

/// Create a canvas filling its container; the caller appends it.
pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    use wasm_bindgen::JsCast;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create_element(canvas) failed: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a canvas element: {:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    Ok(canvas)
}

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio (clamped to avoid oversized buffers on high-DPI screens). A
/// container without layout yields a zero-sized backing store; the frame
/// loop skips ticks until layout gives it a real size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        canvas.set_width((rect.width() * dpr) as u32);
        canvas.set_height((rect.height() * dpr) as u32);
    }
}
