//! Canvas 2D backend (browser only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::DrawCommand;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    pub fn draw(&self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx
                        .fill_rect(*x as f64, *y as f64, *width as f64, *height as f64);
                }
            }
        }
    }
}
