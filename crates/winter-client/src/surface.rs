use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use winter_core::canvas::{CanvasDimensions, CanvasStyle};
use winter_core::game_trait::{Painter, TextAlign};

/// The `#game-canvas` element and its 2D context. Exactly one owner at a
/// time: the shell while idle, the running game otherwise.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("getContext failed: {e:?}"))?
            .ok_or("2D context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Not a 2D context")?;
        Ok(Self { canvas, ctx })
    }

    /// Another handle on the same canvas. Only for recovering the surface
    /// from a frame loop that could not release its own.
    pub(crate) fn reacquire(&self) -> Self {
        Self {
            canvas: self.canvas.clone(),
            ctx: self.ctx.clone(),
        }
    }
}

impl Painter for CanvasSurface {
    fn buffer_size(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(cx, cy, radius.max(0.0), 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size_px: u32, align: TextAlign, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(&format!("{size_px}px system-ui"));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        let _ = self.ctx.fill_text(text, x, y);
    }
}

/// Display-size writer for the canvas element. Separate from the surface so
/// resizing never needs the drawing context.
pub struct CanvasStyleTarget(pub HtmlCanvasElement);

impl CanvasStyle for CanvasStyleTarget {
    fn set_display_size(&mut self, dims: CanvasDimensions) {
        let style = self.0.style();
        let _ = style.set_property("width", &format!("{}px", dims.width));
        let _ = style.set_property("height", &format!("{}px", dims.height));
    }
}
