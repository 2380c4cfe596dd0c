//! `Surface` backed by the browser's `CanvasRenderingContext2d`

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, log_failure};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of a canvas, if the browser provides one
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        log_failure("translate", self.ctx.translate(x as f64, y as f64));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ctx.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ctx.line_to(x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, ccw: bool) {
        let result = self.ctx.arc_with_anticlockwise(
            x as f64,
            y as f64,
            radius.max(0.0) as f64,
            start as f64,
            end as f64,
            ccw,
        );
        log_failure("arc", result);
    }

    fn ellipse(
        &mut self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
    ) {
        let result = self.ctx.ellipse(
            x as f64,
            y as f64,
            radius_x.max(0.0) as f64,
            radius_y.max(0.0) as f64,
            rotation as f64,
            start as f64,
            end as f64,
        );
        log_failure("ellipse", result);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: &str) {
        self.ctx.set_text_align(align);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log_failure("fill_text", self.ctx.fill_text(text, x as f64, y as f64));
    }
}
