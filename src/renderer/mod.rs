//! Canvas 2D rendering
//!
//! The simulation draws through the `Surface` trait, which mirrors the
//! subset of `CanvasRenderingContext2D` the sprites need. The browser build
//! implements it for the real context; tests record the calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod sprites;

use crate::sim::{Entity, PlayField};

/// Sky background
const SKY_COLOR: &str = "#87CEEB";
const CLOUD_COLOR: &str = "rgba(255, 255, 255, 0.6)";
const CLOUD_COUNT: usize = 5;
/// Cloud drift speed: one pixel every N milliseconds
const CLOUD_DRIFT_MS_PER_PX: f64 = 50.0;

/// 2D drawing surface. Colors and fonts are CSS strings.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, ccw: bool);
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
    );
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}

/// Report a failed drawing call. Only that call is dropped; the frame
/// carries on. Returns whether it failed.
pub fn log_failure<E: std::fmt::Debug>(op: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => false,
        Err(e) => {
            log::debug!("{} failed: {:?}", op, e);
            true
        }
    }
}

/// Draw a full frame: sky, clouds, then entities bottom to top
pub fn render_scene(surface: &mut dyn Surface, field: PlayField, entities: &[Entity], time_ms: f64) {
    surface.set_fill_style(SKY_COLOR);
    surface.fill_rect(0.0, 0.0, field.width, field.height);

    draw_clouds(surface, field, time_ms);

    for entity in entities {
        entity.render(surface);
    }
}

fn draw_clouds(surface: &mut dyn Surface, field: PlayField, time_ms: f64) {
    use std::f32::consts::TAU;

    surface.set_fill_style(CLOUD_COLOR);
    let span = field.width as f64 + 100.0;
    for i in 0..CLOUD_COUNT {
        let x = ((time_ms / CLOUD_DRIFT_MS_PER_PX + i as f64 * 200.0) % span - 50.0) as f32;
        let y = 50.0 + i as f32 * 80.0;

        surface.begin_path();
        surface.arc(x, y, 20.0, 0.0, TAU, false);
        surface.arc(x + 20.0, y, 25.0, 0.0, TAU, false);
        surface.arc(x + 40.0, y, 20.0, 0.0, TAU, false);
        surface.fill();
    }
}
