//! Sprite drawing for each entity kind
//!
//! All shapes are drawn relative to the entity center and scaled by its
//! width/height, so sprites follow whatever size the spawn tier chose.

use std::f32::consts::{PI, TAU};

use super::Surface;
use crate::sim::{Entity, EntityKind};

const TURKEY_TAIL: [&str; 3] = ["#8B4513", "#A0522D", "#D2691E"];
const GOLDEN_TAIL: [&str; 3] = ["#FFD700", "#FFA500", "#FF8C00"];

const SKIN_COLOR: &str = "#FFE4C4";
const HAIR_COLOR: &str = "#8B4513";
const SWIMSUIT_COLOR: &str = "#FF1493";
const BONUS_SWIMSUIT_COLOR: &str = "#FF69B4";

/// Turkey palette: body, head, beak, tail
struct TurkeyColors {
    body: &'static str,
    head: &'static str,
    beak: &'static str,
    tail: [&'static str; 3],
}

const COMMON: TurkeyColors = TurkeyColors {
    body: "#8B4513",
    head: "#A0522D",
    beak: "#FFA500",
    tail: TURKEY_TAIL,
};

const GOLDEN: TurkeyColors = TurkeyColors {
    body: "#FFD700",
    head: "#FFA500",
    beak: "#FF8C00",
    tail: GOLDEN_TAIL,
};

pub fn draw_entity(surface: &mut dyn Surface, entity: &Entity) {
    let center = entity.center();
    let size = entity.size();

    surface.save();
    surface.translate(center.x, center.y);

    match entity.kind {
        EntityKind::Turkey => draw_turkey(surface, size.x, size.y, &COMMON),
        EntityKind::SpecialTurkey { special_id, .. } => {
            draw_turkey(surface, size.x, size.y, &GOLDEN);
            surface.set_fill_style("#FFFFFF");
            surface.set_font(&format!("bold {}px Arial", (size.y * 0.4).round()));
            surface.set_text_align("center");
            surface.set_text_baseline("middle");
            surface.fill_text(&special_id.to_string(), 0.0, 0.0);
        }
        EntityKind::Obstacle { bonus, .. } => draw_swimmer(surface, size.x, size.y, bonus),
    }

    surface.restore();
}

fn draw_turkey(surface: &mut dyn Surface, w: f32, h: f32, colors: &TurkeyColors) {
    // Body
    surface.set_fill_style(colors.body);
    surface.begin_path();
    surface.ellipse(0.0, 0.0, w * 0.35, h * 0.4, 0.0, 0.0, TAU);
    surface.fill();

    // Head
    surface.set_fill_style(colors.head);
    surface.begin_path();
    surface.arc(-w * 0.25, -h * 0.25, w * 0.2, 0.0, TAU, false);
    surface.fill();

    // Beak
    surface.set_fill_style(colors.beak);
    surface.begin_path();
    surface.move_to(-w * 0.35, -h * 0.25);
    surface.line_to(-w * 0.45, -h * 0.22);
    surface.line_to(-w * 0.35, -h * 0.19);
    surface.close_path();
    surface.fill();

    // Eye
    surface.set_fill_style("#000000");
    surface.begin_path();
    surface.arc(-w * 0.28, -h * 0.28, w * 0.03, 0.0, TAU, false);
    surface.fill();

    // Tail feathers
    let y_step = h * 0.1;
    for (i, color) in colors.tail.iter().enumerate() {
        surface.set_fill_style(color);
        surface.begin_path();
        surface.ellipse(
            w * 0.25,
            -h * 0.1 + i as f32 * y_step,
            w * 0.15,
            h * 0.25,
            PI / 6.0,
            0.0,
            TAU,
        );
        surface.fill();
    }
}

fn draw_swimmer(surface: &mut dyn Surface, w: f32, h: f32, bonus: bool) {
    // Body
    surface.set_fill_style(SKIN_COLOR);
    surface.begin_path();
    surface.ellipse(0.0, h * 0.05, w * 0.25, h * 0.35, 0.0, 0.0, TAU);
    surface.fill();

    // Head
    surface.begin_path();
    surface.arc(0.0, -h * 0.25, w * 0.18, 0.0, TAU, false);
    surface.fill();

    // Swimsuit
    surface.set_fill_style(if bonus {
        BONUS_SWIMSUIT_COLOR
    } else {
        SWIMSUIT_COLOR
    });
    surface.fill_rect(-w * 0.2, -h * 0.05, w * 0.4, h * 0.15);
    surface.fill_rect(-w * 0.18, h * 0.25, w * 0.36, h * 0.15);

    // Hair
    surface.set_fill_style(HAIR_COLOR);
    surface.begin_path();
    surface.arc(0.0, -h * 0.3, w * 0.2, 0.0, PI, true);
    surface.fill();

    // Eyes
    surface.set_fill_style("#000000");
    surface.begin_path();
    surface.arc(-w * 0.08, -h * 0.27, w * 0.03, 0.0, TAU, false);
    surface.arc(w * 0.08, -h * 0.27, w * 0.03, 0.0, TAU, false);
    surface.fill();

    if bonus {
        surface.set_fill_style(BONUS_SWIMSUIT_COLOR);
        surface.set_font(&format!("{}px Arial", (h * 0.3).round()));
        surface.set_text_align("center");
        surface.fill_text("💕", 0.0, -h * 0.5);
    }
}
