//! Arena Renderer
//!
//! Draws a `FrameSnapshot` with macroquad: background grid, sprites in layer
//! order, then the HUD and any overlay. Everything is shifted by the camera
//! shake offset except the HUD.

use macroquad::prelude::*;

use super::snapshot::{Drawable, FrameSnapshot, HudInfo};
use crate::texture::{load_texture, TextureCache};

/// Background fill (#1a1a1a)
pub const BACKGROUND: Color = Color::new(0.102, 0.102, 0.102, 1.0);
/// Grid lines (#333333)
pub const GRID_COLOR: Color = Color::new(0.2, 0.2, 0.2, 1.0);
pub const GRID_SPACING: f32 = 50.0;
/// Facing marker drawn over image-less sprites
const INDICATOR_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.5);
const INDICATOR_THICKNESS: f32 = 4.0;

const HUD_TEXT: Color = WHITE;
const HUD_FONT_SIZE: f32 = 24.0;
const HEALTH_BAR_SIZE: Vec2 = Vec2::new(200.0, 20.0);

/// Which overlay to show over the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    GameOver,
}

/// Owns the sprite texture cache
pub struct ArenaRenderer {
    textures: TextureCache,
}

impl ArenaRenderer {
    pub fn new(textures: TextureCache) -> Self {
        Self { textures }
    }

    /// Draw a whole frame.
    pub fn draw_frame(&mut self, snapshot: &FrameSnapshot, overlay: Overlay) {
        clear_background(BACKGROUND);

        let offset = snapshot.camera_offset;
        draw_grid(screen_width(), screen_height(), offset);

        for drawable in &snapshot.drawables {
            self.draw_drawable(drawable, offset);
        }

        draw_hud(&snapshot.hud);
        match overlay {
            Overlay::None => {}
            Overlay::Paused => draw_paused(),
            Overlay::GameOver => draw_game_over(&snapshot.hud),
        }
    }

    fn draw_drawable(&mut self, d: &Drawable, offset: Vec2) {
        let center = d.position + offset;
        let size = Vec2::new(d.width, d.height) * d.scale;
        let top_left = center - size * 0.5;

        let texture = d
            .image
            .as_deref()
            .and_then(|path| self.textures.get_or_load(path, load_texture));

        match texture {
            Some(texture) => {
                draw_texture_ex(
                    texture,
                    top_left.x,
                    top_left.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(size),
                        rotation: d.rotation,
                        pivot: Some(center),
                        ..Default::default()
                    },
                );
            }
            None => {
                draw_rectangle_ex(
                    center.x,
                    center.y,
                    size.x,
                    size.y,
                    DrawRectangleParams {
                        offset: Vec2::new(0.5, 0.5),
                        rotation: d.rotation,
                        color: d.color,
                    },
                );
                let tip = indicator_tip(d, offset);
                draw_line(center.x, center.y, tip.x, tip.y, INDICATOR_THICKNESS, INDICATOR_COLOR);
            }
        }
    }
}

/// Grid line coordinates along one axis, shifted by `offset` and kept on screen.
pub fn grid_lines(extent: f32, spacing: f32, offset: f32) -> Vec<f32> {
    let start = offset.rem_euclid(spacing);
    let mut lines = Vec::new();
    let mut at = start;
    while at <= extent {
        lines.push(at);
        at += spacing;
    }
    lines
}

fn draw_grid(width: f32, height: f32, offset: Vec2) {
    for x in grid_lines(width, GRID_SPACING, offset.x) {
        draw_line(x, 0.0, x, height, 1.0, GRID_COLOR);
    }
    for y in grid_lines(height, GRID_SPACING, offset.y) {
        draw_line(0.0, y, width, y, 1.0, GRID_COLOR);
    }
}

/// End point of the facing marker: half the sprite width plus 10 units ahead.
pub fn indicator_tip(d: &Drawable, offset: Vec2) -> Vec2 {
    let length = d.width * d.scale * 0.5 + 10.0;
    d.position + offset + Vec2::new(d.rotation.cos(), d.rotation.sin()) * length
}

fn draw_hud(hud: &HudInfo) {
    draw_text(&format!("Wave: {}", hud.wave), 20.0, 30.0, HUD_FONT_SIZE, HUD_TEXT);

    let bar = Vec2::new(20.0, 45.0);
    let fill = HEALTH_BAR_SIZE.x * (hud.health_percent() as f32 / 100.0);
    draw_rectangle(bar.x, bar.y, HEALTH_BAR_SIZE.x, HEALTH_BAR_SIZE.y, Color::new(0.4, 0.0, 0.0, 1.0));
    draw_rectangle(bar.x, bar.y, fill, HEALTH_BAR_SIZE.y, Color::new(0.0, 0.8, 0.0, 1.0));
    draw_rectangle_lines(bar.x, bar.y, HEALTH_BAR_SIZE.x, HEALTH_BAR_SIZE.y, 2.0, HUD_TEXT);
    draw_text(
        &format!("HP: {}%", hud.health_percent()),
        bar.x + HEALTH_BAR_SIZE.x + 10.0,
        bar.y + 16.0,
        HUD_FONT_SIZE,
        HUD_TEXT,
    );

    draw_text(&format!("Score: {}", hud.score), 20.0, 90.0, HUD_FONT_SIZE, HUD_TEXT);

    draw_text(
        "WASD to move, mouse to aim, click to shoot, Esc to pause",
        20.0,
        screen_height() - 20.0,
        18.0,
        Color::new(1.0, 1.0, 1.0, 0.6),
    );
}

fn draw_centered(text: &str, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (screen_width() - dims.width) * 0.5, y, font_size, color);
}

fn draw_paused() {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.4));
    draw_centered("PAUSED", screen_height() * 0.5, 48.0, WHITE);
    draw_centered("Press Esc to resume", screen_height() * 0.5 + 40.0, 24.0, WHITE);
}

fn draw_game_over(hud: &HudInfo) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.6));
    let mid = screen_height() * 0.5;
    draw_centered("GAME OVER", mid - 20.0, 64.0, RED);
    draw_centered(&format!("Score: {}   Wave: {}", hud.score, hud.wave), mid + 30.0, 28.0, WHITE);
    draw_centered("Press R to restart", mid + 70.0, 24.0, WHITE);
}
