//! Frame snapshot handed to the renderer
//!
//! The renderer never sees the `World`. Each frame it receives a flat,
//! layer-ordered list of drawables plus the camera offset and HUD values.

use macroquad::color::Color;
use macroquad::math::Vec2;

use super::components::ComponentKind;
use super::entity::Entity;
use super::world::World;

/// One sprite to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub entity: Entity,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub color: Color,
    pub image: Option<String>,
    pub width: f32,
    pub height: f32,
    pub layer: i32,
}

/// Session state shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudInfo {
    pub wave: u32,
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
    pub game_over: bool,
}

impl HudInfo {
    /// Health as a whole percentage of max
    pub fn health_percent(&self) -> i32 {
        if self.max_health <= 0 {
            return 0;
        }
        (self.health.max(0) * 100) / self.max_health
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Sorted by layer, ascending; equal layers keep creation order
    pub drawables: Vec<Drawable>,
    pub camera_offset: Vec2,
    pub hud: HudInfo,
}

/// Every entity with a Transform and a Sprite, ordered for drawing.
pub fn collect_drawables(world: &World) -> Vec<Drawable> {
    let mut drawables: Vec<Drawable> = world
        .query(&[ComponentKind::Transform, ComponentKind::Sprite])
        .into_iter()
        .map(|entity| {
            let transform = world.transforms.get(entity).expect("queried entity has Transform");
            let sprite = world.sprites.get(entity).expect("queried entity has Sprite");
            Drawable {
                entity,
                position: transform.position,
                rotation: transform.rotation,
                scale: transform.scale,
                color: sprite.color,
                image: sprite.image.clone(),
                width: sprite.width,
                height: sprite.height,
                layer: sprite.layer,
            }
        })
        .collect();
    // sort_by_key is stable
    drawables.sort_by_key(|d| d.layer);
    drawables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{Sprite, Transform};
    use macroquad::prelude::WHITE;

    fn sprite_at(world: &mut World, layer: i32) -> Entity {
        let e = world.create_entity();
        world.add_component(e, Transform::new(0.0, 0.0));
        world.add_component(e, Sprite::solid(WHITE, 8.0, 8.0, layer));
        e
    }

    #[test]
    fn test_sorted_by_layer_stable() {
        let mut world = World::new();
        let a = sprite_at(&mut world, 20);
        let b = sprite_at(&mut world, 5);
        let c = sprite_at(&mut world, 20);
        let d = sprite_at(&mut world, 10);

        let order: Vec<_> = collect_drawables(&world).iter().map(|d| d.entity).collect();
        assert_eq!(order, vec![b, d, a, c]);
    }

    #[test]
    fn test_needs_transform_and_sprite() {
        let mut world = World::new();
        let shown = sprite_at(&mut world, 0);
        let hidden = world.create_entity();
        world.add_component(hidden, Sprite::solid(WHITE, 8.0, 8.0, 0));

        let drawables = collect_drawables(&world);
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].entity, shown);
    }

    #[test]
    fn test_health_percent() {
        let hud = HudInfo {
            wave: 1,
            health: 45,
            max_health: 100,
            score: 0,
            game_over: false,
        };
        assert_eq!(hud.health_percent(), 45);
        assert_eq!(HudInfo { health: -5, ..hud }.health_percent(), 0);
    }
}
