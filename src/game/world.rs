//! Game World
//!
//! The World is the entity store and the single owner of all game state
//! that systems operate on:
//! - Entity allocation and lifetime tracking
//! - Component storage for all component types
//! - Deferred entity destruction (stable entity set within a tick)
//!
//! Components are stored in typed fields rather than a map keyed by kind
//! name; `ComponentKind` is only used by the generic API (`add_component`,
//! `query`, ...). Systems reach for the typed storages directly.

use macroquad::color::Color;
use macroquad::math::Vec2;

use super::component::ComponentStorage;
use super::components::*;
use super::entity::{Entity, EntityAllocator};
use crate::config::{EnemyTuning, PlayerTuning};

/// Player colour (placeholder while the image is missing)
pub const PLAYER_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
/// Ground enemy colour
pub const ENEMY_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
/// Air enemy colour
pub const AIR_ENEMY_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
/// Player shot colour
pub const PROJECTILE_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
/// Ground enemy shot colour
pub const ENEMY_PROJECTILE_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
/// Air enemy tracer colour
pub const TRACER_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Draw layer for every projectile
pub const PROJECTILE_LAYER: i32 = 20;
/// Draw layer for the player
pub const PLAYER_LAYER: i32 = 10;

/// Everything needed to spawn one projectile
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpec {
    /// Spawn point
    pub origin: Vec2,
    /// Visual facing
    pub rotation: f32,
    /// Travel direction (may differ from rotation by spread)
    pub heading: f32,
    pub speed: f32,
    pub tag: ColliderTag,
    pub color: Color,
    pub sprite_size: Vec2,
    pub collider_size: f32,
    pub lifetime: f32,
}

/// The game world containing all entities and their components.
pub struct World {
    /// Entity allocator for creating/destroying entities
    entities: EntityAllocator,

    /// Entities queued for destruction at the end of the tick
    destroy_queue: Vec<Entity>,

    // =========================================================================
    // Components
    // =========================================================================
    pub transforms: ComponentStorage<Transform>,
    pub velocities: ComponentStorage<Velocity>,
    pub sprites: ComponentStorage<Sprite>,
    pub player_controls: ComponentStorage<PlayerControl>,
    pub colliders: ComponentStorage<Collider>,
    pub health: ComponentStorage<Health>,
    pub weapons: ComponentStorage<Weapon>,
    pub lifetimes: ComponentStorage<Lifetime>,
    pub ai: ComponentStorage<AiControl>,
    pub scores: ComponentStorage<Score>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            destroy_queue: Vec::new(),
            transforms: ComponentStorage::new(),
            velocities: ComponentStorage::new(),
            sprites: ComponentStorage::new(),
            player_controls: ComponentStorage::new(),
            colliders: ComponentStorage::new(),
            health: ComponentStorage::new(),
            weapons: ComponentStorage::new(),
            lifetimes: ComponentStorage::new(),
            ai: ComponentStorage::new(),
            scores: ComponentStorage::new(),
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Create a new entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Queue an entity for destruction at the end of the tick.
    /// Dead or already queued entities are ignored.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if self.is_alive(entity) && !self.is_pending_destroy(entity) {
            self.destroy_queue.push(entity);
        }
    }

    /// Has this entity been marked for destruction this tick?
    pub fn is_pending_destroy(&self, entity: Entity) -> bool {
        self.destroy_queue.contains(&entity)
    }

    /// Remove every queued entity and all of its components.
    /// Called once, last, in every fixed step.
    pub fn flush_destroyed(&mut self) {
        let queue = std::mem::take(&mut self.destroy_queue);
        for &entity in &queue {
            self.clear_components(entity);
        }
        self.entities.free_all(&queue);
    }

    fn clear_components(&mut self, entity: Entity) {
        self.transforms.remove(entity);
        self.velocities.remove(entity);
        self.sprites.remove(entity);
        self.player_controls.remove(entity);
        self.colliders.remove(entity);
        self.health.remove(entity);
        self.weapons.remove(entity);
        self.lifetimes.remove(entity);
        self.ai.remove(entity);
        self.scores.remove(entity);
    }

    /// Check if an entity is currently alive (queued entities still are).
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Get the number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.entities.alive_count()
    }

    // =========================================================================
    // Generic component access
    // =========================================================================

    /// Attach a component, replacing any existing one of the same kind.
    /// No-op for dead entities.
    pub fn add_component(&mut self, entity: Entity, component: impl Into<Component>) {
        if !self.is_alive(entity) {
            return;
        }
        match component.into() {
            Component::Transform(c) => self.transforms.insert(entity, c),
            Component::Velocity(c) => self.velocities.insert(entity, c),
            Component::Sprite(c) => self.sprites.insert(entity, c),
            Component::PlayerControl(c) => self.player_controls.insert(entity, c),
            Component::Collider(c) => self.colliders.insert(entity, c),
            Component::Health(c) => self.health.insert(entity, c),
            Component::Weapon(c) => self.weapons.insert(entity, c),
            Component::Lifetime(c) => self.lifetimes.insert(entity, c),
            Component::AiControl(c) => self.ai.insert(entity, c),
            Component::Score(c) => self.scores.insert(entity, c),
        }
    }

    /// Copy of an entity's component of the given kind.
    pub fn get_component(&self, entity: Entity, kind: ComponentKind) -> Option<Component> {
        match kind {
            ComponentKind::Transform => self.transforms.get(entity).copied().map(Component::from),
            ComponentKind::Velocity => self.velocities.get(entity).copied().map(Component::from),
            ComponentKind::Sprite => self.sprites.get(entity).cloned().map(Component::from),
            ComponentKind::PlayerControl => {
                self.player_controls.get(entity).copied().map(Component::from)
            }
            ComponentKind::Collider => self.colliders.get(entity).copied().map(Component::from),
            ComponentKind::Health => self.health.get(entity).copied().map(Component::from),
            ComponentKind::Weapon => self.weapons.get(entity).copied().map(Component::from),
            ComponentKind::Lifetime => self.lifetimes.get(entity).copied().map(Component::from),
            ComponentKind::AiControl => self.ai.get(entity).copied().map(Component::from),
            ComponentKind::Score => self.scores.get(entity).copied().map(Component::from),
        }
    }

    pub fn has_component(&self, entity: Entity, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.contains(entity),
            ComponentKind::Velocity => self.velocities.contains(entity),
            ComponentKind::Sprite => self.sprites.contains(entity),
            ComponentKind::PlayerControl => self.player_controls.contains(entity),
            ComponentKind::Collider => self.colliders.contains(entity),
            ComponentKind::Health => self.health.contains(entity),
            ComponentKind::Weapon => self.weapons.contains(entity),
            ComponentKind::Lifetime => self.lifetimes.contains(entity),
            ComponentKind::AiControl => self.ai.contains(entity),
            ComponentKind::Score => self.scores.contains(entity),
        }
    }

    /// Detach a component. No-op if it isn't there.
    pub fn remove_component(&mut self, entity: Entity, kind: ComponentKind) {
        match kind {
            ComponentKind::Transform => {
                self.transforms.remove(entity);
            }
            ComponentKind::Velocity => {
                self.velocities.remove(entity);
            }
            ComponentKind::Sprite => {
                self.sprites.remove(entity);
            }
            ComponentKind::PlayerControl => {
                self.player_controls.remove(entity);
            }
            ComponentKind::Collider => {
                self.colliders.remove(entity);
            }
            ComponentKind::Health => {
                self.health.remove(entity);
            }
            ComponentKind::Weapon => {
                self.weapons.remove(entity);
            }
            ComponentKind::Lifetime => {
                self.lifetimes.remove(entity);
            }
            ComponentKind::AiControl => {
                self.ai.remove(entity);
            }
            ComponentKind::Score => {
                self.scores.remove(entity);
            }
        }
    }

    /// Entities holding every listed kind, in creation order.
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<Entity> {
        self.entities
            .alive()
            .iter()
            .copied()
            .filter(|&e| kinds.iter().all(|&kind| self.has_component(e, kind)))
            .collect()
    }

    /// First player-controlled entity with a transform, if any.
    pub fn player(&self) -> Option<Entity> {
        self.entities
            .alive()
            .iter()
            .copied()
            .find(|&e| self.player_controls.contains(e) && self.transforms.contains(e))
    }

    // =========================================================================
    // Convenience Spawners
    // =========================================================================

    /// Spawn the player entity at a position.
    pub fn spawn_player(&mut self, position: Vec2, settings: &PlayerTuning) -> Entity {
        let entity = self.create_entity();
        self.transforms.insert(entity, Transform::new(position.x, position.y));
        self.velocities.insert(entity, Velocity::at_rest(settings.friction));
        let sprite = Sprite::solid(PLAYER_COLOR, settings.sprite_size, settings.sprite_size, PLAYER_LAYER)
            .with_image(settings.image.clone());
        self.sprites.insert(entity, sprite);
        self.player_controls.insert(entity, PlayerControl { max_speed: settings.max_speed });
        self.colliders.insert(
            entity,
            Collider::new(settings.collider_size, settings.collider_size, ColliderTag::Player),
        );
        self.weapons.insert(
            entity,
            Weapon::new(settings.weapon_cooldown, settings.weapon_damage, settings.projectile_speed),
        );
        self.health.insert(entity, Health::new(settings.max_health));
        entity
    }

    /// Spawn an enemy from an archetype. Air units start strafing.
    pub fn spawn_enemy(
        &mut self,
        position: Vec2,
        facing: f32,
        archetype: &EnemyTuning,
        locomotion: Locomotion,
    ) -> Entity {
        let (tag, color) = match locomotion {
            Locomotion::Ground => (ColliderTag::Enemy, ENEMY_COLOR),
            Locomotion::Air => (ColliderTag::AirEnemy, AIR_ENEMY_COLOR),
        };
        let mut ai = AiControl::new(archetype.detection_radius, locomotion);
        if locomotion == Locomotion::Air {
            ai = ai.with_state(AiState::Strafe);
        }

        let entity = self.create_entity();
        self.transforms.insert(
            entity,
            Transform::new(position.x, position.y)
                .with_rotation(facing)
                .with_scale(archetype.scale),
        );
        self.velocities.insert(entity, Velocity::at_rest(archetype.friction));
        let sprite = Sprite::solid(color, archetype.sprite_size, archetype.sprite_size, archetype.layer)
            .with_image(archetype.image.clone());
        self.sprites.insert(entity, sprite);
        self.colliders.insert(
            entity,
            Collider::new(archetype.collider_size, archetype.collider_size, tag),
        );
        self.ai.insert(entity, ai);
        self.scores.insert(entity, Score { value: archetype.score });
        self.weapons.insert(
            entity,
            Weapon::new(archetype.weapon_cooldown, archetype.weapon_damage, archetype.projectile_speed),
        );
        entity
    }

    /// Spawn a projectile. Projectiles never have friction.
    pub fn spawn_projectile(&mut self, spec: &ProjectileSpec) -> Entity {
        let velocity = Vec2::new(spec.heading.cos(), spec.heading.sin()) * spec.speed;

        let entity = self.create_entity();
        self.transforms.insert(
            entity,
            Transform::new(spec.origin.x, spec.origin.y).with_rotation(spec.rotation),
        );
        self.velocities.insert(entity, Velocity::new(velocity.x, velocity.y, 0.0));
        self.sprites.insert(
            entity,
            Sprite::solid(spec.color, spec.sprite_size.x, spec.sprite_size.y, PROJECTILE_LAYER),
        );
        self.colliders.insert(
            entity,
            Collider::new(spec.collider_size, spec.collider_size, spec.tag),
        );
        self.lifetimes.insert(entity, Lifetime::new(spec.lifetime));
        entity
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
