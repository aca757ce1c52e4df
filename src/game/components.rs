//! Game Components
//!
//! All the component types used by the arena shooter.
//! Components are plain data structs - behavior lives in systems.
//!
//! The set is closed: `ComponentKind` names every kind and `Component` is the
//! tagged variant used by the generic store API. Systems use the typed
//! storages on `World` directly.

use macroquad::color::Color;
use macroquad::math::Vec2;

// =============================================================================
// Spatial / Movement
// =============================================================================

/// Position, facing and draw scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Facing in radians, 0 = +x, growing toward +y (screen down)
    pub rotation: f32,
    pub scale: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Unit vector along the current facing.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }
}

/// Linear velocity in units per second plus per-tick friction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub linear: Vec2,
    /// Fraction of speed lost per 1/60 s; 0 disables damping
    pub friction: f32,
}

impl Velocity {
    pub fn new(vx: f32, vy: f32, friction: f32) -> Self {
        Self {
            linear: Vec2::new(vx, vy),
            friction,
        }
    }

    pub fn at_rest(friction: f32) -> Self {
        Self::new(0.0, 0.0, friction)
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Something the render adapter can draw
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Fill colour, also the placeholder while an image is missing
    pub color: Color,
    /// Optional image path resolved through the image cache
    pub image: Option<String>,
    pub width: f32,
    pub height: f32,
    /// Draw order, ascending
    pub layer: i32,
}

impl Sprite {
    pub fn solid(color: Color, width: f32, height: f32, layer: i32) -> Self {
        Self {
            color,
            image: None,
            width,
            height,
            layer,
        }
    }

    /// Attach an optional image; `None` keeps the solid colour.
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

// =============================================================================
// Control
// =============================================================================

/// Marks the entity steered by the local input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerControl {
    pub max_speed: f32,
}

/// AI behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    /// Unaware of the player, drifting
    #[default]
    Idle,
    /// Closing in on the player
    Chase,
    /// Air unit making strafing runs
    Strafe,
    /// Orbiting the player at its current range
    Circle,
}

/// How an AI unit moves; air units skip the idle/chase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    Ground,
    Air,
}

/// AI brain for enemies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiControl {
    pub state: AiState,
    pub detection_radius: f32,
    pub locomotion: Locomotion,
}

impl AiControl {
    pub fn new(detection_radius: f32, locomotion: Locomotion) -> Self {
        Self {
            state: AiState::Idle,
            detection_radius,
            locomotion,
        }
    }

    pub fn with_state(mut self, state: AiState) -> Self {
        self.state = state;
        self
    }
}

// =============================================================================
// Combat
// =============================================================================

/// What a collider represents; drives collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderTag {
    Player,
    Enemy,
    AirEnemy,
    Projectile,
    EnemyProjectile,
    Wall,
}

impl ColliderTag {
    /// Ground or air enemy
    pub fn is_enemy(self) -> bool {
        matches!(self, ColliderTag::Enemy | ColliderTag::AirEnemy)
    }
}

/// Axis-aligned box centred on the entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
    pub tag: ColliderTag,
}

impl Collider {
    pub fn new(width: f32, height: f32, tag: ColliderTag) -> Self {
        Self { width, height, tag }
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Health component for damageable entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, flooring at zero. Returns true if this hit emptied it.
    pub fn damage(&mut self, amount: i32) -> bool {
        let was_alive = self.current > 0;
        self.current = (self.current - amount).max(0);
        was_alive && self.current == 0
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Ranged weapon with a cooldown measured in simulation seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub cooldown: f64,
    /// Simulation time of the last shot; starts in the distant past
    pub last_fired: f64,
    pub damage: i32,
    pub projectile_speed: f32,
}

impl Weapon {
    pub fn new(cooldown: f64, damage: i32, projectile_speed: f32) -> Self {
        Self {
            cooldown,
            last_fired: f64::NEG_INFINITY,
            damage,
            projectile_speed,
        }
    }

    pub fn ready(&self, now: f64) -> bool {
        now - self.last_fired >= self.cooldown
    }

    /// Record a shot. `last_fired` never moves backwards.
    pub fn mark_fired(&mut self, now: f64) {
        self.last_fired = self.last_fired.max(now);
    }
}

/// Seconds left before the entity is destroyed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }
}

/// Points awarded when this entity is killed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub value: u32,
}

// =============================================================================
// Tagged variant for the generic store API
// =============================================================================

/// Every component kind the store knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Velocity,
    Sprite,
    PlayerControl,
    Collider,
    Health,
    Weapon,
    Lifetime,
    AiControl,
    Score,
}

/// A component value tagged with its kind
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Transform(Transform),
    Velocity(Velocity),
    Sprite(Sprite),
    PlayerControl(PlayerControl),
    Collider(Collider),
    Health(Health),
    Weapon(Weapon),
    Lifetime(Lifetime),
    AiControl(AiControl),
    Score(Score),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Transform(_) => ComponentKind::Transform,
            Component::Velocity(_) => ComponentKind::Velocity,
            Component::Sprite(_) => ComponentKind::Sprite,
            Component::PlayerControl(_) => ComponentKind::PlayerControl,
            Component::Collider(_) => ComponentKind::Collider,
            Component::Health(_) => ComponentKind::Health,
            Component::Weapon(_) => ComponentKind::Weapon,
            Component::Lifetime(_) => ComponentKind::Lifetime,
            Component::AiControl(_) => ComponentKind::AiControl,
            Component::Score(_) => ComponentKind::Score,
        }
    }
}

macro_rules! impl_from_component {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(c: $ty) -> Self {
                    Component::$ty(c)
                }
            }
        )*
    };
}

impl_from_component!(
    Transform,
    Velocity,
    Sprite,
    PlayerControl,
    Collider,
    Health,
    Weapon,
    Lifetime,
    AiControl,
    Score,
);
