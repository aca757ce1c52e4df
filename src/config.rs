//! Gameplay tuning
//!
//! Uses RON (Rusty Object Notation) for a human-readable tuning file.
//! Most sections are `#[serde(default)]`, so a file only needs the values it
//! changes. Enemy archetypes (`waves.ground`, `waves.air`) must be given in
//! full when present:
//!
//! ```ron
//! (
//!     seed: Some(7),
//!     player: (max_speed: 360.0),
//!     waves: (settle_delay: 2.0),
//! )
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location of the tuning file, relative to the working directory
pub const DEFAULT_TUNING_PATH: &str = "assets/tuning.ron";

/// Error type for tuning loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Validation error: {0}")]
    Invalid(String),
}

/// The player ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: i32,
    pub max_speed: f32,
    /// Acceleration per second as a multiple of max_speed
    pub acceleration_gain: f32,
    pub friction: f32,
    pub sprite_size: f32,
    pub collider_size: f32,
    pub weapon_cooldown: f64,
    pub weapon_damage: i32,
    pub projectile_speed: f32,
    pub image: Option<String>,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_speed: 300.0,
            acceleration_gain: 10.0,
            friction: 0.1,
            sprite_size: 64.0,
            collider_size: 32.0,
            weapon_cooldown: 0.1,
            weapon_damage: 10,
            projectile_speed: 800.0,
            image: Some("images/whale_soldier.png".to_string()),
        }
    }
}

/// Player shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Distance ahead of the shooter where the shot appears
    pub muzzle_offset: f32,
    pub lifetime: f32,
    pub size: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            muzzle_offset: 20.0,
            lifetime: 2.0,
            size: 8.0,
        }
    }
}

/// Enemy behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Probability per tick of an idle wander nudge
    pub wander_chance: f32,
    /// Max speed change of a wander nudge (units/s, per axis, centred on 0)
    pub wander_impulse: f32,
    /// Velocity added toward the player each chase tick (units/s)
    pub chase_impulse: f32,
    /// Chase drops back to idle beyond detection_radius * this
    pub chase_exit_factor: f32,
    pub separation_radius: f32,
    pub separation_strength: f32,
    /// Ground units only shoot inside this range
    pub fire_range: f32,
    pub enemy_projectile_lifetime: f32,
    pub enemy_projectile_size: f32,
    pub muzzle_offset: f32,
    pub strafe_speed: f32,
    /// Air units beyond this range fly straight at the player
    pub strafe_engage_range: f32,
    /// Max heading change per tick (radians)
    pub strafe_turn_rate: f32,
    /// Total random spread of strafe fire (radians)
    pub strafe_spread: f32,
    pub strafe_muzzle_offset: f32,
    pub tracer_lifetime: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            wander_chance: 0.02,
            wander_impulse: 20.0,
            chase_impulse: 3.0,
            chase_exit_factor: 1.5,
            separation_radius: 50.0,
            separation_strength: 0.12,
            fire_range: 400.0,
            enemy_projectile_lifetime: 2.0,
            enemy_projectile_size: 6.0,
            muzzle_offset: 20.0,
            strafe_speed: 180.0,
            strafe_engage_range: 600.0,
            strafe_turn_rate: 0.02,
            strafe_spread: 0.2,
            strafe_muzzle_offset: 30.0,
            tracer_lifetime: 1.5,
        }
    }
}

/// One enemy archetype spawned by the wave spawner.
/// Ground and air share this shape but not defaults, so a section that is
/// present must be given in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub detection_radius: f32,
    pub friction: f32,
    pub score: u32,
    pub scale: f32,
    pub sprite_size: f32,
    pub collider_size: f32,
    pub layer: i32,
    pub weapon_cooldown: f64,
    pub weapon_damage: i32,
    pub projectile_speed: f32,
    pub image: Option<String>,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            detection_radius: 1000.0,
            friction: 0.05,
            score: 100,
            scale: 1.0,
            sprite_size: 64.0,
            collider_size: 48.0,
            layer: 5,
            weapon_cooldown: 2.0,
            weapon_damage: 10,
            projectile_speed: 300.0,
            image: Some("images/whale_soldier.png".to_string()),
        }
    }
}

impl EnemyTuning {
    /// Air unit defaults: far sight, no friction, quick weak gun
    pub fn air() -> Self {
        Self {
            detection_radius: 2000.0,
            friction: 0.0,
            score: 300,
            scale: 1.5,
            sprite_size: 64.0,
            collider_size: 48.0,
            layer: 15,
            weapon_cooldown: 0.15,
            weapon_damage: 5,
            projectile_speed: 600.0,
            image: Some("images/airplane.png".to_string()),
        }
    }
}

/// Wave composition and placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub base_enemies: u32,
    pub enemies_per_wave: u32,
    /// First wave that includes air units
    pub air_start_wave: u32,
    /// Ground ring radius as a fraction of the larger arena side
    pub ground_radius_factor: f32,
    pub air_radius_factor: f32,
    /// Angular offset of the air ring (radians)
    pub air_phase_offset: f32,
    /// Seconds before an empty arena may trigger the next wave
    pub settle_delay: f32,
    pub ground: EnemyTuning,
    pub air: EnemyTuning,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_enemies: 3,
            enemies_per_wave: 2,
            air_start_wave: 2,
            ground_radius_factor: 0.6,
            air_radius_factor: 0.8,
            air_phase_offset: std::f32::consts::FRAC_PI_4,
            settle_delay: 1.0,
            ground: EnemyTuning::default(),
            air: EnemyTuning::air(),
        }
    }
}

/// Hit resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Health removed from the player per enemy projectile
    pub enemy_projectile_damage: i32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            enemy_projectile_damage: 10,
        }
    }
}

/// Screen shake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Shake lost per second
    pub shake_decay: f32,
    pub max_shake: f32,
    /// Pixels of offset per unit of shake
    pub offset_scale: f32,
    /// Shake added per tick while the trigger is held
    pub fire_shake: f32,
    /// Shake added when the player takes a hit
    pub hit_shake: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            shake_decay: 5.0,
            max_shake: 2.0,
            offset_scale: 10.0,
            fire_shake: 0.05,
            hit_shake: 0.5,
        }
    }
}

/// All gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation step in seconds
    pub fixed_step: f64,
    /// RNG seed; None seeds from entropy
    pub seed: Option<u64>,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub ai: AiTuning,
    pub waves: WaveTuning,
    pub combat: CombatTuning,
    pub camera: CameraTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_step: 1.0 / 60.0,
            seed: None,
            player: PlayerTuning::default(),
            projectile: ProjectileTuning::default(),
            ai: AiTuning::default(),
            waves: WaveTuning::default(),
            combat: CombatTuning::default(),
            camera: CameraTuning::default(),
        }
    }
}

fn require(ok: bool, what: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(what.to_string()))
    }
}

fn is_positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn is_friction(v: f32) -> bool {
    (0.0..1.0).contains(&v)
}

fn validate_enemy(enemy: &EnemyTuning, name: &str) -> Result<(), ConfigError> {
    require(is_positive(enemy.detection_radius), &format!("{name}.detection_radius must be > 0"))?;
    require(is_friction(enemy.friction), &format!("{name}.friction must be in [0, 1)"))?;
    require(is_positive(enemy.scale), &format!("{name}.scale must be > 0"))?;
    require(is_positive(enemy.sprite_size), &format!("{name}.sprite_size must be > 0"))?;
    require(is_positive(enemy.collider_size), &format!("{name}.collider_size must be > 0"))?;
    require(enemy.weapon_cooldown >= 0.0, &format!("{name}.weapon_cooldown must be >= 0"))?;
    require(is_positive(enemy.projectile_speed), &format!("{name}.projectile_speed must be > 0"))
}

impl Tuning {
    /// Parse tuning from RON text and validate it.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = ron::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Reject values that would stall or destabilise the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require(
            self.fixed_step.is_finite() && self.fixed_step > 0.0,
            "fixed_step must be > 0",
        )?;

        let p = &self.player;
        require(p.max_health > 0, "player.max_health must be > 0")?;
        require(is_positive(p.max_speed), "player.max_speed must be > 0")?;
        require(is_positive(p.acceleration_gain), "player.acceleration_gain must be > 0")?;
        require(is_friction(p.friction), "player.friction must be in [0, 1)")?;
        require(is_positive(p.sprite_size), "player.sprite_size must be > 0")?;
        require(is_positive(p.collider_size), "player.collider_size must be > 0")?;
        require(p.weapon_cooldown >= 0.0, "player.weapon_cooldown must be >= 0")?;
        require(is_positive(p.projectile_speed), "player.projectile_speed must be > 0")?;

        require(is_positive(self.projectile.lifetime), "projectile.lifetime must be > 0")?;
        require(is_positive(self.projectile.size), "projectile.size must be > 0")?;

        let ai = &self.ai;
        require((0.0..=1.0).contains(&ai.wander_chance), "ai.wander_chance must be in [0, 1]")?;
        require(ai.chase_exit_factor >= 1.0, "ai.chase_exit_factor must be >= 1")?;
        require(is_positive(ai.strafe_speed), "ai.strafe_speed must be > 0")?;
        require(is_positive(ai.strafe_turn_rate), "ai.strafe_turn_rate must be > 0")?;
        require(is_positive(ai.enemy_projectile_lifetime), "ai.enemy_projectile_lifetime must be > 0")?;
        require(is_positive(ai.tracer_lifetime), "ai.tracer_lifetime must be > 0")?;

        let w = &self.waves;
        require(w.settle_delay >= 0.0, "waves.settle_delay must be >= 0")?;
        require(is_positive(w.ground_radius_factor), "waves.ground_radius_factor must be > 0")?;
        require(is_positive(w.air_radius_factor), "waves.air_radius_factor must be > 0")?;
        validate_enemy(&w.ground, "waves.ground")?;
        validate_enemy(&w.air, "waves.air")?;

        require(self.combat.enemy_projectile_damage >= 0, "combat.enemy_projectile_damage must be >= 0")?;

        let c = &self.camera;
        require(c.shake_decay >= 0.0, "camera.shake_decay must be >= 0")?;
        require(c.max_shake >= 0.0, "camera.max_shake must be >= 0")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player.max_speed, 300.0);
        assert_eq!(tuning.waves.air.score, 300);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tuning = Tuning::from_ron_str("(seed: Some(7), player: (max_speed: 360.0))").unwrap();
        assert_eq!(tuning.seed, Some(7));
        assert_eq!(tuning.player.max_speed, 360.0);
        assert_eq!(tuning.player.max_health, 100);
        assert_eq!(tuning.waves.air.detection_radius, 2000.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_ron_str("(fixed_step: 0.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Tuning::from_ron_str("(player: (friction: 1.5))").unwrap_err();
        assert!(err.to_string().contains("player.friction"));
    }

    #[test]
    fn test_enemy_section_must_be_complete() {
        let err = Tuning::from_ron_str("(waves: (air: (score: 500)))").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_error_reported() {
        let err = Tuning::from_ron_str("(player: (max_speed: \"fast\"))").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(combat: (enemy_projectile_damage: 25))").unwrap();

        let tuning = Tuning::load(file.path()).unwrap();
        assert_eq!(tuning.combat.enemy_projectile_damage, 25);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Tuning::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_shipped_tuning_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_TUNING_PATH);
        let tuning = Tuning::load(&path).unwrap();
        assert_eq!(tuning.player.max_speed, 300.0);
        assert_eq!(tuning.waves.air, EnemyTuning::air());
    }

    #[test]
    fn test_round_trip_through_ron() {
        let tuning = Tuning::default();
        let text = ron::ser::to_string_pretty(&tuning, ron::ser::PrettyConfig::new()).unwrap();
        assert_eq!(Tuning::from_ron_str(&text).unwrap(), tuning);
    }
}
