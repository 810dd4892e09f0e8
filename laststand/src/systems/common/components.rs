use bevy_ecs::{component::Component, entity::Entity, resource::Resource};
use glam::Vec2;
use laststand_common::WeaponKind;
use rand::{rngs::SmallRng, SeedableRng};
use smallvec::SmallVec;
use strum_macros::Display;

use crate::constants::{self, FIXED_DT};

/// Tags the single player-controlled chef.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    pub fn overlaps(&self, a: Vec2, other: &Collider, b: Vec2) -> bool {
        a.distance(b) < self.radius + other.radius
    }
}

/// Live stats of the player. Upgrades modify these in place.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub defense: f32,
    pub damage_multiplier: f32,
}

/// Seconds of contact-damage immunity left.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Invulnerable(pub f32);

impl Invulnerable {
    pub fn active(&self) -> bool {
        self.0 > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum EnemyKind {
    Normal,
    Hungry,
    Karen,
    Influencer,
    FoodCritic,
    Boss,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub xp: u32,
}

impl Enemy {
    /// Dead enemies linger until their despawn command is applied.
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Movement slowdown; re-applying replaces the previous one.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Slowed {
    pub factor: f32,
    pub remaining: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct XpGem {
    pub value: u32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub velocity: Vec2,
    pub damage: f32,
    /// Further enemies this projectile may pass through; it is spent once this drops below zero.
    pub pierce: i32,
    pub remaining_range: f32,
    pub hits: SmallVec<[Entity; 4]>,
}

/// A lingering zone that damages (and optionally slows) enemies inside it on a fixed beat.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AreaEffect {
    pub radius: f32,
    pub damage: f32,
    pub slow: Option<f32>,
    pub remaining: f32,
    pub tick_timer: f32,
}

/// An equipped weapon. `slot` preserves acquisition order for saves.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub slot: u8,
    pub level: u32,
    /// Unscaled damage; the player's multiplier is applied per hit.
    pub damage: f32,
    pub cooldown_remaining: f32,
}

impl Weapon {
    pub fn new(kind: WeaponKind, slot: u8) -> Self {
        Self {
            kind,
            slot,
            level: 1,
            damage: constants::weapon_stats(kind).damage,
            cooldown_remaining: 0.0,
        }
    }

    /// A weapon restored at `level` carries the damage it had when saved.
    pub fn at_level(kind: WeaponKind, slot: u8, level: u32) -> Self {
        let mut weapon = Self::new(kind, slot);
        for _ in 1..level.max(1) {
            weapon.level_up();
        }
        weapon
    }

    /// Hamburgers gain a flat bonus; everything else gains half its base damage.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.damage += match self.kind {
            WeaponKind::Hamburger => constants::weapon::HAMBURGER_UPGRADE_DAMAGE,
            kind => constants::weapon_stats(kind).damage * constants::weapon::LEVEL_DAMAGE_BONUS,
        };
    }
}

/// Orbit state of an ice cream scoop, plus per-enemy hit cooldowns.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct Orbital {
    pub angle: f32,
    pub recent_hits: SmallVec<[(Entity, f32); 8]>,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime {
    /// Floating-point delta time in seconds
    pub seconds: f32,
}

impl Default for DeltaTime {
    fn default() -> Self {
        Self { seconds: FIXED_DT }
    }
}

/// Desired movement direction for this tick. Need not be normalized.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput(pub Vec2);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KillCount(pub u32);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub level: u32,
    pub current: u32,
    pub required: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            level: 1,
            current: 0,
            required: constants::required_xp(1),
        }
    }
}

/// Seeded source of all simulation randomness, so a run is reproducible from its seed.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
