//! Tuning tables for the simulation: chefs, enemies, weapons and the XP curve.

use std::time::Duration;

use laststand_common::{CharacterId, WeaponKind};

use crate::systems::EnemyKind;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The fixed simulation step, in seconds.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Surviving this long wins the run.
pub const RUN_DURATION_SECS: f64 = 30.0 * 60.0;

pub const AUTOSAVE_INTERVAL_SECS: f64 = 30.0;

pub mod player {
    pub const COLLISION_RADIUS: f32 = 16.0;
    pub const INVULNERABILITY_SECS: f32 = 0.5;
}

pub mod enemy {
    pub const SPAWN_INTERVAL_SECS: f32 = 1.2;
    pub const MAX_ALIVE: usize = 300;
    pub const SPAWN_DISTANCE: f32 = 400.0;
    pub const BODY_RADIUS: f32 = 14.0;

    pub const HEALTH_SCALING: f32 = 1.08;
    pub const DAMAGE_SCALING: f32 = 1.05;
    pub const SPEED_SCALING: f32 = 1.03;
    pub const SPAWN_RATE_SCALING: f32 = 0.95;

    /// A boss arrives at every multiple of this many minutes.
    pub const BOSS_INTERVAL_MINUTES: u32 = 5;
}

pub mod xp {
    pub const LEVEL_UP_BASE: u32 = 10;
    pub const LEVEL_UP_MULTIPLIER: f64 = 1.2;
    pub const COLLECTION_RADIUS: f32 = 50.0;
}

pub mod weapon {
    pub const PROJECTILE_HIT_RADIUS: f32 = 10.0;
    pub const ORBITAL_HIT_RADIUS: f32 = 15.0;
    pub const AREA_TICK_SECS: f32 = 0.5;
    /// How long a slow lingers after the last soda tick.
    pub const SLOW_DURATION_SECS: f32 = 0.5;
    pub const FRYER_POOL_DISTANCE: f32 = 100.0;

    pub const HAMBURGER_UPGRADE_DAMAGE: f32 = 10.0;
    /// Leveling a weapon adds this fraction of its base damage.
    pub const LEVEL_DAMAGE_BONUS: f32 = 0.5;
}

pub mod upgrade {
    pub const SPEED_MULTIPLIER: f32 = 1.2;
    pub const MAX_HEALTH_BONUS: f32 = 20.0;
    pub const HEAL_AMOUNT: f32 = 20.0;
    pub const DEFENSE_BONUS: f32 = 5.0;
    pub const CHOICES: usize = 3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub xp: u32,
}

pub const fn enemy_stats(kind: EnemyKind) -> EnemyStats {
    let (health, speed, damage, xp) = match kind {
        EnemyKind::Normal => (30.0, 60.0, 12.0, 1),
        EnemyKind::Hungry => (25.0, 90.0, 10.0, 2),
        EnemyKind::Karen => (70.0, 50.0, 20.0, 5),
        EnemyKind::Influencer => (18.0, 100.0, 8.0, 3),
        EnemyKind::FoodCritic => (150.0, 40.0, 35.0, 10),
        EnemyKind::Boss => (1500.0, 70.0, 40.0, 100),
    };
    EnemyStats { health, speed, damage, xp }
}

/// How a weapon delivers its damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponPattern {
    /// Fires at the nearest enemy inside `range`.
    Projectile { speed: f32, range: f32, pierce: i32 },
    /// Hits everything around the player at once.
    Sweep { radius: f32 },
    /// Drops `count` lingering areas, evenly spaced `distance` away from the player.
    Zone {
        radius: f32,
        duration: f32,
        slow: Option<f32>,
        count: u32,
        distance: f32,
    },
    /// Circles the player continuously.
    Orbit { radius: f32, speed: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub damage: f32,
    pub cooldown: f32,
    pub pattern: WeaponPattern,
}

pub const fn weapon_stats(kind: WeaponKind) -> WeaponStats {
    match kind {
        WeaponKind::Hamburger => WeaponStats {
            damage: 10.0,
            cooldown: 1.5,
            pattern: WeaponPattern::Projectile {
                speed: 200.0,
                range: 250.0,
                pierce: 0,
            },
        },
        WeaponKind::PizzaCutter => WeaponStats {
            damage: 8.0,
            cooldown: 0.5,
            pattern: WeaponPattern::Sweep { radius: 80.0 },
        },
        WeaponKind::SodaFountain => WeaponStats {
            damage: 5.0,
            cooldown: 3.0,
            pattern: WeaponPattern::Zone {
                radius: 150.0,
                duration: 3.0,
                slow: Some(0.5),
                count: 1,
                distance: 0.0,
            },
        },
        WeaponKind::CoffeeMachine => WeaponStats {
            damage: 6.0,
            cooldown: 0.3,
            pattern: WeaponPattern::Projectile {
                speed: 300.0,
                range: 200.0,
                pierce: 0,
            },
        },
        WeaponKind::FryerOil => WeaponStats {
            damage: 15.0,
            cooldown: 5.0,
            pattern: WeaponPattern::Zone {
                radius: 60.0,
                duration: 5.0,
                slow: None,
                count: 3,
                distance: weapon::FRYER_POOL_DISTANCE,
            },
        },
        WeaponKind::IceCreamScoop => WeaponStats {
            damage: 12.0,
            cooldown: 2.0,
            pattern: WeaponPattern::Orbit {
                radius: 100.0,
                speed: 2.0,
            },
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    pub health: f32,
    pub speed: f32,
    pub damage_multiplier: f32,
    pub defense: f32,
    pub starting_weapon: WeaponKind,
}

pub const fn character_stats(character: CharacterId) -> CharacterStats {
    let (health, speed, damage_multiplier, defense, starting_weapon) = match character {
        CharacterId::Rookie => (100.0, 150.0, 1.0, 0.0, WeaponKind::Hamburger),
        CharacterId::GrillMaster => (120.0, 140.0, 1.2, 5.0, WeaponKind::Hamburger),
        CharacterId::PastryChef => (90.0, 160.0, 0.9, 0.0, WeaponKind::IceCreamScoop),
        CharacterId::SushiChef => (95.0, 170.0, 1.1, 0.0, WeaponKind::PizzaCutter),
        CharacterId::HeadChef => (130.0, 130.0, 1.15, 10.0, WeaponKind::Hamburger),
        CharacterId::LineChef => (110.0, 155.0, 1.05, 3.0, WeaponKind::CoffeeMachine),
        CharacterId::SousChef => (105.0, 145.0, 1.1, 5.0, WeaponKind::SodaFountain),
        CharacterId::FryChef => (115.0, 135.0, 1.25, 8.0, WeaponKind::FryerOil),
    };
    CharacterStats {
        health,
        speed,
        damage_multiplier,
        defense,
        starting_weapon,
    }
}

/// XP needed to advance past `level`: `floor(10 × 1.2^(level−1))`.
pub fn required_xp(level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    (f64::from(xp::LEVEL_UP_BASE) * xp::LEVEL_UP_MULTIPLIER.powi(exponent)).floor() as u32
}

/// Multiplier applied to a base stat after `minutes` of play.
pub fn scaling(factor: f32, minutes: f32) -> f32 {
    factor.powf(minutes)
}
