//! A simple kiting bot used by the headless runner and the soak tests.

use bevy_ecs::query::With;
use glam::Vec2;

use crate::game::Game;
use crate::systems::{Enemy, Player, Position, Upgrade, XpGem};

/// Enemies closer than this push the bot away.
const DANGER_RADIUS: f32 = 180.0;

/// Picks a steering direction: flee nearby enemies, weighted by proximity, otherwise drift toward the nearest gem.
pub fn steer(game: &mut Game) -> Vec2 {
    let world = &mut game.world;
    let Ok(player) = world.query_filtered::<&Position, With<Player>>().single(world).map(|p| p.0) else {
        return Vec2::ZERO;
    };

    let threat: Vec2 = world
        .query::<(&Position, &Enemy)>()
        .iter(world)
        .filter_map(|(position, _)| {
            let away = player - position.0;
            let distance = away.length();
            (distance > f32::EPSILON && distance < DANGER_RADIUS).then(|| away / (distance * distance))
        })
        .sum();
    if threat != Vec2::ZERO {
        // Sidestep a little so the bot circles instead of backing into a wall of spawns.
        return (threat.normalize() + threat.perp().normalize() * 0.35).normalize_or_zero();
    }

    world
        .query_filtered::<&Position, With<XpGem>>()
        .iter(world)
        .map(|position| position.0 - player)
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .map_or(Vec2::ZERO, |to_gem| to_gem.normalize_or_zero())
}

/// Index of the preferred upgrade among `choices`: survivability first, then damage.
pub fn pick_upgrade(choices: &[Upgrade]) -> usize {
    const PRIORITY: [Upgrade; 6] = [
        Upgrade::MaxHealth,
        Upgrade::Defense,
        Upgrade::PizzaCutter,
        Upgrade::HamburgerDamage,
        Upgrade::CoffeeMachine,
        Upgrade::Speed,
    ];
    PRIORITY
        .iter()
        .find_map(|wanted| choices.iter().position(|choice| choice == wanted))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_upgrade_prefers_survivability() {
        assert_eq!(pick_upgrade(&[Upgrade::Speed, Upgrade::Defense, Upgrade::PizzaCutter]), 1);
        assert_eq!(pick_upgrade(&[Upgrade::Speed, Upgrade::CoffeeMachine, Upgrade::MaxHealth]), 2);
        assert_eq!(pick_upgrade(&[]), 0);
    }
}
