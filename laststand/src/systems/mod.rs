//! The Entity-Component-System (ECS) module.
//!
//! Components, resources and the systems that make up one simulation tick.

pub mod combat;
pub mod common;
pub mod enemy;
pub mod experience;
pub mod player;
pub mod spawn;
pub mod state;
pub mod weapon;

pub use self::combat::*;
pub use self::common::*;
pub use self::enemy::*;
pub use self::experience::*;
pub use self::player::*;
pub use self::spawn::*;
pub use self::state::*;
pub use self::weapon::*;
