pub mod bundles;
pub mod components;

pub use self::bundles::*;
pub use self::components::*;
