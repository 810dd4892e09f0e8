use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A playable chef.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CharacterId {
    #[default]
    Rookie,
    GrillMaster,
    PastryChef,
    SushiChef,
    HeadChef,
    LineChef,
    SousChef,
    FryChef,
}

/// A kitchen appliance turned weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum WeaponKind {
    Hamburger,
    PizzaCutter,
    SodaFountain,
    CoffeeMachine,
    FryerOil,
    IceCreamScoop,
}
