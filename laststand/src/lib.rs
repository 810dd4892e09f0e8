//! Headless simulation core and API client for Chef's Last Stand.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg_attr(coverage_nightly, coverage(off))]
pub mod app;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod error;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod events;

pub mod autopilot;
pub mod client;
pub mod constants;
pub mod game;
pub mod save;
pub mod systems;
