//! Tracks tabletop role-playing game sessions, the players attending them
//! and what everyone brought along.
#![warn(missing_debug_implementations, rust_2018_idioms)]

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

#[macro_use]
mod macros;

pub mod config;
pub mod db;
pub mod errors;
pub mod frontend;
pub mod participations;
pub mod players;
pub mod seed;
pub mod server;
pub mod sessions;
pub mod telemetry;
pub mod validation;
