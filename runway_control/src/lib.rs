pub mod admission;
pub mod aircraft;
pub mod controller;
pub mod error;
pub mod events;
pub mod rules;
pub mod runway;
pub mod schedule;
pub mod simulation;
pub mod state;
