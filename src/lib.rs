//! Island-model genetic algorithm for weekly class timetabling.
//!
//! Searches for a timetable in which no teacher, student group or room is
//! booked twice in the same hour and every class fits its room. Several
//! islands evolve independent populations and periodically pass their best
//! timetable to the next island in a ring.
//!
//! - **Model**: Read-only problem data on a fixed 5-day × 8-hour grid.
//! - **GA**: Timetable individuals, their violation count, one-point
//!   crossover, per-gene mutation, and the island generation step.
//! - **Migration**: The ring exchange over a pluggable message-passing
//!   transport or directly in shared memory, plus the fixed integer record
//!   used on the wire.
//! - **Runner**: Lock-step loops that tie islands, migration and stop
//!   votes together for either substrate.
//!
//! # Architecture
//!
//! Problem data is built once and shared by `Arc`. Each island owns its
//! population and random stream; islands never touch each other's state,
//! and everything that crosses between islands is an independent copy.
//! Reporting, rendering and process topology belong to the caller.

pub mod ga;
pub mod migration;
pub mod model;
pub mod runner;
