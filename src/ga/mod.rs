//! Genetic algorithm for timetables.
//!
//! Candidate timetables ([`Individual`]) are evolved inside islands
//! ([`Island`]) by tournament selection, one-point crossover, per-gene
//! mutation and elitism. Each island owns its population and its own
//! seeded random stream, so islands are reproducible and independent.
//!
//! # Key Types
//!
//! - [`Gene`]: One class assigned to a time slot and a room
//! - [`Individual`]: A full timetable with cached violation count
//! - [`Island`]: A population plus its generation step
//! - [`IslandConfig`]: Island parameters (population size, rates, elites, seed)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Whitley, Rana & Heckendorn (1999), "The Island Model Genetic Algorithm"

mod config;
mod individual;
mod island;
mod selection;

pub use config::IslandConfig;
pub use individual::{Gene, Individual};
pub use island::Island;
pub use selection::tournament;
