//! Problem data for weekly class timetabling.
//!
//! Everything here is read-only once constructed. A single [`ProblemData`]
//! is built before any island exists and shared by `Arc` across every
//! individual and island for the whole run.
//!
//! # Key Types
//!
//! - [`TimeSlot`]: A (day, hour) cell of the fixed 5 × 8 weekly grid
//! - [`SchoolClass`]: A class to schedule (teacher, student group, size)
//! - [`Room`]: A room with a seating capacity
//! - [`ProblemData`]: The complete problem instance

mod problem;

pub use problem::{ProblemData, Room, SchoolClass, TimeSlot, DAYS_PER_WEEK, HOURS_PER_DAY};
