//! Island-model execution loops.
//!
//! Two ways to run the same lock-step schedule (evolve every island,
//! migrate on the configured cadence, report and vote on stopping):
//!
//! - [`IslandModel`]: all islands in one process, generation tasks joined
//!   on the rayon pool, migration through in-memory copies.
//! - [`run_rank`]: one island per rank over an injected
//!   [`Transport`](crate::migration::Transport), migration through wire
//!   records, stop decided by a min-reduction and a broadcast.
//!   [`run_local_ranks`] drives it with one thread per rank.
//!
//! With the same configuration both produce the same islands.

mod config;
mod distributed;
mod shared;

pub use config::IslandModelConfig;
pub use distributed::{run_local_ranks, run_rank, RankReport};
pub use shared::{GenerationStats, IslandModel, IslandModelResult};
