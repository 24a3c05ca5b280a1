//! Ring migration and the stop vote.
//!
//! Island `r` sends a copy of its best individual to island `(r + 1) mod n`
//! and receives one from island `(r - 1 + n) mod n`. Two substrates realize
//! the same snapshot-then-deliver step:
//!
//! - [`exchange_best`]: one call per rank over a [`Transport`]. Even ranks
//!   send before receiving, odd ranks receive before sending, so a ring of
//!   blocking sends cannot deadlock.
//! - [`migrate_ring`]: all islands in one address space. Every snapshot is
//!   taken before any island is modified.
//!
//! Given identical island states both produce identical accept/reject
//! outcomes.

use super::error::{MigrationError, TransportError};
use super::transport::{Tag, Transport};
use super::wire;
use crate::ga::{Individual, Island};

/// Rank that collects reductions and originates broadcasts.
pub const ROOT: usize = 0;

/// Exchanges best individuals with the ring neighbours over `transport`.
///
/// Must be called by every rank in the same round. Returns whether the
/// immigrant received from the predecessor was kept.
pub fn exchange_best<T>(transport: &T, island: &mut Island) -> Result<bool, MigrationError>
where
    T: Transport + ?Sized,
{
    let outgoing = wire::encode(island.best());
    let len = outgoing.len();
    let next = transport.successor();
    let prev = transport.predecessor();

    let incoming = if transport.rank() % 2 == 0 {
        transport.send(next, Tag::Migrate, &outgoing)?;
        transport.recv(prev, Tag::Migrate, len)?
    } else {
        let incoming = transport.recv(prev, Tag::Migrate, len)?;
        transport.send(next, Tag::Migrate, &outgoing)?;
        incoming
    };

    let immigrant = wire::decode(&incoming, island.data())?;
    let fitness = immigrant.fitness();
    let accepted = island.receive_immigrant(immigrant);
    log::debug!(
        "rank {} received immigrant from rank {} (fitness={}, accepted={})",
        transport.rank(),
        prev,
        fitness,
        accepted
    );
    Ok(accepted)
}

/// Ring migration between islands sharing one address space.
///
/// Entry `i` of the result tells whether island `(i + 1) mod n` kept the
/// migrant from island `i`.
pub fn migrate_ring(islands: &mut [Island]) -> Vec<bool> {
    let n = islands.len();
    let migrants: Vec<Individual> = islands.iter().map(|island| island.best().clone()).collect();

    migrants
        .into_iter()
        .enumerate()
        .map(|(source, migrant)| {
            let dest = (source + 1) % n;
            let fitness = migrant.fitness();
            let accepted = islands[dest].receive_immigrant(migrant);
            log::debug!(
                "island {} -> island {} (fitness={}, accepted={})",
                source,
                dest,
                fitness,
                accepted
            );
            accepted
        })
        .collect()
}

/// Outcome of a stop vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopVote {
    /// Lowest best fitness across all ranks; known on the root only.
    pub global_best: Option<u32>,
    /// Whether every rank must stop before the next generation.
    pub stop: bool,
}

/// Decides collectively whether a perfect timetable has been found.
///
/// Reduces `local_best` to its minimum on [`ROOT`], which raises the stop
/// flag if that minimum is 0 and broadcasts it. Must be called by every rank
/// in the same round.
pub fn vote_stop<T>(transport: &T, local_best: u32) -> Result<StopVote, TransportError>
where
    T: Transport + ?Sized,
{
    let global_best = transport
        .reduce_min(local_best as i32, ROOT)?
        .map(|min| min as u32);
    let flag = global_best.is_some_and(|min| min == 0);
    let stop = transport.broadcast(flag as i32, ROOT)? != 0;
    Ok(StopVote { global_best, stop })
}
