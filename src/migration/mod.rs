//! Cross-island migration.
//!
//! Islands form a ring and periodically pass a copy of their best
//! individual to their successor. The protocol runs either over an injected
//! message-passing [`Transport`] (one rank per island, possibly across
//! processes) or directly on a slice of islands in shared memory.
//!
//! # Key Types
//!
//! - [`Transport`]: Point-to-point send/receive, min-reduction, broadcast, barrier
//! - [`ChannelTransport`]: In-process transport over bounded channels
//! - [`wire`]: Fixed-schema integer record for one individual
//! - [`exchange_best`] / [`migrate_ring`]: The ring step for each substrate
//! - [`vote_stop`]: Collective "perfect solution found" decision

mod channel;
mod error;
mod ring;
mod transport;
pub mod wire;

pub use channel::ChannelTransport;
pub use error::{MigrationError, TransportError, WireError};
pub use ring::{exchange_best, migrate_ring, vote_stop, StopVote, ROOT};
pub use transport::{Tag, Transport};
