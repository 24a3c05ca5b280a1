//! Migration error types.

use super::transport::Tag;
use thiserror::Error;

/// A migration record that cannot be decoded for the local problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Record length does not match `1 + 4 * num_classes`.
    #[error("record has {found} values, expected {expected}")]
    Length {
        /// Length implied by the local class count.
        expected: usize,
        /// Length received.
        found: usize,
    },

    /// Gene slot does not encode the class at its position.
    #[error("gene {index} carries class id {found}")]
    ClassMismatch {
        /// Gene position.
        index: usize,
        /// Class id found on the wire.
        found: i32,
    },

    /// Day outside the weekly grid.
    #[error("gene {index} has day {value} outside the week")]
    DayOutOfRange {
        /// Gene position.
        index: usize,
        /// Day found on the wire.
        value: i32,
    },

    /// Hour outside the teaching day.
    #[error("gene {index} has hour {value} outside the teaching day")]
    HourOutOfRange {
        /// Gene position.
        index: usize,
        /// Hour found on the wire.
        value: i32,
    },

    /// Room id not present in the local problem.
    #[error("gene {index} references room {value}, problem has {rooms} rooms")]
    RoomOutOfRange {
        /// Gene position.
        index: usize,
        /// Room id found on the wire.
        value: i32,
        /// Number of rooms in the local problem.
        rooms: usize,
    },
}

/// Failure of the underlying message-passing substrate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The peer endpoint is gone.
    #[error("rank {peer} disconnected")]
    Disconnected {
        /// Rank of the unreachable peer.
        peer: usize,
    },

    /// Addressed a rank outside the communicator.
    #[error("rank {rank} outside communicator of size {size}")]
    InvalidRank {
        /// Rank addressed.
        rank: usize,
        /// Communicator size.
        size: usize,
    },

    /// The next message from a peer carries a different tag.
    #[error("expected {expected:?} from rank {peer}, got {found:?}")]
    UnexpectedTag {
        /// Sending rank.
        peer: usize,
        /// Tag the receiver waited for.
        expected: Tag,
        /// Tag that arrived.
        found: Tag,
    },

    /// The message has a different length than agreed.
    #[error("expected {expected} values from rank {peer}, got {found}")]
    LengthMismatch {
        /// Sending rank.
        peer: usize,
        /// Agreed length.
        expected: usize,
        /// Length received.
        found: usize,
    },
}

/// Any failure during a migration or termination step.
///
/// None of these are retried; the run that hits one is over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    /// Sending or receiving failed.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A received record could not be decoded.
    #[error("malformed migration record: {0}")]
    Malformed(#[from] WireError),
}
