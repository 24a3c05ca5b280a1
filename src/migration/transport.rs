//! Message-passing abstraction used by the ring protocol.
//!
//! A [`Transport`] is one rank's endpoint in a fixed communicator of
//! `size` ranks. Point-to-point calls block until the substrate has taken
//! (or delivered) the message; collective calls must be made by every rank
//! in the same order.

use super::error::TransportError;

/// Message kind, used to detect protocol desynchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// A migration record.
    Migrate,
    /// A contribution to a reduction.
    Reduce,
    /// A value broadcast from the root.
    Broadcast,
    /// Barrier arrival or release.
    Barrier,
}

/// One rank's endpoint of a message-passing communicator.
///
/// Implementors provide point-to-point [`send`](Transport::send) /
/// [`recv`](Transport::recv). The collectives
/// [`barrier`](Transport::barrier), [`reduce_min`](Transport::reduce_min) and
/// [`broadcast`](Transport::broadcast) have default implementations on top
/// of point-to-point messaging and may be overridden by substrates with
/// native collectives.
pub trait Transport {
    /// This endpoint's rank, in `0..size()`.
    fn rank(&self) -> usize;

    /// Number of ranks in the communicator.
    fn size(&self) -> usize;

    /// Sends `payload` to rank `dest`.
    fn send(&self, dest: usize, tag: Tag, payload: &[i32]) -> Result<(), TransportError>;

    /// Receives the next message from rank `source`.
    ///
    /// Fails if that message carries a different tag or is not exactly
    /// `len` values long.
    fn recv(&self, source: usize, tag: Tag, len: usize) -> Result<Vec<i32>, TransportError>;

    /// Blocks until every rank has entered the barrier.
    ///
    /// Rank 0 collects one arrival from every peer, then releases them all.
    /// A rank that has left the communicator makes the barrier fail with
    /// [`TransportError::Disconnected`] instead of blocking forever.
    fn barrier(&self) -> Result<(), TransportError> {
        const COORDINATOR: usize = 0;
        if self.rank() != COORDINATOR {
            self.send(COORDINATOR, Tag::Barrier, &[])?;
            self.recv(COORDINATOR, Tag::Barrier, 0)?;
            return Ok(());
        }
        let peers = (0..self.size()).filter(|&r| r != COORDINATOR);
        for peer in peers.clone() {
            self.recv(peer, Tag::Barrier, 0)?;
        }
        for peer in peers {
            self.send(peer, Tag::Barrier, &[])?;
        }
        Ok(())
    }

    /// Minimum of `value` over all ranks, delivered to `root` only.
    ///
    /// Returns `Some(min)` on the root and `None` everywhere else.
    fn reduce_min(&self, value: i32, root: usize) -> Result<Option<i32>, TransportError> {
        if self.rank() != root {
            self.send(root, Tag::Reduce, &[value])?;
            return Ok(None);
        }
        let mut min = value;
        for peer in (0..self.size()).filter(|&r| r != root) {
            let contribution = self.recv(peer, Tag::Reduce, 1)?;
            min = min.min(contribution[0]);
        }
        Ok(Some(min))
    }

    /// Distributes the root's `value` to every rank.
    ///
    /// Non-root ranks ignore their own `value` and return the root's.
    fn broadcast(&self, value: i32, root: usize) -> Result<i32, TransportError> {
        if self.rank() == root {
            for peer in (0..self.size()).filter(|&r| r != root) {
                self.send(peer, Tag::Broadcast, &[value])?;
            }
            Ok(value)
        } else {
            Ok(self.recv(root, Tag::Broadcast, 1)?[0])
        }
    }

    /// Next rank in the ring.
    fn successor(&self) -> usize {
        (self.rank() + 1) % self.size()
    }

    /// Previous rank in the ring.
    fn predecessor(&self) -> usize {
        (self.rank() + self.size() - 1) % self.size()
    }
}
