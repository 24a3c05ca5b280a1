//! In-process [`Transport`] over bounded channels.
//!
//! [`ChannelTransport::mesh`] wires `n` endpoints together, one channel per
//! ordered (sender, receiver) pair. Each endpoint is meant to be moved into
//! its own worker thread; dropping it hangs up on every peer.

use super::error::TransportError;
use super::transport::{Tag, Transport};
use std::sync::mpsc::{self, Receiver, SyncSender};

/// Messages a sender may have in flight to one peer before `send` blocks.
const CHANNEL_CAPACITY: usize = 1;

struct Envelope {
    tag: Tag,
    payload: Vec<i32>,
}

/// One rank's endpoint of an in-process communicator.
pub struct ChannelTransport {
    rank: usize,
    outboxes: Vec<SyncSender<Envelope>>,
    inboxes: Vec<Receiver<Envelope>>,
}

impl ChannelTransport {
    /// Creates a fully connected communicator of `size` ranks.
    ///
    /// The endpoint for rank `i` is at index `i`.
    ///
    /// # Panics
    /// Panics if `size` is 0.
    pub fn mesh(size: usize) -> Vec<Self> {
        assert!(size > 0, "communicator needs at least one rank");

        // outboxes[src][dst] feeds inboxes[dst][src]
        let mut outboxes: Vec<Vec<SyncSender<Envelope>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();
        let mut inboxes: Vec<Vec<Receiver<Envelope>>> = Vec::with_capacity(size);
        for _dst in 0..size {
            let mut inbox = Vec::with_capacity(size);
            for src_outboxes in outboxes.iter_mut() {
                let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);
                src_outboxes.push(tx);
                inbox.push(rx);
            }
            inboxes.push(inbox);
        }

        outboxes
            .into_iter()
            .zip(inboxes)
            .enumerate()
            .map(|(rank, (outboxes, inboxes))| Self {
                rank,
                outboxes,
                inboxes,
            })
            .collect()
    }

    fn check_rank(&self, rank: usize) -> Result<(), TransportError> {
        if rank < self.size() {
            Ok(())
        } else {
            Err(TransportError::InvalidRank {
                rank,
                size: self.size(),
            })
        }
    }
}

impl Transport for ChannelTransport {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.outboxes.len()
    }

    fn send(&self, dest: usize, tag: Tag, payload: &[i32]) -> Result<(), TransportError> {
        self.check_rank(dest)?;
        self.outboxes[dest]
            .send(Envelope {
                tag,
                payload: payload.to_vec(),
            })
            .map_err(|_| TransportError::Disconnected { peer: dest })
    }

    fn recv(&self, source: usize, tag: Tag, len: usize) -> Result<Vec<i32>, TransportError> {
        self.check_rank(source)?;
        let envelope = self.inboxes[source]
            .recv()
            .map_err(|_| TransportError::Disconnected { peer: source })?;

        if envelope.tag != tag {
            return Err(TransportError::UnexpectedTag {
                peer: source,
                expected: tag,
                found: envelope.tag,
            });
        }
        if envelope.payload.len() != len {
            return Err(TransportError::LengthMismatch {
                peer: source,
                expected: len,
                found: envelope.payload.len(),
            });
        }
        Ok(envelope.payload)
    }
}
