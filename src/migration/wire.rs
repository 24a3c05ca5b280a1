//! Fixed-schema integer record for moving one individual between ranks.
//!
//! Layout, with no length prefix (both ends know the class count):
//!
//! ```text
//! [ fitness, class_id_0, day_0, hour_0, room_id_0, class_id_1, day_1, ... ]
//! ```
//!
//! The fitness field is advisory. [`decode`] ignores it and recomputes the
//! fitness against the receiver's own problem data.

use super::error::WireError;
use crate::ga::{Gene, Individual};
use crate::model::{ProblemData, TimeSlot, DAYS_PER_WEEK, HOURS_PER_DAY};
use std::sync::Arc;

/// Values per gene in the record.
const GENE_WIDTH: usize = 4;

/// Record length for a problem with `num_classes` classes.
pub fn record_len(num_classes: usize) -> usize {
    1 + GENE_WIDTH * num_classes
}

/// Encodes an individual into a migration record.
pub fn encode(individual: &Individual) -> Vec<i32> {
    let genes = individual.genes();
    let mut record = Vec::with_capacity(record_len(genes.len()));
    record.push(individual.fitness() as i32);
    for gene in genes {
        let slot = gene.time_slot();
        record.extend_from_slice(&[
            gene.class_id() as i32,
            slot.day() as i32,
            slot.hour() as i32,
            gene.room_id() as i32,
        ]);
    }
    record
}

/// Decodes a migration record into a freshly evaluated individual.
///
/// Every field is range-checked against `data`; nothing out of range is
/// clamped or repaired.
pub fn decode(record: &[i32], data: &Arc<ProblemData>) -> Result<Individual, WireError> {
    let expected = record_len(data.num_classes());
    if record.len() != expected {
        return Err(WireError::Length {
            expected,
            found: record.len(),
        });
    }

    let genes = record[1..]
        .chunks_exact(GENE_WIDTH)
        .enumerate()
        .map(|(index, chunk)| decode_gene(index, chunk, data.num_rooms()))
        .collect::<Result<Vec<_>, _>>()?;

    let individual = Individual::from_genes(genes, Arc::clone(data));
    individual.fitness();
    Ok(individual)
}

fn decode_gene(index: usize, chunk: &[i32], num_rooms: usize) -> Result<Gene, WireError> {
    let (class_id, day, hour, room_id) = (chunk[0], chunk[1], chunk[2], chunk[3]);

    if usize::try_from(class_id).ok() != Some(index) {
        return Err(WireError::ClassMismatch {
            index,
            found: class_id,
        });
    }
    let day_idx = u8::try_from(day)
        .ok()
        .filter(|&d| d < DAYS_PER_WEEK)
        .ok_or(WireError::DayOutOfRange { index, value: day })?;
    let hour_idx = u8::try_from(hour)
        .ok()
        .filter(|&h| h < HOURS_PER_DAY)
        .ok_or(WireError::HourOutOfRange { index, value: hour })?;
    let room = usize::try_from(room_id)
        .ok()
        .filter(|&r| r < num_rooms)
        .ok_or(WireError::RoomOutOfRange {
            index,
            value: room_id,
            rooms: num_rooms,
        })?;

    Ok(Gene::new(index, TimeSlot::new(day_idx, hour_idx), room))
}
