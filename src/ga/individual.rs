//! Candidate timetables and their genetic operators.
//!
//! An [`Individual`] holds exactly one [`Gene`] per class, and the gene at
//! index `i` always schedules class `i`. Crossover and mutation only replace
//! gene values, so every offspring is a well-formed timetable without repair.

use crate::model::{ProblemData, TimeSlot};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// One class assigned to a (time slot, room) pair.
///
/// Genes are values: operators build new genes rather than editing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gene {
    class_id: usize,
    time_slot: TimeSlot,
    room_id: usize,
}

impl Gene {
    /// Creates a gene.
    pub fn new(class_id: usize, time_slot: TimeSlot, room_id: usize) -> Self {
        Self {
            class_id,
            time_slot,
            room_id,
        }
    }

    /// The scheduled class.
    pub fn class_id(&self) -> usize {
        self.class_id
    }

    /// When the class takes place.
    pub fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    /// Where the class takes place.
    pub fn room_id(&self) -> usize {
        self.room_id
    }

    /// Same class and room, different time slot.
    pub fn with_time_slot(&self, time_slot: TimeSlot) -> Self {
        Self { time_slot, ..*self }
    }

    /// Same class and time slot, different room.
    pub fn with_room(&self, room_id: usize) -> Self {
        Self { room_id, ..*self }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C{} @ {} in R{}",
            self.class_id, self.time_slot, self.room_id
        )
    }
}

/// A complete candidate timetable.
///
/// Fitness is the number of constraint violations (lower is better, 0 is a
/// valid timetable). It is computed on first access and cached until a
/// mutation replaces a gene. Cloning copies the genes and the cached value;
/// the problem data is shared, never copied.
#[derive(Clone)]
pub struct Individual {
    genes: Vec<Gene>,
    data: Arc<ProblemData>,
    fitness: OnceLock<u32>,
}

impl Individual {
    /// Builds an individual from an explicit gene sequence.
    ///
    /// # Panics
    /// Panics if the sequence does not hold exactly one gene per class in
    /// class-id order, or references a room that does not exist.
    pub fn from_genes(genes: Vec<Gene>, data: Arc<ProblemData>) -> Self {
        assert_eq!(
            genes.len(),
            data.num_classes(),
            "gene count must equal class count"
        );
        for (i, gene) in genes.iter().enumerate() {
            assert_eq!(gene.class_id, i, "gene {i} encodes the wrong class");
            assert!(
                gene.room_id < data.num_rooms(),
                "gene {i} references unknown room {}",
                gene.room_id
            );
        }
        Self {
            genes,
            data,
            fitness: OnceLock::new(),
        }
    }

    /// Creates a random individual: every class gets a uniform random
    /// day, hour and room.
    pub fn random<R: Rng>(data: &Arc<ProblemData>, rng: &mut R) -> Self {
        let num_rooms = data.num_rooms();
        let genes = (0..data.num_classes())
            .map(|class_id| {
                let time_slot = TimeSlot::random(rng);
                Gene::new(class_id, time_slot, rng.random_range(0..num_rooms))
            })
            .collect();
        Self {
            genes,
            data: Arc::clone(data),
            fitness: OnceLock::new(),
        }
    }

    /// The gene sequence, indexed by class id.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// The problem this individual is a solution candidate for.
    pub fn data(&self) -> &Arc<ProblemData> {
        &self.data
    }

    /// Genes scheduled in the given grid cell, in class-id order.
    pub fn genes_at(&self, day: u8, hour: u8) -> impl Iterator<Item = &Gene> + '_ {
        self.genes
            .iter()
            .filter(move |g| g.time_slot.day() == day && g.time_slot.hour() == hour)
    }

    /// Returns the fitness, computing and caching it if needed.
    pub fn fitness(&self) -> u32 {
        *self.fitness.get_or_init(|| self.calculate_fitness())
    }

    /// Returns the cached fitness without computing it.
    pub fn cached_fitness(&self) -> Option<u32> {
        self.fitness.get().copied()
    }

    /// Whether this is a conflict-free timetable.
    pub fn is_perfect(&self) -> bool {
        self.fitness() == 0
    }

    /// Counts constraint violations from scratch.
    ///
    /// The sum of teacher, student-group and room clashes plus capacity
    /// violations. A clash is counted once for every gene whose teacher,
    /// group or room was already seen in the same absolute slot, so three
    /// classes sharing a slot and a teacher count as 2, not 3.
    pub fn calculate_fitness(&self) -> u32 {
        let teacher = count_clashes(&self.genes, |g| self.data.class(g.class_id).teacher_id);
        let group = count_clashes(&self.genes, |g| self.data.class(g.class_id).student_group);
        let room = count_clashes(&self.genes, |g| g.room_id);
        let capacity = self
            .genes
            .iter()
            .filter(|g| {
                self.data.class(g.class_id).required_capacity > self.data.room(g.room_id).capacity
            })
            .count() as u32;
        teacher + group + room + capacity
    }

    /// One-point crossover at a uniformly random point in `[0, n)`.
    pub fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        if self.genes.is_empty() {
            return self.crossover_at(other, 0);
        }
        let point = rng.random_range(0..self.genes.len());
        self.crossover_at(other, point)
    }

    /// One-point crossover at a fixed point.
    ///
    /// The child takes genes `[0, point)` from `self` and the rest from
    /// `other`. Its fitness starts uncomputed.
    ///
    /// # Panics
    /// Panics if the parents have different gene counts.
    pub fn crossover_at(&self, other: &Self, point: usize) -> Self {
        assert_eq!(
            self.genes.len(),
            other.genes.len(),
            "parents must have equal length"
        );
        let point = point.min(self.genes.len());
        let mut genes = Vec::with_capacity(self.genes.len());
        genes.extend_from_slice(&self.genes[..point]);
        genes.extend_from_slice(&other.genes[point..]);
        Self {
            genes,
            data: Arc::clone(&self.data),
            fitness: OnceLock::new(),
        }
    }

    /// Mutates each gene independently with probability `rate`.
    ///
    /// A mutated gene gets either a fresh random time slot or a fresh random
    /// room (even odds), never both. Returns the number of replaced genes.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) -> usize {
        let num_rooms = self.data.num_rooms();
        let mut replaced = 0;
        for gene in self.genes.iter_mut() {
            if rng.random_range(0.0..1.0) < rate {
                *gene = if rng.random_bool(0.5) {
                    gene.with_time_slot(TimeSlot::random(rng))
                } else {
                    gene.with_room(rng.random_range(0..num_rooms))
                };
                replaced += 1;
            }
        }
        if replaced > 0 {
            self.fitness.take();
        }
        replaced
    }
}

impl fmt::Debug for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Individual")
            .field("genes", &self.genes)
            .field("fitness", &self.cached_fitness())
            .finish()
    }
}

/// Counts, per absolute slot, genes whose key was already seen there.
fn count_clashes<F>(genes: &[Gene], key: F) -> u32
where
    F: Fn(&Gene) -> usize,
{
    let mut seen: Vec<HashSet<usize>> = vec![HashSet::new(); TimeSlot::count()];
    let mut clashes = 0;
    for gene in genes {
        if !seen[gene.time_slot.absolute_slot()].insert(key(gene)) {
            clashes += 1;
        }
    }
    clashes
}

// ============================================================================
// Tests
// ============================================================================
