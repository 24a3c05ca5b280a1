//! A single evolving population.
//!
//! An [`Island`] owns its population and its random stream outright. All
//! mutation goes through `&mut self`, so a generation step always runs to
//! completion before any accessor or migration call can observe the
//! population.

use super::config::IslandConfig;
use super::individual::Individual;
use super::selection::tournament;
use crate::model::ProblemData;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// One island of the island model.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_timetable::ga::{Island, IslandConfig};
/// use u_timetable::model::ProblemData;
///
/// let data = Arc::new(ProblemData::generate_random(10, 4, 5, 3, 42));
/// let mut island = Island::new(data, IslandConfig::default().with_population_size(20));
/// island.evolve();
/// assert_eq!(island.population().len(), 20);
/// ```
pub struct Island {
    population: Vec<Individual>,
    data: Arc<ProblemData>,
    config: IslandConfig,
    rng: StdRng,
    generation: usize,
}

impl Island {
    /// Creates an island with a random, fully evaluated population.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`IslandConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(data: Arc<ProblemData>, config: IslandConfig) -> Self {
        config.validate().expect("invalid IslandConfig");

        let mut rng = StdRng::seed_from_u64(config.seed);
        let population = (0..config.population_size)
            .map(|_| Individual::random(&data, &mut rng))
            .collect();

        let island = Self {
            population,
            data,
            config,
            rng,
            generation: 0,
        };
        island.evaluate();
        island
    }

    /// Advances the population by one generation.
    ///
    /// Sorts by fitness (stable), carries the elites over unchanged, fills
    /// the rest with mutated offspring of tournament-selected parents, then
    /// evaluates the new population.
    pub fn evolve(&mut self) {
        self.population.sort_by_key(Individual::fitness);

        let size = self.config.population_size;
        let mut next_gen: Vec<Individual> = Vec::with_capacity(size);
        next_gen.extend_from_slice(&self.population[..self.config.elite_count]);

        while next_gen.len() < size {
            let p1 = tournament(&self.population, self.config.tournament_size, &mut self.rng);
            let p2 = tournament(&self.population, self.config.tournament_size, &mut self.rng);

            let mut child = if self.rng.random_range(0.0..1.0) < self.config.crossover_rate {
                self.population[p1].crossover(&self.population[p2], &mut self.rng)
            } else {
                self.population[p1].clone()
            };

            child.mutate(self.config.mutation_rate, &mut self.rng);
            next_gen.push(child);
        }

        self.population = next_gen;
        self.evaluate();
        self.generation += 1;

        log::trace!(
            "island seed={} gen={} best={} avg={:.2}",
            self.config.seed,
            self.generation,
            self.best().fitness(),
            self.average_fitness()
        );
    }

    /// The individual with the lowest fitness; the earliest one on ties.
    pub fn best(&self) -> &Individual {
        self.population
            .iter()
            .min_by_key(|ind| ind.fitness())
            .expect("population must not be empty")
    }

    /// The individual with the highest fitness; the earliest one on ties.
    pub fn worst(&self) -> &Individual {
        &self.population[self.worst_index()]
    }

    /// Offers an immigrant to this island.
    ///
    /// The immigrant replaces the current worst individual if its fitness is
    /// strictly lower; otherwise it is dropped. Returns whether it was kept.
    ///
    /// # Panics
    /// Panics if the immigrant was built for a problem of a different size.
    pub fn receive_immigrant(&mut self, immigrant: Individual) -> bool {
        assert_eq!(
            immigrant.genes().len(),
            self.data.num_classes(),
            "immigrant gene count must equal class count"
        );
        let worst_idx = self.worst_index();
        if immigrant.fitness() < self.population[worst_idx].fitness() {
            self.population[worst_idx] = immigrant;
            true
        } else {
            false
        }
    }

    /// Arithmetic mean of the population's fitness (0.0 if empty).
    pub fn average_fitness(&self) -> f64 {
        if self.population.is_empty() {
            return 0.0;
        }
        let total: u64 = self.population.iter().map(|ind| ind.fitness() as u64).sum();
        total as f64 / self.population.len() as f64
    }

    /// Whether the best individual is a conflict-free timetable.
    pub fn has_perfect_solution(&self) -> bool {
        self.best().is_perfect()
    }

    /// The current population, in its current order.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// The shared problem data.
    pub fn data(&self) -> &Arc<ProblemData> {
        &self.data
    }

    /// The island's configuration.
    pub fn config(&self) -> &IslandConfig {
        &self.config
    }

    /// Number of completed [`evolve`](Self::evolve) calls.
    pub fn generation(&self) -> usize {
        self.generation
    }

    fn evaluate(&self) {
        for ind in &self.population {
            ind.fitness();
        }
    }

    /// Linear scan for the first maximal fitness.
    fn worst_index(&self) -> usize {
        let mut worst_idx = 0;
        let mut worst_fitness = self.population[0].fitness();
        for (i, ind) in self.population.iter().enumerate().skip(1) {
            if ind.fitness() > worst_fitness {
                worst_fitness = ind.fitness();
                worst_idx = i;
            }
        }
        worst_idx
    }
}

// ============================================================================
// Tests
// ============================================================================
