//! Shared-memory island model.
//!
//! [`IslandModel`] owns every island in one process. Each generation runs
//! all islands as independent tasks (on the rayon pool with the `parallel`
//! feature) and joins on all of them before migrating or reporting, so no
//! island starts generation `g + 1` before every island finished `g`.

use super::config::IslandModelConfig;
use crate::ga::{Individual, Island};
use crate::migration::migrate_ring;
use crate::model::ProblemData;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress snapshot taken at a report generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation after which the snapshot was taken.
    pub generation: usize,

    /// Lowest fitness across all islands.
    pub best_fitness: u32,

    /// Mean of the islands' average fitness.
    pub average_fitness: f64,
}

/// Result of an island-model run.
#[derive(Debug, Clone)]
pub struct IslandModelResult {
    /// The best individual across all islands at the end of the run.
    pub best: Individual,

    /// Fitness of `best`.
    pub best_fitness: u32,

    /// Number of generations every island completed.
    pub generations: usize,

    /// Whether the run stopped because a report found a conflict-free
    /// timetable.
    ///
    /// A perfect timetable reached after the last report does not set this,
    /// matching the stop vote of the message-passing runner.
    pub found_perfect: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// One entry per report generation.
    pub fitness_history: Vec<GenerationStats>,
}

/// All islands of a run, evolved in lock-step in one address space.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_timetable::ga::IslandConfig;
/// use u_timetable::model::ProblemData;
/// use u_timetable::runner::{IslandModel, IslandModelConfig};
///
/// let data = Arc::new(ProblemData::generate_random(10, 4, 6, 4, 42));
/// let config = IslandModelConfig::default()
///     .with_num_islands(2)
///     .with_max_generations(20)
///     .with_migration_interval(5)
///     .with_report_interval(5)
///     .with_island(IslandConfig::default().with_population_size(20));
///
/// let result = IslandModel::new(data, config).run();
/// assert!(result.generations <= 20);
/// ```
pub struct IslandModel {
    islands: Vec<Island>,
    config: IslandModelConfig,
}

impl IslandModel {
    /// Creates every island with its own seed.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`IslandModelConfig::validate`] first to get a descriptive error).
    pub fn new(data: Arc<ProblemData>, config: IslandModelConfig) -> Self {
        config.validate().expect("invalid IslandModelConfig");
        let islands = (0..config.num_islands)
            .map(|rank| Island::new(Arc::clone(&data), config.island_config(rank)))
            .collect();
        Self { islands, config }
    }

    /// The islands, indexed by rank.
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// The run configuration.
    pub fn config(&self) -> &IslandModelConfig {
        &self.config
    }

    /// Runs one generation on every island and waits for all of them.
    pub fn evolve_all(&mut self) {
        #[cfg(feature = "parallel")]
        self.islands.par_iter_mut().for_each(Island::evolve);

        #[cfg(not(feature = "parallel"))]
        self.islands.iter_mut().for_each(Island::evolve);
    }

    /// Ring migration over all islands. See [`migrate_ring`].
    pub fn migrate(&mut self) -> Vec<bool> {
        migrate_ring(&mut self.islands)
    }

    /// The best individual across all islands; the lowest rank wins ties.
    pub fn global_best(&self) -> &Individual {
        self.islands
            .iter()
            .map(Island::best)
            .min_by_key(|ind| ind.fitness())
            .expect("island model must have at least one island")
    }

    /// Mean of the islands' average fitness.
    pub fn global_average(&self) -> f64 {
        let total: f64 = self.islands.iter().map(Island::average_fitness).sum();
        total / self.islands.len() as f64
    }

    /// Runs until a perfect timetable is reported or the generation limit.
    pub fn run(&mut self) -> IslandModelResult {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked between generations only; a generation in
    /// progress always completes on every island.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> IslandModelResult {
        let mut fitness_history = Vec::new();
        let mut generations = 0usize;
        let mut cancelled = false;
        let mut found_perfect = false;

        for gen in 0..self.config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            self.evolve_all();
            generations = gen + 1;

            if self.config.is_migration_generation(gen) {
                self.migrate();
            }

            if self.config.is_report_generation(gen) {
                let stats = GenerationStats {
                    generation: gen,
                    best_fitness: self.global_best().fitness(),
                    average_fitness: self.global_average(),
                };
                log::info!(
                    "gen {:4} | global best={:3} | global avg={:6.2}",
                    stats.generation,
                    stats.best_fitness,
                    stats.average_fitness
                );
                fitness_history.push(stats);
                found_perfect = stats.best_fitness == 0;
                if found_perfect {
                    break;
                }
            }
        }

        let best = self.global_best().clone();
        let best_fitness = best.fitness();
        log::info!(
            "island model finished after {} generations, best fitness {}",
            generations,
            best_fitness
        );

        IslandModelResult {
            found_perfect,
            best_fitness,
            best,
            generations,
            cancelled,
            fitness_history,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::IslandConfig;
    use crate::model::{Room, SchoolClass};

    fn small_config() -> IslandModelConfig {
        IslandModelConfig::default()
            .with_num_islands(3)
            .with_max_generations(60)
            .with_migration_interval(10)
            .with_report_interval(10)
            .with_island(
                IslandConfig::default()
                    .with_population_size(30)
                    .with_elite_count(3),
            )
    }

    #[test]
    fn test_islands_get_distinct_seeds() {
        let data = Arc::new(ProblemData::generate_random(20, 5, 6, 4, 42));
        let model = IslandModel::new(data, small_config());
        let seeds: Vec<u64> = model.islands().iter().map(|i| i.config().seed).collect();
        assert_eq!(seeds, vec![12345, 13345, 14345]);
    }

    #[test]
    fn test_evolve_all_advances_every_island() {
        let data = Arc::new(ProblemData::generate_random(20, 5, 6, 4, 42));
        let mut model = IslandModel::new(data, small_config());
        model.evolve_all();
        model.evolve_all();
        for island in model.islands() {
            assert_eq!(island.generation(), 2);
        }
    }

    #[test]
    fn test_global_best_is_minimum() {
        let data = Arc::new(ProblemData::generate_random(20, 5, 6, 4, 42));
        let model = IslandModel::new(data, small_config());
        let min = model.islands().iter().map(|i| i.best().fitness()).min().unwrap();
        assert_eq!(model.global_best().fitness(), min);
    }

    #[test]
    fn test_run_improves_and_reports() {
        let data = Arc::new(ProblemData::generate_random(40, 8, 10, 6, 42));
        let mut model = IslandModel::new(data, small_config());
        let initial = model.global_best().fitness();

        let result = model.run();

        assert!(result.best_fitness <= initial);
        assert_eq!(result.best_fitness, result.best.fitness());
        assert!(!result.cancelled);
        assert!(!result.fitness_history.is_empty());
        assert_eq!(result.fitness_history[0].generation, 0);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1].best_fitness <= window[0].best_fitness,
                "global best should never get worse with elitism"
            );
        }
        if !result.found_perfect {
            assert_eq!(result.generations, 60);
        }
    }

    #[test]
    fn test_stops_at_first_report_when_trivially_perfect() {
        let data = Arc::new(ProblemData::new(
            vec![SchoolClass::new(0, "Math", 0, 0, 10)],
            vec![Room::new(0, 20)],
            1,
            1,
        ));
        let mut model = IslandModel::new(data, small_config());
        let result = model.run();

        assert!(result.found_perfect);
        assert_eq!(result.generations, 1);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_found_perfect_follows_report() {
        let config = IslandModelConfig::default()
            .with_num_islands(2)
            .with_max_generations(9)
            .with_migration_interval(3)
            .with_report_interval(100)
            .with_island(
                IslandConfig::default()
                    .with_population_size(20)
                    .with_elite_count(2),
            );

        for seed in 0..10 {
            let data = Arc::new(ProblemData::generate_random(6, 3, 4, 3, seed));
            let result = IslandModel::new(data, config.clone()).run();

            let last_report = result.fitness_history.last().map(|s| s.best_fitness);
            assert_eq!(result.fitness_history.len(), 1, "seed={seed}");
            assert_eq!(result.found_perfect, last_report == Some(0), "seed={seed}");
            if result.found_perfect {
                assert_eq!(result.generations, 1, "seed={seed}");
            } else {
                assert_eq!(result.generations, 9, "seed={seed}");
            }
        }
    }

    #[test]
    fn test_cancellation() {
        let data = Arc::new(ProblemData::generate_random(40, 8, 10, 6, 42));
        let mut model = IslandModel::new(data, small_config());

        // Set before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = model.run_with_cancel(Some(cancel));

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.fitness_history.is_empty());
    }

    #[test]
    fn test_reproducible() {
        let data = Arc::new(ProblemData::generate_random(30, 6, 8, 5, 7));
        let a = IslandModel::new(data.clone(), small_config()).run();
        let b = IslandModel::new(data, small_config()).run();
        assert_eq!(a.best.genes(), b.best.genes());
        assert_eq!(a.fitness_history, b.fitness_history);
    }
}
