//! Message-passing island model, one rank per island.
//!
//! [`run_rank`] is the loop each rank executes against its own
//! [`Transport`] endpoint. Ranks stay in lock-step: every generation ends
//! with a barrier, so no rank starts generation `g + 1` before every rank
//! has finished generation `g` and its migration and stop vote.

use super::config::IslandModelConfig;
use crate::ga::{Individual, Island};
use crate::migration::{exchange_best, vote_stop, ChannelTransport, MigrationError, Transport};
use crate::model::ProblemData;
use std::sync::Arc;
use std::thread;

/// What one rank reports after its loop ends.
#[derive(Debug, Clone)]
pub struct RankReport {
    /// The reporting rank.
    pub rank: usize,

    /// Best individual of this rank's island.
    pub best: Individual,

    /// Number of generations this rank completed.
    pub generations: usize,

    /// Lowest fitness across all ranks at the last stop vote.
    ///
    /// Only the root learns it; `None` on other ranks.
    pub global_best_fitness: Option<u32>,

    /// Whether the ranks agreed a perfect timetable was found.
    pub found_perfect: bool,
}

/// Runs one rank of a distributed island model.
///
/// Every rank of the communicator must call this with the same problem data
/// and configuration. A transport or wire failure aborts the run and is
/// returned as is; there is no retry.
///
/// # Panics
/// Panics if the configuration is invalid or the communicator size differs
/// from `config.num_islands`.
pub fn run_rank<T>(
    transport: &T,
    data: Arc<ProblemData>,
    config: &IslandModelConfig,
) -> Result<RankReport, MigrationError>
where
    T: Transport + ?Sized,
{
    config.validate().expect("invalid IslandModelConfig");
    assert_eq!(
        transport.size(),
        config.num_islands,
        "communicator size must equal num_islands"
    );

    let rank = transport.rank();
    let mut island = Island::new(data, config.island_config(rank));
    let mut generations = 0usize;
    let mut global_best_fitness = None;
    let mut found_perfect = false;

    for gen in 0..config.max_generations {
        island.evolve();
        generations = gen + 1;

        if config.is_migration_generation(gen) {
            exchange_best(transport, &mut island)?;
        }

        if config.is_report_generation(gen) {
            let vote = vote_stop(transport, island.best().fitness())?;
            if let Some(global) = vote.global_best {
                global_best_fitness = Some(global);
                log::info!(
                    "gen {:4} | rank {}: best={:3} avg={:6.2} | global best={:3}",
                    gen,
                    rank,
                    island.best().fitness(),
                    island.average_fitness(),
                    global
                );
            }
            found_perfect = vote.stop;
        }

        transport.barrier()?;
        if found_perfect {
            break;
        }
    }

    transport.barrier()?;
    log::debug!("rank {} finished after {} generations", rank, generations);

    Ok(RankReport {
        rank,
        best: island.best().clone(),
        generations,
        global_best_fitness,
        found_perfect,
    })
}

/// Runs every rank on its own thread over an in-process [`ChannelTransport`].
///
/// Reports are returned in rank order. The first rank error encountered (in
/// rank order) is returned.
pub fn run_local_ranks(
    data: Arc<ProblemData>,
    config: &IslandModelConfig,
) -> Result<Vec<RankReport>, MigrationError> {
    config.validate().expect("invalid IslandModelConfig");
    let mesh = ChannelTransport::mesh(config.num_islands);

    thread::scope(|scope| {
        let handles: Vec<_> = mesh
            .into_iter()
            .map(|transport| {
                let data = Arc::clone(&data);
                scope.spawn(move || run_rank(&transport, data, config))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::IslandConfig;
    use crate::model::{Room, SchoolClass};
    use crate::runner::IslandModel;

    fn small_config(num_islands: usize) -> IslandModelConfig {
        IslandModelConfig::default()
            .with_num_islands(num_islands)
            .with_max_generations(40)
            .with_migration_interval(5)
            .with_report_interval(10)
            .with_island(
                IslandConfig::default()
                    .with_population_size(20)
                    .with_elite_count(2),
            )
    }

    #[test]
    fn test_reports_in_rank_order() {
        let data = Arc::new(ProblemData::generate_random(20, 5, 6, 4, 42));
        let reports = run_local_ranks(data, &small_config(3)).unwrap();
        assert_eq!(reports.len(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.rank, i);
            assert_eq!(report.generations, reports[0].generations);
        }
    }

    #[test]
    fn test_only_root_learns_global_best() {
        let data = Arc::new(ProblemData::generate_random(20, 5, 6, 4, 42));
        let reports = run_local_ranks(data, &small_config(3)).unwrap();

        let min = reports.iter().map(|r| r.best.fitness()).min().unwrap();
        assert!(reports[0].global_best_fitness.is_some());
        assert!(reports[0].global_best_fitness.unwrap() >= min);
        assert!(reports[1..].iter().all(|r| r.global_best_fitness.is_none()));
    }

    #[test]
    fn test_matches_shared_memory_run() {
        let data = Arc::new(ProblemData::generate_random(40, 8, 10, 6, 42));
        for n in [1, 2, 3, 4] {
            let config = small_config(n);
            let reports = run_local_ranks(data.clone(), &config).unwrap();

            let mut model = IslandModel::new(data.clone(), config);
            let result = model.run();

            for report in &reports {
                assert_eq!(report.generations, result.generations, "n={n}");
                assert_eq!(
                    report.best.genes(),
                    model.islands()[report.rank].best().genes(),
                    "n={n}, rank={}",
                    report.rank
                );
            }
            for report in &reports {
                assert_eq!(report.found_perfect, result.found_perfect, "n={n}");
            }
        }
    }

    #[test]
    fn test_all_ranks_stop_on_perfect() {
        let data = Arc::new(ProblemData::new(
            vec![SchoolClass::new(0, "Math", 0, 0, 10)],
            vec![Room::new(0, 20)],
            1,
            1,
        ));
        let reports = run_local_ranks(data, &small_config(4)).unwrap();
        for report in &reports {
            assert!(report.found_perfect);
            assert_eq!(report.generations, 1);
            assert!(report.best.is_perfect());
        }
        assert_eq!(reports[0].global_best_fitness, Some(0));
    }

    #[test]
    fn test_matches_shared_memory_between_reports() {
        let config = small_config(2)
            .with_max_generations(9)
            .with_migration_interval(3)
            .with_report_interval(100);
        for seed in 0..10 {
            let data = Arc::new(ProblemData::generate_random(6, 3, 4, 3, seed));
            let reports = run_local_ranks(data.clone(), &config).unwrap();
            let result = IslandModel::new(data, config.clone()).run();

            for report in &reports {
                assert_eq!(report.found_perfect, result.found_perfect, "seed={seed}");
                assert_eq!(report.generations, result.generations, "seed={seed}");
            }
        }
    }

    #[test]
    fn test_dropped_rank_fails_instead_of_hanging() {
        let data = Arc::new(ProblemData::generate_random(10, 3, 4, 3, 1));
        let mut mesh = ChannelTransport::mesh(2);
        drop(mesh.pop());

        let err = run_rank(&mesh[0], data, &small_config(2)).unwrap_err();
        assert_eq!(
            err,
            MigrationError::Transport(crate::migration::TransportError::Disconnected { peer: 1 })
        );
    }

    #[test]
    #[should_panic(expected = "communicator size must equal num_islands")]
    fn test_size_mismatch_panics() {
        let data = Arc::new(ProblemData::generate_random(5, 2, 2, 2, 1));
        let mesh = ChannelTransport::mesh(1);
        let _ = run_rank(&mesh[0], data, &small_config(2));
    }
}
