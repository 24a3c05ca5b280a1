//! Island model configuration.

use crate::ga::IslandConfig;

/// Configuration for a complete island-model run.
///
/// The same configuration drives both the shared-memory
/// [`IslandModel`](super::IslandModel) and the per-rank
/// [`run_rank`](super::run_rank) loop, which therefore follow the same
/// migration and reporting cadence.
///
/// # Defaults
///
/// ```
/// use u_timetable::runner::IslandModelConfig;
///
/// let config = IslandModelConfig::default();
/// assert_eq!(config.num_islands, 4);
/// assert_eq!(config.migration_interval, 50);
/// assert_eq!(config.island_config(2).seed, 14345);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IslandModelConfig {
    /// Number of islands (ranks).
    pub num_islands: usize,

    /// Maximum number of generations per island.
    pub max_generations: usize,

    /// Generations between migrations.
    ///
    /// Migration follows generation `g` when `g > 0 && g % migration_interval == 0`.
    pub migration_interval: usize,

    /// Generations between progress reports and stop votes.
    ///
    /// A report follows generation `g` when `g % report_interval == 0`. The
    /// run can only stop on a perfect solution at a report generation.
    pub report_interval: usize,

    /// Seed of island 0.
    pub base_seed: u64,

    /// Seed increment between consecutive islands.
    pub seed_stride: u64,

    /// Parameters shared by every island. Its `seed` is overridden per island.
    pub island: IslandConfig,
}

impl Default for IslandModelConfig {
    fn default() -> Self {
        Self {
            num_islands: 4,
            max_generations: 1000,
            migration_interval: 50,
            report_interval: 50,
            base_seed: 12345,
            seed_stride: 1000,
            island: IslandConfig::default(),
        }
    }
}

impl IslandModelConfig {
    /// Sets the number of islands.
    pub fn with_num_islands(mut self, n: usize) -> Self {
        self.num_islands = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the migration interval.
    pub fn with_migration_interval(mut self, n: usize) -> Self {
        self.migration_interval = n;
        self
    }

    /// Sets the report interval.
    pub fn with_report_interval(mut self, n: usize) -> Self {
        self.report_interval = n;
        self
    }

    /// Sets the seed of island 0.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Sets the per-island parameters.
    pub fn with_island(mut self, island: IslandConfig) -> Self {
        self.island = island;
        self
    }

    /// Parameters for island `rank`, seeded `base_seed + rank * seed_stride`.
    pub fn island_config(&self, rank: usize) -> IslandConfig {
        let seed = self
            .base_seed
            .wrapping_add((rank as u64).wrapping_mul(self.seed_stride));
        self.island.clone().with_seed(seed)
    }

    /// Whether migration follows `generation`.
    pub fn is_migration_generation(&self, generation: usize) -> bool {
        generation > 0 && generation % self.migration_interval == 0
    }

    /// Whether a report and stop vote follow `generation`.
    pub fn is_report_generation(&self, generation: usize) -> bool {
        generation % self.report_interval == 0
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_islands == 0 {
            return Err("num_islands must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.migration_interval == 0 {
            return Err("migration_interval must be at least 1".into());
        }
        if self.report_interval == 0 {
            return Err("report_interval must be at least 1".into());
        }
        if self.seed_stride == 0 && self.num_islands > 1 {
            return Err("seed_stride must be non-zero for more than one island".into());
        }
        self.island.validate()
    }
}
