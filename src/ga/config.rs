//! Island configuration.
//!
//! [`IslandConfig`] holds the parameters that control one island's
//! evolutionary step.

/// Configuration for a single island.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::IslandConfig;
///
/// let config = IslandConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elite_count, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::IslandConfig;
///
/// let config = IslandConfig::default()
///     .with_population_size(200)
///     .with_elite_count(10)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IslandConfig {
    /// Number of individuals in the population.
    ///
    /// Kept constant by every island operation.
    pub population_size: usize,

    /// Per-gene probability of mutation (0.0–1.0).
    ///
    /// Each gene of every offspring is considered independently.
    pub mutation_rate: f64,

    /// Probability of recombining two parents (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Number of best individuals copied unchanged into the next generation.
    pub elite_count: usize,

    /// Number of individuals sampled (with replacement) per tournament.
    pub tournament_size: usize,

    /// Seed of the island's private random stream.
    pub seed: u64,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elite_count: 5,
            tournament_size: 5,
            seed: 12345,
        }
    }
}

impl IslandConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.elite_count >= self.population_size {
            return Err("elite_count must be smaller than population_size".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IslandConfig::default();
        assert_eq!(config.population_size, 100);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.seed, 12345);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = IslandConfig::default()
            .with_population_size(30)
            .with_mutation_rate(0.2)
            .with_crossover_rate(0.5)
            .with_elite_count(3)
            .with_tournament_size(2)
            .with_seed(9);

        assert_eq!(config.population_size, 30);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert!((config.crossover_rate - 0.5).abs() < 1e-10);
        assert_eq!(config.elite_count, 3);
        assert_eq!(config.tournament_size, 2);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_clamp_rates() {
        let config = IslandConfig::default()
            .with_mutation_rate(1.5)
            .with_crossover_rate(-0.5);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = IslandConfig::default()
            .with_population_size(1)
            .with_elite_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elites_fill_population() {
        let config = IslandConfig::default()
            .with_population_size(5)
            .with_elite_count(5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = IslandConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_raw_rate_out_of_range() {
        let config = IslandConfig {
            mutation_rate: 2.0,
            ..IslandConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
