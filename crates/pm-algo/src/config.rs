/// Tuning parameters for an [`Nsga2`](crate::Nsga2) run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Nsga2Config {
    /// Population size maintained at every generation (`init_pop_size`
    /// individuals survive truncation each generation).
    pub init_pop_size: usize,
    /// Per-component mutation probability applied each generation.
    pub p_mutation: f64,
    /// Number of generations to run.
    pub n_generations: usize,
    /// Whether population initialization and mutation are parallelized
    /// across individuals with rayon.
    pub parallel: bool,
    /// Seed for the top-level RNG stream. Per-individual RNGs are derived
    /// from this seed, so two runs with the same seed and `parallel`
    /// setting produce bit-identical results.
    pub seed: u64,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            init_pop_size: 50,
            p_mutation: 0.1,
            n_generations: 20,
            parallel: false,
            seed: 42,
        }
    }
}

impl Nsga2Config {
    pub fn builder() -> Nsga2ConfigBuilder {
        Nsga2ConfigBuilder::default()
    }
}

/// Builder for [`Nsga2Config`].
#[derive(Debug, Default)]
pub struct Nsga2ConfigBuilder {
    config: Option<Nsga2Config>,
}

impl Nsga2ConfigBuilder {
    fn base(&mut self) -> &mut Nsga2Config {
        self.config.get_or_insert_with(Nsga2Config::default)
    }

    pub fn init_pop_size(mut self, value: usize) -> Self {
        self.base().init_pop_size = value;
        self
    }

    pub fn p_mutation(mut self, value: f64) -> Self {
        self.base().p_mutation = value;
        self
    }

    pub fn n_generations(mut self, value: usize) -> Self {
        self.base().n_generations = value;
        self
    }

    pub fn parallel(mut self, value: bool) -> Self {
        self.base().parallel = value;
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.base().seed = value;
        self
    }

    pub fn build(mut self) -> Nsga2Config {
        self.base();
        self.config.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let cfg = Nsga2Config::builder().init_pop_size(10).n_generations(5).build();
        assert_eq!(cfg.init_pop_size, 10);
        assert_eq!(cfg.n_generations, 5);
        assert_eq!(cfg.p_mutation, Nsga2Config::default().p_mutation);
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = Nsga2Config::builder().seed(123).parallel(true).build();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Nsga2Config = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
