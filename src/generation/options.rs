use serde::{Deserialize, Serialize};

use crate::error::FlamegenError;
use crate::model::Ifs;

/// Which mutation stages run and how hard they push, plus the genome the
/// batch starts from. Each stage toggle is independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub batch_size: usize,
    pub mutate_iterators: bool,
    pub mutate_parameters: bool,
    pub mutate_connections: bool,
    pub mutate_connection_weights: bool,
    pub mutate_palette: bool,
    pub mutate_coloring: bool,
    /// Per-target probability that a stage touches a given value, in [0, 1].
    pub mutation_chance: f64,
    /// Perturbation magnitude; angle parameters scale this by 360.
    pub mutation_strength: f64,
    pub base_params: Option<Ifs>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            batch_size: 30,
            mutate_iterators: true,
            mutate_parameters: true,
            mutate_connections: true,
            mutate_connection_weights: true,
            mutate_palette: true,
            mutate_coloring: true,
            mutation_chance: 0.5,
            mutation_strength: 1.0,
            base_params: None,
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self) -> Result<(), FlamegenError> {
        if self.batch_size < 1 {
            return Err(FlamegenError::Configuration(
                "Batch size must be at least 1".to_string(),
            ));
        }
        if self.mutation_chance.is_nan()
            || self.mutation_chance < 0.0
            || self.mutation_chance > 1.0
        {
            return Err(FlamegenError::Configuration(
                "Mutation chance must be between 0 and 1".to_string(),
            ));
        }
        if self.mutation_strength.is_nan() || self.mutation_strength < 0.0 {
            return Err(FlamegenError::Configuration(
                "Mutation strength must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
