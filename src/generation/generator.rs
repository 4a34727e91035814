use log::debug;
use rand::Rng;
use std::sync::Arc;

use crate::error::{FlamegenError, Result};
use crate::model::{Ifs, IteratorNode, ShadingMode, Transform};

use super::options::GeneratorOptions;
use super::palette::{palette_from_ramp, RampParams};

/// Transform names favored when synthesizing new iterators; drawing from
/// this set keeps generated genomes visually coherent.
const PREFERRED_TRANSFORM_NAMES: [&str; 5] =
    ["Affine", "Möbius", "Rotate Euler", "Spherical", "Translate"];

/// Substrings marking a parameter as angular (degrees), matched
/// case-insensitively against the parameter name.
const ANGLE_PARAM_MARKERS: [&str; 7] = [
    "angle",
    "rot",
    "rotate",
    "rotation",
    "orientation",
    "inclination",
    "azimuth",
];

/// Minimum number of iterators a structurally mutated genome keeps.
const MIN_ITERATORS: usize = 4;

/// The mutation engine: deep-clones a base genome and runs an ordered
/// pipeline of independently toggleable mutation stages over the clone.
///
/// All randomness flows through the injected [`rand::Rng`]; seed a `StdRng`
/// for deterministic output. The generator holds no mutable state, so a
/// shared `&Generator` can serve many callers as long as each brings its own
/// rng.
pub struct Generator {
    transforms: Vec<Arc<Transform>>,
}

impl Generator {
    /// New generator drawing candidates from the given transform list.
    pub fn new(transforms: impl IntoIterator<Item = Arc<Transform>>) -> Self {
        Self {
            transforms: transforms.into_iter().collect(),
        }
    }

    pub fn transforms(&self) -> &[Arc<Transform>] {
        &self.transforms
    }

    /// Produces one mutated genome from a fresh clone of the base genome.
    /// `options.base_params` is never touched.
    pub fn generate_one<R: Rng>(&self, options: &GeneratorOptions, rng: &mut R) -> Result<Ifs> {
        let base = self.validate(options)?;
        Ok(self.mutate_genome(base, options, rng))
    }

    /// Lazy sequence of exactly `options.batch_size` genomes, each produced
    /// on demand by a fresh [`generate_one`](Self::generate_one)-equivalent
    /// run. Options are validated up front so the returned iterator itself
    /// cannot fail; dropping it early is all the cancellation there is.
    pub fn generate_batch<'a, R: Rng>(
        &'a self,
        options: &'a GeneratorOptions,
        rng: &'a mut R,
    ) -> Result<impl Iterator<Item = Ifs> + 'a> {
        let base = self.validate(options)?;
        let mut remaining = options.batch_size;
        Ok(std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            Some(self.mutate_genome(base, options, &mut *rng))
        }))
    }

    fn validate<'a>(&self, options: &'a GeneratorOptions) -> Result<&'a Ifs> {
        options.validate()?;
        let base = options
            .base_params
            .as_ref()
            .ok_or(FlamegenError::MissingBaseGenome)?;
        if options.mutate_iterators && self.transforms.is_empty() {
            return Err(FlamegenError::EmptyTransformCatalog);
        }
        Ok(base)
    }

    fn mutate_genome<R: Rng>(&self, base: &Ifs, options: &GeneratorOptions, rng: &mut R) -> Ifs {
        let mut genome = base.clone();
        if options.mutate_iterators {
            self.mutate_structure(&mut genome, options, rng);
        }
        if options.mutate_parameters {
            for it in genome.iterators_mut() {
                mutate_iterator_params(it, options, rng);
            }
        }
        if options.mutate_connections {
            mutate_connections(&mut genome, options, rng);
        }
        if options.mutate_connection_weights {
            mutate_connection_weights(&mut genome, options, rng);
        }
        if options.mutate_palette {
            genome.palette = palette_from_ramp(&RampParams::random(rng));
        }
        if options.mutate_coloring {
            for it in genome.iterators_mut() {
                it.color_index =
                    mutate_value(it.color_index, options.mutation_chance, options.mutation_strength, rng)
                        .clamp(0.0, 1.0);
                it.color_speed =
                    mutate_value(it.color_speed, options.mutation_chance, options.mutation_strength, rng);
            }
        }
        debug!("generated genome with {} iterators", genome.iterators().len());
        genome
    }

    /// Structural stage: fill up to the minimum iterator count, then with
    /// the configured chance grow by one and, if above the floor, shrink by
    /// one.
    fn mutate_structure<R: Rng>(&self, genome: &mut Ifs, options: &GeneratorOptions, rng: &mut R) {
        let preferred: Vec<Arc<Transform>> = self
            .transforms
            .iter()
            .filter(|t| PREFERRED_TRANSFORM_NAMES.contains(&t.name.as_str()))
            .cloned()
            .collect();
        // A catalog carrying none of the foundational names falls back to
        // the full candidate list.
        let preferred: &[Arc<Transform>] = if preferred.is_empty() {
            &self.transforms
        } else {
            &preferred
        };

        while genome.iterators().len() < MIN_ITERATORS {
            let node = synthesize_iterator(preferred, options, rng);
            genome.add_iterator(node, true);
        }
        if options.mutation_chance > rng.gen::<f64>() {
            // 50% chance the extra iterator comes from the preferred set.
            let pool = if rng.gen::<f64>() < 0.5 {
                &self.transforms[..]
            } else {
                preferred
            };
            let node = synthesize_iterator(pool, options, rng);
            genome.add_iterator(node, true);
        }
        if genome.iterators().len() > MIN_ITERATORS && options.mutation_chance > rng.gen::<f64>() {
            let idx = rng.gen_range(0..genome.iterators().len());
            let id = genome.iterators()[idx].id();
            genome.remove_iterator(id);
        }
    }
}

/// Builds a new iterator from a uniformly picked transform, with randomized
/// weights and color state, then perturbs its parameters so fresh iterators
/// start away from the schema defaults.
fn synthesize_iterator<R: Rng>(
    pool: &[Arc<Transform>],
    options: &GeneratorOptions,
    rng: &mut R,
) -> IteratorNode {
    let transform = Arc::clone(&pool[rng.gen_range(0..pool.len())]);
    let mut node = IteratorNode::new(transform);
    node.base_weight = 0.5 + rng.gen::<f64>();
    node.start_weight = 1.0;
    node.color_index = rng.gen::<f64>();
    node.color_speed = 0.25 + 0.5 * rng.gen::<f64>();
    node.opacity = if rng.gen_range(0..3) == 0 {
        0.0
    } else {
        rng.gen::<f64>()
    };
    node.shading_mode = if rng.gen_range(0..10) == 0 {
        ShadingMode::DeltaPSpeed
    } else {
        ShadingMode::Default
    };

    // Shape transforms render as solid silhouettes, not colored
    // accumulation.
    if node.transform.is_shape() {
        node.opacity = 0.0;
        node.add = 1.0;
        node.color_speed = 0.0;
    }

    mutate_iterator_params(&mut node, options, rng);
    node
}

/// Parameter stage: per-parameter perturbation, applied independently to
/// every scalar and to each component of every vector. Angle-named
/// parameters scale the strength by 360.
fn mutate_iterator_params<R: Rng>(
    node: &mut IteratorNode,
    options: &GeneratorOptions,
    rng: &mut R,
) {
    let chance = options.mutation_chance;
    for (name, value) in node.real_params.iter_mut() {
        let strength = options.mutation_strength * angle_scale(name);
        *value = mutate_value(*value, chance, strength, rng);
    }
    for (name, value) in node.vec3_params.iter_mut() {
        let strength = options.mutation_strength * angle_scale(name);
        for component in value.iter_mut() {
            *component = mutate_value(*component, chance, strength, rng);
        }
    }
}

/// Topology stage: one toggle decision per ordered pair, self-pairs
/// included, at O(n²) per call. Absent entries are materialized as explicit
/// 0 first; a toggle flips 0 <-> 1 with half the configured chance. Each
/// `from` row is resolved once so the pass stays at its nominal cost.
fn mutate_connections<R: Rng>(genome: &mut Ifs, options: &GeneratorOptions, rng: &mut R) {
    let ids = genome.iterator_ids();
    for it in genome.iterators_mut() {
        for &to in &ids {
            let weight = it.weight_to.entry(to).or_insert(0.0);
            if options.mutation_chance * 0.5 > rng.gen::<f64>() {
                *weight = if *weight > 0.0 { 0.0 } else { 1.0 };
            }
        }
    }
}

/// Weight stage: perturbs live edges only, floor-clamped at 0. Edges at 0
/// stay 0; resurrecting them is the topology stage's job. No upper bound is
/// enforced, so weights can drift upward across repeated generations.
fn mutate_connection_weights<R: Rng>(genome: &mut Ifs, options: &GeneratorOptions, rng: &mut R) {
    for it in genome.iterators_mut() {
        for weight in it.weight_to.values_mut() {
            if *weight == 0.0 {
                continue;
            }
            *weight =
                mutate_value(*weight, options.mutation_chance, options.mutation_strength, rng)
                    .max(0.0);
        }
    }
}

/// Shared perturbation primitive: with probability `chance`, add a uniform
/// offset in [-strength, +strength); otherwise return the value untouched.
fn mutate_value<R: Rng>(value: f64, chance: f64, strength: f64, rng: &mut R) -> f64 {
    if chance > rng.gen::<f64>() {
        value - strength + 2.0 * strength * rng.gen::<f64>()
    } else {
        value
    }
}

fn angle_scale(param_name: &str) -> f64 {
    if is_angle_parameter(param_name) {
        360.0
    } else {
        1.0
    }
}

/// Case-insensitive: a name equal to "r", or containing any of the angle
/// markers, is treated as degrees.
fn is_angle_parameter(param_name: &str) -> bool {
    let lc = param_name.to_lowercase();
    lc == "r" || ANGLE_PARAM_MARKERS.iter().any(|marker| lc.contains(marker))
}
