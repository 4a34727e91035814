use flamegen::error::FlamegenError;
use flamegen::generation::{Generator, GeneratorOptions};
use flamegen::model::{Ifs, IteratorNode, Transform, TransformRegistry, TransformTag};
use rand::rngs::StdRng;
use rand::SeedableRng;

const PREFERRED_NAMES: [&str; 5] =
    ["Affine", "Möbius", "Rotate Euler", "Spherical", "Translate"];

/// Generator backed by the built-in catalog.
fn builtin_generator() -> (TransformRegistry, Generator) {
    let registry = TransformRegistry::new();
    let generator = Generator::new(registry.all().iter().cloned());
    (registry, generator)
}

/// Base genome with two plainly connected iterators: Linear and Spherical.
fn base_two_iterators(registry: &TransformRegistry) -> Ifs {
    let mut base = Ifs::new();
    for name in ["Linear", "Spherical"] {
        let transform = registry.get(name).expect("builtin transform");
        base.add_iterator(IteratorNode::new(transform), true);
    }
    base
}

/// Options with every stage off; individual tests switch on what they probe.
fn quiet_options(base: Ifs) -> GeneratorOptions {
    GeneratorOptions {
        batch_size: 1,
        mutate_iterators: false,
        mutate_parameters: false,
        mutate_connections: false,
        mutate_connection_weights: false,
        mutate_palette: false,
        mutate_coloring: false,
        mutation_chance: 0.0,
        mutation_strength: 1.0,
        base_params: Some(base),
    }
}

#[test]
fn test_structural_mutation_keeps_minimum_iterators() {
    let (registry, generator) = builtin_generator();

    for seed in 0..25 {
        let mut options = quiet_options(base_two_iterators(&registry));
        options.mutate_iterators = true;
        options.mutation_chance = 0.7;

        let mut rng = StdRng::seed_from_u64(seed);
        let genome = generator.generate_one(&options, &mut rng).unwrap();
        assert!(
            genome.iterators().len() >= 4,
            "seed {}: got {} iterators",
            seed,
            genome.iterators().len()
        );
    }
}

#[test]
fn test_minimum_fill_scenario() {
    // Two iterators, structural mutation on, chance 0: only the fill loop
    // runs, drawing from the foundational whitelist.
    let (registry, generator) = builtin_generator();
    let mut options = quiet_options(base_two_iterators(&registry));
    options.mutate_iterators = true;

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let genome = generator.generate_one(&options, &mut rng).unwrap();

        assert_eq!(genome.iterators().len(), 4);
        assert_eq!(genome.iterators()[0].transform.name, "Linear");
        assert_eq!(genome.iterators()[1].transform.name, "Spherical");
        for synthesized in &genome.iterators()[2..] {
            assert!(
                PREFERRED_NAMES.contains(&synthesized.transform.name.as_str()),
                "seed {}: '{}' is not a foundational transform",
                seed,
                synthesized.transform.name
            );
        }
    }
}

#[test]
fn test_topology_mutation_yields_binary_weights() {
    let (registry, generator) = builtin_generator();
    let mut base = Ifs::new();
    for _ in 0..4 {
        let transform = registry.get("Linear").unwrap();
        base.add_iterator(IteratorNode::new(transform), true);
    }

    let mut options = quiet_options(base);
    options.mutate_connections = true;
    options.mutation_chance = 1.0;

    let mut rng = StdRng::seed_from_u64(9);
    let genome = generator.generate_one(&options, &mut rng).unwrap();

    let ids = genome.iterator_ids();
    for it in genome.iterators() {
        // Every ordered pair got an explicit entry, self-pair included.
        assert_eq!(it.weight_to.len(), ids.len());
        for &to in &ids {
            let w = genome.weight(it.id(), to);
            assert!(w == 0.0 || w == 1.0, "weight {} is not binary", w);
        }
    }
}

#[test]
fn test_weight_mutation_floors_at_zero() {
    let (registry, generator) = builtin_generator();
    let mut base = Ifs::new();
    for _ in 0..4 {
        let transform = registry.get("Spherical").unwrap();
        base.add_iterator(IteratorNode::new(transform), true);
    }
    let ids = base.iterator_ids();
    // One removed edge; weight mutation must never resurrect it.
    base.set_weight(ids[0], ids[1], 0.0);

    let mut options = quiet_options(base);
    options.mutate_connection_weights = true;
    options.mutation_chance = 1.0;
    options.mutation_strength = 50.0;

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let genome = generator.generate_one(&options, &mut rng).unwrap();

        for it in genome.iterators() {
            for (&to, &w) in &it.weight_to {
                assert!(w >= 0.0, "negative weight {} on edge to {:?}", w, to);
            }
        }
        assert_eq!(genome.weight(ids[0], ids[1]), 0.0);
    }
}

#[test]
fn test_palette_mutation_replaces_ramp() {
    let (registry, generator) = builtin_generator();
    let mut options = quiet_options(base_two_iterators(&registry));
    options.mutate_palette = true;

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let genome = generator.generate_one(&options, &mut rng).unwrap();

        assert_eq!(genome.palette.name, "Generated Palette");
        assert_eq!(genome.palette.len(), 10);
        for color in &genome.palette.colors {
            for &channel in color {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }
}

#[test]
fn test_coloring_mutation_clamps_index_but_not_speed() {
    let (registry, generator) = builtin_generator();
    let mut options = quiet_options(base_two_iterators(&registry));
    options.mutate_coloring = true;
    options.mutation_chance = 1.0;
    options.mutation_strength = 10.0;

    let mut speed_escaped = false;
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let genome = generator.generate_one(&options, &mut rng).unwrap();

        for it in genome.iterators() {
            assert!(
                (0.0..=1.0).contains(&it.color_index),
                "seed {}: color_index {} left [0, 1]",
                seed,
                it.color_index
            );
            if !(0.0..=1.0).contains(&it.color_speed) {
                speed_escaped = true;
            }
        }
    }
    assert!(
        speed_escaped,
        "color_speed never left [0, 1] despite strength 10"
    );
}

#[test]
fn test_angle_parameters_scale_perturbation() {
    let mut registry = TransformRegistry::empty();
    registry.register(
        Transform::new("Probe")
            .with_real_param("rotation", 0.0)
            .with_real_param("x", 0.0)
            .with_vec3_param("shift", [0.0, 0.0, 0.0]),
    );
    let generator = Generator::new(registry.all().iter().cloned());

    let mut base = Ifs::new();
    base.add_iterator(IteratorNode::new(registry.get("Probe").unwrap()), true);

    let mut options = quiet_options(base);
    options.mutate_parameters = true;
    options.mutation_chance = 1.0;
    options.mutation_strength = 0.5;

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let genome = generator.generate_one(&options, &mut rng).unwrap();
        let it = &genome.iterators()[0];

        let rotation = it.real_params["rotation"];
        assert!(
            rotation.abs() <= 180.0,
            "seed {}: rotation perturbed by {}",
            seed,
            rotation
        );
        let x = it.real_params["x"];
        assert!(x.abs() <= 0.5, "seed {}: x perturbed by {}", seed, x);
        for &component in &it.vec3_params["shift"] {
            assert!(component.abs() <= 0.5);
        }
    }
}

#[test]
fn test_batch_yields_exact_count() {
    let (registry, generator) = builtin_generator();
    let mut options = GeneratorOptions {
        batch_size: 5,
        base_params: Some(base_two_iterators(&registry)),
        ..GeneratorOptions::default()
    };
    options.mutation_chance = 0.5;

    let mut rng = StdRng::seed_from_u64(1);
    let genomes: Vec<Ifs> = generator.generate_batch(&options, &mut rng).unwrap().collect();
    assert_eq!(genomes.len(), 5);
}

#[test]
fn test_batch_genomes_are_independent() {
    let (registry, generator) = builtin_generator();
    let base = base_two_iterators(&registry);
    let options = GeneratorOptions {
        batch_size: 5,
        base_params: Some(base.clone()),
        ..GeneratorOptions::default()
    };

    let mut rng = StdRng::seed_from_u64(17);
    let mut genomes: Vec<Ifs> =
        generator.generate_batch(&options, &mut rng).unwrap().collect();

    let untouched = genomes[1].clone();
    let ids = genomes[0].iterator_ids();
    genomes[0].set_weight(ids[0], ids[1], 99.0);
    genomes[0].palette.colors.clear();
    genomes[0].fog_amount = 12.5;

    assert_eq!(genomes[1], untouched, "sibling genome was affected");
    assert_eq!(
        options.base_params.as_ref().unwrap(),
        &base,
        "base genome was mutated"
    );
}

#[test]
fn test_partial_batch_consumption() {
    let (registry, generator) = builtin_generator();
    let options = GeneratorOptions {
        batch_size: 50,
        base_params: Some(base_two_iterators(&registry)),
        ..GeneratorOptions::default()
    };

    // Stopping consumption early is the cancellation story; nothing else to
    // clean up.
    let mut rng = StdRng::seed_from_u64(2);
    let consumed: Vec<Ifs> = generator
        .generate_batch(&options, &mut rng)
        .unwrap()
        .take(3)
        .collect();
    assert_eq!(consumed.len(), 3);
}

#[test]
fn test_noop_options_return_structural_copy() {
    let (registry, generator) = builtin_generator();
    let base = base_two_iterators(&registry);
    let options = quiet_options(base.clone());

    let mut rng = StdRng::seed_from_u64(4);
    let mut genome = generator.generate_one(&options, &mut rng).unwrap();
    assert_eq!(genome, base);

    // Equal but distinct: writes to the copy must not reach the base.
    genome.background_color = [1.0, 0.0, 0.0];
    assert_eq!(options.base_params.as_ref().unwrap(), &base);
}

#[test]
fn test_shape_synthesis_overrides() {
    let mut registry = TransformRegistry::empty();
    registry.register(
        Transform::new("Solid disc")
            .with_tag(TransformTag::Shape)
            .with_real_param("radius", 0.5),
    );
    let generator = Generator::new(registry.all().iter().cloned());

    let mut options = quiet_options(Ifs::new());
    options.mutate_iterators = true;

    let mut rng = StdRng::seed_from_u64(13);
    let genome = generator.generate_one(&options, &mut rng).unwrap();

    assert_eq!(genome.iterators().len(), 4);
    for it in genome.iterators() {
        assert_eq!(it.opacity, 0.0);
        assert_eq!(it.add, 1.0);
        assert_eq!(it.color_speed, 0.0);
    }
}

#[test]
fn test_seeded_generation_is_deterministic() {
    let (registry, generator) = builtin_generator();
    let options = GeneratorOptions {
        batch_size: 3,
        base_params: Some(base_two_iterators(&registry)),
        ..GeneratorOptions::default()
    };

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let batch_a: Vec<Ifs> = generator.generate_batch(&options, &mut rng_a).unwrap().collect();
    let batch_b: Vec<Ifs> = generator.generate_batch(&options, &mut rng_b).unwrap().collect();
    assert_eq!(batch_a, batch_b);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let (registry, generator) = builtin_generator();
    let base = base_two_iterators(&registry);
    let mut rng = StdRng::seed_from_u64(0);

    let mut options = quiet_options(base.clone());
    options.batch_size = 0;
    assert!(matches!(
        generator.generate_one(&options, &mut rng),
        Err(FlamegenError::Configuration(_))
    ));

    let mut options = quiet_options(base.clone());
    options.mutation_chance = 1.5;
    assert!(matches!(
        generator.generate_one(&options, &mut rng),
        Err(FlamegenError::Configuration(_))
    ));

    let mut options = quiet_options(base.clone());
    options.mutation_chance = -0.1;
    assert!(matches!(
        generator.generate_batch(&options, &mut rng).err(),
        Some(FlamegenError::Configuration(_))
    ));

    let mut options = quiet_options(base);
    options.mutation_strength = -1.0;
    assert!(matches!(
        generator.generate_one(&options, &mut rng),
        Err(FlamegenError::Configuration(_))
    ));
}

#[test]
fn test_missing_base_genome_is_rejected() {
    let (_registry, generator) = builtin_generator();
    let options = GeneratorOptions::default();

    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        generator.generate_one(&options, &mut rng),
        Err(FlamegenError::MissingBaseGenome)
    ));
}

#[test]
fn test_empty_catalog_is_rejected_for_structural_mutation() {
    let generator = Generator::new(Vec::new());
    let mut rng = StdRng::seed_from_u64(0);

    let mut options = quiet_options(Ifs::new());
    options.mutate_iterators = true;
    assert!(matches!(
        generator.generate_one(&options, &mut rng),
        Err(FlamegenError::EmptyTransformCatalog)
    ));

    // Without structural mutation no synthesis happens and the empty
    // catalog is fine.
    options.mutate_iterators = false;
    assert!(generator.generate_one(&options, &mut rng).is_ok());
}
