use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flamegen::generation::{Generator, GeneratorOptions};
use flamegen::model::{Ifs, IteratorNode, TransformRegistry};

fn main() -> Result<()> {
    env_logger::init();

    let registry = TransformRegistry::new();
    let generator = Generator::new(registry.all().iter().cloned());
    log::info!("catalog holds {} transforms", generator.transforms().len());

    // Small base genome: two plainly connected iterators.
    let mut base = Ifs::new();
    for name in ["Linear", "Spherical"] {
        let transform = registry
            .get(name)
            .ok_or_else(|| anyhow!("transform '{name}' missing from catalog"))?;
        base.add_iterator(IteratorNode::new(transform), true);
    }

    let options = GeneratorOptions {
        batch_size: 10,
        base_params: Some(base),
        ..GeneratorOptions::default()
    };

    let mut rng = StdRng::seed_from_u64(42);
    let mut first = None;
    for (i, genome) in generator.generate_batch(&options, &mut rng)?.enumerate() {
        log::info!(
            "genome {}: {} iterators, palette '{}'",
            i + 1,
            genome.iterators().len(),
            genome.palette.name
        );
        if first.is_none() {
            first = Some(genome);
        }
    }

    if let Some(genome) = first {
        println!("{}", serde_json::to_string_pretty(&genome)?);
    }
    Ok(())
}
