pub mod generator;
pub mod options;
pub mod palette;

pub use generator::Generator;
pub use options::GeneratorOptions;
