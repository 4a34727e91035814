use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlamegenError {
    #[error("Transform catalog is empty: cannot synthesize iterators")]
    EmptyTransformCatalog,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Generator options carry no base genome")]
    MissingBaseGenome,
}

pub type Result<T> = std::result::Result<T, FlamegenError>;
