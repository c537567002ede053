//! Construction-time failures.
//!
//! Everything evaluated per tick recovers locally (zero volume, fallback
//! plane, skipped body). Only building a hull or loading configuration can
//! fail, and those failures are reported through [`BuoyancyError`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuoyancyError {
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("collider shape {0} cannot be turned into a triangle soup")]
    UnsupportedShape(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, BuoyancyError>;
