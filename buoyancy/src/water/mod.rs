//! Procedural deep-water surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               WaveConfig (shared)            │
//! │  - two WaveClusters (coarse + fine swell)    │
//! │  - base level, amplitude scale               │
//! │  - serializable for scenario files           │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//!               ┌──────────────────┐
//!               │ GerstnerWaveField│  (16 precomputed waves)
//!               └────────┬─────────┘
//!                        ▼
//!               ┌──────────────────┐
//!               │ WaterEnvironment │  (Bevy resource, read-only)
//!               └────────┬─────────┘
//!                        ▼
//!          best-fit plane probes under each hull
//! ```

pub mod config;
pub mod field;
pub mod gerstner;

pub use config::{WaveCluster, WaveConfig, WaveParameters, WavePreset};
pub use field::{FlatWater, GerstnerWaveField, WaterEnvironment, WaveField};
pub use gerstner::gerstner_displacement;
