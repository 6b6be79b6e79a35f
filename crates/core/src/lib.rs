#![deny(unsafe_code)]
//! Core types for the equipotential electrostatics visualizer.
//!
//! Provides `Charge`, the `FieldSource` trait and its point-charge
//! implementation `ChargeField`, the potential sampling `Grid`,
//! `Domain`/`Resolution`, `LevelRange`, field-direction `Arrow`s and the
//! caller-owned `Scene` configuration.

pub mod charge;
pub mod domain;
pub mod error;
pub mod field_source;
pub mod grid;
pub mod levels;
pub mod params;
pub mod scene;
pub mod vectors;

pub use charge::Charge;
pub use domain::{Domain, Resolution};
pub use error::FieldError;
pub use field_source::{compute_field, compute_potential, ChargeField, FieldSource};
pub use grid::Grid;
pub use levels::LevelRange;
pub use scene::Scene;
pub use vectors::{field_arrows, Arrow, VectorSettings};
