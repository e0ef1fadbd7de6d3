//! Core domain types for Cofactor.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod cell;
mod matrix;
mod step;
pub mod ui;

pub use cell::{resolve_cell, resolve_grid};
pub use matrix::{Matrix, MatrixShapeError};
pub use step::{CellRef, InvalidSign, Sign, Step, StepKind};
