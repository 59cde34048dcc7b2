//! Numerically robust scalar transforms and shared numeric constants.

pub mod transformations;
