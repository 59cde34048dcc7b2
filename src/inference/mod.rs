//! Post-fit inference utilities.

pub mod hessian;
