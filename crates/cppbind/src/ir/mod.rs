//! Intermediate Representation (IR) of the documented C++ library
//!
//! This module provides the entity records consumed by the generator, the
//! documentation database that holds them, and name helpers.

pub mod database;
pub mod entity;
pub mod names;

pub use database::*;
pub use entity::*;
