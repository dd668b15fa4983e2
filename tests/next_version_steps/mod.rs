//! Step definitions for next-version behaviour tests.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
