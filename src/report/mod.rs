//! Report model and composition

pub mod composer;
pub mod model;
