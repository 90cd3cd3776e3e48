//! BDD step definitions for the preloader

pub mod lifecycle_steps;
pub mod presentation_steps;
