#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # geostage-entities
//!
//! Reusable, agnostic domain entities for the geocode cache pipeline.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod cache;
pub mod geo;
pub mod location;
pub mod time;
