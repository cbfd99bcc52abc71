pub use geostage_entities as entities;

pub mod gateways;
pub mod repositories;
pub mod usecases;
