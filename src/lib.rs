pub mod error;
pub mod generator;
pub mod model;
pub mod musicxml;
pub mod score;

pub use error::Error;
pub use generator::Generator;
