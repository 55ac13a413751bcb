pub mod collections;

pub use collections::{Collection, Database};
