pub mod profile;
pub mod repository;
pub mod stats;
pub mod comparison;

pub use profile::*;
pub use repository::*;
pub use stats::*;
pub use comparison::*;
