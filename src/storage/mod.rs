pub mod cache;

pub use cache::TtlCache;
