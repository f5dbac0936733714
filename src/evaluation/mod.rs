pub mod economics;
pub mod penalty;
pub mod summary;
