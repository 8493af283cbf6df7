pub mod achievements;
pub mod stats;
