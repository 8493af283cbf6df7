pub mod difficulty;
pub mod learn;
pub mod quiz;
pub mod result;
pub mod scorer;
pub mod timer;
pub mod training;
