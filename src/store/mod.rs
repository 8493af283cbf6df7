pub mod progress;
pub mod storage;
