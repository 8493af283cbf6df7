// The binary in main.rs drives the terminal; everything it renders and every
// rule it enforces lives in this library so benches and integration tests can
// reach it as `jadwal::*`.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod generator;
pub mod numerals;
pub mod session;
pub mod store;
pub mod ui;
