pub mod cli;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod sprint;
pub mod trackers;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
