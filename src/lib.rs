pub mod artifact;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod locator;
pub mod render;
pub mod report;
pub mod suggest;

#[cfg(test)]
pub mod test_helpers;
