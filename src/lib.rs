//! Coursebook library exports for testing

pub mod core;
pub mod render;
pub mod server;

#[cfg(test)]
pub mod test_support;
