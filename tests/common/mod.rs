#![allow(dead_code)]

pub mod fixtures;
pub mod strategies;
pub mod test_server;

pub use fixtures::*;
pub use strategies::*;
pub use test_server::*;
