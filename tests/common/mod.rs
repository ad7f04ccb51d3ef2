#![allow(dead_code)]

pub mod mocks;
pub mod test_utils;

pub use mocks::MockLlmClient;
pub use test_utils::*;
