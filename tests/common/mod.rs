#![allow(dead_code)]

pub mod mocks;
pub mod model;
pub mod test_utils;
