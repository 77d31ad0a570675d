#![allow(dead_code)]

pub mod exofinder_env;
pub mod fake_backend;
