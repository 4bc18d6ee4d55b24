// src/pipeline/mod.rs

pub mod catalog;
pub mod readers;
pub mod steps;
pub mod writers;
