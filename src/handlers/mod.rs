// src/handlers/mod.rs

pub mod posts;
