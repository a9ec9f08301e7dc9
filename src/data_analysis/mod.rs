// src/data_analysis/mod.rs

pub mod reliability;
pub mod settling_time;
pub mod summary;

// src/data_analysis/mod.rs
