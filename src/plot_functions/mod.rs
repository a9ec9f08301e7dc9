// src/plot_functions/mod.rs

pub mod plot_performance_report;

// src/plot_functions/mod.rs
