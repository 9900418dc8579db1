pub mod config;
pub mod envprobe;
