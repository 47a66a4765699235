pub mod config;
pub mod ring_buffer;
