pub mod config;
pub mod error;
pub mod fixed_point;
pub mod font;
pub mod generate;
pub mod logging;
pub mod mem_file;
pub mod plot;
pub mod probe;
pub mod sine_table;
