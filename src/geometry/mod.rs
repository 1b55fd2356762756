pub mod coordinates;
pub mod screen;
pub mod types;
