pub mod input;
pub mod paint;
pub mod surface;
pub mod terminal;
