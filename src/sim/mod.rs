pub mod state;
pub mod step;
