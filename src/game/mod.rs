pub mod constants;
pub mod driver;
pub mod state;
pub mod systems;
