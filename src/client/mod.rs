pub mod controller;
pub mod render;
pub mod state;
pub mod transport;

pub use controller::*;
pub use render::{render, View};
pub use state::*;
pub use transport::*;
