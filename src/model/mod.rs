pub mod common;
pub mod owner;
pub mod ownership;
pub mod parking_assignment;
pub mod unit;

pub use common::*;
pub use owner::*;
pub use ownership::*;
pub use parking_assignment::*;
pub use unit::*;
