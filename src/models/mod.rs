pub mod preferences;
pub mod recipe;

pub use preferences::*;
pub use recipe::*;
