mod contact;
mod health;

pub use contact::*;
pub use health::*;
