mod shift;
mod staff;

pub use shift::*;
pub use staff::*;
