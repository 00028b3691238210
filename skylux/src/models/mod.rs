pub mod observer;
pub mod result;
pub mod weather;

pub use observer::*;
pub use result::*;
pub use weather::*;

pub use crate::time::TimeInstant;
