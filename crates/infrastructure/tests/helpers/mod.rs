#![allow(dead_code)]

mod servers;
mod stubs;

pub use servers::*;
pub use stubs::*;
