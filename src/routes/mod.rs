mod health_check;
mod helpers;
mod me;

pub use health_check::*;
pub use helpers::*;
pub use me::*;
