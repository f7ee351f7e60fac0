mod errors;
mod me_handler;
mod types;

pub use me_handler::me;
