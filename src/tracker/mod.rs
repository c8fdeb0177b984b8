pub mod changed;
pub mod error;
pub mod kind;
pub mod resolve;
pub mod session;
pub mod tracker;
pub mod value;
