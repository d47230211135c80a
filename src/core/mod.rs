pub mod env;
pub mod launcher;
pub mod process;
