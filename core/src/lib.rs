pub mod collector;
pub mod compiler;
pub mod runner;
