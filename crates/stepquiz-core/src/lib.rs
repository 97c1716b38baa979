pub mod quiz;
pub mod sink;
pub mod source;
