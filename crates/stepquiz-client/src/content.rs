pub mod cms;
pub mod file;
