pub mod id_map;
pub mod tracing;
