pub mod network_file;
pub mod plan_writer;
