pub mod table;
pub mod topology;
