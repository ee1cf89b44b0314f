pub mod chunk;
pub mod descriptor;
pub mod ingest;
pub mod range;
