pub mod model;
pub mod posts;
pub mod stats;
