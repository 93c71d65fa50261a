pub mod concepts;
pub mod engine;
pub mod feedback;
pub mod framework;
pub mod oracle;
pub mod path;
pub mod simulation;
pub mod util;

pub use framework::INF;
