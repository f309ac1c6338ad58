pub mod assistant;
pub mod clock;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod records;
pub mod remote;
pub mod store;
pub mod suggest;
pub mod sync;
pub mod usage;

pub use error::{Error, Result};
