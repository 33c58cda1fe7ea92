pub mod error;
pub mod schema;
pub mod store;
pub mod registry;
pub mod report;
pub mod fixtures;

pub use error::{Result, StoreError};
pub use registry::{Decrement, Increment};
pub use report::{ClassSection, RegisterSnapshot};
pub use store::{RegisterStore, StoreConfig};
