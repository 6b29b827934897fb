pub mod grade;
pub mod record;
pub mod snapshot;
pub mod store;

pub use grade::*;
pub use record::*;
pub use snapshot::*;
pub use store::*;
