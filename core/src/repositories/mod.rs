pub mod verification;

pub use verification::{CodeStore, ExpiringStore};
