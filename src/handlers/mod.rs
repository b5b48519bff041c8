pub mod crud;
pub mod extractors;

pub use extractors::{DEFAULT_LIST_LIMIT, DirtyBody, ListParams, UpdateBody, ValidatedJson};
