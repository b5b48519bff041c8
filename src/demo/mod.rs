//! Sample resource wiring used by the server binary and the integration tests.

pub mod collection;
pub mod dummy;

pub use collection::{DummyCollection, dummy_shell};
pub use dummy::{DummySchema, clean_dummy_form};
