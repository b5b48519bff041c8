pub mod callbacks;
pub mod context;
pub mod request_handlers;
pub mod resource;

pub use callbacks::{
    DeleteCallback, DirtyCleaner, DirtyForm, GetManyCallback, GetOneCallback, PostCallback,
    PutCallback, QueryFilter, UpdateValues,
};
pub use context::RequestContext;
pub use request_handlers::DeleteOutcome;
pub use resource::Resource;
