use futures::future::{BoxFuture, FutureExt};
use std::{collections::BTreeMap, future::Future, sync::Arc};

use crate::{controllayer::context::RequestContext, errors::CallbackResult};

/// Field name -> new value, as sent in an update body
pub type UpdateValues = serde_json::Map<String, serde_json::Value>;

/// Decoded `query` filter of a list request
pub type QueryFilter = serde_json::Map<String, serde_json::Value>;

/// Form-encoded body, one entry per key with every submitted value
pub type DirtyForm = BTreeMap<String, Vec<String>>;

pub type PostCallback<T> =
    Arc<dyn Fn(RequestContext, T) -> BoxFuture<'static, CallbackResult<T>> + Send + Sync>;

pub type PutCallback<T> = Arc<
    dyn Fn(RequestContext, String, UpdateValues) -> BoxFuture<'static, CallbackResult<T>>
        + Send
        + Sync,
>;

pub type DeleteCallback =
    Arc<dyn Fn(RequestContext, String) -> BoxFuture<'static, CallbackResult<bool>> + Send + Sync>;

pub type GetOneCallback<T> =
    Arc<dyn Fn(RequestContext, String) -> BoxFuture<'static, CallbackResult<T>> + Send + Sync>;

pub type GetManyCallback<T> = Arc<
    dyn Fn(RequestContext, Option<QueryFilter>, Option<usize>) -> BoxFuture<'static, CallbackResult<Vec<T>>>
        + Send
        + Sync,
>;

/// Turns a dirty form into the JSON object a resource is built from
pub type DirtyCleaner =
    Arc<dyn Fn(DirtyForm) -> CallbackResult<serde_json::Map<String, serde_json::Value>> + Send + Sync>;

pub fn post_callback<T, F, Fut>(f: F) -> PostCallback<T>
where
    T: 'static,
    F: Fn(RequestContext, T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<T>> + Send + 'static,
{
    Arc::new(move |ctx: RequestContext, item: T| f(ctx, item).boxed())
}

pub fn put_callback<T, F, Fut>(f: F) -> PutCallback<T>
where
    T: 'static,
    F: Fn(RequestContext, String, UpdateValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<T>> + Send + 'static,
{
    Arc::new(move |ctx: RequestContext, id: String, values: UpdateValues| {
        f(ctx, id, values).boxed()
    })
}

pub fn delete_callback<F, Fut>(f: F) -> DeleteCallback
where
    F: Fn(RequestContext, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<bool>> + Send + 'static,
{
    Arc::new(move |ctx: RequestContext, id: String| f(ctx, id).boxed())
}

pub fn getone_callback<T, F, Fut>(f: F) -> GetOneCallback<T>
where
    T: 'static,
    F: Fn(RequestContext, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<T>> + Send + 'static,
{
    Arc::new(move |ctx: RequestContext, id: String| f(ctx, id).boxed())
}

pub fn getmany_callback<T, F, Fut>(f: F) -> GetManyCallback<T>
where
    T: 'static,
    F: Fn(RequestContext, Option<QueryFilter>, Option<usize>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<Vec<T>>> + Send + 'static,
{
    Arc::new(
        move |ctx: RequestContext, query: Option<QueryFilter>, limit: Option<usize>| {
            f(ctx, query, limit).boxed()
        },
    )
}

pub fn dirty_cleaner<F>(f: F) -> DirtyCleaner
where
    F: Fn(DirtyForm) -> CallbackResult<serde_json::Map<String, serde_json::Value>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}
