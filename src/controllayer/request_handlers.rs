use tracing::{error, info};

use crate::{
    controllayer::{
        callbacks::{
            DeleteCallback, DirtyCleaner, DirtyForm, GetManyCallback, GetOneCallback,
            PostCallback, PutCallback, QueryFilter, UpdateValues,
        },
        context::RequestContext,
        resource::Resource,
    },
    errors::{CallbackError, ServiceError, ServiceResult},
};

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Answer with the callback's verdict as JSON
    Deleted(bool),
    /// Answer with `302 Found` pointing at this location
    Redirect(String),
}

/// Map a callback failure onto the HTTP error it surfaces as
pub fn translate_error(
    resource: &'static str,
    id: Option<String>,
    err: CallbackError,
) -> ServiceError {
    match err {
        CallbackError::Validation(reason) => ServiceError::MalformedInput { resource, reason },
        CallbackError::Duplicate(reason) => ServiceError::AlreadyExists {
            resource,
            id: id.unwrap_or_default(),
            reason,
        },
        CallbackError::NotFound(reason) => ServiceError::NotFound {
            resource,
            id,
            reason,
        },
        CallbackError::Internal(e) => ServiceError::Unhandled(e.to_string()),
    }
}

fn fail(
    ctx: &RequestContext,
    resource: &'static str,
    id: Option<String>,
    err: CallbackError,
) -> ServiceError {
    let err = translate_error(resource, id, err);
    error!(
        request_id = %ctx.request_id,
        resource = resource,
        status = %err.status_code(),
        error = %err,
        "Callback failed"
    );
    err
}

pub async fn post_request_handler<T: Resource>(
    ctx: RequestContext,
    item: T,
    on_post: &PostCallback<T>,
) -> ServiceResult<T> {
    let id = item.id();

    match on_post(ctx.clone(), item).await {
        Ok(created) => {
            info!(
                request_id = %ctx.request_id,
                resource = T::NAME,
                item = ?created,
                "Creation successful"
            );
            Ok(created)
        }
        Err(e) => Err(fail(&ctx, T::NAME, Some(id), e)),
    }
}

pub async fn getmany_request_handler<T: Resource>(
    ctx: RequestContext,
    query: Option<QueryFilter>,
    limit: Option<usize>,
    on_getmany: &GetManyCallback<T>,
) -> ServiceResult<Vec<T>> {
    match on_getmany(ctx.clone(), query, limit).await {
        Ok(items) => {
            info!(
                request_id = %ctx.request_id,
                resource = T::NAME,
                count = items.len(),
                limit = ?limit,
                "Listing successful"
            );
            Ok(items)
        }
        Err(e) => Err(fail(&ctx, T::NAME, None, e)),
    }
}

pub async fn getone_request_handler<T: Resource>(
    ctx: RequestContext,
    id: String,
    on_getone: &GetOneCallback<T>,
) -> ServiceResult<T> {
    match on_getone(ctx.clone(), id.clone()).await {
        Ok(item) => {
            info!(
                request_id = %ctx.request_id,
                resource = T::NAME,
                id = %id,
                "Lookup successful"
            );
            Ok(item)
        }
        Err(e) => Err(fail(&ctx, T::NAME, Some(id), e)),
    }
}

pub async fn put_request_handler<T: Resource>(
    ctx: RequestContext,
    id: String,
    update_values: UpdateValues,
    on_put: &PutCallback<T>,
) -> ServiceResult<T> {
    let fields: Vec<String> = update_values.keys().cloned().collect();

    match on_put(ctx.clone(), id.clone(), update_values).await {
        Ok(updated) => {
            info!(
                request_id = %ctx.request_id,
                resource = T::NAME,
                item = ?updated,
                fields = ?fields,
                "Update successful"
            );
            Ok(updated)
        }
        Err(e) => Err(fail(&ctx, T::NAME, Some(id), e)),
    }
}

pub async fn delete_request_handler<T: Resource>(
    ctx: RequestContext,
    id: String,
    on_delete: &DeleteCallback,
    redirect_url: Option<&str>,
) -> ServiceResult<DeleteOutcome> {
    match on_delete(ctx.clone(), id.clone()).await {
        Ok(deleted) => {
            info!(
                request_id = %ctx.request_id,
                resource = T::NAME,
                id = %id,
                deleted,
                "Delete successful"
            );
            Ok(match redirect_url {
                Some(url) => DeleteOutcome::Redirect(url.to_string()),
                None => DeleteOutcome::Deleted(deleted),
            })
        }
        Err(e) => Err(fail(&ctx, T::NAME, Some(id), e)),
    }
}

/// Clean a loosely formatted form, build the record and hand it to create
pub async fn dirty_post_request_handler<T: Resource>(
    ctx: RequestContext,
    dirty: DirtyForm,
    cleaner: &DirtyCleaner,
    on_post: &PostCallback<T>,
) -> ServiceResult<T> {
    let clean = cleaner(dirty.clone()).map_err(|e| fail(&ctx, T::NAME, None, e))?;

    info!(
        request_id = %ctx.request_id,
        resource = T::NAME,
        received = ?dirty,
        cleaned = ?clean,
        "Cleaned dirty create payload"
    );

    let item = T::from_json(serde_json::Value::Object(clean)).inspect_err(|e| {
        error!(
            request_id = %ctx.request_id,
            resource = T::NAME,
            error = %e,
            "Cleaned payload is not a valid record"
        );
    })?;

    post_request_handler(ctx, item, on_post).await
}
