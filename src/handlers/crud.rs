use axum::{
    Json,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};

use crate::{
    controllayer::{
        DeleteCallback, DeleteOutcome, DirtyCleaner, GetManyCallback, GetOneCallback,
        PostCallback, PutCallback, RequestContext, Resource, request_handlers,
    },
    errors::ServiceResult,
    handlers::extractors::{DirtyBody, ListParams, UpdateBody, ValidatedJson, parse_dirty_form},
};

impl IntoResponse for DeleteOutcome {
    fn into_response(self) -> Response {
        match self {
            DeleteOutcome::Deleted(deleted) => (StatusCode::OK, Json(deleted)).into_response(),
            DeleteOutcome::Redirect(location) => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
        }
    }
}

/// POST {base}/api/
/// Create a record from a validated JSON body
#[instrument(skip_all, fields(resource = T::NAME, request_id = %ctx.request_id))]
pub async fn create<T: Resource>(
    on_post: PostCallback<T>,
    ctx: RequestContext,
    ValidatedJson(item): ValidatedJson<T>,
) -> ServiceResult<(StatusCode, Json<T>)> {
    info!(id = %item.id(), "Creating record");
    let created = request_handlers::post_request_handler(ctx, item, &on_post).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT {base}/api/:id
#[instrument(skip_all, fields(resource = T::NAME, request_id = %ctx.request_id, id = %id))]
pub async fn update<T: Resource>(
    on_put: PutCallback<T>,
    ctx: RequestContext,
    Path(id): Path<String>,
    body: UpdateBody<T>,
) -> ServiceResult<(StatusCode, Json<T>)> {
    let values = body.into_inner();
    info!(fields = values.len(), "Updating record");
    let updated = request_handlers::put_request_handler(ctx, id, values, &on_put).await?;
    Ok((StatusCode::ACCEPTED, Json(updated)))
}

/// DELETE {base}/api/:id and GET {base}/delete/:id
///
/// The GET variant carries a redirect location so browser links land back
/// on the base route.
#[instrument(skip_all, fields(resource = T::NAME, request_id = %ctx.request_id, id = %id))]
pub async fn delete<T: Resource>(
    on_delete: DeleteCallback,
    redirect_url: Option<String>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ServiceResult<DeleteOutcome> {
    info!(redirect = ?redirect_url, "Deleting record");
    request_handlers::delete_request_handler::<T>(ctx, id, &on_delete, redirect_url.as_deref())
        .await
}

/// GET {base}/api/:id
#[instrument(skip_all, fields(resource = T::NAME, request_id = %ctx.request_id, id = %id))]
pub async fn get_one<T: Resource>(
    on_getone: GetOneCallback<T>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ServiceResult<Json<T>> {
    info!("Getting record");
    let item = request_handlers::getone_request_handler(ctx, id, &on_getone).await?;
    Ok(Json(item))
}

/// GET {base}/api/?query=<json>&limit=<n>
#[instrument(skip_all, fields(resource = T::NAME, request_id = %ctx.request_id))]
pub async fn get_many<T: Resource>(
    on_getmany: GetManyCallback<T>,
    ctx: RequestContext,
    params: ListParams,
) -> ServiceResult<Json<Vec<T>>> {
    info!(query = ?params.query, limit = ?params.limit, "Listing records");
    let items =
        request_handlers::getmany_request_handler(ctx, params.query, params.limit, &on_getmany)
            .await?;
    Ok(Json(items))
}

/// POST {base}/dirty/
/// Create a record from a form-encoded body that needs cleaning first
#[instrument(skip_all, fields(resource = T::NAME, request_id = %ctx.request_id))]
pub async fn dirty_create<T: Resource>(
    on_post: PostCallback<T>,
    cleaner: DirtyCleaner,
    ctx: RequestContext,
    body: DirtyBody<T>,
) -> ServiceResult<Json<T>> {
    let body = body.into_inner();
    info!(received = %body, "Received dirty create payload");
    let dirty = parse_dirty_form(&body);
    let created =
        request_handlers::dirty_post_request_handler(ctx, dirty, &cleaner, &on_post).await?;
    Ok(Json(created))
}
