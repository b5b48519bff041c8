use axum::{
    Router,
    extract::Path,
    middleware,
    routing::{MethodRouter, delete, get, post, put},
};
use std::future::Future;
use tower_http::trace::TraceLayer;

use crate::{
    controllayer::{
        DeleteCallback, DirtyCleaner, DirtyForm, GetManyCallback, GetOneCallback, PostCallback,
        PutCallback, QueryFilter, RequestContext, Resource, UpdateValues, callbacks,
    },
    errors::{CallbackResult, ServiceError, ServiceResult},
    handlers::{DirtyBody, ListParams, UpdateBody, ValidatedJson, crud},
    middleware::request_id_middleware,
};

/// Declarative CRUD routes for one resource type.
///
/// Every callback is optional; a route is only registered when the callback
/// behind it was supplied. Routes live under `base_route`:
///
/// | Route                | Method | Callback          |
/// |----------------------|--------|-------------------|
/// | `{base}/api/`        | POST   | `on_post`         |
/// | `{base}/api/:id`     | PUT    | `on_put`          |
/// | `{base}/api/:id`     | DELETE | `on_delete`       |
/// | `{base}/api/:id`     | GET    | `on_getone`       |
/// | `{base}/api/`        | GET    | `on_getmany`      |
/// | `{base}/delete/:id`  | GET    | `on_delete` (302) |
/// | `{base}/dirty/`      | POST   | `dirty_create` + `on_post` |
///
/// # Example
/// ```rust,no_run
/// use api_shell::{demo::DummySchema, routes::ApiShell};
///
/// let router = ApiShell::<DummySchema>::new("/dummy")
///     .on_post(|_ctx, item| async move { Ok(item) })
///     .on_delete(|_ctx, _id| async move { Ok(true) })
///     .into_router()
///     .expect("valid shell");
/// ```
pub struct ApiShell<T: Resource> {
    base_route: String,
    on_post: Option<PostCallback<T>>,
    on_put: Option<PutCallback<T>>,
    on_delete: Option<DeleteCallback>,
    on_getone: Option<GetOneCallback<T>>,
    on_getmany: Option<GetManyCallback<T>>,
    dirty_create: Option<DirtyCleaner>,
}

impl<T: Resource> ApiShell<T> {
    pub fn new(base_route: impl Into<String>) -> Self {
        let base_route = base_route.into().trim_end_matches('/').to_string();
        Self {
            base_route,
            on_post: None,
            on_put: None,
            on_delete: None,
            on_getone: None,
            on_getmany: None,
            dirty_create: None,
        }
    }

    pub fn base_route(&self) -> &str {
        &self.base_route
    }

    pub fn on_post<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(RequestContext, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<T>> + Send + 'static,
    {
        self.on_post = Some(callbacks::post_callback(f));
        self
    }

    pub fn on_put<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(RequestContext, String, UpdateValues) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<T>> + Send + 'static,
    {
        self.on_put = Some(callbacks::put_callback(f));
        self
    }

    pub fn on_delete<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(RequestContext, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<bool>> + Send + 'static,
    {
        self.on_delete = Some(callbacks::delete_callback(f));
        self
    }

    pub fn on_getone<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(RequestContext, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<T>> + Send + 'static,
    {
        self.on_getone = Some(callbacks::getone_callback(f));
        self
    }

    pub fn on_getmany<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(RequestContext, Option<QueryFilter>, Option<usize>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<Vec<T>>> + Send + 'static,
    {
        self.on_getmany = Some(callbacks::getmany_callback(f));
        self
    }

    pub fn dirty_create<F>(mut self, f: F) -> Self
    where
        F: Fn(DirtyForm) -> CallbackResult<serde_json::Map<String, serde_json::Value>>
            + Send
            + Sync
            + 'static,
    {
        self.dirty_create = Some(callbacks::dirty_cleaner(f));
        self
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}/{}", self.base_route, suffix)
    }

    /// Location the GET-based delete link sends the browser back to
    fn redirect_target(&self) -> String {
        if self.base_route.is_empty() {
            "/".to_string()
        } else {
            self.base_route.clone()
        }
    }

    /// Register the routes whose callbacks were supplied
    pub fn into_router(self) -> ServiceResult<Router> {
        if !self.base_route.is_empty() && !self.base_route.starts_with('/') {
            let err = ServiceError::ConfigurationError(format!(
                "Base route must start with '/', got '{}'",
                self.base_route
            ));
            tracing::error!(base_route = %self.base_route, error = %err, "Route registration failed");
            return Err(err);
        }

        if self.dirty_create.is_some() && self.on_post.is_none() {
            let err = ServiceError::ConfigurationError(format!(
                "Cannot supply a dirty create without an on_post callback for {}",
                self.base_route
            ));
            tracing::error!(base_route = %self.base_route, error = %err, "Route registration failed");
            return Err(err);
        }

        let mut collection: Option<MethodRouter> = None;
        let mut item: Option<MethodRouter> = None;
        let mut registered: Vec<String> = Vec::new();

        // create
        if let Some(on_post) = self.on_post.clone() {
            collection = add(
                collection,
                post(move |ctx: RequestContext, body: ValidatedJson<T>| {
                    crud::create(on_post.clone(), ctx, body)
                }),
            );
            registered.push(format!("POST {}", self.path("api/")));
        }

        // update
        if let Some(on_put) = self.on_put.clone() {
            item = add(
                item,
                put(
                    move |ctx: RequestContext, id: Path<String>, body: UpdateBody<T>| {
                        crud::update(on_put.clone(), ctx, id, body)
                    },
                ),
            );
            registered.push(format!("PUT {}", self.path("api/:id")));
        }

        // delete
        if let Some(on_delete) = self.on_delete.clone() {
            item = add(
                item,
                delete(move |ctx: RequestContext, id: Path<String>| {
                    crud::delete::<T>(on_delete.clone(), None, ctx, id)
                }),
            );
            registered.push(format!("DELETE {}", self.path("api/:id")));
        }

        // find
        if let Some(on_getone) = self.on_getone.clone() {
            item = add(
                item,
                get(move |ctx: RequestContext, id: Path<String>| {
                    crud::get_one(on_getone.clone(), ctx, id)
                }),
            );
            registered.push(format!("GET {}", self.path("api/:id")));
        }

        // list
        if let Some(on_getmany) = self.on_getmany.clone() {
            collection = add(
                collection,
                get(move |ctx: RequestContext, params: ListParams| {
                    crud::get_many(on_getmany.clone(), ctx, params)
                }),
            );
            registered.push(format!("GET {}", self.path("api/")));
        }

        let mut router = Router::new();
        if let Some(methods) = collection {
            router = router.route(&self.path("api/"), methods);
        }
        if let Some(methods) = item {
            router = router.route(&self.path("api/:id"), methods);
        }

        // Browser links can only issue GET, so delete gets a GET twin that redirects back
        if let Some(on_delete) = self.on_delete.clone() {
            let redirect = self.redirect_target();
            router = router.route(
                &self.path("delete/:id"),
                get(move |ctx: RequestContext, id: Path<String>| {
                    crud::delete::<T>(on_delete.clone(), Some(redirect.clone()), ctx, id)
                }),
            );
            registered.push(format!("GET {}", self.path("delete/:id")));
        }

        // Input we know will not decode directly but can be cleaned into shape
        if let (Some(cleaner), Some(on_post)) = (self.dirty_create.clone(), self.on_post.clone()) {
            router = router.route(
                &self.path("dirty/"),
                post(move |ctx: RequestContext, body: DirtyBody<T>| {
                    crud::dirty_create(on_post.clone(), cleaner.clone(), ctx, body)
                }),
            );
            registered.push(format!("POST {}", self.path("dirty/")));
        }

        tracing::info!(
            base_route = %self.base_route,
            resource = T::NAME,
            routes = ?registered,
            "{} routes registered",
            self.base_route
        );

        Ok(router
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http()))
    }
}

fn add(slot: Option<MethodRouter>, route: MethodRouter) -> Option<MethodRouter> {
    Some(match slot {
        Some(existing) => existing.merge(route),
        None => route,
    })
}
