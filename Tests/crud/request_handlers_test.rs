use api_shell::{
    controllayer::{
        DeleteOutcome, RequestContext,
        callbacks::{
            delete_callback, dirty_cleaner, getmany_callback, getone_callback, post_callback,
            put_callback,
        },
        request_handlers::{
            delete_request_handler, dirty_post_request_handler, getmany_request_handler,
            getone_request_handler, post_request_handler, put_request_handler,
        },
    },
    demo::{DummySchema, clean_dummy_form},
    errors::{CallbackError, ServiceError},
};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use uuid::Uuid;

fn ctx() -> RequestContext {
    RequestContext {
        request_id: Uuid::new_v4(),
        method: Method::GET,
        uri: Uri::from_static("/dummy/api/"),
        headers: HeaderMap::new(),
    }
}

fn dummy(id: &str) -> DummySchema {
    DummySchema {
        id: id.to_string(),
        desc: "a dummy".to_string(),
        active: true,
    }
}

#[tokio::test]
async fn test_post_returns_callback_result_unchanged() {
    let on_post = post_callback(|_ctx, mut item: DummySchema| async move {
        item.desc = "stored".to_string();
        Ok(item)
    });

    let created = post_request_handler(ctx(), dummy("a"), &on_post).await.unwrap();
    assert_eq!(created.desc, "stored");
}

#[tokio::test]
async fn test_post_duplicate_is_409_with_item_id() {
    let on_post = post_callback(|_ctx, _item: DummySchema| async move {
        Err(CallbackError::duplicate("taken"))
    });

    let err = post_request_handler(ctx(), dummy("a"), &on_post)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        err.to_string(),
        "Record [DummySchema] already exists with id 'a'. taken"
    );
}

#[tokio::test]
async fn test_post_validation_is_400() {
    let on_post = post_callback(|_ctx, _item: DummySchema| async move {
        Err(CallbackError::validation("desc too short"))
    });

    let err = post_request_handler(ctx(), dummy("a"), &on_post)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_getone_not_found_is_404() {
    let on_getone = getone_callback(|_ctx, _id| async move {
        Err::<DummySchema, _>(CallbackError::not_found("missing"))
    });

    let err = getone_request_handler(ctx(), "zz".to_string(), &on_getone)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "DummySchema with ID zz not found. missing");
}

#[tokio::test]
async fn test_put_not_found_is_404() {
    let on_put = put_callback(|_ctx, _id, _values| async move {
        Err::<DummySchema, _>(CallbackError::not_found("missing"))
    });

    let err = put_request_handler(ctx(), "zz".to_string(), Default::default(), &on_put)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_passes_update_values() {
    let on_put = put_callback(|_ctx, id: String, values: serde_json::Map<_, _>| async move {
        Ok(DummySchema {
            id,
            desc: values["desc"].as_str().unwrap_or_default().to_string(),
            active: false,
        })
    });

    let mut values = serde_json::Map::new();
    values.insert("desc".to_string(), serde_json::json!("renamed"));

    let updated = put_request_handler(ctx(), "a".to_string(), values, &on_put)
        .await
        .unwrap();
    assert_eq!(updated.id, "a");
    assert_eq!(updated.desc, "renamed");
}

#[tokio::test]
async fn test_delete_outcomes() {
    let on_delete = delete_callback(|_ctx, _id| async move { Ok(true) });

    let outcome = delete_request_handler::<DummySchema>(ctx(), "a".to_string(), &on_delete, None)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted(true));

    let outcome = delete_request_handler::<DummySchema>(
        ctx(),
        "a".to_string(),
        &on_delete,
        Some("/dummy"),
    )
    .await
    .unwrap();
    assert_eq!(outcome, DeleteOutcome::Redirect("/dummy".to_string()));
}

#[tokio::test]
async fn test_delete_not_found_is_404() {
    let on_delete = delete_callback(|_ctx, _id| async move {
        Err(CallbackError::not_found("already gone"))
    });

    let err = delete_request_handler::<DummySchema>(ctx(), "a".to_string(), &on_delete, None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_getmany_internal_is_500() {
    let on_getmany = getmany_callback(|_ctx, _query, _limit| async move {
        Err::<Vec<DummySchema>, _>(CallbackError::internal("database unreachable"))
    });

    let err = getmany_request_handler(ctx(), None, Some(100), &on_getmany)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "Unhandled error: database unreachable");
}

#[tokio::test]
async fn test_getmany_passes_query_and_limit() {
    let on_getmany = getmany_callback(|_ctx, query: Option<serde_json::Map<_, _>>, limit| async move {
        assert_eq!(limit, Some(5));
        assert_eq!(query.unwrap()["active"], serde_json::json!(true));
        Ok(vec![DummySchema {
            id: "a".to_string(),
            desc: "a dummy".to_string(),
            active: true,
        }])
    });

    let mut query = serde_json::Map::new();
    query.insert("active".to_string(), serde_json::json!(true));

    let items = getmany_request_handler(ctx(), Some(query), Some(5), &on_getmany)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_dirty_post_builds_record() {
    let on_post = post_callback(|_ctx, item: DummySchema| async move { Ok(item) });
    let cleaner = dirty_cleaner(clean_dummy_form);

    let mut form = std::collections::BTreeMap::new();
    form.insert("id".to_string(), vec!["d1".to_string()]);
    form.insert("desc".to_string(), vec!["from a form".to_string()]);
    form.insert("active".to_string(), vec!["on".to_string()]);

    let created = dirty_post_request_handler(ctx(), form, &cleaner, &on_post)
        .await
        .unwrap();
    assert_eq!(created.id, "d1");
    assert!(created.active);
}

#[tokio::test]
async fn test_dirty_post_invalid_record_is_400() {
    let on_post = post_callback(|_ctx, item: DummySchema| async move { Ok(item) });
    let cleaner = dirty_cleaner(clean_dummy_form);

    let mut form = std::collections::BTreeMap::new();
    form.insert("id".to_string(), vec!["d1".to_string()]);

    let err = dirty_post_request_handler(ctx(), form, &cleaner, &on_post)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MalformedInput { .. }));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}
