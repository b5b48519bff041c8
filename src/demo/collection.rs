use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    controllayer::{QueryFilter, UpdateValues},
    demo::dummy::{DummySchema, clean_dummy_form},
    errors::{CallbackError, CallbackResult},
    routes::ApiShell,
};

/// In-memory store backing the demo callbacks
#[derive(Debug, Clone, Default)]
pub struct DummyCollection {
    items: Arc<RwLock<BTreeMap<String, DummySchema>>>,
}

impl DummyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, item: DummySchema) -> CallbackResult<DummySchema> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(CallbackError::duplicate(format!(
                "id '{}' is already taken",
                item.id
            )));
        }
        items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    pub async fn find(&self, id: &str) -> CallbackResult<DummySchema> {
        self.items
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CallbackError::not_found("no record with that id"))
    }

    /// Overlay `values` onto the stored record; the id cannot change
    pub async fn update(&self, id: &str, values: UpdateValues) -> CallbackResult<DummySchema> {
        let mut items = self.items.write().await;
        let current = items
            .get(id)
            .ok_or_else(|| CallbackError::not_found("no record with that id"))?;

        if let Some(new_id) = values.get("id") {
            if new_id.as_str() != Some(id) {
                return Err(CallbackError::validation("id cannot be changed"));
            }
        }

        let mut merged = match serde_json::to_value(current)? {
            serde_json::Value::Object(fields) => fields,
            _ => return Err(CallbackError::internal("stored record is not an object")),
        };
        merged.extend(values);

        let updated: DummySchema = serde_json::from_value(serde_json::Value::Object(merged))?;
        updated.validate()?;

        items.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    pub async fn remove(&self, id: &str) -> CallbackResult<bool> {
        self.items
            .write()
            .await
            .remove(id)
            .map(|_| true)
            .ok_or_else(|| CallbackError::not_found("no record with that id"))
    }

    /// Records whose fields equal every entry of `query`, at most `limit` of them
    pub async fn list(
        &self,
        query: Option<QueryFilter>,
        limit: Option<usize>,
    ) -> CallbackResult<Vec<DummySchema>> {
        let items = self.items.read().await;
        let mut found = Vec::new();

        for item in items.values() {
            if found.len() >= limit.unwrap_or(usize::MAX) {
                break;
            }
            if let Some(filter) = &query {
                let fields = serde_json::to_value(item)?;
                if !filter.iter().all(|(key, want)| fields.get(key) == Some(want)) {
                    continue;
                }
            }
            found.push(item.clone());
        }

        Ok(found)
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

/// Shell with every callback wired to `collection`
pub fn dummy_shell(base_route: &str, collection: DummyCollection) -> ApiShell<DummySchema> {
    let on_post = collection.clone();
    let on_put = collection.clone();
    let on_delete = collection.clone();
    let on_getone = collection.clone();
    let on_getmany = collection;

    ApiShell::new(base_route)
        .on_post(move |_ctx, item| {
            let store = on_post.clone();
            async move { store.add(item).await }
        })
        .on_put(move |_ctx, id, values| {
            let store = on_put.clone();
            async move { store.update(&id, values).await }
        })
        .on_delete(move |_ctx, id| {
            let store = on_delete.clone();
            async move { store.remove(&id).await }
        })
        .on_getone(move |_ctx, id| {
            let store = on_getone.clone();
            async move { store.find(&id).await }
        })
        .on_getmany(move |_ctx, query, limit| {
            let store = on_getmany.clone();
            async move { store.list(query, limit).await }
        })
        .dirty_create(clean_dummy_form)
}
