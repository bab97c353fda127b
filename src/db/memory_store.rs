use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::document_store::{
    compare_values, new_document_id, Document, DocumentData, DocumentStore, OrderDirection, Query,
    StoreError,
};

/// Process-local document store. Collections keep insertion order, which is
/// also the tie-break order for queries.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under a caller-chosen id, replacing any previous one.
    pub async fn set(&self, collection: &str, id: &str, data: DocumentData) {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => existing.data = data,
            None => documents.push(Document {
                id: id.to_string(),
                data,
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn add(&self, collection: &str, data: DocumentData) -> Result<String, StoreError> {
        let id = new_document_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document { id: id.clone(), data });
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn update(&self, collection: &str, id: &str, fields: DocumentData) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        document.data.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(documents) = collections.get_mut(collection) {
            documents.retain(|doc| doc.id != id);
        }
        Ok(())
    }

    async fn run_query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut results: Vec<Document> = collections
            .get(&query.collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| query.matches(&doc.data))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order_by {
            // Stable sort: ties follow insertion order in the requested direction
            if order.direction == OrderDirection::Descending {
                results.reverse();
            }
            // matches() guarantees the order field is present
            results.sort_by(|a, b| {
                let ordering = match (a.data.get(&order.field), b.data.get(&order.field)) {
                    (Some(x), Some(y)) => compare_values(x, y),
                    _ => std::cmp::Ordering::Equal,
                };
                match order.direction {
                    OrderDirection::Ascending => ordering,
                    OrderDirection::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
