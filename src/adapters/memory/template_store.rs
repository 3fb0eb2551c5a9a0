//! In-Memory Template Store Adapter

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::conversation::TemplateRecord;
use crate::ports::{NewTemplate, TemplateStore, TemplateStoreError};

/// In-memory storage for email templates
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: Arc<RwLock<Vec<TemplateRecord>>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a starter template so fresh systems have a usable default.
    pub async fn with_default_template(self) -> Self {
        {
            let mut templates = self.templates.write().await;
            templates.push(TemplateRecord {
                id: Uuid::new_v4().to_string(),
                name: "default-template".to_string(),
            });
        }
        self
    }

    /// Clear all stored templates (useful for tests)
    pub async fn clear(&self) {
        self.templates.write().await.clear();
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn create(&self, template: NewTemplate) -> Result<TemplateRecord, TemplateStoreError> {
        let mut templates = self.templates.write().await;
        if templates
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(&template.name))
        {
            return Err(TemplateStoreError::DuplicateName(template.name));
        }

        let record = TemplateRecord {
            id: Uuid::new_v4().to_string(),
            name: template.name,
        };
        templates.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<TemplateRecord>, TemplateStoreError> {
        Ok(self.templates.read().await.clone())
    }

    async fn count(&self) -> Result<usize, TemplateStoreError> {
        Ok(self.templates.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_template(name: &str) -> NewTemplate {
        NewTemplate {
            name: name.to_string(),
            subject: "Hello".to_string(),
            html_body: "<h1>Hello</h1><p>Hi</p>".to_string(),
            text_body: "Hi".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_lists() {
        let store = InMemoryTemplateStore::new();
        let record = store.create(new_template("welcome")).await.unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeded_store_holds_default_template() {
        let store = InMemoryTemplateStore::new().with_default_template().await;
        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["default-template"]);
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let store = InMemoryTemplateStore::new();
        store.create(new_template("welcome")).await.unwrap();
        let err = store.create(new_template("Welcome")).await.unwrap_err();
        assert!(matches!(err, TemplateStoreError::DuplicateName(_)));
    }
}
