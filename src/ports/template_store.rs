//! Template Store Port - Interface for email template persistence.

use async_trait::async_trait;

use crate::domain::conversation::TemplateRecord;

/// Errors that can occur during template store operations
#[derive(Debug, thiserror::Error)]
pub enum TemplateStoreError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("A template named '{0}' already exists")]
    DuplicateName(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// A template to be created.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Port for persisting and listing email templates
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Create a template, returning the stored record.
    ///
    /// # Errors
    /// Returns `DuplicateName` if a template with the same name exists.
    async fn create(&self, template: NewTemplate) -> Result<TemplateRecord, TemplateStoreError>;

    /// List all templates in creation order.
    async fn list(&self) -> Result<Vec<TemplateRecord>, TemplateStoreError>;

    /// Number of stored templates.
    async fn count(&self) -> Result<usize, TemplateStoreError>;
}
