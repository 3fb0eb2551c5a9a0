//! ExecuteAction - Dispatches an agent-proposed action against the stores.

use std::sync::Arc;

use crate::domain::conversation::{ActionOutcome, ActionRequest, SystemStatusReport};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{
    AudienceStore, AudienceStoreError, CampaignStore, CampaignStoreError, NewCampaign,
    NewTemplate, TemplateStore, TemplateStoreError,
};

/// Handler that executes action requests.
pub struct ExecuteActionHandler {
    campaigns: Arc<dyn CampaignStore>,
    templates: Arc<dyn TemplateStore>,
    audience: Arc<dyn AudienceStore>,
}

impl ExecuteActionHandler {
    pub fn new(
        campaigns: Arc<dyn CampaignStore>,
        templates: Arc<dyn TemplateStore>,
        audience: Arc<dyn AudienceStore>,
    ) -> Self {
        Self {
            campaigns,
            templates,
            audience,
        }
    }

    pub async fn handle(&self, action: &ActionRequest) -> Result<ActionOutcome, DomainError> {
        match action {
            ActionRequest::CreateCampaign(params) => {
                let record = self
                    .campaigns
                    .create(NewCampaign {
                        name: params.name.clone(),
                        audience_group: params.audience_group.clone(),
                        template_ref: params.template_ref.clone(),
                        scheduled_at: params.schedule_at,
                    })
                    .await
                    .map_err(campaign_error)?;
                Ok(ActionOutcome::CampaignCreated(record))
            }
            ActionRequest::CreateTemplate(params) => {
                let record = self
                    .templates
                    .create(NewTemplate {
                        name: params.name.clone(),
                        subject: params.subject.clone(),
                        html_body: params.html_body.clone(),
                        text_body: params.text_body.clone(),
                    })
                    .await
                    .map_err(template_error)?;
                Ok(ActionOutcome::TemplateCreated(record))
            }
            ActionRequest::ListCampaigns => {
                let campaigns = self.campaigns.list().await.map_err(campaign_error)?;
                Ok(ActionOutcome::Campaigns(campaigns))
            }
            ActionRequest::ListTemplates => {
                let templates = self.templates.list().await.map_err(template_error)?;
                Ok(ActionOutcome::Templates(templates))
            }
            ActionRequest::AudienceStats => {
                let stats = self.audience.stats().await.map_err(audience_error)?;
                Ok(ActionOutcome::Audience(stats))
            }
            ActionRequest::SystemStatus => {
                let campaign_count = self.campaigns.count().await.map_err(campaign_error)?;
                let template_count = self.templates.count().await.map_err(template_error)?;
                let audience_count = self.audience.member_count().await.map_err(audience_error)?;
                Ok(ActionOutcome::System(SystemStatusReport {
                    campaign_count,
                    template_count,
                    audience_count,
                    timestamp: Timestamp::now(),
                }))
            }
        }
    }
}

fn campaign_error(err: CampaignStoreError) -> DomainError {
    let code = match err {
        CampaignStoreError::NotFound(_) => ErrorCode::CampaignNotFound,
        CampaignStoreError::DuplicateName(_) => ErrorCode::DuplicateName,
        CampaignStoreError::StorageError(_) => ErrorCode::StoreUnavailable,
    };
    DomainError::new(code, err.to_string())
}

fn template_error(err: TemplateStoreError) -> DomainError {
    let code = match err {
        TemplateStoreError::NotFound(_) => ErrorCode::TemplateNotFound,
        TemplateStoreError::DuplicateName(_) => ErrorCode::DuplicateName,
        TemplateStoreError::StorageError(_) => ErrorCode::StoreUnavailable,
    };
    DomainError::new(code, err.to_string())
}

fn audience_error(err: AudienceStoreError) -> DomainError {
    let code = match err {
        AudienceStoreError::GroupNotFound(_) => ErrorCode::ValidationFailed,
        AudienceStoreError::StorageError(_) => ErrorCode::StoreUnavailable,
    };
    DomainError::new(code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAudienceStore, InMemoryCampaignStore, InMemoryTemplateStore,
    };
    use crate::domain::conversation::{CreateCampaignParams, CreateTemplateParams};

    fn handler() -> ExecuteActionHandler {
        ExecuteActionHandler::new(
            Arc::new(InMemoryCampaignStore::new()),
            Arc::new(InMemoryTemplateStore::new()),
            Arc::new(InMemoryAudienceStore::seeded()),
        )
    }

    #[tokio::test]
    async fn create_campaign_then_status_counts_it() {
        let handler = handler();
        let action = ActionRequest::CreateCampaign(CreateCampaignParams {
            name: "Fall Promo".to_string(),
            audience_group: "General".to_string(),
            template_ref: "default-template".to_string(),
            schedule_phrase: None,
            schedule_at: None,
        });
        let outcome = handler.handle(&action).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::CampaignCreated(_)));

        let status = handler.handle(&ActionRequest::SystemStatus).await.unwrap();
        match status {
            ActionOutcome::System(report) => {
                assert_eq!(report.campaign_count, 1);
                assert_eq!(report.template_count, 0);
                assert_eq!(report.audience_count, 455);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn duplicate_template_surfaces_duplicate_code() {
        let handler = handler();
        let action = ActionRequest::CreateTemplate(CreateTemplateParams::from_content(
            "welcome", "Hi", "Hello there",
        ));
        handler.handle(&action).await.unwrap();
        let err = handler.handle(&action).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateName);
    }

    #[tokio::test]
    async fn list_actions_return_collections() {
        let handler = handler();
        let campaigns = handler.handle(&ActionRequest::ListCampaigns).await.unwrap();
        assert!(matches!(campaigns, ActionOutcome::Campaigns(v) if v.is_empty()));
        let audience = handler.handle(&ActionRequest::AudienceStats).await.unwrap();
        assert!(matches!(audience, ActionOutcome::Audience(s) if s.groups.len() == 3));
    }
}
