//! Action requests and outcomes.
//!
//! An `ActionRequest` is the agent's structured description of a CRUD
//! operation for the caller to perform against its own stores. The agent
//! never executes these itself; it only phrases the outcome afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// What kind of operation an action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    List,
    Status,
}

/// What the operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Campaign,
    Template,
    Audience,
    System,
}

/// Parameters for creating a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCampaignParams {
    pub name: String,
    pub audience_group: String,
    pub template_ref: String,
    /// The schedule phrase as the user gave it, if any.
    pub schedule_phrase: Option<String>,
    /// The phrase resolved to a concrete time, when resolution succeeded.
    pub schedule_at: Option<Timestamp>,
}

/// Parameters for creating a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTemplateParams {
    pub name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl CreateTemplateParams {
    /// Builds template params from a name, subject, and plain-text content,
    /// deriving the HTML body the way the campaign editor does.
    pub fn from_content(name: impl Into<String>, subject: impl Into<String>, content: &str) -> Self {
        let subject = subject.into();
        Self {
            name: name.into(),
            html_body: format!("<h1>{}</h1><p>{}</p>", subject, content),
            text_body: content.to_string(),
            subject,
        }
    }
}

/// Structured description of a CRUD operation the caller should perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionRequest {
    CreateCampaign(CreateCampaignParams),
    CreateTemplate(CreateTemplateParams),
    ListCampaigns,
    ListTemplates,
    AudienceStats,
    SystemStatus,
}

impl ActionRequest {
    /// The operation facet of the `{operation, target, parameters}` triple.
    pub fn operation(&self) -> Operation {
        match self {
            ActionRequest::CreateCampaign(_) | ActionRequest::CreateTemplate(_) => {
                Operation::Create
            }
            ActionRequest::ListCampaigns
            | ActionRequest::ListTemplates
            | ActionRequest::AudienceStats => Operation::List,
            ActionRequest::SystemStatus => Operation::Status,
        }
    }

    /// The target facet of the `{operation, target, parameters}` triple.
    pub fn target(&self) -> Target {
        match self {
            ActionRequest::CreateCampaign(_) | ActionRequest::ListCampaigns => Target::Campaign,
            ActionRequest::CreateTemplate(_) | ActionRequest::ListTemplates => Target::Template,
            ActionRequest::AudienceStats => Target::Audience,
            ActionRequest::SystemStatus => Target::System,
        }
    }
}

/// A campaign record as returned by the campaign store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// A template record as returned by the template store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: String,
    pub name: String,
}

/// Per-group membership counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceGroupStats {
    pub name: String,
    pub member_count: usize,
}

/// Aggregate audience statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceStats {
    pub total_audience: usize,
    pub groups: Vec<AudienceGroupStats>,
}

/// System-wide record counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatusReport {
    pub campaign_count: usize,
    pub template_count: usize,
    pub audience_count: usize,
    pub timestamp: Timestamp,
}

/// The result of the caller executing an `ActionRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    CampaignCreated(CampaignRecord),
    TemplateCreated(TemplateRecord),
    Campaigns(Vec<CampaignRecord>),
    Templates(Vec<TemplateRecord>),
    Audience(AudienceStats),
    System(SystemStatusReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_campaigns_is_list_of_campaign() {
        assert_eq!(ActionRequest::ListCampaigns.operation(), Operation::List);
        assert_eq!(ActionRequest::ListCampaigns.target(), Target::Campaign);
    }

    #[test]
    fn create_campaign_is_create_of_campaign() {
        let action = ActionRequest::CreateCampaign(CreateCampaignParams {
            name: "Fall Promo".to_string(),
            audience_group: "General".to_string(),
            template_ref: "default-template".to_string(),
            schedule_phrase: None,
            schedule_at: None,
        });
        assert_eq!(action.operation(), Operation::Create);
        assert_eq!(action.target(), Target::Campaign);
    }

    #[test]
    fn template_params_derive_html_body() {
        let params = CreateTemplateParams::from_content("welcome", "Welcome!", "Glad you came");
        assert_eq!(params.html_body, "<h1>Welcome!</h1><p>Glad you came</p>");
        assert_eq!(params.text_body, "Glad you came");
    }

    #[test]
    fn action_request_serializes_with_kind_tag() {
        let json = serde_json::to_string(&ActionRequest::SystemStatus).unwrap();
        assert!(json.contains("\"kind\":\"system_status\""));
    }
}
