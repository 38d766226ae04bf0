use serde::{Deserialize, Serialize};

use crate::domain::ContactDraft;

/// Variables handed to the delivery template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_email: String,
    pub subject: String,
}

impl TemplateParams {
    pub fn from_draft(draft: &ContactDraft, recipient: &str) -> Self {
        Self {
            from_name: draft.name.clone(),
            from_email: draft.email.clone(),
            message: draft.message.clone(),
            to_email: recipient.to_string(),
            subject: format!("Portfolio contact from {}", draft.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAuth {
    pub public_key: String,
}

/// Body of `POST /api/v1.0/email/send`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJsSendRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}
