use std::sync::Arc;

use apprelay_core::AppError;
use apprelay_domain::{ApprovalSubject, PendingApproval, SubjectType};
use thiserror::Error;

use crate::relay_ports::TemplateStore;

mod placeholders;

pub use placeholders::LINE_SEPARATOR;

/// Content rendering failures for one pending approval.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Subject-type tag outside the renderer's closed set.
    #[error("unsupported approval template type '{0}'")]
    UnsupportedTemplate(String),

    /// Backing template resource is absent.
    #[error("template for '{0}' does not exist")]
    TemplateNotFound(&'static str),

    /// Payload does not match the subject type's field set.
    #[error("{0}")]
    InvalidPayload(String),

    /// Template store failed for a reason other than absence.
    #[error("failed to load template: {0}")]
    TemplateUnreadable(AppError),
}

/// Renders the human-readable body of an approval draft.
#[derive(Clone)]
pub struct ContentRenderer {
    templates: Arc<dyn TemplateStore>,
}

impl ContentRenderer {
    /// Creates a renderer backed by a template store.
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateStore>) -> Self {
        Self { templates }
    }

    /// Renders the approval body with the template selected by its subject type.
    pub async fn render(&self, approval: &PendingApproval) -> Result<String, RenderError> {
        let subject_type = SubjectType::from_tag(approval.subject_type.as_str())
            .ok_or_else(|| RenderError::UnsupportedTemplate(approval.subject_type.clone()))?;

        let template = self
            .templates
            .load_template(subject_type)
            .await
            .map_err(RenderError::TemplateUnreadable)?
            .ok_or(RenderError::TemplateNotFound(subject_type.as_tag()))?;

        let subject = ApprovalSubject::parse(subject_type, &approval.contents)
            .map_err(|error| RenderError::InvalidPayload(error.to_string()))?;

        Ok(placeholders::render_subject(&template, approval, &subject))
    }
}
