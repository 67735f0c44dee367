//! Response storage

use crate::export::UNKNOWN_FORM_TITLE;
use formsmith_model::{Answers, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Best-effort details about the submitting client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Submissions in the order they arrived
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseCollector {
    responses: Vec<Response>,
}

impl ResponseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted list (order preserved)
    pub fn from_responses(responses: Vec<Response>) -> Self {
        Self { responses }
    }

    /// Record a submission.
    ///
    /// Never rejects: a form that can no longer be found is recorded under
    /// the title "Unknown Form".
    pub fn submit(
        &mut self,
        form_id: &str,
        form_title: Option<&str>,
        answers: Answers,
        metadata: ClientMetadata,
    ) -> &Response {
        let response = Response {
            id: formsmith_model::new_id(),
            form_id: form_id.to_string(),
            form_title: form_title.unwrap_or(UNKNOWN_FORM_TITLE).to_string(),
            responses: answers,
            submitted_at: formsmith_model::now(),
            ip_address: metadata.ip_address,
            user_agent: metadata.user_agent,
        };

        info!(
            response_id = %response.id,
            form_id = %response.form_id,
            answers = response.responses.len(),
            "Recorded form response"
        );

        let index = self.responses.len();
        self.responses.push(response);
        &self.responses[index]
    }

    /// Responses for one form, in submission order
    ///
    /// Items borrow from the collector, not from `form_id`.
    pub fn for_form<'s, 'k>(
        &'s self,
        form_id: &'k str,
    ) -> impl Iterator<Item = &'s Response> + 'k
    where
        's: 'k,
    {
        self.responses.iter().filter(move |r| r.form_id == form_id)
    }

    pub fn count_for_form(&self, form_id: &str) -> usize {
        self.for_form(form_id).count()
    }

    /// Remove one response; returns whether anything was removed
    pub fn delete(&mut self, response_id: &str) -> bool {
        let before = self.responses.len();
        self.responses.retain(|r| r.id != response_id);
        let removed = self.responses.len() != before;
        if !removed {
            debug!(response_id, "Delete ignored: response not found");
        }
        removed
    }

    pub fn get(&self, response_id: &str) -> Option<&Response> {
        self.responses.iter().find(|r| r.id == response_id)
    }

    pub fn all(&self) -> &[Response] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
