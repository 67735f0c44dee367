//! # Fill Session
//!
//! Tracks one person's progress through a form: answers entered so far, the
//! page being shown and the inline errors next to each field.
//!
//! Advancing a page and submitting are both gated on validation. A failed
//! gate leaves the session where it was (apart from refreshed errors) and
//! hands the report back to the caller.

use crate::{validate_field, validate_form, validate_step, StepValidation, ValidationError};
use formsmith_model::{AnswerValue, Answers, Field, Form, Step};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FillSession {
    form: Form,
    answers: Answers,
    errors: BTreeMap<String, ValidationError>,
    current_step: usize,
}

impl FillSession {
    /// Start filling a snapshot of `form`
    pub fn new(form: Form) -> Self {
        Self {
            form,
            answers: Answers::new(),
            errors: BTreeMap::new(),
            current_step: 0,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answer(&self, field_id: &str) -> Option<&AnswerValue> {
        self.answers.get(field_id)
    }

    /// Inline errors currently shown, keyed by field id
    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    pub fn error(&self, field_id: &str) -> Option<&ValidationError> {
        self.errors.get(field_id)
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.form.total_steps()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.total_steps()
    }

    /// Title/description of the page being shown (multi-step only)
    pub fn current_step_info(&self) -> Option<&Step> {
        if self.form.is_multi_step {
            self.form.steps.get(self.current_step)
        } else {
            None
        }
    }

    /// Fields on the page being shown
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.form.fields_for_step(self.current_step)
    }

    /// Record an answer and re-validate that field.
    ///
    /// Answers for ids that are not on the form are ignored.
    pub fn set_answer(
        &mut self,
        field_id: &str,
        value: impl Into<AnswerValue>,
    ) -> Option<&ValidationError> {
        let field = self.form.field(field_id)?;
        let value = value.into();

        match validate_field(field, Some(&value)) {
            Some(error) => {
                self.errors.insert(field_id.to_string(), error);
            }
            None => {
                self.errors.remove(field_id);
            }
        }

        self.answers.insert(field_id.to_string(), value);
        self.errors.get(field_id)
    }

    /// Advance one page if the current page validates.
    ///
    /// On the last page this validates but stays put.
    pub fn next(&mut self) -> Result<usize, StepValidation> {
        let report = validate_step(&self.form, self.current_step, &self.answers);
        self.refresh_errors(self.current_step, &report);

        if !report.is_valid() {
            debug!(step = self.current_step, errors = report.errors().len(), "Step blocked by validation");
            return Err(report);
        }

        if !self.is_last_step() {
            self.current_step += 1;
        }
        Ok(self.current_step)
    }

    /// Go back one page (no validation)
    pub fn previous(&mut self) -> usize {
        self.current_step = self.current_step.saturating_sub(1);
        self.current_step
    }

    /// Validate everything reachable and hand back the answers.
    ///
    /// On success the session is reset for the next submission. On failure
    /// the session jumps to the earliest page containing an error.
    pub fn submit(&mut self) -> Result<Answers, StepValidation> {
        let report = validate_form(&self.form, &self.answers);

        if !report.is_valid() {
            for step in 0..self.total_steps() {
                let page = validate_step(&self.form, step, &self.answers);
                self.refresh_errors(step, &page);
            }
            if let Some(step) = self.first_invalid_step(&report) {
                self.current_step = step;
            }
            debug!(errors = report.errors().len(), "Submission blocked by validation");
            return Err(report);
        }

        let answers = std::mem::take(&mut self.answers);
        self.reset();
        Ok(answers)
    }

    /// Clear answers and errors and return to the first page
    pub fn reset(&mut self) {
        self.answers.clear();
        self.errors.clear();
        self.current_step = 0;
    }

    fn refresh_errors(&mut self, step: usize, report: &StepValidation) {
        let ids: Vec<String> = self
            .form
            .fields_for_step(step)
            .map(|f| f.id.clone())
            .collect();

        for id in ids {
            match report.error(&id) {
                Some(error) => {
                    self.errors.insert(id, error.clone());
                }
                None => {
                    self.errors.remove(&id);
                }
            }
        }
    }

    fn first_invalid_step(&self, report: &StepValidation) -> Option<usize> {
        if !self.form.is_multi_step {
            return Some(0);
        }
        (0..self.total_steps()).find(|step| {
            self.form
                .fields_for_step(*step)
                .any(|f| report.error(&f.id).is_some())
        })
    }
}
