//! # Post-Effect System
//!
//! Mutations trigger follow-up edits that keep the form consistent.
//!
//! ## Design
//!
//! A post-effect looks at a mutation and the form *before* it is applied and
//! returns secondary mutations. The engine applies the primary mutation and
//! then every secondary one to the same working copy, so the whole cascade
//! becomes one new form and one history entry.
//!
//! - Deleting a step re-points the fields that referenced it by index
//! - Turning on multi-step assigns unplaced fields to the first step

use crate::mutations::{Mutation, MutationError};
use formsmith_model::{FieldPatch, Form};
use tracing::debug;

/// Post-effect that can be triggered by a mutation
pub trait PostEffect: std::fmt::Debug + Send {
    /// Analyze the mutation against the pre-mutation form
    fn analyze(&self, mutation: &Mutation, before: &Form) -> Vec<Mutation>;
}

fn set_step(field_id: &str, step: usize) -> Mutation {
    Mutation::UpdateField {
        field_id: field_id.to_string(),
        updates: FieldPatch {
            step: Some(Some(step)),
            ..FieldPatch::default()
        },
    }
}

/// Keep field step indices aligned after a step is removed.
///
/// Fields on the removed step move to the step before it (the first step
/// when the first one is removed); fields on later steps shift down by one.
#[derive(Debug)]
pub struct RepointStepAssignments;

impl PostEffect for RepointStepAssignments {
    fn analyze(&self, mutation: &Mutation, before: &Form) -> Vec<Mutation> {
        let Mutation::DeleteStep { step_id } = mutation else {
            return vec![];
        };
        let Some(removed) = before.step_index(step_id) else {
            return vec![];
        };

        before
            .fields
            .iter()
            .filter_map(|field| {
                let step = field.step?;
                let target = if step == removed {
                    removed.saturating_sub(1)
                } else if step > removed {
                    step - 1
                } else {
                    return None;
                };
                (target != step).then(|| set_step(&field.id, target))
            })
            .collect()
    }
}

/// Place unassigned fields on the first step when multi-step is enabled
#[derive(Debug)]
pub struct AssignUnplacedFields;

impl PostEffect for AssignUnplacedFields {
    fn analyze(&self, mutation: &Mutation, before: &Form) -> Vec<Mutation> {
        match mutation {
            Mutation::SetMultiStep { enabled: true } if !before.is_multi_step => before
                .fields
                .iter()
                .filter(|f| f.step.is_none())
                .map(|f| set_step(&f.id, 0))
                .collect(),
            _ => vec![],
        }
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![
                Box::new(RepointStepAssignments),
                Box::new(AssignUnplacedFields),
            ],
        }
    }

    /// Analyze a mutation and generate all secondary mutations
    pub fn analyze(&self, mutation: &Mutation, before: &Form) -> Vec<Mutation> {
        let mut secondary_mutations = Vec::new();

        for effect in &self.effects {
            let mut effect_mutations = effect.analyze(mutation, before);
            secondary_mutations.append(&mut effect_mutations);
        }

        secondary_mutations
    }

    /// Apply a mutation with all its post-effects.
    ///
    /// Returns every mutation applied, primary first. If the primary
    /// mutation fails the form is left untouched.
    pub fn apply_with_effects(
        &self,
        mutation: &Mutation,
        form: &mut Form,
    ) -> Result<Vec<Mutation>, MutationError> {
        mutation.validate(form)?;
        let secondary = self.analyze(mutation, form);

        mutation.apply(form)?;
        let mut applied_mutations = vec![mutation.clone()];

        for secondary_mutation in secondary {
            secondary_mutation.apply(form)?;
            debug!(
                primary = mutation.name(),
                secondary = secondary_mutation.name(),
                "Applied post-effect"
            );
            applied_mutations.push(secondary_mutation);
        }

        Ok(applied_mutations)
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
