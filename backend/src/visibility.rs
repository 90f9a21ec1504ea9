//! Which templates a caller may see, and the moderation state machine.
//!
//! Visibility: anonymous callers see approved templates only; an
//! authenticated caller additionally sees everything they submitted
//! themselves, whatever its state. Moderation: `approve` and `reject` are
//! the only transitions out of `Unchecked`, and rejecting an ownerless
//! template deletes it outright because there is no owner left to show the
//! rejection to.

use common::model::template::{Sender, Template, TemplateState};
use log::info;

use crate::error::ApiError;
use crate::store::Db;

/// What a reject actually did to the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectOutcome {
    /// Anonymous submission, removed from the store entirely.
    Deleted,
    /// Owned submission, kept with state `Rejected`.
    Rejected,
}

/// Whether `template` may be enumerated or fetched by `caller`
/// (`None` = anonymous).
pub fn is_visible(template: &Template, caller: Option<i64>) -> bool {
    if template.state == TemplateState::Approved {
        return true;
    }
    match (template.sender, caller) {
        (Sender::OwnedBy(owner), Some(user)) => owner == user,
        _ => false,
    }
}

/// All templates visible to `caller`: the approved set, plus the caller's
/// own submissions when authenticated. The union is deduplicated (an
/// approved own template appears once).
pub fn visible_templates(db: &Db, caller: Option<i64>) -> Result<Vec<Template>, ApiError> {
    let mut templates = db.list_by_state(TemplateState::Approved)?;
    if let Some(user_id) = caller {
        for own in db.list_by_sender(user_id)? {
            if !templates.iter().any(|t| t.id == own.id) {
                templates.push(own);
            }
        }
    }
    Ok(templates)
}

/// Marks a template as approved. Re-approving is a no-op, not an error.
pub fn approve(db: &Db, id: i64) -> Result<(), ApiError> {
    if !db.set_template_state(id, TemplateState::Approved)? {
        return Err(ApiError::NotFound);
    }
    info!("template {} approved", id);
    Ok(())
}

/// Rejects a template: deletes it when the sender is anonymous, otherwise
/// marks it `Rejected` so the owner can still see the verdict.
pub fn reject(db: &Db, id: i64) -> Result<RejectOutcome, ApiError> {
    let template = db.get_template(id)?.ok_or(ApiError::NotFound)?;
    let outcome = match template.sender {
        Sender::Anonymous => {
            db.delete_template(id)?;
            RejectOutcome::Deleted
        }
        Sender::OwnedBy(_) => {
            db.set_template_state(id, TemplateState::Rejected)?;
            RejectOutcome::Rejected
        }
    };
    info!("template {} rejected ({:?})", id, outcome);
    Ok(outcome)
}
