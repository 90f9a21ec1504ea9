use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moderation state of a template.
///
/// Every template starts out as `Unchecked` (or `NonForPublic` when the
/// submitter asked for a private upload) and only moderator actions move it
/// from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateState {
    /// Freshly submitted, waiting for moderation.
    Unchecked,
    /// Cleared by a moderator; visible to everyone.
    Approved,
    /// Turned down by a moderator; still visible to its owner.
    Rejected,
    /// Private upload, never listed publicly.
    NonForPublic,
}

impl TemplateState {
    /// Stable string form used for database storage.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateState::Unchecked => "unchecked",
            TemplateState::Approved => "approved",
            TemplateState::Rejected => "rejected",
            TemplateState::NonForPublic => "non_for_public",
        }
    }
}

impl FromStr for TemplateState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unchecked" => Ok(TemplateState::Unchecked),
            "approved" => Ok(TemplateState::Approved),
            "rejected" => Ok(TemplateState::Rejected),
            "non_for_public" => Ok(TemplateState::NonForPublic),
            other => Err(format!("unknown template state: {other}")),
        }
    }
}

impl fmt::Display for TemplateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who submitted a template.
///
/// Modeled as a sum type rather than an optional id so that the
/// ownerless-reject branch is exhaustive at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    Anonymous,
    OwnedBy(i64),
}

impl Sender {
    pub fn user_id(self) -> Option<i64> {
        match self {
            Sender::Anonymous => None,
            Sender::OwnedBy(id) => Some(id),
        }
    }

    pub fn from_user_id(id: Option<i64>) -> Sender {
        match id {
            None => Sender::Anonymous,
            Some(id) => Sender::OwnedBy(id),
        }
    }
}

/// A user-submitted image template: its keyword tags, moderation state and
/// (possibly anonymous) sender. The binary asset itself lives in the media
/// store, keyed by the decimal string of `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub state: TemplateState,
    /// Normalized (trimmed, lowercased) keywords in submission order.
    #[serde(rename = "keyWords")]
    pub key_words: Vec<String>,
    pub sender: Sender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_string_round_trip() {
        for state in [
            TemplateState::Unchecked,
            TemplateState::Approved,
            TemplateState::Rejected,
            TemplateState::NonForPublic,
        ] {
            assert_eq!(state.as_str().parse::<TemplateState>(), Ok(state));
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert!("checked".parse::<TemplateState>().is_err());
    }

    #[test]
    fn sender_maps_to_optional_id() {
        assert_eq!(Sender::Anonymous.user_id(), None);
        assert_eq!(Sender::OwnedBy(7).user_id(), Some(7));
        assert_eq!(Sender::from_user_id(Some(7)), Sender::OwnedBy(7));
        assert_eq!(Sender::from_user_id(None), Sender::Anonymous);
    }
}
