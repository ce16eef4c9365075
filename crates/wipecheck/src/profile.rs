use serde::{Deserialize, Serialize};

/// A profile description as submitted by the client. All fields optional;
/// the gate requires at least one of name or handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub platform: Option<String>,
    pub bio: Option<String>,
}

impl ProfileSubmission {
    /// True when neither a name nor a handle carries any content.
    pub fn is_anonymous(&self) -> bool {
        let blank = |f: &Option<String>| f.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.name) && blank(&self.handle)
    }
}

/// A stored profile, keyed by its check id. Immutable after insertion and
/// kept for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub name: Option<String>,
    pub handle: Option<String>,
    pub platform: Option<String>,
    pub bio: Option<String>,
}

impl ProfileRecord {
    pub fn new(id: impl Into<String>, submission: ProfileSubmission) -> Self {
        Self {
            id: id.into(),
            name: submission.name,
            handle: submission.handle,
            platform: submission.platform,
            bio: submission.bio,
        }
    }
}
