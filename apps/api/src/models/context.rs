use serde::{Deserialize, Serialize};

/// Work-authorization status as selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaStatus {
    UsCitizen,
    GreenCard,
    H1b,
    OptCpt,
    Other,
    PreferNotToSay,
}

/// Optional caller-supplied context about the candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub visa_status: Option<VisaStatus>,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub years_experience: Option<u32>,
}
