//! Role defaults, field rules, and the view of a role the evaluator needs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Landing page used when a role does not set one, or when a member has no role.
pub const DEFAULT_LANDING_PAGE: &str = "Events";

/// Maximum length of a role name.
pub const MAX_ROLE_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Layout theme
// ---------------------------------------------------------------------------

/// Portal chrome applied for members holding a role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutTheme {
    #[default]
    Default,
    NewHeader,
    BareHome,
}

impl LayoutTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutTheme::Default => "default",
            LayoutTheme::NewHeader => "new_header",
            LayoutTheme::BareHome => "bare_home",
        }
    }

    /// Parse a stored theme value. Unknown values fall back to
    /// [`LayoutTheme::Default`] so a stale row never breaks page rendering.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "new_header" => LayoutTheme::NewHeader,
            "bare_home" => LayoutTheme::BareHome,
            _ => LayoutTheme::Default,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator view
// ---------------------------------------------------------------------------

/// The fields of a role the feature gate evaluator reads.
///
/// Implemented by the persisted role row so the evaluator stays independent
/// of the storage layer.
pub trait RoleGrants {
    /// Feature identifiers this role may not access.
    fn excluded_features(&self) -> &[String];
    fn is_admin(&self) -> bool;
    fn default_landing_page(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a role name: required, non-blank, bounded length.
///
/// Returns the trimmed name to persist.
pub fn validate_role_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Role name is required".to_string()));
    }
    if trimmed.chars().count() > MAX_ROLE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Role name must be at most {MAX_ROLE_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalize a landing page value, substituting the default for blanks.
pub fn normalize_landing_page(page: Option<&str>) -> String {
    match page.map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => DEFAULT_LANDING_PAGE.to_string(),
    }
}

/// Normalize an exclusion list into set form: trimmed, blanks dropped,
/// deduplicated, sorted.
pub fn normalize_feature_set<I, S>(features: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set: Vec<String> = features
        .into_iter()
        .map(|f| f.as_ref().trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    set.sort();
    set.dedup();
    set
}
