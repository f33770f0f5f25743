//! Role entity model and DTOs.

use agcas_core::roles::{LayoutTheme, RoleGrants, DEFAULT_LANDING_PAGE};
use agcas_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Sorted, deduplicated feature identifiers this role may not access.
    pub excluded_features: Vec<String>,
    pub is_default: bool,
    pub is_admin: bool,
    pub show_tours: bool,
    pub default_landing_page: String,
    /// One of `default`, `new_header`, `bare_home`.
    pub layout_theme: String,
    pub requires_effective_from_date: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Role {
    pub fn theme(&self) -> LayoutTheme {
        LayoutTheme::from_stored(&self.layout_theme)
    }
}

impl RoleGrants for Role {
    fn excluded_features(&self) -> &[String] {
        &self.excluded_features
    }

    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn default_landing_page(&self) -> &str {
        &self.default_landing_page
    }
}

fn default_true() -> bool {
    true
}

/// Keep an explicit `null` distinct from an absent field: absent is `None`,
/// `null` is `Some(None)`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// DTO for creating a new role.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRole {
    #[validate(length(max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub excluded_features: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_true")]
    pub show_tours: bool,
    /// Blank or missing means `"Events"`.
    #[validate(length(max = 100))]
    pub default_landing_page: Option<String>,
    #[serde(default)]
    pub layout_theme: LayoutTheme,
    #[serde(default)]
    pub requires_effective_from_date: bool,
}

impl CreateRole {
    /// A role with every optional field at its default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            excluded_features: Vec::new(),
            is_default: false,
            is_admin: false,
            show_tours: true,
            default_landing_page: None,
            layout_theme: LayoutTheme::Default,
            requires_effective_from_date: false,
        }
    }

    /// Landing page to persist.
    pub fn landing_page(&self) -> &str {
        self.default_landing_page
            .as_deref()
            .unwrap_or(DEFAULT_LANDING_PAGE)
    }
}

/// DTO for updating an existing role. All fields are optional; absent
/// fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRole {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    /// `Some(None)` (an explicit `null`) clears the description.
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 2000))]
    pub description: Option<Option<String>>,
    #[validate(length(max = 500))]
    pub excluded_features: Option<Vec<String>>,
    pub is_default: Option<bool>,
    pub is_admin: Option<bool>,
    pub show_tours: Option<bool>,
    #[validate(length(max = 100))]
    pub default_landing_page: Option<String>,
    pub layout_theme: Option<LayoutTheme>,
    pub requires_effective_from_date: Option<bool>,
}

/// Result of deleting a role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDeletion {
    pub role_id: DbId,
    /// Members still pointing at the deleted role. They are not reassigned
    /// and resolve as having no role.
    pub orphaned_members: i64,
}
