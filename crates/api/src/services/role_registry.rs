//! Role registry: validated CRUD over roles.

use agcas_core::error::CoreError;
use agcas_core::features::unknown_feature_ids;
use agcas_core::roles::{normalize_feature_set, normalize_landing_page, validate_role_name};
use agcas_core::types::DbId;
use agcas_db::models::role::{CreateRole, Role, RoleDeletion, UpdateRole};
use agcas_db::Store;
use validator::Validate;

use crate::error::AppResult;

/// Validate and normalize `input`, then insert it.
///
/// When the new role is the default, the flag is cleared on every other
/// role in a second write.
pub async fn create_role(store: &dyn Store, mut input: CreateRole) -> AppResult<Role> {
    input.validate()?;
    input.name = validate_role_name(&input.name)?;
    input.excluded_features = normalize_feature_set(&input.excluded_features);
    input.default_landing_page = Some(normalize_landing_page(
        input.default_landing_page.as_deref(),
    ));
    warn_unknown_features(&input.excluded_features);

    let role = store.create_role(&input).await?;
    if role.is_default {
        demote_other_defaults(store, role.id).await?;
    }

    tracing::info!(role_id = role.id, name = %role.name, "Role created");
    Ok(role)
}

/// Fetch a single role.
pub async fn get_role(store: &dyn Store, id: DbId) -> AppResult<Role> {
    Ok(store
        .find_role(id)
        .await?
        .ok_or(CoreError::role_not_found(id))?)
}

/// All roles, sorted by name.
pub async fn list_roles(store: &dyn Store) -> AppResult<Vec<Role>> {
    Ok(store.list_roles().await?)
}

/// Merge `patch` into the stored role.
pub async fn update_role(store: &dyn Store, id: DbId, mut patch: UpdateRole) -> AppResult<Role> {
    patch.validate()?;
    if let Some(name) = &patch.name {
        patch.name = Some(validate_role_name(name)?);
    }
    if let Some(features) = &patch.excluded_features {
        let features = normalize_feature_set(features);
        warn_unknown_features(&features);
        patch.excluded_features = Some(features);
    }
    if let Some(page) = &patch.default_landing_page {
        patch.default_landing_page = Some(normalize_landing_page(Some(page.as_str())));
    }

    let role = store
        .update_role(id, &patch)
        .await?
        .ok_or(CoreError::role_not_found(id))?;
    if patch.is_default == Some(true) {
        demote_other_defaults(store, role.id).await?;
    }

    tracing::info!(role_id = role.id, "Role updated");
    Ok(role)
}

/// Delete a role. Members that reference it keep their `role_id`.
pub async fn delete_role(store: &dyn Store, id: DbId) -> AppResult<RoleDeletion> {
    if !store.delete_role(id).await? {
        return Err(CoreError::role_not_found(id).into());
    }

    let orphaned_members = store.count_members_with_role(id).await?;
    if orphaned_members > 0 {
        tracing::warn!(
            role_id = id,
            orphaned_members,
            "Deleted role is still referenced by members; they now resolve as having no role",
        );
    } else {
        tracing::info!(role_id = id, "Role deleted");
    }

    Ok(RoleDeletion {
        role_id: id,
        orphaned_members,
    })
}

async fn demote_other_defaults(store: &dyn Store, keep_id: DbId) -> AppResult<()> {
    let demoted = store.clear_default_except(keep_id).await?;
    if demoted > 0 {
        tracing::info!(role_id = keep_id, demoted, "Default role changed");
    }
    Ok(())
}

fn warn_unknown_features(features: &[String]) {
    let unknown = unknown_feature_ids(features);
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "Role excludes feature ids missing from the catalog");
    }
}
