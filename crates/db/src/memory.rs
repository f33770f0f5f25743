//! In-process [`Store`](crate::Store) implementation.
//!
//! Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
//! shared across the application. Mirrors the PostgreSQL semantics the
//! service relies on: generated ids, name-sorted role listing, no cascade
//! from roles to members, unique member emails. The only error it returns is
//! the unique violation on `uq_members_email`, shaped like the one PostgreSQL
//! reports.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use agcas_core::types::{Date, DbId, Timestamp};
use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::RwLock;

use crate::models::member::{CreateMember, Member};
use crate::models::role::{CreateRole, Role, UpdateRole};
use crate::store::{MemberStore, RoleStore};

#[derive(Default)]
struct Tables {
    roles: BTreeMap<DbId, Role>,
    members: BTreeMap<DbId, Member>,
    next_role_id: DbId,
    next_member_id: DbId,
}

/// Store kept entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> Timestamp {
    chrono::Utc::now()
}

const MEMBERS_EMAIL_CONSTRAINT: &str = "uq_members_email";

/// SQLSTATE `23505` raised by the in-memory tables.
#[derive(Debug)]
struct UniqueViolation {
    constraint: &'static str,
    message: String,
}

impl UniqueViolation {
    fn members_email(email: &str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(UniqueViolation {
            constraint: MEMBERS_EMAIL_CONSTRAINT,
            message: format!(
                "duplicate key value violates unique constraint \"{MEMBERS_EMAIL_CONSTRAINT}\": email={email}"
            ),
        }))
    }
}

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UniqueViolation {}

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn create_role(&self, input: &CreateRole) -> Result<Role, sqlx::Error> {
        let mut tables = self.tables.write().await;
        tables.next_role_id += 1;
        let created_at = now();
        let role = Role {
            id: tables.next_role_id,
            name: input.name.clone(),
            description: input.description.clone(),
            excluded_features: input.excluded_features.clone(),
            is_default: input.is_default,
            is_admin: input.is_admin,
            show_tours: input.show_tours,
            default_landing_page: input.landing_page().to_string(),
            layout_theme: input.layout_theme.as_str().to_string(),
            requires_effective_from_date: input.requires_effective_from_date,
            created_at,
            updated_at: created_at,
        };
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn find_role(&self, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        Ok(self.tables.read().await.roles.get(&id).cloned())
    }

    async fn list_roles(&self) -> Result<Vec<Role>, sqlx::Error> {
        let mut roles: Vec<Role> = self.tables.read().await.roles.values().cloned().collect();
        roles.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(roles)
    }

    async fn update_role(
        &self,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<Role>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let Some(role) = tables.roles.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = &input.name {
            role.name = name.clone();
        }
        if let Some(description) = &input.description {
            role.description = description.clone();
        }
        if let Some(features) = &input.excluded_features {
            role.excluded_features = features.clone();
        }
        if let Some(v) = input.is_default {
            role.is_default = v;
        }
        if let Some(v) = input.is_admin {
            role.is_admin = v;
        }
        if let Some(v) = input.show_tours {
            role.show_tours = v;
        }
        if let Some(page) = &input.default_landing_page {
            role.default_landing_page = page.clone();
        }
        if let Some(theme) = input.layout_theme {
            role.layout_theme = theme.as_str().to_string();
        }
        if let Some(v) = input.requires_effective_from_date {
            role.requires_effective_from_date = v;
        }
        role.updated_at = now();

        Ok(Some(role.clone()))
    }

    async fn delete_role(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.tables.write().await.roles.remove(&id).is_some())
    }

    async fn clear_default_except(&self, keep_id: DbId) -> Result<u64, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let mut cleared = 0;
        for role in tables.roles.values_mut() {
            if role.is_default && role.id != keep_id {
                role.is_default = false;
                role.updated_at = now();
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn create_member(&self, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let mut tables = self.tables.write().await;
        if tables.members.values().any(|m| m.email == input.email) {
            return Err(UniqueViolation::members_email(&input.email));
        }
        tables.next_member_id += 1;
        let created_at = now();
        let member = Member {
            id: tables.next_member_id,
            email: input.email.clone(),
            full_name: input.full_name.clone(),
            role_id: input.role_id,
            role_effective_from: input.role_effective_from,
            created_at,
            updated_at: created_at,
        };
        tables.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn find_member(&self, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        Ok(self.tables.read().await.members.get(&id).cloned())
    }

    async fn list_members(&self, role_id: Option<DbId>) -> Result<Vec<Member>, sqlx::Error> {
        let mut members: Vec<Member> = self
            .tables
            .read()
            .await
            .members
            .values()
            .filter(|m| role_id.is_none() || m.role_id == role_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(members)
    }

    async fn set_member_role(
        &self,
        id: DbId,
        role_id: Option<DbId>,
        role_effective_from: Option<Date>,
    ) -> Result<Option<Member>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        Ok(tables.members.get_mut(&id).map(|member| {
            member.role_id = role_id;
            member.role_effective_from = role_effective_from;
            member.updated_at = now();
            member.clone()
        }))
    }

    async fn count_members_with_role(&self, role_id: DbId) -> Result<i64, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .filter(|m| m.role_id == Some(role_id))
            .count() as i64)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
