//! Integration tests for the `members` table through [`PgStore`].
//!
//! Covers the optional role filter, the single-statement role write, the
//! absence of a cascade from roles, and the email unique constraint.

use agcas_core::types::{Date, DbId};
use agcas_db::models::member::{CreateMember, Member};
use agcas_db::models::role::CreateRole;
use agcas_db::{MemberStore, PgStore, RoleStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(s: &str) -> Date {
    s.parse().unwrap()
}

async fn new_member(store: &PgStore, email: &str, role_id: Option<DbId>) -> Member {
    let mut input = CreateMember::with_email(email);
    input.role_id = role_id;
    store.create_member(&input).await.unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_filters_by_role(pool: PgPool) {
    let store = PgStore::new(pool);
    let staff = store.create_role(&CreateRole::named("Staff")).await.unwrap();
    new_member(&store, "c@agcas.test", Some(staff.id)).await;
    new_member(&store, "a@agcas.test", Some(staff.id)).await;
    new_member(&store, "b@agcas.test", None).await;

    let all: Vec<String> = store
        .list_members(None)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.email)
        .collect();
    assert_eq!(all, vec!["a@agcas.test", "b@agcas.test", "c@agcas.test"]);

    let holders: Vec<String> = store
        .list_members(Some(staff.id))
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.email)
        .collect();
    assert_eq!(holders, vec!["a@agcas.test", "c@agcas.test"]);

    assert!(store.list_members(Some(staff.id + 1000)).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_set_role_writes_and_clears_both_columns(pool: PgPool) {
    let store = PgStore::new(pool);
    let alumni = store.create_role(&CreateRole::named("Alumni")).await.unwrap();
    let member = new_member(&store, "alum@agcas.test", None).await;

    let assigned = store
        .set_member_role(member.id, Some(alumni.id), Some(date("2025-07-01")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.role_id, Some(alumni.id));
    assert_eq!(assigned.role_effective_from, Some(date("2025-07-01")));

    let cleared = store
        .set_member_role(member.id, None, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.role_id, None);
    assert_eq!(cleared.role_effective_from, None);

    let stored = store.find_member(member.id).await.unwrap().unwrap();
    assert_eq!(stored.role_id, None);
    assert_eq!(stored.role_effective_from, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_set_role_on_unknown_member_returns_none(pool: PgPool) {
    let store = PgStore::new(pool);
    let result = store.set_member_role(9999, None, None).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_role_keeps_member_reference(pool: PgPool) {
    let store = PgStore::new(pool);
    let temp = store.create_role(&CreateRole::named("Temp")).await.unwrap();
    let member = new_member(&store, "t@agcas.test", Some(temp.id)).await;
    new_member(&store, "u@agcas.test", Some(temp.id)).await;

    assert!(store.delete_role(temp.id).await.unwrap());

    let stored = store.find_member(member.id).await.unwrap().unwrap();
    assert_eq!(stored.role_id, Some(temp.id));
    assert_eq!(store.count_members_with_role(temp.id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    let store = PgStore::new(pool);
    new_member(&store, "dup@agcas.test", None).await;

    let err = store
        .create_member(&CreateMember::with_email("dup@agcas.test"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_members_email"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_ping(pool: PgPool) {
    let store = PgStore::new(pool);
    store.ping().await.unwrap();
}
