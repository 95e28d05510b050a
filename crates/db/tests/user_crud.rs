//! Integration tests for user CRUD, soft delete, and pagination.

use sqlx::PgPool;

use agentdeck_db::models::user::{CreateUser, UpdateUser};
use agentdeck_db::repositories::UserRepo;

fn new_user(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$fake$hash".to_string(),
        is_superuser: false,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_and_find_roundtrip(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("Ada", "ada@example.com"))
        .await
        .unwrap();

    let by_id = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "ada@example.com");
    assert!(!by_id.is_superuser);
    assert!(!by_id.is_deleted);

    let by_email = UserRepo::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("Ada", "ada@example.com")).await.unwrap();

    let err = UserRepo::create(&pool, &new_user("Imposter", "ada@example.com"))
        .await
        .expect_err("duplicate email must fail");

    let sqlx::Error::Database(db_err) = err else {
        panic!("expected a database error, got {err:?}");
    };
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "./migrations")]
async fn update_applies_only_provided_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Ada", "ada@example.com")).await.unwrap();

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.email, "ada@example.com", "email must be untouched");
    assert!(updated.updated_at >= user.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn soft_delete_hides_user_from_login_lookup(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Ada", "ada@example.com")).await.unwrap();

    assert!(UserRepo::soft_delete(&pool, user.id).await.unwrap());
    // Second delete finds no live row.
    assert!(!UserRepo::soft_delete(&pool, user.id).await.unwrap());

    // The login lookup no longer sees the account...
    assert!(UserRepo::find_by_email(&pool, "ada@example.com").await.unwrap().is_none());

    // ...but the row itself survives, flagged deleted.
    let row = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(row.is_deleted);
    assert!(row.deleted_at.is_some());

    // Updates only touch live rows.
    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            name: Some("ghost".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(updated.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_paginates_and_filters_deleted(pool: PgPool) {
    for i in 0..5 {
        UserRepo::create(&pool, &new_user(&format!("u{i}"), &format!("u{i}@example.com")))
            .await
            .unwrap();
    }
    let victim = UserRepo::find_by_email(&pool, "u0@example.com").await.unwrap().unwrap();
    UserRepo::soft_delete(&pool, victim.id).await.unwrap();

    assert_eq!(UserRepo::count(&pool, false).await.unwrap(), 4);
    assert_eq!(UserRepo::count(&pool, true).await.unwrap(), 5);

    let page = UserRepo::list(&pool, 2, 0, false).await.unwrap();
    assert_eq!(page.len(), 2);

    let rest = UserRepo::list(&pool, 10, 2, false).await.unwrap();
    assert_eq!(rest.len(), 2);

    let everyone = UserRepo::list(&pool, 10, 0, true).await.unwrap();
    assert_eq!(everyone.len(), 5);
}
