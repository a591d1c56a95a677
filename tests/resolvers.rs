mod common;

use scrumer_backend::models::task::{DEFAULT_PRIORITY, DEFAULT_STATUS};
use scrumer_backend::resolvers::error::ResolverError;
use scrumer_backend::resolvers::inputs::{
    CreateProjectInput, CreateUserInput, MembershipInput, UpdateProjectInput, UpdateUserInput,
};
use scrumer_backend::resolvers::{membership, projects, sprints, tasks, users};
use scrumer_backend::models::user::User;
use scrumer_backend::store::{self, transaction::WriteTransaction};

use common::{insert_project, insert_sprint, insert_task, insert_user, test_pool};

fn new_user(username: &str, email: &str) -> CreateUserInput {
    CreateUserInput::new(username.into(), email.into(), "hunter2".into()).unwrap()
}

fn member(project_id: i64, user_id: i64) -> MembershipInput {
    MembershipInput { project_id, user_id }
}

#[tokio::test]
async fn created_user_reads_back_unchanged() {
    let pool = test_pool().await;

    let created = users::create(&pool, new_user("alice", "alice@x.com")).await.unwrap();
    assert!(created.base.id > 0);
    assert!(created.base.deleted_at.is_none());

    let fetched = users::get(&pool, created.base.id).await.unwrap();
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.email, "alice@x.com");
    assert_eq!(fetched.password, "hunter2");
    assert_eq!(fetched.base, created.base);
}

#[tokio::test]
async fn duplicate_username_or_email_is_rejected_by_the_store() {
    let pool = test_pool().await;
    users::create(&pool, new_user("alice", "alice@x.com")).await.unwrap();

    let err = users::create(&pool, new_user("alice", "other@x.com")).await.unwrap_err();
    assert!(matches!(err, ResolverError::Creation { entity: "user", .. }));

    let err = users::create(&pool, new_user("alicia", "alice@x.com")).await.unwrap_err();
    assert_eq!(err.code(), "CREATION_ERROR");

    let all = users::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn update_changes_only_the_given_field() {
    let pool = test_pool().await;
    let created = users::create(&pool, new_user("alice", "alice@x.com")).await.unwrap();
    let id = created.base.id.to_string().into();

    let updated = users::update(&pool, UpdateUserInput::new(&id, Some("X".into()), None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(updated.username, "X");

    let fetched = users::get(&pool, created.base.id).await.unwrap();
    assert_eq!(fetched.username, "X");
    assert_eq!(fetched.email, created.email);
    assert_eq!(fetched.password, created.password);
    assert_eq!(fetched.base.created_at, created.base.created_at);
    assert!(fetched.base.updated_at >= created.base.updated_at);
}

#[tokio::test]
async fn update_of_missing_user_is_not_found() {
    let pool = test_pool().await;
    let id = "41".to_string().into();

    let err = users::update(&pool, UpdateUserInput::new(&id, Some("ghost".into()), None, None).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolverError::NotFound { entity: "user", id: 41 }));
}

#[tokio::test]
async fn update_into_a_taken_username_fails_and_keeps_the_row() {
    let pool = test_pool().await;
    users::create(&pool, new_user("alice", "alice@x.com")).await.unwrap();
    let bob = users::create(&pool, new_user("bob", "bob@x.com")).await.unwrap();
    let id = bob.base.id.to_string().into();

    let err = users::update(&pool, UpdateUserInput::new(&id, Some("alice".into()), None, None).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "UPDATE_ERROR");
    assert_eq!(users::get(&pool, bob.base.id).await.unwrap().username, "bob");

    // The failed transaction was rolled back, so the next write can start one.
    let renamed = users::update(&pool, UpdateUserInput::new(&id, Some("robert".into()), None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(renamed.username, "robert");
}

#[tokio::test]
async fn deleted_user_disappears_from_reads() {
    let pool = test_pool().await;
    let alice = users::create(&pool, new_user("alice", "alice@x.com")).await.unwrap();
    users::create(&pool, new_user("bob", "bob@x.com")).await.unwrap();

    assert!(users::delete(&pool, alice.base.id).await.unwrap());

    let err = users::get(&pool, alice.base.id).await.unwrap_err();
    assert!(matches!(err, ResolverError::NotFound { .. }));

    let remaining: Vec<String> = users::list(&pool).await.unwrap().into_iter().map(|u| u.username).collect();
    assert_eq!(remaining, vec!["bob".to_string()]);

    // The unique index only covers live rows.
    users::create(&pool, new_user("alice", "alice@x.com")).await.unwrap();
}

#[tokio::test]
async fn deleting_an_unknown_id_still_reports_success() {
    let pool = test_pool().await;
    assert!(users::delete(&pool, 999).await.unwrap());
    assert!(projects::delete(&pool, 999).await.unwrap());
}

#[tokio::test]
async fn project_crud_mirrors_users() {
    let pool = test_pool().await;
    let input = CreateProjectInput::new("Alpha".into(), Some("first".into())).unwrap();
    let alpha = projects::create(&pool, input).await.unwrap();
    assert_eq!(alpha.description.as_deref(), Some("first"));

    let err = projects::create(&pool, CreateProjectInput::new("Alpha".into(), None).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CREATION_ERROR");

    let id = alpha.base.id.to_string().into();
    let renamed = projects::update(&pool, UpdateProjectInput::new(&id, Some("Beta".into()), None).unwrap())
        .await
        .unwrap();
    assert_eq!(renamed.name, "Beta");
    assert_eq!(renamed.description.as_deref(), Some("first"));

    assert!(projects::delete(&pool, alpha.base.id).await.unwrap());
    assert!(projects::list(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn adding_a_member_twice_keeps_one_membership() {
    let pool = test_pool().await;
    let project = insert_project(&pool, "Alpha").await;
    let bob = insert_user(&pool, "bob").await;

    membership::add_user(&pool, member(project.base.id, bob.base.id)).await.unwrap();
    let returned = membership::add_user(&pool, member(project.base.id, bob.base.id)).await.unwrap();
    assert_eq!(returned.base.id, project.base.id);

    let loaded = projects::get(&pool, project.base.id).await.unwrap();
    let members: Vec<String> = loaded
        .preloaded_users
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(members, vec!["bob".to_string()]);

    let listed = users::list(&pool).await.unwrap();
    let bob_projects = listed[0].preloaded_projects.as_ref().unwrap();
    assert_eq!(bob_projects.len(), 1);
    assert_eq!(bob_projects[0].name, "Alpha");
}

#[tokio::test]
async fn removing_a_pair_that_was_never_added_is_a_no_op() {
    let pool = test_pool().await;
    let project = insert_project(&pool, "Alpha").await;
    let bob = insert_user(&pool, "bob").await;
    let carol = insert_user(&pool, "carol").await;
    membership::add_user(&pool, member(project.base.id, carol.base.id)).await.unwrap();

    membership::remove_user(&pool, member(project.base.id, bob.base.id)).await.unwrap();

    let loaded = projects::get(&pool, project.base.id).await.unwrap();
    let members: Vec<String> = loaded.preloaded_users.unwrap().into_iter().map(|u| u.username).collect();
    assert_eq!(members, vec!["carol".to_string()]);
}

#[tokio::test]
async fn removing_a_member_drops_the_pair() {
    let pool = test_pool().await;
    let project = insert_project(&pool, "Alpha").await;
    let bob = insert_user(&pool, "bob").await;
    membership::add_user(&pool, member(project.base.id, bob.base.id)).await.unwrap();

    membership::remove_user(&pool, member(project.base.id, bob.base.id)).await.unwrap();

    let loaded = projects::get(&pool, project.base.id).await.unwrap();
    assert!(loaded.preloaded_users.unwrap().is_empty());
}

#[tokio::test]
async fn membership_requires_both_records() {
    let pool = test_pool().await;
    let project = insert_project(&pool, "Alpha").await;
    let bob = insert_user(&pool, "bob").await;

    let err = membership::add_user(&pool, member(project.base.id, 77)).await.unwrap_err();
    assert!(matches!(err, ResolverError::NotFound { entity: "user", id: 77 }));

    let err = membership::add_user(&pool, member(88, bob.base.id)).await.unwrap_err();
    assert!(matches!(err, ResolverError::NotFound { entity: "project", id: 88 }));

    let err = membership::remove_user(&pool, member(88, bob.base.id)).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");

    let loaded = projects::get(&pool, project.base.id).await.unwrap();
    assert!(loaded.preloaded_users.unwrap().is_empty());

    membership::add_user(&pool, member(project.base.id, bob.base.id)).await.unwrap();
    let loaded = projects::get(&pool, project.base.id).await.unwrap();
    assert_eq!(loaded.preloaded_users.unwrap().len(), 1);
}

#[tokio::test]
async fn write_transaction_dropped_before_commit_keeps_nothing() {
    let pool = test_pool().await;
    {
        let mut tx = WriteTransaction::begin(&pool).await.unwrap();
        let alice = User::new("alice".into(), "alice@x.com".into(), "pw".into());
        store::create(&mut tx, &alice).await.unwrap();

        let clash = User::new("alicia".into(), "alice@x.com".into(), "pw".into());
        assert!(store::create(&mut tx, &clash).await.is_err());
    }

    assert!(users::list(&pool).await.unwrap().is_empty());
    users::create(&pool, new_user("alice", "alice@x.com")).await.unwrap();
}

#[tokio::test]
async fn committed_write_transaction_is_visible() {
    let pool = test_pool().await;
    let mut tx = WriteTransaction::begin(&pool).await.unwrap();
    let alice = User::new("alice".into(), "alice@x.com".into(), "pw".into());
    let created = store::create(&mut tx, &alice).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(users::get(&pool, created.base.id).await.unwrap().username, "alice");
}

#[tokio::test]
async fn listing_more_users_than_one_query_can_bind_still_preloads() {
    let pool = test_pool().await;
    let project = insert_project(&pool, "Alpha").await;

    let mut conn = pool.acquire().await.unwrap();
    let now = chrono::Utc::now();
    sqlx::query(
        "WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 33000) \
         INSERT INTO users (username, email, password, created_at, updated_at) \
         SELECT 'user' || i, 'user' || i || '@x.com', 'pw', ?, ? FROM n",
    )
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await
    .unwrap();
    drop(conn);

    let last = users::get(&pool, 33000).await.unwrap();
    membership::add_user(&pool, member(project.base.id, last.base.id)).await.unwrap();

    let listed = users::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 33000);
    assert!(listed[0].preloaded_projects.as_ref().unwrap().is_empty());

    let last_projects = listed[32999].preloaded_projects.as_ref().unwrap();
    assert_eq!(last_projects.len(), 1);
    assert_eq!(last_projects[0].name, "Alpha");
}

#[tokio::test]
async fn soft_deleted_members_are_hidden() {
    let pool = test_pool().await;
    let project = insert_project(&pool, "Alpha").await;
    let bob = insert_user(&pool, "bob").await;
    membership::add_user(&pool, member(project.base.id, bob.base.id)).await.unwrap();

    users::delete(&pool, bob.base.id).await.unwrap();

    let loaded = projects::get(&pool, project.base.id).await.unwrap();
    assert!(loaded.preloaded_users.unwrap().is_empty());
}

#[tokio::test]
async fn sprints_and_tasks_are_readable() {
    let pool = test_pool().await;
    let project = insert_project(&pool, "Alpha").await;
    let bob = insert_user(&pool, "bob").await;
    let sprint = insert_sprint(&pool, &project, "Alpha Sprint 1").await;
    let task = insert_task(&pool, &sprint, &bob, "Write the board").await;

    let listed = sprints::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].project_id, project.base.id);
    assert_eq!(sprints::get(&pool, sprint.base.id).await.unwrap().name, "Alpha Sprint 1");

    let fetched = tasks::get(&pool, task.base.id).await.unwrap();
    assert_eq!(fetched.status, DEFAULT_STATUS);
    assert_eq!(fetched.priority, DEFAULT_PRIORITY);
    assert_eq!(fetched.assignee_id, bob.base.id);
    assert_eq!(tasks::list(&pool).await.unwrap().len(), 1);

    let err = tasks::get(&pool, task.base.id + 1).await.unwrap_err();
    assert!(matches!(err, ResolverError::NotFound { entity: "task", .. }));
}

#[tokio::test]
async fn sprint_must_reference_an_existing_project() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();
    let now = chrono::Utc::now();
    let orphan = scrumer_backend::models::sprint::Sprint::new("Orphan".into(), now, now, 404);

    assert!(store::create(&mut conn, &orphan).await.is_err());
}
