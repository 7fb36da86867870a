//! PostgreSQL repository tests
//!
//! Run with `cargo test -p api -- --ignored` against a database named by
//! DATABASE_URL. Every row carries a per-run suffix so runs never collide.

use api::{
    models::{NewCategory, NewPost, NewUser, PostChanges, PostFilter, UserChanges},
    repositories::{
        CategoryRepository, PgCategoryRepository, PgPostRepository, PgUserRepository,
        PostRepository, UserRepository,
    },
};
use common::database::{DatabaseConfig, init_pool, run_migrations};
use sqlx::PgPool;
use uuid::Uuid;

async fn pool() -> Result<PgPool, Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

fn new_post(title: &str, username: &str, categories: &[&str]) -> NewPost {
    NewPost {
        title: title.to_string(),
        description: "body".to_string(),
        photo: None,
        username: username.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
async fn user_updates_keep_unset_fields_and_report_conflicts()
-> Result<(), Box<dyn std::error::Error>> {
    let repo = PgUserRepository::new(pool().await?);
    let run = suffix();

    let alice = repo.create(&new_user(&format!("alice_{run}"))).await?;
    let bob = repo.create(&new_user(&format!("bob_{run}"))).await?;

    let changes = UserChanges {
        profile_pic: Some("1700000000000me.png".to_string()),
        ..Default::default()
    };
    let updated = repo.update(alice.id, &changes).await?.expect("alice exists");
    assert_eq!(updated.username, alice.username);
    assert_eq!(updated.email, alice.email);
    assert_eq!(updated.password_hash, alice.password_hash);
    assert_eq!(updated.profile_pic.as_deref(), Some("1700000000000me.png"));

    let taken_email = UserChanges {
        email: Some(bob.email.clone()),
        ..Default::default()
    };
    let err = repo.update(alice.id, &taken_email).await.unwrap_err();
    assert_eq!(err.violated_constraint(), Some("users_email_key"));

    let taken_name = UserChanges {
        username: Some(bob.username.clone()),
        ..Default::default()
    };
    let err = repo.update(alice.id, &taken_name).await.unwrap_err();
    assert_eq!(err.violated_constraint(), Some("users_username_key"));

    assert!(repo.update(Uuid::new_v4(), &changes).await?.is_none());

    let found = repo.find_by_username(&alice.username).await?.expect("alice exists");
    assert_eq!(found.id, alice.id);

    assert!(repo.delete(alice.id).await?);
    assert!(repo.delete(bob.id).await?);
    assert!(!repo.delete(bob.id).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
async fn post_listing_filters_by_author_and_category() -> Result<(), Box<dyn std::error::Error>>
{
    let repo = PgPostRepository::new(pool().await?);
    let run = suffix();
    let author = format!("author_{run}");
    let other = format!("other_{run}");
    let music = format!("music_{run}");
    let life = format!("life_{run}");

    let first = repo
        .create(&new_post(&format!("first {run}"), &author, &[music.as_str()]))
        .await?;
    let second = repo
        .create(&new_post(&format!("second {run}"), &author, &[music.as_str(), life.as_str()]))
        .await?;
    let third = repo
        .create(&new_post(&format!("third {run}"), &other, &[life.as_str()]))
        .await?;

    let by_author = repo
        .list(&PostFilter {
            user: Some(author.clone()),
            cat: None,
        })
        .await?;
    let ids: Vec<Uuid> = by_author.iter().map(|p| p.id).collect();
    assert_eq!(ids, [second.id, first.id]);

    let by_category = repo
        .list(&PostFilter {
            user: None,
            cat: Some(life.clone()),
        })
        .await?;
    let ids: Vec<Uuid> = by_category.iter().map(|p| p.id).collect();
    assert_eq!(ids, [third.id, second.id]);

    let both = repo
        .list(&PostFilter {
            user: Some(author.clone()),
            cat: Some(life.clone()),
        })
        .await?;
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, second.id);

    let everything = repo.list(&PostFilter::default()).await?;
    assert!(everything.iter().any(|p| p.id == third.id));

    let retitle = PostChanges {
        title: Some(second.title.clone()),
        ..Default::default()
    };
    let err = repo.update(first.id, &retitle).await.unwrap_err();
    assert_eq!(err.violated_constraint(), Some("posts_title_key"));

    let recategorise = PostChanges {
        categories: Some(vec![life.clone()]),
        ..Default::default()
    };
    let updated = repo.update(first.id, &recategorise).await?.expect("post exists");
    assert_eq!(updated.title, first.title);
    assert_eq!(updated.categories, [life.clone()]);

    assert_eq!(repo.delete_by_username(&author).await?, 2);
    assert!(repo.delete(third.id).await?);
    assert!(repo.find_by_id(third.id).await?.is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
async fn category_names_are_unique() -> Result<(), Box<dyn std::error::Error>> {
    let pool = pool().await?;
    let repo = PgCategoryRepository::new(pool.clone());
    let name = format!("travel_{}", suffix());

    let created = repo.create(&NewCategory { name: name.clone() }).await?;
    let err = repo
        .create(&NewCategory { name: name.clone() })
        .await
        .unwrap_err();
    assert_eq!(err.violated_constraint(), Some("categories_name_key"));

    let listed = repo.list().await?;
    assert!(listed.iter().any(|c| c.id == created.id && c.name == name));

    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(created.id)
        .execute(&pool)
        .await?;
    Ok(())
}
