//! Friendship, like and popularity behaviour, exercised through the same service
//! code against the in-memory store, a single-connection `:memory:` SQLite
//! database and a pooled SQLite file.

use application::FilmrateApp;
use chrono::NaiveDate;
use domain::{DomainError, Film, User};
use futures::future::join_all;
use std::sync::Arc;

fn memory_app() -> FilmrateApp {
    FilmrateApp::in_memory()
}

fn sqlite_app() -> FilmrateApp {
    let database = infrastructure::Database::in_memory().expect("in-memory SQLite should open");
    FilmrateApp::with_repositories(application::Repositories::sqlite(&database))
}

/// A database file with the production pool size. The directory must outlive the app.
fn sqlite_file_app() -> (FilmrateApp, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("filmrate.db");
    let app = FilmrateApp::new(path.to_str().expect("temp path is UTF-8"))
        .expect("file SQLite should open");
    (app, dir)
}

async fn new_user(app: &FilmrateApp, login: &str) -> i64 {
    let user = User::new(
        format!("{}@example.com", login),
        login.to_string(),
        String::new(),
        NaiveDate::from_ymd_opt(1990, 1, 1),
    );
    app.user_service
        .create_user(user)
        .await
        .expect("user should be created")
        .id
        .expect("saved user has an id")
}

async fn new_film(app: &FilmrateApp, name: &str) -> i64 {
    let film = Film::new(
        name.to_string(),
        None,
        NaiveDate::from_ymd_opt(2001, 9, 1).unwrap(),
        100,
        Some(1),
    );
    app.film_service
        .create_film(film, None)
        .await
        .expect("film should be created")
        .id()
        .expect("saved film has an id")
}

fn ids_of(users: &[User]) -> Vec<i64> {
    users.iter().filter_map(|user| user.id).collect()
}

// ---------------------------------------------------------------------------
// Friendship
// ---------------------------------------------------------------------------

async fn friendship_is_symmetric(app: FilmrateApp) {
    let a = new_user(&app, "alice").await;
    let b = new_user(&app, "bob").await;

    app.relationship_service.add_friend(a, b).await.unwrap();

    let friendships = &app.repositories().friendships;
    assert!(friendships.friendship_exists(a, b).await.unwrap());
    assert!(friendships.friendship_exists(b, a).await.unwrap());
    assert_eq!(ids_of(&app.relationship_service.friends_of(a).await.unwrap()), vec![b]);
    assert_eq!(ids_of(&app.relationship_service.friends_of(b).await.unwrap()), vec![a]);
}

async fn duplicate_friendship_is_rejected(app: FilmrateApp) {
    let a = new_user(&app, "alice").await;
    let b = new_user(&app, "bob").await;
    app.relationship_service.add_friend(a, b).await.unwrap();

    let again = app.relationship_service.add_friend(a, b).await;
    assert!(matches!(again, Err(DomainError::DuplicateRelation(_))));

    let mirrored = app.relationship_service.add_friend(b, a).await;
    assert!(matches!(mirrored, Err(DomainError::DuplicateRelation(_))));
}

async fn removing_missing_friendship_succeeds(app: FilmrateApp) {
    let a = new_user(&app, "alice").await;
    let b = new_user(&app, "bob").await;

    app.relationship_service.remove_friend(a, b).await.unwrap();

    assert!(!app
        .repositories()
        .friendships
        .friendship_exists(a, b)
        .await
        .unwrap());
}

async fn removing_from_either_side_ends_the_friendship(app: FilmrateApp) {
    let a = new_user(&app, "alice").await;
    let b = new_user(&app, "bob").await;
    app.relationship_service.add_friend(a, b).await.unwrap();

    app.relationship_service.remove_friend(b, a).await.unwrap();

    assert!(app.relationship_service.friends_of(a).await.unwrap().is_empty());
    assert!(app.relationship_service.friends_of(b).await.unwrap().is_empty());
}

async fn self_relations_are_rejected_before_lookup(app: FilmrateApp) {
    let a = new_user(&app, "alice").await;

    for result in [
        app.relationship_service.add_friend(a, a).await,
        app.relationship_service.remove_friend(a, a).await,
        app.relationship_service.add_friend(404, 404).await,
    ] {
        assert!(matches!(result, Err(DomainError::InvalidRelation(_))));
    }

    let common = app.relationship_service.common_friends(a, a).await;
    assert!(matches!(common, Err(DomainError::InvalidRelation(_))));
}

async fn unknown_users_are_not_found(app: FilmrateApp) {
    let a = new_user(&app, "alice").await;

    assert_eq!(
        app.relationship_service.add_friend(a, 404).await,
        Err(DomainError::UserNotFound(404))
    );
    assert_eq!(
        app.relationship_service.remove_friend(404, a).await,
        Err(DomainError::UserNotFound(404))
    );
    assert_eq!(
        app.relationship_service.friends_of(404).await,
        Err(DomainError::UserNotFound(404))
    );
    assert_eq!(
        app.relationship_service.common_friends(a, 404).await,
        Err(DomainError::UserNotFound(404))
    );
}

async fn common_friends_is_the_intersection(app: FilmrateApp) {
    let a = new_user(&app, "a").await;
    let b = new_user(&app, "b").await;
    let c = new_user(&app, "c").await;
    let d = new_user(&app, "d").await;
    let e = new_user(&app, "e").await;

    let service = &app.relationship_service;
    service.add_friend(a, b).await.unwrap();
    service.add_friend(a, c).await.unwrap();
    service.add_friend(d, c).await.unwrap();
    service.add_friend(d, e).await.unwrap();

    let common = service.common_friends(a, d).await.unwrap();
    assert_eq!(ids_of(&common), vec![c]);
    assert_eq!(common[0].login, "c");

    assert!(service.common_friends(b, e).await.unwrap().is_empty());
}

async fn friends_of_lonely_user_is_empty(app: FilmrateApp) {
    let a = new_user(&app, "alice").await;
    assert!(app.relationship_service.friends_of(a).await.unwrap().is_empty());
}

async fn concurrent_identical_adds_store_one_friendship(app: FilmrateApp) {
    let app = Arc::new(app);
    let a = new_user(&app, "alice").await;
    let b = new_user(&app, "bob").await;

    let attempts = (0..8).map(|i| {
        let app = app.clone();
        let (from, to) = if i % 2 == 0 { (a, b) } else { (b, a) };
        tokio::spawn(async move { app.relationship_service.add_friend(from, to).await })
    });
    let outcomes: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("task should not panic"))
        .collect();

    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let duplicates = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, Err(DomainError::DuplicateRelation(_))))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(ids_of(&app.relationship_service.friends_of(a).await.unwrap()), vec![b]);
}

async fn repeated_concurrent_rounds_only_report_duplicates(app: FilmrateApp) {
    let app = Arc::new(app);
    let film = new_film(&app, "Heat").await;

    for round in 0..20 {
        let a = new_user(&app, &format!("a{}", round)).await;
        let b = new_user(&app, &format!("b{}", round)).await;

        let mut friend_tasks = Vec::new();
        let mut like_tasks = Vec::new();
        for _ in 0..8 {
            let app_for_friend = app.clone();
            friend_tasks.push(tokio::spawn(async move {
                app_for_friend.relationship_service.add_friend(a, b).await
            }));
            let app_for_like = app.clone();
            like_tasks.push(tokio::spawn(async move {
                app_for_like.relationship_service.add_like(film, a).await
            }));
        }

        for tasks in [friend_tasks, like_tasks] {
            let outcomes: Vec<_> = join_all(tasks)
                .await
                .into_iter()
                .map(|joined| joined.expect("task should not panic"))
                .collect();
            let unexpected: Vec<_> = outcomes
                .iter()
                .filter_map(|outcome| outcome.as_ref().err())
                .filter(|err| !matches!(err, DomainError::DuplicateRelation(_)))
                .collect();
            assert!(unexpected.is_empty(), "round {}: {:?}", round, unexpected);
            assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
        }
        assert_eq!(ids_of(&app.relationship_service.friends_of(a).await.unwrap()), vec![b]);
    }

    let top = app.relationship_service.top_popular(1).await.unwrap();
    assert_eq!(top[0].id, Some(film));
}

// ---------------------------------------------------------------------------
// Likes and popularity
// ---------------------------------------------------------------------------

async fn likes_are_strict(app: FilmrateApp) {
    let user = new_user(&app, "alice").await;
    let film = new_film(&app, "Memento").await;
    let service = &app.relationship_service;

    service.add_like(film, user).await.unwrap();
    assert!(matches!(
        service.add_like(film, user).await,
        Err(DomainError::DuplicateRelation(_))
    ));

    service.remove_like(film, user).await.unwrap();
    assert!(matches!(
        service.remove_like(film, user).await,
        Err(DomainError::MissingRelation(_))
    ));
}

async fn likes_require_existing_endpoints(app: FilmrateApp) {
    let user = new_user(&app, "alice").await;
    let film = new_film(&app, "Memento").await;
    let service = &app.relationship_service;

    assert_eq!(service.add_like(404, user).await, Err(DomainError::FilmNotFound(404)));
    assert_eq!(service.add_like(film, 404).await, Err(DomainError::UserNotFound(404)));
    assert_eq!(service.remove_like(404, user).await, Err(DomainError::FilmNotFound(404)));
}

async fn concurrent_identical_likes_store_one_like(app: FilmrateApp) {
    let app = Arc::new(app);
    let user = new_user(&app, "alice").await;
    let film = new_film(&app, "Memento").await;

    let attempts = (0..6).map(|_| {
        let app = app.clone();
        tokio::spawn(async move { app.relationship_service.add_like(film, user).await })
    });
    let successes = join_all(attempts)
        .await
        .into_iter()
        .filter(|joined| matches!(joined, Ok(Ok(()))))
        .count();

    assert_eq!(successes, 1);
    let top = app.relationship_service.top_popular(10).await.unwrap();
    assert_eq!(top.len(), 1);
}

async fn popularity_breaks_ties_by_newest_film(app: FilmrateApp) {
    let f1 = new_film(&app, "F1").await;
    let f2 = new_film(&app, "F2").await;
    let f3 = new_film(&app, "F3").await;
    let mut users = Vec::new();
    for i in 0..5 {
        users.push(new_user(&app, &format!("user{}", i)).await);
    }

    let service = &app.relationship_service;
    for &user in &users[..3] {
        service.add_like(f1, user).await.unwrap();
    }
    for &user in &users {
        service.add_like(f2, user).await.unwrap();
        service.add_like(f3, user).await.unwrap();
    }

    let top: Vec<i64> = service
        .top_popular(3)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|film| film.id)
        .collect();
    assert_eq!(top, vec![f3, f2, f1]);

    let top_one: Vec<i64> = service
        .top_popular(1)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|film| film.id)
        .collect();
    assert_eq!(top_one, vec![f3]);
}

async fn popularity_returns_only_liked_films(app: FilmrateApp) {
    let liked = new_film(&app, "Liked").await;
    new_film(&app, "Ignored").await;
    let user = new_user(&app, "alice").await;
    app.relationship_service.add_like(liked, user).await.unwrap();

    let popular = app.popular_films(10).await.unwrap();
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].id(), Some(liked));
    assert_eq!(popular[0].rating.as_ref().map(|r| r.name.as_str()), Some("G"));
}

async fn popularity_with_no_likes_is_empty(app: FilmrateApp) {
    new_film(&app, "Unseen").await;
    assert!(app.relationship_service.top_popular(5).await.unwrap().is_empty());
}

async fn non_positive_count_is_rejected(app: FilmrateApp) {
    for count in [0, -1] {
        assert!(matches!(
            app.relationship_service.top_popular(count).await,
            Err(DomainError::InvalidArgument(_))
        ));
    }
}

// ---------------------------------------------------------------------------
// Entities and reference data
// ---------------------------------------------------------------------------

async fn clearing_genres_removes_all_associations(app: FilmrateApp) {
    let film = Film::new(
        "Heat".to_string(),
        Some("Crime".to_string()),
        NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
        170,
        Some(4),
    );
    let created = app
        .film_service
        .create_film(film, Some(vec![6, 4, 6]))
        .await
        .unwrap();
    let genre_ids: Vec<i32> = created.genres.iter().map(|g| g.id).collect();
    assert_eq!(genre_ids, vec![4, 6]);

    let unchanged = app
        .film_service
        .update_film(created.film.clone(), None)
        .await
        .unwrap();
    assert_eq!(unchanged.genres.len(), 2);

    let cleared = app
        .film_service
        .update_film(created.film.clone(), Some(Vec::new()))
        .await
        .unwrap();
    assert!(cleared.genres.is_empty());

    let fetched = app.film_service.get_film(created.id().unwrap()).await.unwrap();
    assert!(fetched.genres.is_empty());
}

async fn film_references_must_exist(app: FilmrateApp) {
    let film = Film::new(
        "Nowhere".to_string(),
        None,
        NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        90,
        Some(99),
    );
    assert_eq!(
        app.film_service.create_film(film.clone(), None).await,
        Err(DomainError::RatingNotFound(99))
    );

    let film = Film { rating_id: None, ..film };
    assert_eq!(
        app.film_service.create_film(film, Some(vec![1, 42])).await,
        Err(DomainError::GenreNotFound(42))
    );
    assert!(app.film_service.get_all_films().await.unwrap().is_empty());
}

async fn user_name_defaults_to_login(app: FilmrateApp) {
    let id = new_user(&app, "neo").await;
    let user = app.user_service.get_user(id).await.unwrap();
    assert_eq!(user.name, "neo");

    let ghost = User { id: Some(id + 1), ..user };
    assert_eq!(
        app.user_service.update_user(ghost).await,
        Err(DomainError::UserNotFound(id + 1))
    );
}

macro_rules! on_every_backend {
    ($($scenario:ident),* $(,)?) => {
        mod in_memory {
            $(
                #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
                async fn $scenario() {
                    super::$scenario(super::memory_app()).await;
                }
            )*
        }

        mod sqlite {
            $(
                #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
                async fn $scenario() {
                    super::$scenario(super::sqlite_app()).await;
                }
            )*
        }

        mod sqlite_file {
            $(
                #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
                async fn $scenario() {
                    let (app, _dir) = super::sqlite_file_app();
                    super::$scenario(app).await;
                }
            )*
        }
    };
}

on_every_backend!(
    friendship_is_symmetric,
    duplicate_friendship_is_rejected,
    removing_missing_friendship_succeeds,
    removing_from_either_side_ends_the_friendship,
    self_relations_are_rejected_before_lookup,
    unknown_users_are_not_found,
    common_friends_is_the_intersection,
    friends_of_lonely_user_is_empty,
    concurrent_identical_adds_store_one_friendship,
    repeated_concurrent_rounds_only_report_duplicates,
    likes_are_strict,
    likes_require_existing_endpoints,
    concurrent_identical_likes_store_one_like,
    popularity_breaks_ties_by_newest_film,
    popularity_returns_only_liked_films,
    popularity_with_no_likes_is_empty,
    non_positive_count_is_rejected,
    clearing_genres_removes_all_associations,
    film_references_must_exist,
    user_name_defaults_to_login,
);
