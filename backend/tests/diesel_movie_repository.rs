//! PostgreSQL checks for `DieselMovieRepository`.
//!
//! These need a reachable database named by `MOVIES_TEST_DATABASE_URL`.
//! Without it each test prints a skip marker and returns.

use movie_catalog::domain::ports::MovieRepository;
use movie_catalog::domain::{Movie, MovieDraft, MovieId};
use movie_catalog::outbound::persistence::{
    DbPool, DieselMovieRepository, PoolConfig, run_pending_migrations,
};
use rstest::rstest;

const DATABASE_URL_VAR: &str = "MOVIES_TEST_DATABASE_URL";

async fn repository() -> Option<DieselMovieRepository> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("SKIP-TEST-DATABASE: {DATABASE_URL_VAR} is not set");
        return None;
    };
    run_pending_migrations(&url)
        .await
        .expect("migrations apply to the test database");
    let pool = DbPool::new(PoolConfig::new(url.as_str()).with_max_size(4))
        .await
        .expect("test database pool builds");
    Some(DieselMovieRepository::new(pool))
}

fn movie(id: MovieId, title: &str, genres: &[&str]) -> Movie {
    Movie::new(
        id,
        MovieDraft {
            title: format!("{title} {id}"),
            year_of_release: 1979,
            genres: genres.iter().map(|genre| (*genre).to_owned()).collect(),
        },
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reads_never_pair_fields_and_genres_from_different_updates() {
    let Some(repo) = repository().await else {
        return;
    };
    let id = MovieId::random();
    let jaws = movie(id, "Jaws", &["Thriller"]);
    let alien = movie(id, "Alien", &["Horror", "Science Fiction"]);
    repo.create(&jaws).await.expect("create succeeds");

    let writer = {
        let repo = repo.clone();
        let (jaws, alien) = (jaws.clone(), alien.clone());
        tokio::spawn(async move {
            for round in 0..200 {
                let next = if round % 2 == 0 { &alien } else { &jaws };
                assert!(repo.update(next).await.expect("update succeeds"));
            }
        })
    };

    for _ in 0..200 {
        let seen = repo
            .find_by_id(&id)
            .await
            .expect("lookup succeeds")
            .expect("movie is stored");
        let expected = if seen.title() == jaws.title() { &jaws } else { &alien };
        assert_eq!(seen.slug(), expected.slug());
        assert_eq!(seen.genres().as_slice(), expected.genres().as_slice());
    }

    writer.await.expect("writer completes");
    assert!(repo.delete_by_id(&id).await.expect("delete succeeds"));
}

#[rstest]
#[tokio::test]
async fn listing_orders_titles_by_code_point() {
    let Some(repo) = repository().await else {
        return;
    };
    let lower = movie(MovieId::random(), "alien", &["Horror"]);
    let upper = movie(MovieId::random(), "Zodiac", &["Thriller"]);
    repo.create(&lower).await.expect("create succeeds");
    repo.create(&upper).await.expect("create succeeds");

    let listed = repo.list_all().await.expect("list succeeds");
    let position = |wanted: &Movie| {
        listed
            .iter()
            .position(|movie| movie.id() == wanted.id())
            .expect("movie is listed")
    };

    assert!(position(&upper) < position(&lower));
    for stored in [&lower, &upper] {
        assert!(repo.delete_by_id(&stored.id()).await.expect("delete succeeds"));
    }
}
