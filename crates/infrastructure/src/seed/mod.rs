//! Database seeding
//!
//! A batch job, not part of the running server: wipes the campground
//! collection (reviews first, since nothing cascades) and repopulates it
//! with synthetic listings sampled from static word lists and a static
//! city table. Rerunning replaces the data wholesale.

mod data;

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{CampgroundStore, PasswordHasher as _, ReviewStore, UserStore};
use domain::{Campground, EmailAddress, GeoPoint, ImageRef, Price, User, UserId, Username};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;
use uuid::Uuid;

use crate::adapters::Argon2PasswordHasher;
use crate::persistence::{
    ConnectionPool, SqliteCampgroundStore, SqliteReviewStore, SqliteUserStore,
};

/// Default number of campgrounds the seeder creates
pub const DEFAULT_SEED_COUNT: usize = 300;

/// Username owning all seeded campgrounds
const SEED_USERNAME: &str = "camper";

/// Outcome of a seed run
#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    /// Campgrounds inserted
    pub campgrounds: usize,
    /// Pre-existing reviews removed by the wipe
    pub reviews_removed: usize,
}

/// Wipe and repopulate the campground collection
pub async fn run(pool: Arc<ConnectionPool>, count: usize) -> Result<SeedSummary, ApplicationError> {
    let campgrounds = SqliteCampgroundStore::new(Arc::clone(&pool));
    let reviews = SqliteReviewStore::new(Arc::clone(&pool));
    let users = SqliteUserStore::new(pool);

    let author = ensure_seed_user(&users).await?;

    // Order matters: reviews reference campgrounds.
    let reviews_removed = reviews.delete_all().await?;
    let campgrounds_removed = campgrounds.delete_all().await?;
    info!(campgrounds_removed, reviews_removed, "Cleared existing listings");

    for _ in 0..count {
        let campground = synthetic_campground(author)?;
        campgrounds.save(&campground).await?;
    }

    info!(count, "Seeded campgrounds");
    Ok(SeedSummary {
        campgrounds: count,
        reviews_removed,
    })
}

/// Find or create the account that owns seeded listings.
///
/// The password is random and discarded: the seed user exists to satisfy
/// the author reference, not to log in with.
async fn ensure_seed_user(users: &SqliteUserStore) -> Result<UserId, ApplicationError> {
    let username = Username::parse(SEED_USERNAME)?;
    if let Some(existing) = users.find_by_username(&username).await? {
        return Ok(existing.id());
    }

    let hasher = Argon2PasswordHasher::new();
    let password_hash = hasher.hash(&Uuid::new_v4().to_string())?;
    let user = User::new(
        username,
        EmailAddress::parse("camper@example.com")?,
        password_hash,
    );
    users.save(&user).await?;
    info!(id = %user.id(), "Created seed user");
    Ok(user.id())
}

/// Build one randomized listing. Randomness stays inside this function so
/// the thread-local generator never crosses an await point.
fn synthetic_campground(author: UserId) -> Result<Campground, ApplicationError> {
    let mut rng = rand::rng();

    #[allow(clippy::expect_used)]
    let (city, state, longitude, latitude) = data::CITIES
        .choose(&mut rng)
        .expect("city table is not empty");
    #[allow(clippy::expect_used)]
    let descriptor = data::DESCRIPTORS
        .choose(&mut rng)
        .expect("descriptor list is not empty");
    #[allow(clippy::expect_used)]
    let place = data::PLACES.choose(&mut rng).expect("place list is not empty");
    let price = f64::from(rng.random_range(10..30));

    let mut campground = Campground::new(
        author,
        format!("{descriptor} {place}"),
        data::DESCRIPTION,
        Price::new(price)?,
        format!("{city}, {state}"),
        GeoPoint::new(*longitude, *latitude)?,
    )?;
    campground.add_image(ImageRef::new(data::IMAGE_URL, data::IMAGE_FILENAME));
    Ok(campground)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_support::pool_with_schema;

    #[tokio::test]
    async fn seeds_requested_count() {
        let pool = pool_with_schema();
        let summary = run(Arc::clone(&pool), 25).await.unwrap();
        assert_eq!(summary.campgrounds, 25);

        let store = SqliteCampgroundStore::new(pool);
        assert_eq!(store.count().await.unwrap(), 25);
    }

    #[tokio::test]
    async fn running_twice_replaces_rather_than_appends() {
        let pool = pool_with_schema();
        run(Arc::clone(&pool), 20).await.unwrap();
        run(Arc::clone(&pool), 20).await.unwrap();

        let store = SqliteCampgroundStore::new(pool);
        assert_eq!(store.count().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn wipe_removes_existing_reviews() {
        use application::ports::{CampgroundStore as _, ReviewStore as _};
        use domain::{Rating, Review};

        let pool = pool_with_schema();
        run(Arc::clone(&pool), 3).await.unwrap();

        let campgrounds = SqliteCampgroundStore::new(Arc::clone(&pool));
        let reviews = SqliteReviewStore::new(Arc::clone(&pool));
        let users = SqliteUserStore::new(Arc::clone(&pool));

        let listing = campgrounds.list().await.unwrap().remove(0);
        let reviewer = users
            .find_by_username(&Username::parse(SEED_USERNAME).unwrap())
            .await
            .unwrap()
            .unwrap();
        let review = Review::new(
            listing.id(),
            reviewer.id(),
            Rating::new(4).unwrap(),
            "Lovely",
        )
        .unwrap();
        reviews.save(&review).await.unwrap();

        let summary = run(Arc::clone(&pool), 3).await.unwrap();
        assert_eq!(summary.reviews_removed, 1);
        assert!(reviews.get(review.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seed_user_is_reused() {
        let pool = pool_with_schema();
        run(Arc::clone(&pool), 2).await.unwrap();
        run(Arc::clone(&pool), 2).await.unwrap();

        let conn = pool.get().unwrap();
        let users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(users, 1);
    }

    #[test]
    fn default_count_is_three_hundred() {
        assert_eq!(DEFAULT_SEED_COUNT, 300);
    }

    #[test]
    fn synthetic_campgrounds_are_valid() {
        let author = UserId::new();
        for _ in 0..50 {
            let campground = synthetic_campground(author).unwrap();
            assert!(!campground.title().is_empty());
            assert!(campground.price().value() >= 10.0);
            assert!(campground.price().value() < 30.0);
            assert_eq!(campground.images().len(), 1);
        }
    }
}
