//! Use-case services

mod account_service;
mod campground_service;
mod review_service;

pub use account_service::AccountService;
pub use campground_service::{CampgroundService, NewCampground, UpdateCampground};
pub use review_service::{NewReview, ReviewService, ReviewWithAuthor};

#[cfg(test)]
pub(crate) mod fakes {
    //! In-memory port implementations for service tests

    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use domain::{Campground, CampgroundId, GeoPoint, Review, ReviewId, User, UserId, Username};
    use parking_lot::Mutex;

    use crate::error::ApplicationError;
    use crate::ports::{CampgroundStore, Geocoder, PasswordHasher, ReviewStore, UserStore};

    #[derive(Debug, Default)]
    pub struct InMemoryCampgrounds {
        rows: Mutex<HashMap<CampgroundId, Campground>>,
    }

    #[async_trait]
    impl CampgroundStore for InMemoryCampgrounds {
        async fn save(&self, campground: &Campground) -> Result<(), ApplicationError> {
            self.rows
                .lock()
                .insert(campground.id(), campground.clone());
            Ok(())
        }

        async fn get(&self, id: CampgroundId) -> Result<Option<Campground>, ApplicationError> {
            Ok(self.rows.lock().get(&id).cloned())
        }

        async fn list(&self) -> Result<Vec<Campground>, ApplicationError> {
            Ok(self.rows.lock().values().cloned().collect())
        }

        async fn delete(&self, id: CampgroundId) -> Result<bool, ApplicationError> {
            Ok(self.rows.lock().remove(&id).is_some())
        }

        async fn delete_all(&self) -> Result<usize, ApplicationError> {
            let mut rows = self.rows.lock();
            let count = rows.len();
            rows.clear();
            Ok(count)
        }

        async fn count(&self) -> Result<u64, ApplicationError> {
            Ok(self.rows.lock().len() as u64)
        }
    }

    #[derive(Debug, Default)]
    pub struct InMemoryReviews {
        rows: Mutex<HashMap<ReviewId, Review>>,
    }

    #[async_trait]
    impl ReviewStore for InMemoryReviews {
        async fn save(&self, review: &Review) -> Result<(), ApplicationError> {
            self.rows.lock().insert(review.id(), review.clone());
            Ok(())
        }

        async fn get(&self, id: ReviewId) -> Result<Option<Review>, ApplicationError> {
            Ok(self.rows.lock().get(&id).cloned())
        }

        async fn list_for_campground(
            &self,
            campground: CampgroundId,
        ) -> Result<Vec<Review>, ApplicationError> {
            let mut reviews: Vec<Review> = self
                .rows
                .lock()
                .values()
                .filter(|review| review.campground() == campground)
                .cloned()
                .collect();
            reviews.sort_by_key(Review::created_at);
            Ok(reviews)
        }

        async fn delete(&self, id: ReviewId) -> Result<bool, ApplicationError> {
            Ok(self.rows.lock().remove(&id).is_some())
        }

        async fn delete_for_campground(
            &self,
            campground: CampgroundId,
        ) -> Result<usize, ApplicationError> {
            let mut rows = self.rows.lock();
            let before = rows.len();
            rows.retain(|_, review| review.campground() != campground);
            Ok(before - rows.len())
        }

        async fn delete_all(&self) -> Result<usize, ApplicationError> {
            let mut rows = self.rows.lock();
            let count = rows.len();
            rows.clear();
            Ok(count)
        }
    }

    #[derive(Debug, Default)]
    pub struct InMemoryUsers {
        rows: Mutex<HashMap<UserId, User>>,
    }

    #[async_trait]
    impl UserStore for InMemoryUsers {
        async fn save(&self, user: &User) -> Result<(), ApplicationError> {
            let mut rows = self.rows.lock();
            let taken = rows.values().any(|existing| {
                existing.id() != user.id()
                    && (existing.username() == user.username() || existing.email() == user.email())
            });
            if taken {
                return Err(ApplicationError::Conflict(
                    "username or email already taken".to_string(),
                ));
            }
            rows.insert(user.id(), user.clone());
            Ok(())
        }

        async fn get(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
            Ok(self.rows.lock().get(&id).cloned())
        }

        async fn find_by_username(
            &self,
            username: &Username,
        ) -> Result<Option<User>, ApplicationError> {
            Ok(self
                .rows
                .lock()
                .values()
                .find(|user| user.username() == username)
                .cloned())
        }
    }

    /// Hasher that prefixes instead of hashing; good enough for tests
    #[derive(Debug, Default)]
    pub struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, ApplicationError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    /// Geocoder that always returns the same point
    #[derive(Debug)]
    pub struct FixedGeocoder(pub GeoPoint);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn forward(&self, _query: &str) -> Result<Option<GeoPoint>, ApplicationError> {
            Ok(Some(self.0))
        }
    }

    pub fn stores() -> (
        Arc<InMemoryCampgrounds>,
        Arc<InMemoryReviews>,
        Arc<InMemoryUsers>,
    ) {
        (
            Arc::new(InMemoryCampgrounds::default()),
            Arc::new(InMemoryReviews::default()),
            Arc::new(InMemoryUsers::default()),
        )
    }
}
