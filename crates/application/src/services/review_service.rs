//! Review service
//!
//! Reviews are created by any authenticated user against an existing
//! campground and deleted by their author or by the campground's author.

use std::fmt;
use std::sync::Arc;

use domain::{CampgroundId, Rating, Review, ReviewId, UserId};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{CampgroundStore, ReviewStore, UserStore};

/// Input for creating a review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub rating: i64,
    pub body: String,
}

/// A review paired with its author's display name
#[derive(Debug, Clone)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author_name: String,
}

/// Service for campground reviews
pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
    campgrounds: Arc<dyn CampgroundStore>,
    users: Arc<dyn UserStore>,
}

impl fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewService").finish_non_exhaustive()
    }
}

impl ReviewService {
    /// Create a new review service
    #[must_use]
    pub fn new(
        reviews: Arc<dyn ReviewStore>,
        campgrounds: Arc<dyn CampgroundStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            reviews,
            campgrounds,
            users,
        }
    }

    /// Create a review against an existing campground
    #[instrument(skip(self, input), fields(campground = %campground, author = %author))]
    pub async fn create(
        &self,
        author: UserId,
        campground: CampgroundId,
        input: NewReview,
    ) -> Result<Review, ApplicationError> {
        if self.campgrounds.get(campground).await?.is_none() {
            return Err(ApplicationError::NotFound(format!(
                "Campground {campground}"
            )));
        }

        let rating = Rating::new(input.rating)?;
        let review = Review::new(campground, author, rating, input.body)?;
        self.reviews.save(&review).await?;
        info!(id = %review.id(), "Review created");
        Ok(review)
    }

    /// Delete a review; permitted to its author or the campground's author
    #[instrument(skip(self), fields(review = %review_id, acting_user = %acting_user))]
    pub async fn delete(
        &self,
        acting_user: UserId,
        campground: CampgroundId,
        review_id: ReviewId,
    ) -> Result<(), ApplicationError> {
        let review = self
            .reviews
            .get(review_id)
            .await?
            .filter(|review| review.campground() == campground)
            .ok_or_else(|| ApplicationError::NotFound(format!("Review {review_id}")))?;

        let campground_author = self
            .campgrounds
            .get(campground)
            .await?
            .map(|c| c.author());

        let permitted =
            review.author() == acting_user || campground_author == Some(acting_user);
        if !permitted {
            return Err(ApplicationError::NotAuthorized(
                "only the review author or the campground owner may delete a review".to_string(),
            ));
        }

        self.reviews.delete(review_id).await?;
        debug!("Review deleted");
        Ok(())
    }

    /// List a campground's reviews with their authors' display names
    pub async fn list_for_campground(
        &self,
        campground: CampgroundId,
    ) -> Result<Vec<ReviewWithAuthor>, ApplicationError> {
        let reviews = self.reviews.list_for_campground(campground).await?;
        let mut result = Vec::with_capacity(reviews.len());
        for review in reviews {
            let author_name = match self.users.get(review.author()).await? {
                Some(user) => user.username().to_string(),
                None => "unknown".to_string(),
            };
            result.push(ReviewWithAuthor {
                review,
                author_name,
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use domain::{Campground, GeoPoint, Price};

    use super::*;
    use crate::ports::{CampgroundStore as _, ReviewStore as _};
    use crate::services::fakes::stores;

    async fn seeded_campground(
        campgrounds: &Arc<crate::services::fakes::InMemoryCampgrounds>,
        author: UserId,
    ) -> Campground {
        let campground = Campground::new(
            author,
            "Misty Hollow",
            "desc",
            Price::new(10.0).unwrap(),
            "Bend, Oregon",
            GeoPoint::default(),
        )
        .unwrap();
        campgrounds.save(&campground).await.unwrap();
        campground
    }

    fn service(
        campgrounds: Arc<crate::services::fakes::InMemoryCampgrounds>,
        reviews: Arc<crate::services::fakes::InMemoryReviews>,
        users: Arc<crate::services::fakes::InMemoryUsers>,
    ) -> ReviewService {
        ReviewService::new(reviews, campgrounds, users)
    }

    #[tokio::test]
    async fn create_against_missing_campground_fails() {
        let (campgrounds, reviews, users) = stores();
        let service = service(campgrounds, reviews, users);

        let result = service
            .create(
                UserId::new(),
                CampgroundId::new(),
                NewReview {
                    rating: 5,
                    body: "Great".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_rating() {
        let (campgrounds, reviews, users) = stores();
        let campground = seeded_campground(&campgrounds, UserId::new()).await;
        let service = service(campgrounds, reviews, users);

        let result = service
            .create(
                UserId::new(),
                campground.id(),
                NewReview {
                    rating: 7,
                    body: "Too good".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn review_author_may_delete() {
        let (campgrounds, reviews, users) = stores();
        let campground = seeded_campground(&campgrounds, UserId::new()).await;
        let service = service(campgrounds, Arc::clone(&reviews), users);

        let reviewer = UserId::new();
        let review = service
            .create(
                reviewer,
                campground.id(),
                NewReview {
                    rating: 3,
                    body: "Fine".to_string(),
                },
            )
            .await
            .unwrap();

        service
            .delete(reviewer, campground.id(), review.id())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn campground_author_may_delete_any_review() {
        let (campgrounds, reviews, users) = stores();
        let owner = UserId::new();
        let campground = seeded_campground(&campgrounds, owner).await;
        let service = service(campgrounds, reviews, users);

        let review = service
            .create(
                UserId::new(),
                campground.id(),
                NewReview {
                    rating: 1,
                    body: "Bad".to_string(),
                },
            )
            .await
            .unwrap();

        service
            .delete(owner, campground.id(), review.id())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn third_party_may_not_delete() {
        let (campgrounds, reviews, users) = stores();
        let campground = seeded_campground(&campgrounds, UserId::new()).await;
        let service = service(campgrounds, Arc::clone(&reviews), users);

        let review = service
            .create(
                UserId::new(),
                campground.id(),
                NewReview {
                    rating: 4,
                    body: "Solid".to_string(),
                },
            )
            .await
            .unwrap();

        let result = service
            .delete(UserId::new(), campground.id(), review.id())
            .await;
        assert!(matches!(result, Err(ApplicationError::NotAuthorized(_))));
        assert!(reviews.get(review.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_checks_campground_binding() {
        let (campgrounds, reviews, users) = stores();
        let campground = seeded_campground(&campgrounds, UserId::new()).await;
        let reviewer = UserId::new();
        let service = service(campgrounds, reviews, users);

        let review = service
            .create(
                reviewer,
                campground.id(),
                NewReview {
                    rating: 4,
                    body: "Solid".to_string(),
                },
            )
            .await
            .unwrap();

        // Right review, wrong campground in the path: treated as missing.
        let result = service
            .delete(reviewer, CampgroundId::new(), review.id())
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }
}
