//! Rental model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::costume::Costume;
use super::customer::Customer;
use super::user::UserShort;
use crate::error::AppError;

/// Default rental period applied at creation
pub const DEFAULT_RENTAL_DAYS: i64 = 7;

/// Rental model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: i32,
    pub user_id: i32,
    pub customer_id: i32,
    pub costume_id: i32,
    pub rental_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
}

impl Rental {
    /// Apply a partial update, leaving unset fields untouched.
    ///
    /// The date invariant is checked on the patched result before anything
    /// is written back, so an invalid patch never reaches storage.
    pub fn apply_patch(&self, patch: &RentalPatch) -> Result<Rental, AppError> {
        let rental_date = patch.rental_date.unwrap_or(self.rental_date);
        let return_date = patch.return_date.unwrap_or(self.return_date);

        if return_date < rental_date {
            return Err(AppError::InvalidState(
                "Rental date can't be later than return date.".to_string(),
            ));
        }

        Ok(Rental {
            rental_date,
            return_date,
            ..self.clone()
        })
    }
}

/// Rental with the related entities denormalized for display.
///
/// Composed at read time from a join; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RentalDetails {
    pub id: i32,
    pub rental_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub costume: Costume,
    pub customer: Customer,
    pub user: UserShort,
}

/// Create rental request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRental {
    pub customer_id: i32,
    pub costume_id: i32,
}

/// Partial rental update; the costume and customer references are fixed at
/// creation because re-pointing them would bypass the availability machine.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RentalPatch {
    pub rental_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Rental list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct RentalQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn rental() -> Rental {
        let rental_date = Utc::now();
        Rental {
            id: 1,
            user_id: 1,
            customer_id: 1,
            costume_id: 1,
            rental_date,
            return_date: rental_date + Duration::days(DEFAULT_RENTAL_DAYS),
        }
    }

    #[test]
    fn empty_patch_leaves_the_rental_unchanged() {
        let rental = rental();
        let patched = rental.apply_patch(&RentalPatch::default()).unwrap();
        assert_eq!(patched.rental_date, rental.rental_date);
        assert_eq!(patched.return_date, rental.return_date);
    }

    #[test]
    fn patch_updates_only_the_given_field() {
        let rental = rental();
        let new_return = rental.return_date + Duration::days(3);
        let patched = rental
            .apply_patch(&RentalPatch {
                return_date: Some(new_return),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(patched.rental_date, rental.rental_date);
        assert_eq!(patched.return_date, new_return);
    }

    #[test]
    fn return_before_rental_is_rejected() {
        let rental = rental();
        let err = rental
            .apply_patch(&RentalPatch {
                return_date: Some(rental.rental_date - Duration::days(1)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[test]
    fn moving_rental_date_past_return_is_rejected() {
        let rental = rental();
        let result = rental.apply_patch(&RentalPatch {
            rental_date: Some(rental.return_date + Duration::days(1)),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn same_day_return_is_allowed() {
        let rental = rental();
        let patched = rental
            .apply_patch(&RentalPatch {
                return_date: Some(rental.rental_date),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(patched.return_date, patched.rental_date);
    }
}
