//! Costume model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Costume availability state.
///
/// Transitions happen only through the rental workflow: renting a costume
/// flips it to `Unavailable`, deleting the rental flips it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Availability::Available),
            "unavailable" => Ok(Availability::Unavailable),
            _ => Err(format!("Invalid availability: {}", s)),
        }
    }
}

// SQLx conversion for Availability (stored as TEXT)
impl sqlx::Type<Postgres> for Availability {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Availability {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Availability {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Costume model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Costume {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub fee: Decimal,
    pub availability: Availability,
}

/// Costume create/replace request (PUT replaces every mutable field)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CostumeInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub fee: Decimal,
    pub availability: Availability,
}

/// Costume list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct CostumeQuery {
    pub availability: Option<Availability>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_parses_both_states() {
        assert_eq!("available".parse::<Availability>(), Ok(Availability::Available));
        assert_eq!(
            "UNAVAILABLE".parse::<Availability>(),
            Ok(Availability::Unavailable)
        );
        assert!("reserved".parse::<Availability>().is_err());
    }

    #[test]
    fn availability_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Availability::Available).unwrap(),
            "\"available\""
        );
        assert_eq!(Availability::Unavailable.to_string(), "unavailable");
    }
}
