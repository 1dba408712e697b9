//! Donor recognition tiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recognition tier for a donor on the public donor wall.
///
/// Serialized with the exact capitalized names the site's consumers
/// expect (`"Platinum"`, `"Gold"`, ...), and stored as plain text in
/// the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Platinum,
    Gold,
    Silver,
    Bronze,
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tier: {0}")]
pub struct TierParseError(pub String);

impl Tier {
    /// The canonical string form, as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Platinum => "Platinum",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Platinum" => Ok(Self::Platinum),
            "Gold" => Ok(Self::Gold),
            "Silver" => Ok(Self::Silver),
            "Bronze" => Ok(Self::Bronze),
            other => Err(TierParseError(other.to_owned())),
        }
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Tier {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Tier {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Tier {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_canonical_names() {
        assert_eq!("Platinum".parse::<Tier>(), Ok(Tier::Platinum));
        assert_eq!("Gold".parse::<Tier>(), Ok(Tier::Gold));
        assert_eq!("Silver".parse::<Tier>(), Ok(Tier::Silver));
        assert_eq!("Bronze".parse::<Tier>(), Ok(Tier::Bronze));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("gold".parse::<Tier>().is_err());
        assert!("GOLD".parse::<Tier>().is_err());
        assert!("Diamond".parse::<Tier>().is_err());
    }

    #[test]
    fn test_serde_uses_capitalized_names() {
        let json = serde_json::to_string(&Tier::Silver).expect("serialize");
        assert_eq!(json, "\"Silver\"");

        let back: Tier = serde_json::from_str("\"Bronze\"").expect("deserialize");
        assert_eq!(back, Tier::Bronze);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Tier::Platinum.to_string(), "Platinum");
    }
}
