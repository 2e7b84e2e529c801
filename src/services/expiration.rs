//! Expiration options offered when creating a link

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::UnmatchedExpiration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpirationOption {
    OneDay,
    OneMonth,
    OneYear,
    Lifetime,
    /// Blank or unrecognized option name
    Unspecified,
}

impl ExpirationOption {
    pub const NAMED: [ExpirationOption; 4] = [
        ExpirationOption::OneDay,
        ExpirationOption::OneMonth,
        ExpirationOption::OneYear,
        ExpirationOption::Lifetime,
    ];

    /// Map a form value onto an option; names are matched exactly
    pub fn from_name(name: &str) -> Self {
        Self::NAMED
            .into_iter()
            .find(|option| option.name() == name)
            .unwrap_or(ExpirationOption::Unspecified)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExpirationOption::OneDay => "1 Day",
            ExpirationOption::OneMonth => "1 Month",
            ExpirationOption::OneYear => "1 Year",
            ExpirationOption::Lifetime => "Lifetime",
            ExpirationOption::Unspecified => "",
        }
    }

    /// Lifetime of a link created with this option; `None` means no expiry
    pub fn duration(&self, unmatched: UnmatchedExpiration) -> Option<Duration> {
        match self {
            ExpirationOption::OneDay => Some(Duration::hours(24)),
            ExpirationOption::OneMonth => Some(Duration::hours(30 * 24)),
            ExpirationOption::OneYear => Some(Duration::hours(365 * 24)),
            ExpirationOption::Lifetime => None,
            ExpirationOption::Unspecified => match unmatched {
                UnmatchedExpiration::Never => None,
                UnmatchedExpiration::Immediate => Some(Duration::zero()),
            },
        }
    }

    pub fn expires_at(
        &self,
        now: DateTime<Utc>,
        unmatched: UnmatchedExpiration,
    ) -> Option<DateTime<Utc>> {
        self.duration(unmatched).map(|d| now + d)
    }
}

impl From<&str> for ExpirationOption {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<Option<&str>> for ExpirationOption {
    fn from(name: Option<&str>) -> Self {
        name.map_or(ExpirationOption::Unspecified, Self::from_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_options() {
        assert_eq!(ExpirationOption::from_name("1 Day"), ExpirationOption::OneDay);
        assert_eq!(ExpirationOption::from_name("1 Month"), ExpirationOption::OneMonth);
        assert_eq!(ExpirationOption::from_name("1 Year"), ExpirationOption::OneYear);
        assert_eq!(ExpirationOption::from_name("Lifetime"), ExpirationOption::Lifetime);
    }

    #[test]
    fn test_unknown_names_are_unspecified() {
        assert_eq!(ExpirationOption::from_name(""), ExpirationOption::Unspecified);
        assert_eq!(ExpirationOption::from_name("1 day"), ExpirationOption::Unspecified);
        assert_eq!(ExpirationOption::from_name("forever"), ExpirationOption::Unspecified);
        assert_eq!(ExpirationOption::from(None), ExpirationOption::Unspecified);
    }

    #[test]
    fn test_durations() {
        let policy = UnmatchedExpiration::Never;
        assert_eq!(
            ExpirationOption::OneDay.duration(policy),
            Some(Duration::hours(24))
        );
        assert_eq!(
            ExpirationOption::OneMonth.duration(policy),
            Some(Duration::days(30))
        );
        assert_eq!(
            ExpirationOption::OneYear.duration(policy),
            Some(Duration::days(365))
        );
        assert_eq!(ExpirationOption::Lifetime.duration(policy), None);
    }

    #[test]
    fn test_unspecified_follows_policy() {
        let now = Utc::now();
        assert_eq!(
            ExpirationOption::Unspecified.expires_at(now, UnmatchedExpiration::Never),
            None
        );
        assert_eq!(
            ExpirationOption::Unspecified.expires_at(now, UnmatchedExpiration::Immediate),
            Some(now)
        );
    }

    #[test]
    fn test_lifetime_ignores_policy() {
        let now = Utc::now();
        assert_eq!(
            ExpirationOption::Lifetime.expires_at(now, UnmatchedExpiration::Immediate),
            None
        );
    }
}
