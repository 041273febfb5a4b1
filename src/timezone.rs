use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Timezone used to resolve an instant to a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceTimezone {
    #[default]
    Utc,
    /// Whatever the host system reports as its local zone.
    Local,
    Named(Tz),
}

impl ReferenceTimezone {
    pub fn calendar_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Utc => instant.date_naive(),
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    pub fn year_of(&self, instant: DateTime<Utc>) -> i32 {
        self.calendar_date(instant).year()
    }
}

/// The instant and zone that define "the current year".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub now: DateTime<Utc>,
    pub timezone: ReferenceTimezone,
}

impl Reference {
    pub fn new(now: DateTime<Utc>, timezone: ReferenceTimezone) -> Self {
        Self { now, timezone }
    }

    pub fn current_year(&self) -> i32 {
        self.timezone.year_of(self.now)
    }

    pub fn is_current_year(&self, instant: DateTime<Utc>) -> bool {
        self.timezone.year_of(instant) == self.current_year()
    }
}

impl FromStr for ReferenceTimezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utc" | "z" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => s
                .trim()
                .parse::<Tz>()
                .map(Self::Named)
                .map_err(|_| format!("unknown timezone '{}' (expected utc, local or an IANA name)", s)),
        }
    }
}

impl fmt::Display for ReferenceTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Local => write!(f, "local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timezones() {
        assert_eq!("utc".parse::<ReferenceTimezone>(), Ok(ReferenceTimezone::Utc));
        assert_eq!("UTC".parse::<ReferenceTimezone>(), Ok(ReferenceTimezone::Utc));
        assert_eq!("local".parse::<ReferenceTimezone>(), Ok(ReferenceTimezone::Local));
        assert_eq!(
            "Asia/Tokyo".parse::<ReferenceTimezone>(),
            Ok(ReferenceTimezone::Named(chrono_tz::Asia::Tokyo))
        );
        assert!("Mars/Olympus_Mons".parse::<ReferenceTimezone>().is_err());
    }

    #[test]
    fn test_calendar_date_shifts_near_midnight() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap();

        let utc = ReferenceTimezone::Utc.calendar_date(instant);
        let tokyo = ReferenceTimezone::Named(chrono_tz::Asia::Tokyo).calendar_date(instant);
        let new_york =
            ReferenceTimezone::Named(chrono_tz::America::New_York).calendar_date(instant);

        assert_eq!(utc, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(tokyo, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(new_york, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_year_boundary_depends_on_zone() {
        let instant = Utc.with_ymd_and_hms(2023, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(ReferenceTimezone::Utc.year_of(instant), 2023);
        assert_eq!(
            ReferenceTimezone::Named(chrono_tz::Asia::Tokyo).year_of(instant),
            2024
        );
    }

    #[test]
    fn test_reference_year_filter() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let reference = Reference::new(now, ReferenceTimezone::Utc);

        assert_eq!(reference.current_year(), 2024);
        assert!(reference.is_current_year(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(reference.is_current_year(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()));
        assert!(!reference.is_current_year(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()));
        assert!(!reference.is_current_year(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let tz = ReferenceTimezone::Named(chrono_tz::Europe::Berlin);
        assert_eq!(tz.to_string(), "Europe/Berlin");
        assert_eq!(tz.to_string().parse::<ReferenceTimezone>(), Ok(tz));
    }
}
