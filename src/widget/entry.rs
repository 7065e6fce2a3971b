use crate::quote::response::TickerSnapshot;
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifferenceClass {
    Up,
    Down,
    Error,
}

impl DifferenceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceClass::Up => "up",
            DifferenceClass::Down => "down",
            DifferenceClass::Error => "error",
        }
    }

    /// Name of the color asset the difference is painted with.
    pub fn color_name(&self) -> String {
        format!("{}Color", self.as_str())
    }
}

/// What the widget shows for one refresh cycle. Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayEntry {
    pub date: DateTime<Utc>,
    pub data: TickerSnapshot,
    pub error: bool,
}

impl DisplayEntry {
    /// Combines a fetch result with the refresh time. A missing snapshot is
    /// replaced by the all-zero error snapshot.
    pub fn build(now: DateTime<Utc>, fetched: Option<TickerSnapshot>) -> Self {
        match fetched {
            Some(data) => Self {
                date: now,
                data,
                error: false,
            },
            None => Self {
                date: now,
                data: TickerSnapshot::error(),
                error: true,
            },
        }
    }

    pub fn difference(&self) -> BigDecimal {
        self.data.difference()
    }

    /// A flat price is reported as `Error`, same as a failed fetch.
    pub fn difference_class(&self) -> DifferenceClass {
        let difference = self.difference();

        if self.error || difference.is_zero() {
            DifferenceClass::Error
        } else if difference > BigDecimal::zero() {
            DifferenceClass::Up
        } else {
            DifferenceClass::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(price_24h: i64, last_trade_price: i64) -> TickerSnapshot {
        TickerSnapshot::from_scaled((price_24h, 0), (1, 0), (last_trade_price, 0))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 5, 9, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_build_with_snapshot() {
        let entry = DisplayEntry::build(now(), Some(snapshot(100, 90)));
        assert_eq!(now(), entry.date);
        assert_eq!(snapshot(100, 90), entry.data);
        assert!(!entry.error);
    }

    #[test]
    fn test_build_without_snapshot() {
        for date in [now(), DateTime::<Utc>::UNIX_EPOCH] {
            let entry = DisplayEntry::build(date, None);
            assert_eq!(date, entry.date);
            assert_eq!(TickerSnapshot::error(), entry.data);
            assert!(entry.error);
            assert_eq!(DifferenceClass::Error, entry.difference_class());
        }
    }

    #[test]
    fn test_difference_class_up() {
        let entry = DisplayEntry::build(now(), Some(snapshot(100, 90)));
        assert_eq!(BigDecimal::from(10), entry.difference());
        assert_eq!(DifferenceClass::Up, entry.difference_class());
    }

    #[test]
    fn test_difference_class_down() {
        let entry = DisplayEntry::build(now(), Some(snapshot(90, 100)));
        assert_eq!(BigDecimal::from(-10), entry.difference());
        assert_eq!(DifferenceClass::Down, entry.difference_class());
    }

    #[test]
    fn test_difference_class_flat_is_error() {
        let ok = DisplayEntry::build(now(), Some(snapshot(100, 100)));
        assert_eq!(DifferenceClass::Error, ok.difference_class());

        let failed = DisplayEntry {
            error: true,
            ..ok
        };
        assert_eq!(DifferenceClass::Error, failed.difference_class());
    }

    #[test]
    fn test_difference_class_error_flag_wins() {
        let entry = DisplayEntry {
            date: now(),
            data: snapshot(100, 90),
            error: true,
        };
        assert_eq!(DifferenceClass::Error, entry.difference_class());
    }

    #[test]
    fn test_color_name() {
        assert_eq!("upColor", DifferenceClass::Up.color_name());
        assert_eq!("downColor", DifferenceClass::Down.color_name());
        assert_eq!("errorColor", DifferenceClass::Error.color_name());
    }
}
