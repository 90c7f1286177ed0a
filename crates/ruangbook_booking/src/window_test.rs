#[cfg(test)]
mod tests {
    use crate::logic::BookingError;
    use crate::window::{BookingWindow, Countdown};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use chrono_tz::Asia::Jakarta;
    use ruangbook_config::BookingConfig;

    // 10 March 2025, Jakarta local time.
    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Jakarta
            .with_ymd_and_hms(2025, 3, 10, hour, minute, second)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn opens_exactly_at_cutoff() {
        let window = BookingWindow::default();
        assert!(!window.is_open(at(15, 29, 59)));
        assert!(window.is_open(at(15, 30, 0)));
        assert!(window.is_open(at(23, 59, 59)));
        assert!(!window.is_open(at(0, 0, 0)));
    }

    #[test]
    fn countdown_until_cutoff() {
        let window = BookingWindow::default();
        assert_eq!(
            window.time_until_open(at(15, 0, 0)),
            Some(Countdown {
                hours: 0,
                minutes: 30,
                seconds: 0
            })
        );
        assert_eq!(
            window.time_until_open(at(8, 15, 30)),
            Some(Countdown {
                hours: 7,
                minutes: 14,
                seconds: 30
            })
        );
        assert_eq!(window.time_until_open(at(15, 30, 0)), None);
        assert_eq!(window.time_until_open(at(18, 0, 0)), None);
    }

    #[test]
    fn dates_outside_today_and_tomorrow_are_rejected() {
        let window = BookingWindow::default();
        let now = at(16, 0, 0);
        assert!(matches!(
            window.check_usage_date(now, day(9), "09:00"),
            Err(BookingError::DateOutOfRange(_))
        ));
        assert!(matches!(
            window.check_usage_date(now, day(12), "09:00"),
            Err(BookingError::DateOutOfRange(_))
        ));
    }

    #[test]
    fn tomorrow_requires_open_window() {
        let window = BookingWindow::default();
        assert!(matches!(
            window.check_usage_date(at(10, 0, 0), day(11), "09:00"),
            Err(BookingError::WindowClosed { .. })
        ));
        assert!(window.check_usage_date(at(15, 45, 0), day(11), "08:00").is_ok());
    }

    #[test]
    fn today_closes_at_closing_hour() {
        let window = BookingWindow::default();
        assert!(matches!(
            window.check_usage_date(at(16, 10, 0), day(10), "15:00"),
            Err(BookingError::SameDayClosed)
        ));
    }

    #[test]
    fn today_rejects_started_slots() {
        let window = BookingWindow::default();
        let now = at(10, 30, 0);
        assert!(matches!(
            window.check_usage_date(now, day(10), "10:00"),
            Err(BookingError::SlotInPast(_))
        ));
        assert!(matches!(
            window.check_usage_date(now, day(10), "08:00"),
            Err(BookingError::SlotInPast(_))
        ));
        assert!(window.check_usage_date(now, day(10), "11:00").is_ok());
    }

    #[test]
    fn bookable_dates_follow_the_clock() {
        let window = BookingWindow::default();
        assert_eq!(window.bookable_dates(at(10, 0, 0)), vec![day(10)]);
        assert_eq!(window.bookable_dates(at(15, 45, 0)), vec![day(10), day(11)]);
        assert_eq!(window.bookable_dates(at(16, 30, 0)), vec![day(11)]);
    }

    #[test]
    fn today_is_the_local_date() {
        let window = BookingWindow::default();
        // 17:30 UTC is already half past midnight in Jakarta.
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 17, 30, 0).unwrap();
        assert_eq!(window.today(now), day(11));
        assert_eq!(window.tomorrow(now), day(12));
    }

    #[test]
    fn past_flag_only_applies_to_today() {
        let window = BookingWindow::default();
        let now = at(12, 5, 0);
        assert!(window.is_slot_past(now, day(10), "12:00"));
        assert!(!window.is_slot_past(now, day(10), "13:00"));
        assert!(!window.is_slot_past(now, day(11), "08:00"));
    }

    #[test]
    fn config_values_are_parsed() {
        let config = BookingConfig {
            time_zone: "Asia/Makassar".to_string(),
            cutoff_time: "14:00".to_string(),
            same_day_closing_hour: 15,
        };
        let window = BookingWindow::from_config(&config).unwrap();
        assert_eq!(window.cutoff_label(), "14:00");
        assert_eq!(window.closing_hour(), 15);

        let bad_zone = BookingConfig {
            time_zone: "Mars/Olympus".to_string(),
            ..BookingConfig::default()
        };
        assert!(matches!(
            BookingWindow::from_config(&bad_zone),
            Err(BookingError::Config(_))
        ));

        let bad_cutoff = BookingConfig {
            cutoff_time: "half past three".to_string(),
            ..BookingConfig::default()
        };
        assert!(BookingWindow::from_config(&bad_cutoff).is_err());
    }
}
