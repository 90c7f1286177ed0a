#[cfg(test)]
mod tests {
    use crate::logic::{validate_new_booking, BookingRequest};
    use crate::window::BookingWindow;
    use chrono::{Duration, TimeZone, Timelike, Utc};
    use chrono_tz::Asia::Jakarta;
    use ruangbook_common::models::{end_times, start_times};
    use proptest::prelude::*;

    fn base_request() -> BookingRequest {
        BookingRequest {
            booker_name: "Putri".to_string(),
            department: "HR".to_string(),
            participant_count: 4,
            usage_date: "2025-03-11".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            room: "ruang_diskusi_3".to_string(),
            notes: None,
        }
    }

    proptest! {
        // Participant count is accepted exactly inside 1..=20
        #[test]
        fn participant_range(count in -50i64..80) {
            let request = BookingRequest { participant_count: count, ..base_request() };
            let result = validate_new_booking(&request);
            prop_assert_eq!(result.is_ok(), (1..=20).contains(&count));
        }

        // Any grid pair is valid exactly when end is after start
        #[test]
        fn slot_pairs(start_idx in 0usize..8, end_idx in 0usize..8) {
            let start = start_times()[start_idx];
            let end = end_times()[end_idx];
            let request = BookingRequest {
                start_time: start.to_string(),
                end_time: end.to_string(),
                ..base_request()
            };
            prop_assert_eq!(validate_new_booking(&request).is_ok(), end > start);
        }

        // Name length counts characters, not bytes
        #[test]
        fn name_length_in_chars(len in 0usize..130) {
            let request = BookingRequest { booker_name: "é".repeat(len), ..base_request() };
            prop_assert_eq!(validate_new_booking(&request).is_ok(), (2..=100).contains(&len));
        }

        // The countdown always lands exactly on the cutoff
        #[test]
        fn countdown_reaches_cutoff(seconds_after_midnight in 0i64..86_400) {
            let window = BookingWindow::default();
            let midnight = Jakarta.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
            let local = midnight + Duration::seconds(seconds_after_midnight);
            let now = local.with_timezone(&Utc);

            match window.time_until_open(now) {
                None => prop_assert!(window.is_open(now)),
                Some(c) => {
                    prop_assert!(!window.is_open(now));
                    let remaining = c.hours * 3600 + c.minutes * 60 + c.seconds;
                    let reached = local + Duration::seconds(remaining);
                    prop_assert_eq!((reached.hour(), reached.minute(), reached.second()), (15, 30, 0));
                }
            }
        }
    }
}
