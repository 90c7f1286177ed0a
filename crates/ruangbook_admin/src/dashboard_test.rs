#[cfg(test)]
mod tests {
    use crate::dashboard::{
        apply_filter, cancel_booking, compute_stats, list_bookings, BookingFilter, DashboardError,
        FilterQuery, RoomStat,
    };
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use ruangbook_booking::MemoryBookingStore;
    use ruangbook_common::models::{Booking, BookingStatus, Department, RoomType};
    use ruangbook_common::services::BookingStore;
    use ruangbook_common::{HttpStatusCode, RuangbookError};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 9, 9, 0, 0).unwrap()
    }

    fn booking(
        id: &str,
        name: &str,
        department: Department,
        room: RoomType,
        date: NaiveDate,
        start: &str,
        status: BookingStatus,
    ) -> Booking {
        Booking {
            id: id.to_string(),
            booking_date: day(9),
            usage_date: date,
            room,
            booker_name: name.to_string(),
            department,
            participant_count: 4,
            start_time: start.to_string(),
            end_time: "15:00".to_string(),
            notes: None,
            status,
            created_at: created(),
            updated_at: created(),
        }
    }

    fn sample() -> Vec<Booking> {
        vec![
            booking("a", "Sari", Department::Marketing, RoomType::RuangDiskusi1, day(10), "09:00", BookingStatus::Confirmed),
            booking("b", "Budi", Department::It, RoomType::RuangDiskusi2, day(11), "08:00", BookingStatus::Confirmed),
            booking("c", "Clara", Department::Hr, RoomType::RuangDiskusi1, day(10), "13:00", BookingStatus::Cancelled),
            booking("d", "Dewi", Department::Finance, RoomType::RuangDiskusi1, day(11), "10:00", BookingStatus::Confirmed),
        ]
    }

    fn query(search: &str, room: &str, department: &str, status: &str) -> FilterQuery {
        let value = |v: &str| (!v.is_empty()).then(|| v.to_string());
        FilterQuery {
            search: value(search),
            room: value(room),
            department: value(department),
            status: value(status),
        }
    }

    fn ids(bookings: &[Booking]) -> Vec<&str> {
        bookings.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn all_means_no_filter() {
        let filter = BookingFilter::from_query(&query("  ", "all", "all", "all")).unwrap();
        assert_eq!(filter, BookingFilter::default());
        let list = apply_filter(sample(), &filter);
        assert_eq!(list.total, 4);
        assert_eq!(list.bookings.len(), 4);
    }

    #[test]
    fn search_matches_name_or_department_ignoring_case() {
        let by_name = BookingFilter::from_query(&query("sAr", "", "", "")).unwrap();
        assert_eq!(ids(&apply_filter(sample(), &by_name).bookings), vec!["a"]);

        let by_department = BookingFilter::from_query(&query("it", "", "", "")).unwrap();
        assert_eq!(ids(&apply_filter(sample(), &by_department).bookings), vec!["b"]);
    }

    #[test]
    fn filters_combine() {
        let filter =
            BookingFilter::from_query(&query("", "ruang_diskusi_1", "all", "confirmed")).unwrap();
        let list = apply_filter(sample(), &filter);
        assert_eq!(list.total, 4);
        assert_eq!(ids(&list.bookings), vec!["a", "d"]);

        let filter = BookingFilter::from_query(&query("", "", "HR", "cancelled")).unwrap();
        assert_eq!(ids(&apply_filter(sample(), &filter).bookings), vec!["c"]);
    }

    #[test]
    fn unknown_filter_values_are_rejected() {
        let err = BookingFilter::from_query(&query("", "aula", "", "")).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidFilter(_)));
        let api: RuangbookError = err.into();
        assert_eq!(api.status_code(), 400);
        assert!(BookingFilter::from_query(&query("", "", "", "pending")).is_err());
    }

    #[test]
    fn stats_count_confirmed_only() {
        let stats = compute_stats(&sample(), day(10));
        assert_eq!(stats.today_confirmed, 1);
        assert_eq!(stats.total_confirmed, 3);
        assert_eq!(
            stats.rooms,
            vec![
                RoomStat { room: RoomType::RuangDiskusi1, label: "Ruang Diskusi 1".to_string(), count: 2, percentage: 67 },
                RoomStat { room: RoomType::RuangDiskusi2, label: "Ruang Diskusi 2".to_string(), count: 1, percentage: 33 },
                RoomStat { room: RoomType::RuangDiskusi3, label: "Ruang Diskusi 3".to_string(), count: 0, percentage: 0 },
            ]
        );
    }

    #[test]
    fn stats_without_bookings_are_zero() {
        let stats = compute_stats(&[], day(10));
        assert_eq!(stats.total_confirmed, 0);
        assert!(stats.rooms.iter().all(|r| r.count == 0 && r.percentage == 0));
    }

    #[tokio::test]
    async fn listing_is_newest_usage_date_first() {
        let store = MemoryBookingStore::with_bookings(sample());
        let list = list_bookings(&store, &BookingFilter::default()).await.unwrap();
        assert_eq!(ids(&list.bookings), vec!["b", "d", "a", "c"]);
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let store = MemoryBookingStore::with_bookings(sample());
        let first_at = Utc.with_ymd_and_hms(2025, 3, 10, 3, 0, 0).unwrap();

        let first = cancel_booking(&store, "a", first_at).await.unwrap();
        assert!(first.changed);
        assert_eq!(first.booking.status, BookingStatus::Cancelled);
        assert_eq!(first.booking.updated_at, first_at);

        let later = Utc.with_ymd_and_hms(2025, 3, 10, 4, 0, 0).unwrap();
        let second = cancel_booking(&store, "a", later).await.unwrap();
        assert!(!second.changed);
        assert_eq!(second.booking.updated_at, first_at);

        let stored = store.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_cancels_report_one_change() {
        let store = std::sync::Arc::new(MemoryBookingStore::with_bookings(sample()));
        let mut tasks = Vec::new();
        for minute in 0..8 {
            let store = store.clone();
            let at = Utc.with_ymd_and_hms(2025, 3, 10, 3, minute, 0).unwrap();
            tasks.push(tokio::spawn(async move {
                cancel_booking(store.as_ref(), "a", at).await
            }));
        }

        let mut changed = 0;
        for task in tasks {
            if task.await.unwrap().unwrap().changed {
                changed += 1;
            }
        }
        assert_eq!(changed, 1);
    }

    #[tokio::test]
    async fn cancelling_unknown_booking_is_not_found() {
        let store = MemoryBookingStore::new();
        let err = cancel_booking(&store, "missing", Utc::now()).await.unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(_)));
        let api: RuangbookError = err.into();
        assert_eq!(api.status_code(), 404);
    }
}
