#[cfg(test)]
mod tests {
    use crate::schedule::{build_schedule, CellState};
    use crate::window::BookingWindow;
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Asia::Jakarta;
    use ruangbook_common::models::{Booking, BookingStatus, Department, RoomType};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn booking(id: &str, room: RoomType, date: NaiveDate, start: &str, end: &str) -> Booking {
        Booking {
            id: id.to_string(),
            booking_date: day(10),
            usage_date: date,
            room,
            booker_name: "Hendra".to_string(),
            department: Department::Finance,
            participant_count: 8,
            start_time: start.to_string(),
            end_time: end.to_string(),
            notes: Some("Closing bulanan".to_string()),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn grid_has_one_row_per_room_and_one_cell_per_start_slot() {
        let now = Jakarta.with_ymd_and_hms(2025, 3, 10, 7, 0, 0).unwrap().with_timezone(&Utc);
        let schedule = build_schedule(&[], day(10), now, &BookingWindow::default());

        assert_eq!(schedule.rows.len(), 3);
        assert_eq!(schedule.slots.len(), 8);
        assert_eq!(schedule.rows[2].room_label, "Ruang Diskusi 3");
        assert!(schedule
            .rows
            .iter()
            .all(|r| r.cells.iter().all(|c| c.state == CellState::Available && !c.past)));
    }

    #[test]
    fn booked_cells_carry_a_summary() {
        let now = Jakarta.with_ymd_and_hms(2025, 3, 10, 16, 0, 0).unwrap().with_timezone(&Utc);
        let bookings = vec![
            booking("b1", RoomType::RuangDiskusi2, day(11), "10:00", "12:00"),
            booking("other-day", RoomType::RuangDiskusi1, day(12), "08:00", "16:00"),
        ];
        let schedule = build_schedule(&bookings, day(11), now, &BookingWindow::default());

        let row = &schedule.rows[1];
        let booked: Vec<&str> = row
            .cells
            .iter()
            .filter(|c| c.state == CellState::Booked)
            .map(|c| c.slot.as_str())
            .collect();
        assert_eq!(booked, vec!["10:00", "11:00"]);

        let summary = row.cells[2].booking.as_ref().unwrap();
        assert_eq!(summary.booking_id, "b1");
        assert_eq!(summary.time_range, "10:00 - 12:00");
        assert_eq!(summary.participant_count, 8);
        assert!(row.cells[4].booking.is_none());

        assert!(schedule.rows[0]
            .cells
            .iter()
            .all(|c| c.state == CellState::Available));
    }

    #[test]
    fn cancelled_bookings_leave_cells_free_and_today_marks_past() {
        let now = Jakarta.with_ymd_and_hms(2025, 3, 10, 10, 20, 0).unwrap().with_timezone(&Utc);
        let mut cancelled = booking("c", RoomType::RuangDiskusi1, day(10), "13:00", "15:00");
        cancelled.status = BookingStatus::Cancelled;

        let schedule = build_schedule(&[cancelled], day(10), now, &BookingWindow::default());
        let cells = &schedule.rows[0].cells;
        assert!(cells.iter().all(|c| c.state == CellState::Available));

        let past: Vec<&str> = cells.iter().filter(|c| c.past).map(|c| c.slot.as_str()).collect();
        assert_eq!(past, vec!["08:00", "09:00", "10:00"]);
    }
}
