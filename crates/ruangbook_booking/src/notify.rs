// --- File: crates/ruangbook_booking/src/notify.rs ---
use ruangbook_common::models::Booking;
use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Cancelled,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Cancelled => "cancelled",
        }
    }
}

/// One booking mutation, as pushed to connected screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingChange {
    pub kind: ChangeKind,
    pub booking: Booking,
}

/// In-process broadcast hub for booking changes.
pub struct BookingNotifier {
    sender: broadcast::Sender<BookingChange>,
}

impl BookingNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookingChange> {
        self.sender.subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn publish(&self, kind: ChangeKind, booking: &Booking) {
        let _ = self.sender.send(BookingChange {
            kind,
            booking: booking.clone(),
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BookingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ruangbook_common::models::{BookingStatus, Department, RoomType};

    fn booking() -> Booking {
        let date = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        Booking {
            id: "n-1".to_string(),
            booking_date: date,
            usage_date: date,
            room: RoomType::RuangDiskusi2,
            booker_name: "Rina".to_string(),
            department: Department::Marketing,
            participant_count: 3,
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            notes: None,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = BookingNotifier::new();
        let mut rx = hub.subscribe();

        hub.publish(ChangeKind::Created, &booking());

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, ChangeKind::Created);
        assert_eq!(received.booking.id, "n-1");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let hub = BookingNotifier::new();
        assert_eq!(hub.subscriber_count(), 0);
        hub.publish(ChangeKind::Cancelled, &booking());
    }
}
