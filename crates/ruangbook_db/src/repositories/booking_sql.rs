//! SQL implementation of the booking repository

use crate::error::DbError;
use crate::repositories::booking::BookingRepository;
use crate::DbClient;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use ruangbook_common::models::{Booking, BookingStatus, Department, RoomType};
use ruangbook_common::services::{
    BookingOrder, BookingQuery, BookingRecord, InsertOutcome, StatusUpdate,
};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

const BOOKING_COLUMNS: &str = "id, booking_date, usage_date, room, booker_name, department, \
     participant_count, start_time, end_time, notes, status, created_at, updated_at";

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn client(&self) -> &DbClient {
        &self.db_client
    }
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing booking schema");

        let table = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                booking_date TEXT NOT NULL,
                usage_date TEXT NOT NULL,
                room TEXT NOT NULL,
                booker_name TEXT NOT NULL,
                department TEXT NOT NULL,
                participant_count INTEGER NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'confirmed',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(table).await?;

        let index = r#"
            CREATE INDEX IF NOT EXISTS idx_bookings_room_date
            ON bookings (room, usage_date, status)
        "#;
        self.db_client.execute(index).await?;

        info!("Booking schema initialized successfully");
        Ok(())
    }

    async fn insert_if_free(&self, record: BookingRecord) -> Result<InsertOutcome, DbError> {
        let data = &record.data;
        debug!(
            room = %data.room,
            usage_date = %data.usage_date,
            "Inserting booking {}-{}",
            data.start_time,
            data.end_time
        );

        let usage_date = data.usage_date.to_string();
        let created_at = encode_timestamp(record.created_at);

        // $3/$4/$8/$9 appear twice: the row is only selected for insertion when no
        // confirmed booking of the same room and day overlaps [start, end).
        let insert = r#"
            INSERT INTO bookings (id, booking_date, usage_date, room, booker_name, department,
                                  participant_count, start_time, end_time, notes, status,
                                  created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'confirmed', $11, $11
            WHERE NOT EXISTS (
                SELECT 1 FROM bookings
                WHERE room = $4 AND usage_date = $3 AND status = 'confirmed'
                  AND start_time < $9 AND end_time > $8
            )
        "#;

        let mut tx = self.db_client.begin().await?;

        let inserted = sqlx::query(insert)
            .bind(record.id.clone())
            .bind(record.booking_date.to_string())
            .bind(usage_date.clone())
            .bind(data.room.as_str())
            .bind(data.booker_name.clone())
            .bind(data.department.as_str())
            .bind(i64::from(data.participant_count))
            .bind(data.start_time.clone())
            .bind(data.end_time.clone())
            .bind(data.notes.clone().unwrap_or_default())
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            })?
            .rows_affected();

        if inserted == 1 {
            tx.commit()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            info!(id = %record.id, "Booking created");
            return Ok(InsertOutcome::Inserted(record.into_booking()));
        }

        let select = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE room = $1 AND usage_date = $2 AND status = 'confirmed' \
               AND start_time < $3 AND end_time > $4 \
             ORDER BY start_time ASC"
        );
        let rows = sqlx::query(&select)
            .bind(data.room.as_str())
            .bind(usage_date)
            .bind(data.end_time.clone())
            .bind(data.start_time.clone())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to load conflicting bookings: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        let conflicts = rows
            .iter()
            .map(booking_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Booking rejected, {} overlapping booking(s)", conflicts.len());
        Ok(InsertOutcome::Conflict(conflicts))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DbError> {
        debug!("Finding booking: {}", id);

        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn list(&self, query: BookingQuery) -> Result<Vec<Booking>, DbError> {
        let mut clauses = Vec::new();
        let mut params: Vec<String> = Vec::new();
        if let Some(date) = query.usage_date {
            params.push(date.to_string());
            clauses.push(format!("usage_date = ${}", params.len()));
        }
        if let Some(room) = query.room {
            params.push(room.as_str().to_string());
            clauses.push(format!("room = ${}", params.len()));
        }
        if let Some(status) = query.status {
            params.push(status.as_str().to_string());
            clauses.push(format!("status = ${}", params.len()));
        }

        let mut sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(match query.order {
            BookingOrder::UsageDateAsc => " ORDER BY usage_date ASC, start_time ASC",
            BookingOrder::UsageDateDesc => " ORDER BY usage_date DESC, start_time ASC",
        });
        debug!("Listing bookings: {}", sql);

        let mut statement = sqlx::query(&sql);
        for param in params {
            statement = statement.bind(param);
        }
        let rows = statement
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list bookings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn set_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<StatusUpdate>, DbError> {
        debug!("Setting booking {} to {}", id, status);

        let query = r#"
            UPDATE bookings
            SET status = $1, updated_at = $2
            WHERE id = $3 AND status <> $1
        "#;
        let affected = sqlx::query(query)
            .bind(status.as_str())
            .bind(encode_timestamp(updated_at))
            .bind(id.to_string())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update booking status: {}", e);
                DbError::QueryError(e.to_string())
            })?
            .rows_affected();

        let changed = affected > 0;
        if changed {
            info!(id, status = %status, "Booking status updated");
        }
        Ok(self
            .find_by_id(id)
            .await?
            .map(|booking| StatusUpdate { booking, changed }))
    }
}

fn encode_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn decode_timestamp(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::DecodeError(format!("timestamp '{}': {}", value, e)))
}

fn decode_date(value: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DbError::DecodeError(format!("date '{}': {}", value, e)))
}

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let room: String = row.try_get("room")?;
    let department: String = row.try_get("department")?;
    let status: String = row.try_get("status")?;
    let participant_count: i64 = row.try_get("participant_count")?;
    let notes: String = row.try_get("notes")?;
    let booking_date: String = row.try_get("booking_date")?;
    let usage_date: String = row.try_get("usage_date")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Booking {
        id: row.try_get("id")?,
        booking_date: decode_date(&booking_date)?,
        usage_date: decode_date(&usage_date)?,
        room: RoomType::parse(&room)
            .ok_or_else(|| DbError::DecodeError(format!("unknown room '{}'", room)))?,
        booker_name: row.try_get("booker_name")?,
        department: Department::parse(&department)
            .ok_or_else(|| DbError::DecodeError(format!("unknown department '{}'", department)))?,
        participant_count: u32::try_from(participant_count)
            .map_err(|e| DbError::DecodeError(format!("participant_count: {}", e)))?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        notes: if notes.is_empty() { None } else { Some(notes) },
        status: BookingStatus::parse(&status)
            .ok_or_else(|| DbError::DecodeError(format!("unknown status '{}'", status)))?,
        created_at: decode_timestamp(&created_at)?,
        updated_at: decode_timestamp(&updated_at)?,
    })
}
