use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, NewBooking};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn create_booking(conn: &Connection, booking: &NewBooking) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO bookings (name, email, phone_number, service_id, service_name, check_in_date, check_out_date, mode_of_payment, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending')",
        params![
            booking.name,
            booking.email,
            booking.phone_number,
            booking.service_id,
            booking.service_name,
            booking.check_in_date.format(DATE_FMT).to_string(),
            booking.check_out_date.format(DATE_FMT).to_string(),
            booking.mode_of_payment,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn has_booking_on_date(
    conn: &Connection,
    service_id: i64,
    check_in_date: NaiveDate,
) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE service_id = ?1 AND check_in_date = ?2",
        params![service_id, check_in_date.format(DATE_FMT).to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn get_all_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, phone_number, service_id, service_name, check_in_date, check_out_date, mode_of_payment, status, created_at
         FROM bookings ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Every check-in date on record for a service, whatever the booking status.
/// Declined bookings still occupy their date in this view.
pub fn get_check_in_dates(conn: &Connection, service_id: i64) -> anyhow::Result<Vec<NaiveDate>> {
    let mut stmt =
        conn.prepare("SELECT check_in_date FROM bookings WHERE service_id = ?1")?;

    let rows = stmt.query_map(params![service_id], |row| row.get::<_, String>(0))?;

    let mut dates = vec![];
    for row in rows {
        let raw = row?;
        let date = NaiveDate::parse_from_str(&raw, DATE_FMT)
            .map_err(|e| anyhow::anyhow!("malformed check_in_date {raw:?}: {e}"))?;
        dates.push(date);
    }
    Ok(dates)
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, name, email, phone_number, service_id, service_name, check_in_date, check_out_date, mode_of_payment, status, created_at
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: i64,
    status: &BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

/// True when an insert failed on the (service_id, check_in_date) unique
/// index rather than some other database error.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let phone_number: String = row.get(3)?;
    let service_id: i64 = row.get(4)?;
    let service_name: String = row.get(5)?;
    let check_in_str: String = row.get(6)?;
    let check_out_str: String = row.get(7)?;
    let mode_of_payment: String = row.get(8)?;
    let status_str: String = row.get(9)?;
    let created_at_str: String = row.get(10)?;

    let check_in_date = NaiveDate::parse_from_str(&check_in_str, DATE_FMT)
        .map_err(|e| anyhow::anyhow!("malformed check_in_date {check_in_str:?}: {e}"))?;
    let check_out_date = NaiveDate::parse_from_str(&check_out_str, DATE_FMT)
        .map_err(|e| anyhow::anyhow!("malformed check_out_date {check_out_str:?}: {e}"))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id,
        name,
        email,
        phone_number,
        service_id,
        service_name,
        check_in_date,
        check_out_date,
        mode_of_payment,
        status: BookingStatus::parse(&status_str),
        created_at,
    })
}
