//! Thin Sheet Repositories
//!
//! Bookings, routes, reviews and financial entries share one shape:
//! prefixed sequential ids, insert, and a newest-first listing. The
//! prefix tables live here so the id convention has a single home.

use super::{RepoError, RepoResult};
use crate::db::rows::{FinancialEntryRow, RouteRow, decimal_to_text, opt_decimal_to_text};
use shared::models::{Booking, FinancialEntry, Review, Route};
use sqlx::{SqliteConnection, SqlitePool};

pub const BOOKING_PREFIX: &str = "BK-";
pub const ROUTE_PREFIX: &str = "RT-";
pub const REVIEW_PREFIX: &str = "RV-";
pub const ENTRY_PREFIX: &str = "FE-";

/// Max numeric suffix + 1 for one prefixed id column. `table`, `column`
/// and `prefix` are module constants, never request input.
async fn next_suffix_id(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
    prefix: &str,
) -> RepoResult<i64> {
    let sql = format!(
        "SELECT MAX(CAST(substr({column}, {start}) AS INTEGER)) FROM {table} WHERE {column} LIKE '{prefix}%'",
        start = prefix.len() + 1,
    );
    let max: Option<i64> = sqlx::query_scalar(&sql).fetch_one(conn).await?;
    Ok(max.unwrap_or(0) + 1)
}

fn duplicate(kind: &str, id: &str) -> impl FnOnce(sqlx::Error) -> RepoError {
    let message = format!("{kind} {id} already exists");
    move |e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Duplicate(message),
        other => other.into(),
    }
}

/// Insert a booking, assigning `BK-<n>` when the id came in blank
pub async fn create_booking(pool: &SqlitePool, booking: &mut Booking) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    if booking.booking_id.is_empty() {
        let n = next_suffix_id(&mut tx, "booking", "booking_id", BOOKING_PREFIX).await?;
        booking.booking_id = format!("{BOOKING_PREFIX}{n}");
    }
    sqlx::query(
        "INSERT INTO booking (
            booking_id, guest_name, guest_mobile, pickup_date,
            pickup_address, drop_address, vehicle_type, notes, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&booking.booking_id)
    .bind(&booking.guest_name)
    .bind(&booking.guest_mobile)
    .bind(&booking.pickup_date)
    .bind(&booking.pickup_address)
    .bind(&booking.drop_address)
    .bind(&booking.vehicle_type)
    .bind(&booking.notes)
    .bind(booking.timestamp)
    .execute(&mut *tx)
    .await
    .map_err(duplicate("booking", &booking.booking_id))?;
    tx.commit().await?;
    Ok(())
}

pub async fn list_bookings(pool: &SqlitePool) -> RepoResult<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT booking_id, guest_name, guest_mobile, pickup_date,
                pickup_address, drop_address, vehicle_type, notes, timestamp
         FROM booking ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

pub async fn create_route(pool: &SqlitePool, route: &mut Route) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    if route.route_id.is_empty() {
        let n = next_suffix_id(&mut tx, "route", "route_id", ROUTE_PREFIX).await?;
        route.route_id = format!("{ROUTE_PREFIX}{n}");
    }
    sqlx::query(
        "INSERT INTO route (
            route_id, route_name, origin, destination, distance_kms, notes, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&route.route_id)
    .bind(&route.route_name)
    .bind(&route.origin)
    .bind(&route.destination)
    .bind(opt_decimal_to_text(route.distance_kms))
    .bind(&route.notes)
    .bind(route.timestamp)
    .execute(&mut *tx)
    .await
    .map_err(duplicate("route", &route.route_id))?;
    tx.commit().await?;
    Ok(())
}

pub async fn list_routes(pool: &SqlitePool) -> RepoResult<Vec<Route>> {
    let rows = sqlx::query_as::<_, RouteRow>(
        "SELECT route_id, route_name, origin, destination, distance_kms, notes, timestamp
         FROM route ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(RouteRow::into_model).collect()
}

pub async fn create_review(pool: &SqlitePool, review: &mut Review) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    if review.review_id.is_empty() {
        let n = next_suffix_id(&mut tx, "review", "review_id", REVIEW_PREFIX).await?;
        review.review_id = format!("{REVIEW_PREFIX}{n}");
    }
    sqlx::query(
        "INSERT INTO review (
            review_id, guest_name, rating, comments, trip_date, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&review.review_id)
    .bind(&review.guest_name)
    .bind(review.rating)
    .bind(&review.comments)
    .bind(&review.trip_date)
    .bind(review.timestamp)
    .execute(&mut *tx)
    .await
    .map_err(duplicate("review", &review.review_id))?;
    tx.commit().await?;
    Ok(())
}

pub async fn list_reviews(pool: &SqlitePool) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT review_id, guest_name, rating, comments, trip_date, timestamp
         FROM review ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn create_entry(pool: &SqlitePool, entry: &mut FinancialEntry) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    if entry.entry_id.is_empty() {
        let n = next_suffix_id(&mut tx, "financial_entry", "entry_id", ENTRY_PREFIX).await?;
        entry.entry_id = format!("{ENTRY_PREFIX}{n}");
    }
    sqlx::query(
        "INSERT INTO financial_entry (
            entry_id, date, entry_type, account, category, subcategory,
            amount, notes, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&entry.entry_id)
    .bind(&entry.date)
    .bind(entry.entry_type.as_str())
    .bind(&entry.account)
    .bind(&entry.category)
    .bind(&entry.subcategory)
    .bind(decimal_to_text(entry.amount))
    .bind(&entry.notes)
    .bind(entry.timestamp)
    .execute(&mut *tx)
    .await
    .map_err(duplicate("financial entry", &entry.entry_id))?;
    tx.commit().await?;
    Ok(())
}

pub async fn list_entries(pool: &SqlitePool) -> RepoResult<Vec<FinancialEntry>> {
    let rows = sqlx::query_as::<_, FinancialEntryRow>(
        "SELECT entry_id, date, entry_type, account, category, subcategory,
                amount, notes, timestamp
         FROM financial_entry ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(FinancialEntryRow::into_model).collect()
}
