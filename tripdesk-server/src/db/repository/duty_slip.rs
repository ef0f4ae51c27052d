//! Duty Slip Repository

use super::{RepoError, RepoResult};
use crate::db::rows::{DutySlipRow, opt_decimal_to_text};
use shared::models::{DutySlip, DutySlipSummary};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteArguments;

/// Lowest number handed out on an empty sheet
const FIRST_DS_NO: i64 = 1001;

const INSERT_SQL: &str = "INSERT INTO duty_slip (
        ds_no, organisation, guest_name, guest_mobile, booking_id,
        reporting_time, reporting_address, vehicle_type, vehicle_no,
        driver_name, driver_mobile, routing, special_instructions, assignment,
        date_out, date_in, total_days,
        driver_time_out, driver_time_in, driver_km_out, driver_km_in,
        time_out, time_in, km_out, km_in,
        driver_total_hrs, driver_total_kms,
        auth_signature_link, guest_signature_link,
        status, version, timestamp
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const SELECT_COLUMNS: &str = "ds_no, organisation, guest_name, guest_mobile, booking_id,
        reporting_time, reporting_address, vehicle_type, vehicle_no,
        driver_name, driver_mobile, routing, special_instructions, assignment,
        date_out, date_in, total_days,
        driver_time_out, driver_time_in, driver_km_out, driver_km_in,
        time_out, time_in, km_out, km_in,
        driver_total_hrs, driver_total_kms,
        auth_signature_link, guest_signature_link,
        status, version, timestamp";

fn insert_query(slip: &DutySlip) -> sqlx::query::Query<'_, sqlx::Sqlite, SqliteArguments<'_>> {
    sqlx::query(INSERT_SQL)
        .bind(&slip.ds_no)
        .bind(&slip.organisation)
        .bind(&slip.guest_name)
        .bind(&slip.guest_mobile)
        .bind(&slip.booking_id)
        .bind(&slip.reporting_time)
        .bind(&slip.reporting_address)
        .bind(&slip.vehicle_type)
        .bind(&slip.vehicle_no)
        .bind(&slip.driver_name)
        .bind(&slip.driver_mobile)
        .bind(&slip.routing)
        .bind(&slip.special_instructions)
        .bind(&slip.assignment)
        .bind(&slip.date_out)
        .bind(&slip.date_in)
        .bind(slip.total_days)
        .bind(&slip.driver_time_out)
        .bind(&slip.driver_time_in)
        .bind(opt_decimal_to_text(slip.driver_km_out))
        .bind(opt_decimal_to_text(slip.driver_km_in))
        .bind(&slip.time_out)
        .bind(&slip.time_in)
        .bind(opt_decimal_to_text(slip.km_out))
        .bind(opt_decimal_to_text(slip.km_in))
        .bind(&slip.driver_total_hrs)
        .bind(&slip.driver_total_kms)
        .bind(&slip.auth_signature_link)
        .bind(&slip.guest_signature_link)
        .bind(slip.status.as_str())
        .bind(slip.version)
        .bind(slip.timestamp)
}

/// Next slip number: max numeric id + 1, starting at 1001
pub async fn next_id(pool: &SqlitePool) -> RepoResult<i64> {
    let max: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(CAST(ds_no AS INTEGER)) FROM duty_slip WHERE ds_no GLOB '[0-9]*'",
    )
    .fetch_one(pool)
    .await?;
    Ok(max.unwrap_or(FIRST_DS_NO - 1).max(FIRST_DS_NO - 1) + 1)
}

/// Insert a slip whose number the caller supplied
pub async fn create(pool: &SqlitePool, slip: &DutySlip) -> RepoResult<()> {
    insert_query(slip).execute(pool).await.map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Duplicate(format!("duty slip {} already exists", slip.ds_no))
        }
        other => other.into(),
    })?;
    Ok(())
}

/// Assign the next number and insert, inside one transaction so two
/// concurrent saves cannot claim the same number
pub async fn create_auto_id(pool: &SqlitePool, slip: &mut DutySlip) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    let max: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(CAST(ds_no AS INTEGER)) FROM duty_slip WHERE ds_no GLOB '[0-9]*'",
    )
    .fetch_one(&mut *tx)
    .await?;
    let assigned = max.unwrap_or(FIRST_DS_NO - 1).max(FIRST_DS_NO - 1) + 1;
    slip.ds_no = assigned.to_string();
    insert_query(slip).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, ds_no: &str) -> RepoResult<Option<DutySlip>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM duty_slip WHERE ds_no = ?");
    let row = sqlx::query_as::<_, DutySlipRow>(&sql)
        .bind(ds_no)
        .fetch_optional(pool)
        .await?;
    row.map(DutySlipRow::into_model).transpose()
}

/// Listing rows, newest first
pub async fn list_summaries(pool: &SqlitePool) -> RepoResult<Vec<DutySlipSummary>> {
    let summaries = sqlx::query_as::<_, DutySlipSummary>(
        "SELECT ds_no, date_out AS date, guest_name, driver_name, routing
         FROM duty_slip ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(summaries)
}

pub async fn current_version(pool: &SqlitePool, ds_no: &str) -> RepoResult<Option<i64>> {
    let version: Option<i64> =
        sqlx::query_scalar("SELECT version FROM duty_slip WHERE ds_no = ?")
            .bind(ds_no)
            .fetch_optional(pool)
            .await?;
    Ok(version)
}

/// Write the full slip back, guarded by the version the caller read.
/// `slip.version` must already be the incremented value.
pub async fn update_guarded(
    pool: &SqlitePool,
    slip: &DutySlip,
    expected_version: i64,
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE duty_slip SET
            organisation = ?, guest_name = ?, guest_mobile = ?, booking_id = ?,
            reporting_time = ?, reporting_address = ?, vehicle_type = ?, vehicle_no = ?,
            driver_name = ?, driver_mobile = ?, routing = ?, special_instructions = ?,
            assignment = ?, date_out = ?, date_in = ?, total_days = ?,
            driver_time_out = ?, driver_time_in = ?, driver_km_out = ?, driver_km_in = ?,
            time_out = ?, time_in = ?, km_out = ?, km_in = ?,
            driver_total_hrs = ?, driver_total_kms = ?,
            auth_signature_link = ?, guest_signature_link = ?,
            status = ?, version = ?
         WHERE ds_no = ? AND version = ?",
    )
    .bind(&slip.organisation)
    .bind(&slip.guest_name)
    .bind(&slip.guest_mobile)
    .bind(&slip.booking_id)
    .bind(&slip.reporting_time)
    .bind(&slip.reporting_address)
    .bind(&slip.vehicle_type)
    .bind(&slip.vehicle_no)
    .bind(&slip.driver_name)
    .bind(&slip.driver_mobile)
    .bind(&slip.routing)
    .bind(&slip.special_instructions)
    .bind(&slip.assignment)
    .bind(&slip.date_out)
    .bind(&slip.date_in)
    .bind(slip.total_days)
    .bind(&slip.driver_time_out)
    .bind(&slip.driver_time_in)
    .bind(opt_decimal_to_text(slip.driver_km_out))
    .bind(opt_decimal_to_text(slip.driver_km_in))
    .bind(&slip.time_out)
    .bind(&slip.time_in)
    .bind(opt_decimal_to_text(slip.km_out))
    .bind(opt_decimal_to_text(slip.km_in))
    .bind(&slip.driver_total_hrs)
    .bind(&slip.driver_total_kms)
    .bind(&slip.auth_signature_link)
    .bind(&slip.guest_signature_link)
    .bind(slip.status.as_str())
    .bind(slip.version)
    .bind(&slip.ds_no)
    .bind(expected_version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        // Distinguish a stale version from a vanished row
        return match current_version(pool, &slip.ds_no).await? {
            Some(current) => Err(RepoError::Conflict(format!(
                "duty slip {} was modified by someone else (version {current}, update carried {expected_version})",
                slip.ds_no
            ))),
            None => Err(RepoError::NotFound(format!("duty slip {}", slip.ds_no))),
        };
    }
    Ok(())
}
