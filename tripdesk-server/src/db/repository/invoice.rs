//! Invoice Repository

use super::{RepoError, RepoResult};
use crate::db::rows::{InvoiceRow, InvoiceSummaryRow, decimal_to_text, opt_decimal_to_text};
use shared::models::{Invoice, InvoiceSummary};
use sqlx::SqlitePool;

const SELECT_COLUMNS: &str = "invoice_id, public_id, booking_id, guest_name,
        vehicle_type, vehicle_no, trip_start_date, trip_end_date,
        total_hours, total_kms, billing_slabs,
        base_rate, included_kms_per_slab, extra_km_rate, batta_rate,
        tolls, permits,
        package_cost, extra_kms, extra_km_cost, batta_cost, grand_total,
        status, timestamp";

pub async fn create(pool: &SqlitePool, invoice: &Invoice) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO invoice (
            invoice_id, public_id, booking_id, guest_name,
            vehicle_type, vehicle_no, trip_start_date, trip_end_date,
            total_hours, total_kms, billing_slabs,
            base_rate, included_kms_per_slab, extra_km_rate, batta_rate,
            tolls, permits,
            package_cost, extra_kms, extra_km_cost, batta_cost, grand_total,
            status, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&invoice.invoice_id)
    .bind(&invoice.public_id)
    .bind(&invoice.booking_id)
    .bind(&invoice.guest_name)
    .bind(&invoice.vehicle_type)
    .bind(&invoice.vehicle_no)
    .bind(&invoice.trip_start_date)
    .bind(&invoice.trip_end_date)
    .bind(&invoice.total_hours)
    .bind(opt_decimal_to_text(invoice.total_kms))
    .bind(invoice.billing_slabs)
    .bind(opt_decimal_to_text(invoice.base_rate))
    .bind(opt_decimal_to_text(invoice.included_kms_per_slab))
    .bind(opt_decimal_to_text(invoice.extra_km_rate))
    .bind(opt_decimal_to_text(invoice.batta_rate))
    .bind(opt_decimal_to_text(invoice.tolls))
    .bind(opt_decimal_to_text(invoice.permits))
    .bind(opt_decimal_to_text(invoice.package_cost))
    .bind(opt_decimal_to_text(invoice.extra_kms))
    .bind(opt_decimal_to_text(invoice.extra_km_cost))
    .bind(opt_decimal_to_text(invoice.batta_cost))
    .bind(decimal_to_text(invoice.grand_total))
    .bind(&invoice.status)
    .bind(invoice.timestamp)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Duplicate(format!(
            "invoice {} already exists",
            invoice.invoice_id
        )),
        other => other.into(),
    })?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, invoice_id: &str) -> RepoResult<Option<Invoice>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM invoice WHERE invoice_id = ?");
    let row = sqlx::query_as::<_, InvoiceRow>(&sql)
        .bind(invoice_id)
        .fetch_optional(pool)
        .await?;
    row.map(InvoiceRow::into_model).transpose()
}

/// Shareable-link lookup
pub async fn find_by_public_id(pool: &SqlitePool, public_id: &str) -> RepoResult<Option<Invoice>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM invoice WHERE public_id = ?");
    let row = sqlx::query_as::<_, InvoiceRow>(&sql)
        .bind(public_id)
        .fetch_optional(pool)
        .await?;
    row.map(InvoiceRow::into_model).transpose()
}

pub async fn list_summaries(pool: &SqlitePool) -> RepoResult<Vec<InvoiceSummary>> {
    let rows = sqlx::query_as::<_, InvoiceSummaryRow>(
        "SELECT invoice_id, public_id, booking_id, guest_name, trip_start_date, grand_total, status
         FROM invoice ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(InvoiceSummaryRow::into_model).collect()
}
