//! Salary Slip Repository

use super::{RepoError, RepoResult};
use crate::db::rows::SalarySlipRow;
use crate::db::rows::{decimal_to_text, opt_decimal_to_text};
use shared::models::{SalarySlip, SalarySlipSummary};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteArguments;

/// Slip numbers share the duty-slip convention and range
const FIRST_SLIP_NO: i64 = 1001;

const SELECT_COLUMNS: &str = "slip_no, employee_name, pay_period,
        basic, allowances, deductions, net_pay,
        employee_signature_link, status, version, timestamp";

fn insert_query(slip: &SalarySlip) -> sqlx::query::Query<'_, sqlx::Sqlite, SqliteArguments<'_>> {
    sqlx::query(
        "INSERT INTO salary_slip (
            slip_no, employee_name, pay_period,
            basic, allowances, deductions, net_pay,
            employee_signature_link, status, version, timestamp
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&slip.slip_no)
    .bind(&slip.employee_name)
    .bind(&slip.pay_period)
    .bind(opt_decimal_to_text(slip.basic))
    .bind(opt_decimal_to_text(slip.allowances))
    .bind(opt_decimal_to_text(slip.deductions))
    .bind(decimal_to_text(slip.net_pay))
    .bind(&slip.employee_signature_link)
    .bind(slip.status.as_str())
    .bind(slip.version)
    .bind(slip.timestamp)
}

/// Assign the next slip number and insert in one transaction
pub async fn create_auto_id(pool: &SqlitePool, slip: &mut SalarySlip) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    let max: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(CAST(slip_no AS INTEGER)) FROM salary_slip WHERE slip_no GLOB '[0-9]*'",
    )
    .fetch_one(&mut *tx)
    .await?;
    let assigned = max.unwrap_or(FIRST_SLIP_NO - 1).max(FIRST_SLIP_NO - 1) + 1;
    slip.slip_no = assigned.to_string();
    insert_query(slip).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, slip_no: &str) -> RepoResult<Option<SalarySlip>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM salary_slip WHERE slip_no = ?");
    let row = sqlx::query_as::<_, SalarySlipRow>(&sql)
        .bind(slip_no)
        .fetch_optional(pool)
        .await?;
    row.map(SalarySlipRow::into_model).transpose()
}

pub async fn list_summaries(pool: &SqlitePool) -> RepoResult<Vec<SalarySlipSummary>> {
    let summaries = sqlx::query_as::<_, SalarySlipSummary>(
        "SELECT slip_no, employee_name, pay_period, status
         FROM salary_slip ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(summaries)
}

pub async fn current_version(pool: &SqlitePool, slip_no: &str) -> RepoResult<Option<i64>> {
    let version: Option<i64> =
        sqlx::query_scalar("SELECT version FROM salary_slip WHERE slip_no = ?")
            .bind(slip_no)
            .fetch_optional(pool)
            .await?;
    Ok(version)
}

/// Version-guarded write-back; `slip.version` carries the new value
pub async fn update_guarded(
    pool: &SqlitePool,
    slip: &SalarySlip,
    expected_version: i64,
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE salary_slip SET
            employee_name = ?, pay_period = ?,
            basic = ?, allowances = ?, deductions = ?, net_pay = ?,
            employee_signature_link = ?, status = ?, version = ?
         WHERE slip_no = ? AND version = ?",
    )
    .bind(&slip.employee_name)
    .bind(&slip.pay_period)
    .bind(opt_decimal_to_text(slip.basic))
    .bind(opt_decimal_to_text(slip.allowances))
    .bind(opt_decimal_to_text(slip.deductions))
    .bind(decimal_to_text(slip.net_pay))
    .bind(&slip.employee_signature_link)
    .bind(slip.status.as_str())
    .bind(slip.version)
    .bind(&slip.slip_no)
    .bind(expected_version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return match current_version(pool, &slip.slip_no).await? {
            Some(current) => Err(RepoError::Conflict(format!(
                "salary slip {} was modified by someone else (version {current}, update carried {expected_version})",
                slip.slip_no
            ))),
            None => Err(RepoError::NotFound(format!("salary slip {}", slip.slip_no))),
        };
    }
    Ok(())
}
