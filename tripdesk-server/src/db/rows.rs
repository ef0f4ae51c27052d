//! Row Types
//!
//! SQLite rows hold decimals as TEXT. These structs mirror the table
//! shapes exactly and convert into the shared models, treating
//! unparseable stored text as data corruption (500), never as user
//! input error.

use super::repository::{RepoError, RepoResult};
use rust_decimal::Decimal;
use shared::models::{
    DutySlip, DutySlipStatus, FinancialEntry, Invoice, InvoiceSummary, Route, SalarySlip,
    SalarySlipStatus,
};
use std::str::FromStr;

/// Decimal → TEXT column value
pub fn decimal_to_text(value: Decimal) -> String {
    value.to_string()
}

/// Optional Decimal → nullable TEXT column value
pub fn opt_decimal_to_text(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

/// Nullable TEXT column value → optional Decimal
pub fn text_to_opt_decimal(value: Option<String>, column: &str) -> RepoResult<Option<Decimal>> {
    match value {
        None => Ok(None),
        Some(text) => Decimal::from_str(&text)
            .map(Some)
            .map_err(|_| RepoError::Database(format!("corrupt decimal in {column}: '{text}'"))),
    }
}

fn text_to_decimal(text: &str, column: &str) -> RepoResult<Decimal> {
    Decimal::from_str(text)
        .map_err(|_| RepoError::Database(format!("corrupt decimal in {column}: '{text}'")))
}

#[derive(Debug, sqlx::FromRow)]
pub struct DutySlipRow {
    pub ds_no: String,
    pub organisation: String,
    pub guest_name: String,
    pub guest_mobile: String,
    pub booking_id: String,
    pub reporting_time: String,
    pub reporting_address: String,
    pub vehicle_type: String,
    pub vehicle_no: String,
    pub driver_name: String,
    pub driver_mobile: String,
    pub routing: String,
    pub special_instructions: String,
    pub assignment: String,
    pub date_out: String,
    pub date_in: String,
    pub total_days: Option<i64>,
    pub driver_time_out: String,
    pub driver_time_in: String,
    pub driver_km_out: Option<String>,
    pub driver_km_in: Option<String>,
    pub time_out: String,
    pub time_in: String,
    pub km_out: Option<String>,
    pub km_in: Option<String>,
    pub driver_total_hrs: String,
    pub driver_total_kms: String,
    pub auth_signature_link: String,
    pub guest_signature_link: String,
    pub status: String,
    pub version: i64,
    pub timestamp: i64,
}

impl DutySlipRow {
    pub fn into_model(self) -> RepoResult<DutySlip> {
        let status: DutySlipStatus = self
            .status
            .parse()
            .map_err(|e| RepoError::Database(format!("duty_slip {}: {e}", self.ds_no)))?;
        Ok(DutySlip {
            driver_km_out: text_to_opt_decimal(self.driver_km_out, "duty_slip.driver_km_out")?,
            driver_km_in: text_to_opt_decimal(self.driver_km_in, "duty_slip.driver_km_in")?,
            km_out: text_to_opt_decimal(self.km_out, "duty_slip.km_out")?,
            km_in: text_to_opt_decimal(self.km_in, "duty_slip.km_in")?,
            ds_no: self.ds_no,
            organisation: self.organisation,
            guest_name: self.guest_name,
            guest_mobile: self.guest_mobile,
            booking_id: self.booking_id,
            reporting_time: self.reporting_time,
            reporting_address: self.reporting_address,
            vehicle_type: self.vehicle_type,
            vehicle_no: self.vehicle_no,
            driver_name: self.driver_name,
            driver_mobile: self.driver_mobile,
            routing: self.routing,
            special_instructions: self.special_instructions,
            assignment: self.assignment,
            date_out: self.date_out,
            date_in: self.date_in,
            total_days: self.total_days,
            driver_time_out: self.driver_time_out,
            driver_time_in: self.driver_time_in,
            time_out: self.time_out,
            time_in: self.time_in,
            driver_total_hrs: self.driver_total_hrs,
            driver_total_kms: self.driver_total_kms,
            auth_signature_link: self.auth_signature_link,
            guest_signature_link: self.guest_signature_link,
            status,
            version: self.version,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct InvoiceRow {
    pub invoice_id: String,
    pub public_id: String,
    pub booking_id: String,
    pub guest_name: String,
    pub vehicle_type: String,
    pub vehicle_no: String,
    pub trip_start_date: String,
    pub trip_end_date: String,
    pub total_hours: String,
    pub total_kms: Option<String>,
    pub billing_slabs: i64,
    pub base_rate: Option<String>,
    pub included_kms_per_slab: Option<String>,
    pub extra_km_rate: Option<String>,
    pub batta_rate: Option<String>,
    pub tolls: Option<String>,
    pub permits: Option<String>,
    pub package_cost: Option<String>,
    pub extra_kms: Option<String>,
    pub extra_km_cost: Option<String>,
    pub batta_cost: Option<String>,
    pub grand_total: String,
    pub status: String,
    pub timestamp: i64,
}

impl InvoiceRow {
    pub fn into_model(self) -> RepoResult<Invoice> {
        Ok(Invoice {
            total_kms: text_to_opt_decimal(self.total_kms, "invoice.total_kms")?,
            base_rate: text_to_opt_decimal(self.base_rate, "invoice.base_rate")?,
            included_kms_per_slab: text_to_opt_decimal(
                self.included_kms_per_slab,
                "invoice.included_kms_per_slab",
            )?,
            extra_km_rate: text_to_opt_decimal(self.extra_km_rate, "invoice.extra_km_rate")?,
            batta_rate: text_to_opt_decimal(self.batta_rate, "invoice.batta_rate")?,
            tolls: text_to_opt_decimal(self.tolls, "invoice.tolls")?,
            permits: text_to_opt_decimal(self.permits, "invoice.permits")?,
            package_cost: text_to_opt_decimal(self.package_cost, "invoice.package_cost")?,
            extra_kms: text_to_opt_decimal(self.extra_kms, "invoice.extra_kms")?,
            extra_km_cost: text_to_opt_decimal(self.extra_km_cost, "invoice.extra_km_cost")?,
            batta_cost: text_to_opt_decimal(self.batta_cost, "invoice.batta_cost")?,
            grand_total: text_to_decimal(&self.grand_total, "invoice.grand_total")?,
            invoice_id: self.invoice_id,
            public_id: self.public_id,
            booking_id: self.booking_id,
            guest_name: self.guest_name,
            vehicle_type: self.vehicle_type,
            vehicle_no: self.vehicle_no,
            trip_start_date: self.trip_start_date,
            trip_end_date: self.trip_end_date,
            total_hours: self.total_hours,
            billing_slabs: self.billing_slabs,
            status: self.status,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct InvoiceSummaryRow {
    pub invoice_id: String,
    pub public_id: String,
    pub booking_id: String,
    pub guest_name: String,
    pub trip_start_date: String,
    pub grand_total: String,
    pub status: String,
}

impl InvoiceSummaryRow {
    pub fn into_model(self) -> RepoResult<InvoiceSummary> {
        Ok(InvoiceSummary {
            grand_total: text_to_decimal(&self.grand_total, "invoice.grand_total")?,
            invoice_id: self.invoice_id,
            public_id: self.public_id,
            booking_id: self.booking_id,
            guest_name: self.guest_name,
            trip_start_date: self.trip_start_date,
            status: self.status,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct SalarySlipRow {
    pub slip_no: String,
    pub employee_name: String,
    pub pay_period: String,
    pub basic: Option<String>,
    pub allowances: Option<String>,
    pub deductions: Option<String>,
    pub net_pay: String,
    pub employee_signature_link: String,
    pub status: String,
    pub version: i64,
    pub timestamp: i64,
}

impl SalarySlipRow {
    pub fn into_model(self) -> RepoResult<SalarySlip> {
        let status: SalarySlipStatus = self
            .status
            .parse()
            .map_err(|e| RepoError::Database(format!("salary_slip {}: {e}", self.slip_no)))?;
        Ok(SalarySlip {
            basic: text_to_opt_decimal(self.basic, "salary_slip.basic")?,
            allowances: text_to_opt_decimal(self.allowances, "salary_slip.allowances")?,
            deductions: text_to_opt_decimal(self.deductions, "salary_slip.deductions")?,
            net_pay: text_to_decimal(&self.net_pay, "salary_slip.net_pay")?,
            slip_no: self.slip_no,
            employee_name: self.employee_name,
            pay_period: self.pay_period,
            employee_signature_link: self.employee_signature_link,
            status,
            version: self.version,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct RouteRow {
    pub route_id: String,
    pub route_name: String,
    pub origin: String,
    pub destination: String,
    pub distance_kms: Option<String>,
    pub notes: String,
    pub timestamp: i64,
}

impl RouteRow {
    pub fn into_model(self) -> RepoResult<Route> {
        Ok(Route {
            distance_kms: text_to_opt_decimal(self.distance_kms, "route.distance_kms")?,
            route_id: self.route_id,
            route_name: self.route_name,
            origin: self.origin,
            destination: self.destination,
            notes: self.notes,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct FinancialEntryRow {
    pub entry_id: String,
    pub date: String,
    pub entry_type: String,
    pub account: String,
    pub category: String,
    pub subcategory: String,
    pub amount: String,
    pub notes: String,
    pub timestamp: i64,
}

impl FinancialEntryRow {
    pub fn into_model(self) -> RepoResult<FinancialEntry> {
        let entry_type = self
            .entry_type
            .parse()
            .map_err(|e| RepoError::Database(format!("financial_entry {}: {e}", self.entry_id)))?;
        Ok(FinancialEntry {
            amount: text_to_decimal(&self.amount, "financial_entry.amount")?,
            entry_id: self.entry_id,
            date: self.date,
            entry_type,
            account: self.account,
            category: self.category,
            subcategory: self.subcategory,
            notes: self.notes,
            timestamp: self.timestamp,
        })
    }
}
