//! Invoice Actions
//!
//! 发票一旦生成即不可改——没有 update 动作。服务器只信任费率输入，
//! 时长/公里数走自己的拆账函数；payload 里带来的任何合计一律丢弃。

use axum::Json;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::billing;
use crate::core::ServerState;
use crate::db::repository::invoice;
use shared::envelopes::{InvoiceBody, InvoiceListBody, InvoiceSaveAck};
use shared::models::{Invoice, InvoiceDraft};
use shared::{AppError, AppResult};

/// action=saveInvoice - derive the breakdown and persist
///
/// The draft's trip fields may have been copied from a duty slip or
/// typed by hand; both arrive through the same payload. The invoice id
/// is `ST-` + booking id, so re-billing a booking is a 409.
pub async fn save(state: &ServerState, draft: InvoiceDraft) -> AppResult<Response> {
    billing::validate_draft(&draft)?;

    let hours = billing::parse_hours(&draft.total_hours);
    let kms = draft.total_kms.unwrap_or_default();
    let rates = billing::RateCard::from_draft(&draft);
    let breakdown = billing::derive_breakdown(hours, kms, &rates);

    let booking_id = draft.booking_id.trim().to_string();
    let invoice = Invoice {
        invoice_id: format!("ST-{booking_id}"),
        public_id: Uuid::new_v4().to_string(),
        booking_id,
        guest_name: draft.guest_name,
        vehicle_type: draft.vehicle_type,
        vehicle_no: draft.vehicle_no,
        trip_start_date: draft.trip_start_date,
        trip_end_date: draft.trip_end_date,
        total_hours: draft.total_hours.as_text(),
        total_kms: draft.total_kms,
        billing_slabs: breakdown.billing_slabs,
        base_rate: draft.base_rate,
        included_kms_per_slab: draft.included_kms_per_slab,
        extra_km_rate: draft.extra_km_rate,
        batta_rate: draft.batta_rate,
        tolls: draft.tolls,
        permits: draft.permits,
        package_cost: Some(breakdown.package_cost),
        extra_kms: Some(breakdown.extra_kms),
        extra_km_cost: Some(breakdown.extra_km_cost),
        batta_cost: Some(breakdown.batta_cost),
        grand_total: breakdown.grand_total,
        status: billing::GENERATED.to_string(),
        timestamp: shared::util::now_millis(),
    };

    invoice::create(&state.pool, &invoice).await?;
    tracing::info!(invoice_id = %invoice.invoice_id, "invoice generated");

    Ok(Json(InvoiceSaveAck::saved(invoice.invoice_id, invoice.public_id)).into_response())
}

/// action=getAllInvoices - summaries, newest first
pub async fn list(state: &ServerState) -> AppResult<Response> {
    let invoices = invoice::list_summaries(&state.pool).await?;
    Ok(Json(InvoiceListBody { invoices }).into_response())
}

/// action=getInvoiceById&id= - office-side fetch
pub async fn get_by_id(state: &ServerState, id: &str) -> AppResult<Response> {
    let invoice = invoice::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("invoice {id} not found")))?;
    Ok(Json(InvoiceBody { invoice }).into_response())
}

/// action=getInvoiceByPublicId&publicId= - the shareable link
pub async fn get_by_public_id(state: &ServerState, public_id: &str) -> AppResult<Response> {
    let invoice = invoice::find_by_public_id(&state.pool, public_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("invoice {public_id} not found")))?;
    Ok(Json(InvoiceBody { invoice }).into_response())
}
