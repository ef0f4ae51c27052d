//! Thin Sheet Actions
//!
//! Bookings, routes, reviews and financial entries are save + list
//! only. Financial entries are the one place the directory's account
//! tree is enforced; `getDirectory` hands the whole lookup set to the
//! form pages.

use axum::Json;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;

use crate::core::ServerState;
use crate::db::repository::sheets;
use crate::utils::time::parse_date;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_text_len,
};
use shared::envelopes::{
    BookingListBody, DirectoryBody, EntryListBody, ReviewListBody, RouteListBody, SaveAck,
};
use shared::models::{
    Booking, BookingDraft, Directory, FinancialEntry, FinancialEntryDraft, Review, ReviewDraft,
    Route, RouteDraft,
};
use shared::{AppError, AppResult};

/// action=saveBooking
pub async fn save_booking(state: &ServerState, draft: BookingDraft) -> AppResult<Response> {
    validate_text_len(&draft.guest_name, "Guest_Name", MAX_NAME_LEN)?;
    validate_text_len(&draft.pickup_address, "Pickup_Address", MAX_ADDRESS_LEN)?;
    validate_text_len(&draft.drop_address, "Drop_Address", MAX_ADDRESS_LEN)?;
    validate_text_len(&draft.notes, "Notes", MAX_NOTE_LEN)?;
    if !draft.pickup_date.is_empty() {
        parse_date(&draft.pickup_date, "Pickup_Date")?;
    }

    let mut booking = Booking {
        booking_id: draft
            .booking_id
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        guest_name: draft.guest_name,
        guest_mobile: draft.guest_mobile,
        pickup_date: draft.pickup_date,
        pickup_address: draft.pickup_address,
        drop_address: draft.drop_address,
        vehicle_type: draft.vehicle_type,
        notes: draft.notes,
        timestamp: shared::util::now_millis(),
    };
    sheets::create_booking(&state.pool, &mut booking).await?;

    Ok(Json(SaveAck::saved(format!("Booking {} saved", booking.booking_id))).into_response())
}

/// action=getAllBookings
pub async fn list_bookings(state: &ServerState) -> AppResult<Response> {
    let bookings = sheets::list_bookings(&state.pool).await?;
    Ok(Json(BookingListBody { bookings }).into_response())
}

/// action=saveRoute
pub async fn save_route(state: &ServerState, draft: RouteDraft) -> AppResult<Response> {
    validate_text_len(&draft.route_name, "Route_Name", MAX_NAME_LEN)?;
    validate_text_len(&draft.notes, "Notes", MAX_NOTE_LEN)?;
    if let Some(kms) = draft.distance_kms
        && kms < Decimal::ZERO
    {
        return Err(AppError::validation(format!(
            "Distance_Kms: must not be negative, got {kms}"
        )));
    }

    let mut route = Route {
        route_id: draft
            .route_id
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        route_name: draft.route_name,
        origin: draft.origin,
        destination: draft.destination,
        distance_kms: draft.distance_kms,
        notes: draft.notes,
        timestamp: shared::util::now_millis(),
    };
    sheets::create_route(&state.pool, &mut route).await?;

    Ok(Json(SaveAck::saved(format!("Route {} saved", route.route_id))).into_response())
}

/// action=getAllRoutes
pub async fn list_routes(state: &ServerState) -> AppResult<Response> {
    let routes = sheets::list_routes(&state.pool).await?;
    Ok(Json(RouteListBody { routes }).into_response())
}

/// action=saveReview
pub async fn save_review(state: &ServerState, draft: ReviewDraft) -> AppResult<Response> {
    if !(1..=5).contains(&draft.rating) {
        return Err(AppError::validation(format!(
            "Rating must be between 1 and 5, got {}",
            draft.rating
        )));
    }
    validate_text_len(&draft.guest_name, "Guest_Name", MAX_NAME_LEN)?;
    validate_text_len(&draft.comments, "Comments", MAX_NOTE_LEN)?;
    if !draft.trip_date.is_empty() {
        parse_date(&draft.trip_date, "Trip_Date")?;
    }

    let mut review = Review {
        review_id: draft
            .review_id
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        guest_name: draft.guest_name,
        rating: draft.rating,
        comments: draft.comments,
        trip_date: draft.trip_date,
        timestamp: shared::util::now_millis(),
    };
    sheets::create_review(&state.pool, &mut review).await?;

    Ok(Json(SaveAck::saved(format!("Review {} saved", review.review_id))).into_response())
}

/// action=getAllReviews
pub async fn list_reviews(state: &ServerState) -> AppResult<Response> {
    let reviews = sheets::list_reviews(&state.pool).await?;
    Ok(Json(ReviewListBody { reviews }).into_response())
}

/// action=saveFinancialEntry - categorisation checked against the tree
pub async fn save_entry(state: &ServerState, draft: FinancialEntryDraft) -> AppResult<Response> {
    validate_entry(&draft, &state.directory)?;

    let mut entry = FinancialEntry {
        entry_id: draft
            .entry_id
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        date: draft.date,
        entry_type: draft.entry_type,
        account: draft.account,
        category: draft.category,
        subcategory: draft.subcategory,
        amount: draft.amount,
        notes: draft.notes,
        timestamp: shared::util::now_millis(),
    };
    sheets::create_entry(&state.pool, &mut entry).await?;

    Ok(Json(SaveAck::saved(format!("Entry {} saved", entry.entry_id))).into_response())
}

/// action=getAllFinancialEntries
pub async fn list_entries(state: &ServerState) -> AppResult<Response> {
    let entries = sheets::list_entries(&state.pool).await?;
    Ok(Json(EntryListBody { entries }).into_response())
}

/// action=getDirectory - the injected lookup data, read-only
pub async fn get_directory(state: &ServerState) -> AppResult<Response> {
    Ok(Json(DirectoryBody {
        directory: state.directory.as_ref(),
    })
    .into_response())
}

/// Entry checks: positive amount, well-formed date, and when an account
/// tree is configured every non-blank level must exist in it. With no
/// tree, categorisation is free-form.
fn validate_entry(draft: &FinancialEntryDraft, directory: &Directory) -> AppResult<()> {
    if draft.amount <= Decimal::ZERO {
        return Err(AppError::validation(format!(
            "Amount must be positive, got {}",
            draft.amount
        )));
    }
    validate_text_len(&draft.notes, "Notes", MAX_NOTE_LEN)?;
    if !draft.date.is_empty() {
        parse_date(&draft.date, "Date")?;
    }

    if !directory.has_accounts() {
        return Ok(());
    }

    let account = directory
        .account(&draft.account)
        .ok_or_else(|| AppError::validation(format!("unknown account: {}", draft.account)))?;

    if draft.category.is_empty() {
        if !draft.subcategory.is_empty() {
            return Err(AppError::validation(
                "Subcategory given without a Category",
            ));
        }
        return Ok(());
    }
    let category = account.category(&draft.category).ok_or_else(|| {
        AppError::validation(format!(
            "unknown category '{}' under account '{}'",
            draft.category, draft.account
        ))
    })?;

    if !draft.subcategory.is_empty() && !category.has_subcategory(&draft.subcategory) {
        return Err(AppError::validation(format!(
            "unknown subcategory '{}' under category '{}'",
            draft.subcategory, draft.category
        )));
    }
    Ok(())
}
