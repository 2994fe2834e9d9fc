use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{SessionService, TokenService, access};
use crate::stores::BookingStore;
use crate::types::dto::bookings::{Booking, BookingWriteResponse, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::types::internal::{BookingStatus, SessionState};

/// Room bookings
///
/// Guests see and cancel their own bookings. Admin and staff see every
/// booking and move it through its statuses.
pub struct BookingsApi {
    booking_store: Arc<BookingStore>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl BookingsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            booking_store: app_data.booking_store.clone(),
            session_service: Arc::new(SessionService::new(app_data.clone())),
            token_service: app_data.token_service.clone(),
        }
    }

    async fn session(&self, req: &Request) -> Result<SessionState, ApiError> {
        let (_ctx, session) = helpers::require_session(req, &self.token_service, &self.session_service).await?;
        Ok(session)
    }
}

#[derive(Tags)]
enum BookingTags {
    /// Room bookings
    Bookings,
}

#[OpenApi(prefix_path = "/bookings")]
impl BookingsApi {
    /// List bookings
    ///
    /// Admin and staff get every booking by check-in date; everyone else
    /// gets their own, most recent first.
    #[oai(path = "/", method = "get", tag = "BookingTags::Bookings")]
    async fn list_bookings(&self, req: &Request) -> Result<Json<Vec<Booking>>, ApiError> {
        let session = self.session(req).await?;
        let user = access::require_user(&session)?;

        let rows = if access::is_back_office(&session) {
            self.booking_store.list_all().await?
        } else {
            self.booking_store.list_for_user(&user.id).await?
        };

        let bookings = rows
            .into_iter()
            .map(Booking::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Json(bookings))
    }

    #[oai(path = "/:id", method = "get", tag = "BookingTags::Bookings")]
    async fn get_booking(&self, req: &Request, id: Path<String>) -> Result<Json<Booking>, ApiError> {
        let session = self.session(req).await?;

        let booking = self.booking_store.get(&id.0).await?;
        access::require_owner_or_back_office(&session, &booking.user_id, "booking", &id.0)?;

        Ok(Json(booking.try_into()?))
    }

    /// Book a room for the caller
    #[oai(path = "/", method = "post", tag = "BookingTags::Bookings")]
    async fn create_booking(
        &self,
        req: &Request,
        body: Json<CreateBookingRequest>,
    ) -> Result<Json<BookingWriteResponse>, ApiError> {
        let session = self.session(req).await?;
        let user = access::require_user(&session)?;

        let booking = self.booking_store.create(&user.id, body.0).await?;

        Ok(Json(BookingWriteResponse {
            message: "Booking created successfully".to_string(),
            booking: booking.try_into()?,
        }))
    }

    /// Cancel one of the caller's bookings
    ///
    /// Only pending or confirmed bookings can be cancelled.
    #[oai(path = "/:id/cancel", method = "post", tag = "BookingTags::Bookings")]
    async fn cancel_booking(&self, req: &Request, id: Path<String>) -> Result<Json<BookingWriteResponse>, ApiError> {
        let session = self.session(req).await?;

        let booking = self.booking_store.get(&id.0).await?;
        access::require_owner_or_back_office(&session, &booking.user_id, "booking", &id.0)?;

        let status: BookingStatus = booking.status.parse()?;
        if !status.is_cancellable_by_guest() {
            return Err(ApiError::bad_request(format!(
                "A {} booking cannot be cancelled",
                status.as_str()
            )));
        }

        let booking = self.booking_store.update_status(&id.0, BookingStatus::Cancelled).await?;

        Ok(Json(BookingWriteResponse {
            message: "Booking cancelled".to_string(),
            booking: booking.try_into()?,
        }))
    }

    /// Set a booking's status (admin and staff)
    #[oai(path = "/:id/status", method = "put", tag = "BookingTags::Bookings")]
    async fn update_booking_status(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateBookingStatusRequest>,
    ) -> Result<Json<BookingWriteResponse>, ApiError> {
        let session = self.session(req).await?;
        let staff = access::require_back_office(&session)?;

        let booking = self.booking_store.update_status(&id.0, body.status).await?;
        tracing::info!(booking_id = %id.0, status = %body.status.as_str(), by = %staff.id, "Booking status updated");

        Ok(Json(BookingWriteResponse {
            message: "Booking status updated".to_string(),
            booking: booking.try_into()?,
        }))
    }
}
