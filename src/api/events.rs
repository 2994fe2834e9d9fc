use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{SessionService, TokenService, access};
use crate::stores::EventStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::events::{
    CreateEventRequest, Event, EventRegistration, EventWriteResponse, RegistrationWriteResponse, UpdateEventRequest,
};
use crate::types::internal::SessionState;

/// Hotel events and registrations
pub struct EventsApi {
    event_store: Arc<EventStore>,
    session_service: Arc<SessionService>,
    token_service: Arc<TokenService>,
}

impl EventsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            event_store: app_data.event_store.clone(),
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
enum EventTags {
    /// Events
    Events,
}

#[OpenApi(prefix_path = "/events")]
impl EventsApi {
    /// Upcoming and past events by date, with registration counts
    #[oai(path = "/", method = "get", tag = "EventTags::Events")]
    async fn list_events(&self) -> Result<Json<Vec<Event>>, ApiError> {
        let events = self.event_store.list().await?;
        Ok(Json(
            events
                .into_iter()
                .map(|(event, count)| Event::from_model(event, count))
                .collect(),
        ))
    }

    #[oai(path = "/:id", method = "get", tag = "EventTags::Events")]
    async fn get_event(&self, id: Path<String>) -> Result<Json<Event>, ApiError> {
        let (event, count) = self.event_store.get(&id.0).await?;
        Ok(Json(Event::from_model(event, count)))
    }

    #[oai(path = "/", method = "post", tag = "EventTags::Events")]
    async fn create_event(&self, req: &Request, body: Json<CreateEventRequest>) -> Result<Json<EventWriteResponse>, ApiError> {
        access::require_admin(&self.session(req).await?)?;

        let event = self.event_store.create(body.0).await?;

        Ok(Json(EventWriteResponse {
            message: "Event created successfully".to_string(),
            event: Event::from_model(event, 0),
        }))
    }

    #[oai(path = "/:id", method = "patch", tag = "EventTags::Events")]
    async fn update_event(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateEventRequest>,
    ) -> Result<Json<EventWriteResponse>, ApiError> {
        access::require_admin(&self.session(req).await?)?;

        self.event_store.update(&id.0, body.0).await?;
        let (event, count) = self.event_store.get(&id.0).await?;

        Ok(Json(EventWriteResponse {
            message: "Event updated successfully".to_string(),
            event: Event::from_model(event, count),
        }))
    }

    /// Delete an event and its registrations
    #[oai(path = "/:id", method = "delete", tag = "EventTags::Events")]
    async fn delete_event(&self, req: &Request, id: Path<String>) -> Result<Json<MessageResponse>, ApiError> {
        access::require_admin(&self.session(req).await?)?;

        self.event_store.delete(&id.0).await?;

        Ok(Json(MessageResponse::new("Event deleted successfully")))
    }

    /// Register the caller for an event
    ///
    /// Fails with 409 when already registered or when the event is full.
    #[oai(path = "/:id/register", method = "post", tag = "EventTags::Events")]
    async fn register(&self, req: &Request, id: Path<String>) -> Result<Json<RegistrationWriteResponse>, ApiError> {
        let session = self.session(req).await?;
        let user = access::require_user(&session)?;

        let registration = self.event_store.register(&id.0, &user.id).await?;

        Ok(Json(RegistrationWriteResponse {
            message: "Registered for event".to_string(),
            registration: registration.into(),
        }))
    }

    #[oai(path = "/:id/register", method = "delete", tag = "EventTags::Events")]
    async fn unregister(&self, req: &Request, id: Path<String>) -> Result<Json<MessageResponse>, ApiError> {
        let session = self.session(req).await?;
        let user = access::require_user(&session)?;

        self.event_store.unregister(&id.0, &user.id).await?;

        Ok(Json(MessageResponse::new("Registration cancelled")))
    }

    /// Registrations for one event (admin and staff)
    #[oai(path = "/:id/registrations", method = "get", tag = "EventTags::Events")]
    async fn list_registrations(&self, req: &Request, id: Path<String>) -> Result<Json<Vec<EventRegistration>>, ApiError> {
        access::require_back_office(&self.session(req).await?)?;

        let registrations = self.event_store.list_registrations(&id.0).await?;
        Ok(Json(registrations.into_iter().map(EventRegistration::from).collect()))
    }

    /// The caller's own registrations
    #[oai(path = "/registrations/mine", method = "get", tag = "EventTags::Events")]
    async fn my_registrations(&self, req: &Request) -> Result<Json<Vec<EventRegistration>>, ApiError> {
        let session = self.session(req).await?;
        let user = access::require_user(&session)?;

        let registrations = self.event_store.list_for_user(&user.id).await?;
        Ok(Json(registrations.into_iter().map(EventRegistration::from).collect()))
    }
}
