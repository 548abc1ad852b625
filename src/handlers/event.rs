use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::models::event::Event;
use crate::core::ports::repository::Store;
use crate::core::services::event;
use crate::error::Error;
use crate::response::{EventResponse, EventsResponse};

/// Listing query: either organizer `email` or the search filters, the
/// former taking precedence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    pub email: Option<String>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub async fn create<S: Store>(store: Data<S>, body: Json<event::CreateEvent>) -> Result<HttpResponse, Error> {
    let created = event::create_event(store.as_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(EventResponse {
        message: "Event created successfully".to_string(),
        event: created,
    }))
}

pub async fn list<S: Store>(store: Data<S>, query: Query<ListEventsQuery>) -> Result<Json<Vec<Event>>, Error> {
    let query = query.into_inner();
    let events = match query.email {
        Some(email) => event::events_by_organizer(store.as_ref(), &email).await?,
        None => {
            event::list_events(
                store.as_ref(),
                event::EventFilter {
                    search: query.search,
                    location: query.location,
                    start_date: query.start_date,
                    end_date: query.end_date,
                },
            )
            .await?
        }
    };
    Ok(Json(events))
}

pub async fn admin_list<S: Store>(store: Data<S>) -> Result<Json<EventsResponse>, Error> {
    let events = event::list_all(store.as_ref()).await?;
    Ok(Json(EventsResponse { events }))
}

pub async fn detail<S: Store>(store: Data<S>, id: Path<Uuid>) -> Result<Json<Event>, Error> {
    Ok(Json(event::event_detail(store.as_ref(), *id).await?))
}
