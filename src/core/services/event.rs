use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::models::event::{default_categories, Event, EventInsert, EventQuery, DEFAULT_GRADE};
use crate::core::ports::repository::Store;
use crate::error::Error;

fn default_grade() -> String {
    DEFAULT_GRADE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    /// Organizer email; the organizer id is resolved from it.
    pub email: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_grade")]
    pub grade: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    pub search: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub async fn create_event<S: Store>(store: &S, data: CreateEvent) -> Result<Event, Error> {
    let user = store
        .user_by_email(&data.email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    if !user.role.can_organize() {
        return Err(Error::Forbidden("You do not have permission to create events".into()));
    }
    let id = store
        .insert_event(EventInsert {
            organizer_id: user.id,
            email: data.email,
            title: data.title,
            description: data.description,
            location: data.location,
            date: data.date,
            categories: data.categories,
            grade: data.grade,
        })
        .await?;
    store
        .event(id)
        .await?
        .ok_or_else(|| Error::Server("event vanished right after creation".into()))
}

pub async fn list_events<S: Store>(store: &S, filter: EventFilter) -> Result<Vec<Event>, Error> {
    // The date range only applies when both bounds are present.
    let (date_from, date_to) = match (filter.start_date, filter.end_date) {
        (Some(from), Some(to)) => (Some(from), Some(to)),
        _ => (None, None),
    };
    store
        .query_events(&EventQuery {
            search: filter.search,
            location: filter.location,
            date_from,
            date_to,
            ..Default::default()
        })
        .await
}

pub async fn list_all<S: Store>(store: &S) -> Result<Vec<Event>, Error> {
    store.query_events(&EventQuery::default()).await
}

pub async fn events_by_organizer<S: Store>(store: &S, email: &str) -> Result<Vec<Event>, Error> {
    store
        .query_events(&EventQuery {
            organizer_email: Some(email.to_string()),
            ..Default::default()
        })
        .await
}

pub async fn event_detail<S: Store>(store: &S, id: Uuid) -> Result<Event, Error> {
    store
        .event(id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::user::{OrganizationDetails, Role, UserInsert};
    use crate::core::ports::repository::UserStore;
    use crate::impls::store::memory::MemoryStore;

    async fn seed_organizer(store: &MemoryStore, email: &str) {
        store
            .insert_user(UserInsert {
                name: "Green Earth".into(),
                email: email.into(),
                picture: None,
                role: Role::Organization(OrganizationDetails {
                    name: "Green Earth".into(),
                    description: "Coastal cleanups".into(),
                    contact_email: email.into(),
                    website: "https://green.example".into(),
                    events_count: 0,
                    selected_candidates_count: 0,
                    is_approved: true,
                }),
            })
            .await
            .unwrap();
    }

    fn event(email: &str, title: &str, description: &str, location: &str, date: &str) -> CreateEvent {
        CreateEvent {
            email: email.into(),
            title: title.into(),
            description: description.into(),
            location: location.into(),
            date: date.parse().unwrap(),
            categories: default_categories(),
            grade: "F".into(),
        }
    }

    #[tokio::test]
    async fn volunteers_cannot_create_events() {
        let store = MemoryStore::new();
        store
            .insert_user(UserInsert {
                name: "Ada".into(),
                email: "ada@x.com".into(),
                picture: None,
                role: Role::Volunteer,
            })
            .await
            .unwrap();

        let err = create_event(&store, event("ada@x.com", "Cleanup", "", "Pier", "2024-07-04"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert!(list_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_organizer_is_not_found() {
        let store = MemoryStore::new();
        let err = create_event(&store, event("ghost@x.com", "Cleanup", "", "Pier", "2024-07-04"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn search_matches_title_or_description_case_insensitively() {
        let store = MemoryStore::new();
        seed_organizer(&store, "org@green.example").await;
        create_event(&store, event("org@green.example", "Beach Cleanup", "Bring gloves", "Pier 7", "2024-07-10"))
            .await
            .unwrap();
        create_event(&store, event("org@green.example", "Food Drive", "Sort cans at the BEACH depot", "Warehouse", "2024-07-12"))
            .await
            .unwrap();
        create_event(&store, event("org@green.example", "Tutoring", "Math help", "Library", "2024-07-15"))
            .await
            .unwrap();

        let found = list_events(
            &store,
            EventFilter {
                search: Some("beach".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let titles: Vec<&str> = found.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Beach Cleanup", "Food Drive"]);
    }

    #[tokio::test]
    async fn date_range_is_inclusive_and_needs_both_bounds() {
        let store = MemoryStore::new();
        seed_organizer(&store, "org@green.example").await;
        for (title, date) in [("June", "2024-06-30"), ("First", "2024-07-01"), ("Last", "2024-07-31"), ("August", "2024-08-01")] {
            create_event(&store, event("org@green.example", title, "", "Anywhere", date))
                .await
                .unwrap();
        }

        let july = list_events(
            &store,
            EventFilter {
                start_date: Some("2024-07-01".parse().unwrap()),
                end_date: Some("2024-07-31".parse().unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let titles: Vec<&str> = july.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Last"]);

        // A lone bound is ignored rather than applied half-open.
        let all = list_events(
            &store,
            EventFilter {
                start_date: Some("2024-07-01".parse().unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn filters_compose_and_results_come_back_date_ascending() {
        let store = MemoryStore::new();
        seed_organizer(&store, "org@green.example").await;
        create_event(&store, event("org@green.example", "Beach Cleanup West", "", "West Pier", "2024-07-20"))
            .await
            .unwrap();
        create_event(&store, event("org@green.example", "Beach Cleanup East", "", "East Pier", "2024-07-05"))
            .await
            .unwrap();
        create_event(&store, event("org@green.example", "Beach Bonfire", "", "East Pier", "2024-09-01"))
            .await
            .unwrap();

        let found = list_events(
            &store,
            EventFilter {
                search: Some("cleanup".into()),
                location: Some("pier".into()),
                start_date: Some("2024-07-01".parse().unwrap()),
                end_date: Some("2024-07-31".parse().unwrap()),
            },
        )
        .await
        .unwrap();
        let titles: Vec<&str> = found.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Beach Cleanup East", "Beach Cleanup West"]);
    }

    #[tokio::test]
    async fn organizer_email_listing_uses_the_denormalized_field() {
        let store = MemoryStore::new();
        seed_organizer(&store, "org@green.example").await;
        seed_organizer(&store, "other@org.example").await;
        create_event(&store, event("org@green.example", "Cleanup", "", "Pier", "2024-07-04"))
            .await
            .unwrap();
        create_event(&store, event("other@org.example", "Drive", "", "Depot", "2024-07-05"))
            .await
            .unwrap();

        let mine = events_by_organizer(&store, "org@green.example").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Cleanup");
    }
}
