use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::core::models::user::{restore_question, sanitize_question, Role, User, UserInsert};
use crate::core::ports::repository::Store;
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingUpdate {
    pub email: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub overall_grade: String,
}

/// Idempotent profile sync: repeated calls with the same email return the
/// existing user unchanged.
pub async fn create_or_fetch<S: Store>(store: &S, data: CreateProfile) -> Result<User, Error> {
    if let Some(user) = store.user_by_email(&data.email).await? {
        return Ok(user);
    }
    let id = store
        .insert_user(UserInsert {
            name: data.name,
            email: data.email,
            picture: data.picture,
            role: Role::Volunteer,
        })
        .await?;
    store
        .user(id)
        .await?
        .ok_or_else(|| Error::Server("profile vanished right after creation".into()))
}

pub async fn user_id<S: Store>(store: &S, email: &str) -> Result<Uuid, Error> {
    let user = store
        .user_by_email(email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    Ok(user.id)
}

/// Full profile fetch. Question keys come back with their dots restored.
pub async fn profile<S: Store>(store: &S, email: &str) -> Result<User, Error> {
    let mut user = store
        .user_by_email(email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    user.question_answers = user
        .question_answers
        .into_iter()
        .map(|(question, answer)| (restore_question(&question), answer))
        .collect();
    Ok(user)
}

pub async fn complete_onboarding<S: Store>(store: &S, data: OnboardingUpdate) -> Result<User, Error> {
    if data.questions.len() != data.answers.len() {
        return Err(Error::Validation("Questions and answers length mismatch".into()));
    }
    let user = store
        .user_by_email(&data.email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    let answers: BTreeMap<String, String> = data
        .questions
        .iter()
        .zip(data.answers)
        .map(|(question, answer)| (sanitize_question(question), answer))
        .collect();
    store.complete_onboarding(user.id, answers, &data.overall_grade).await?;
    profile(store, &data.email).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::store::memory::MemoryStore;

    fn volunteer(name: &str, email: &str) -> CreateProfile {
        CreateProfile {
            name: name.into(),
            email: email.into(),
            picture: None,
        }
    }

    #[tokio::test]
    async fn create_is_idempotent_per_email() {
        let store = MemoryStore::new();
        let first = create_or_fetch(&store, volunteer("Ada", "ada@x.com")).await.unwrap();
        let second = create_or_fetch(&store, volunteer("Someone Else", "ada@x.com")).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Ada");
        assert_eq!(second.overall_grade, "-");
        assert!(!second.onboarding_complete);
    }

    #[tokio::test]
    async fn onboarding_rejects_mismatched_lengths() {
        let store = MemoryStore::new();
        create_or_fetch(&store, volunteer("Ada", "ada@x.com")).await.unwrap();
        let err = complete_onboarding(
            &store,
            OnboardingUpdate {
                email: "ada@x.com".into(),
                questions: vec!["Why volunteer?".into(), "Availability?".into()],
                answers: vec!["Because".into()],
                overall_grade: "A".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let untouched = profile(&store, "ada@x.com").await.unwrap();
        assert!(!untouched.onboarding_complete);
        assert_eq!(untouched.overall_grade, "-");
        assert!(untouched.question_answers.is_empty());
    }

    #[tokio::test]
    async fn onboarding_requires_a_known_user() {
        let store = MemoryStore::new();
        let err = complete_onboarding(
            &store,
            OnboardingUpdate {
                email: "ghost@x.com".into(),
                questions: vec![],
                answers: vec![],
                overall_grade: "B".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn dotted_questions_survive_the_round_trip() {
        let store = MemoryStore::new();
        create_or_fetch(&store, volunteer("Ada", "ada@x.com")).await.unwrap();
        let question = "Describe a project. E.g. something you led.";
        let updated = complete_onboarding(
            &store,
            OnboardingUpdate {
                email: "ada@x.com".into(),
                questions: vec![question.into()],
                answers: vec!["A beach cleanup".into()],
                overall_grade: "B".into(),
            },
        )
        .await
        .unwrap();
        assert!(updated.onboarding_complete);
        assert_eq!(updated.overall_grade, "B");
        assert_eq!(updated.question_answers.get(question).map(String::as_str), Some("A beach cleanup"));

        let fetched = profile(&store, "ada@x.com").await.unwrap();
        assert_eq!(fetched.question_answers.get(question).map(String::as_str), Some("A beach cleanup"));
    }
}
