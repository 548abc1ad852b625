use actix_web::web::{Data, Json};
use serde::Deserialize;

use crate::core::grader::{extract_grade, Grader};
use crate::error::Error;
use crate::response::{EvaluationResponse, QuestionsResponse};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

pub async fn questions<G: Grader>(grader: Data<G>) -> Result<Json<QuestionsResponse>, Error> {
    let questions = grader.questions().await?;
    Ok(Json(QuestionsResponse { questions }))
}

pub async fn evaluate<G: Grader>(grader: Data<G>, body: Json<EvaluateRequest>) -> Result<Json<EvaluationResponse>, Error> {
    if body.questions.len() != body.answers.len() {
        return Err(Error::Validation("Questions and answers length mismatch".into()));
    }
    let evaluation = grader.evaluate(&body.questions, &body.answers).await?;
    let overall_grade = extract_grade(&evaluation).map(String::from);
    Ok(Json(EvaluationResponse {
        evaluation,
        overall_grade,
    }))
}
