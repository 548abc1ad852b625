use serde::Deserialize;
use serde_json::json;

use crate::core::grader::Grader;
use crate::error::Error;

/// Client for the questionnaire grading service.
#[derive(Debug, Clone)]
pub struct HttpGrader {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct QuestionsBody {
    questions: Vec<String>,
}

#[derive(Deserialize)]
struct EvaluationBody {
    evaluation: String,
}

impl HttpGrader {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Grader for HttpGrader {
    async fn questions(&self) -> Result<Vec<String>, Error> {
        let resp = self
            .client
            .get(format!("{}/get-questions", self.base_url))
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("grading service request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(Error::Upstream(format!("grading service returned {}", resp.status())));
        }
        let body: QuestionsBody = resp
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("grading service sent malformed questions: {e}")))?;
        Ok(body.questions)
    }

    async fn evaluate(&self, questions: &[String], answers: &[String]) -> Result<String, Error> {
        let resp = self
            .client
            .post(format!("{}/evaluate", self.base_url))
            .json(&json!({ "questions": questions, "answers": answers }))
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("grading service request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(Error::Upstream(format!("grading service returned {}", resp.status())));
        }
        let body: EvaluationBody = resp
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("grading service sent malformed evaluation: {e}")))?;
        Ok(body.evaluation)
    }
}
