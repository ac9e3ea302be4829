use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::quiz::{Question, QuestionError, QuestionKind, RawQuestion};
use crate::registry::{QuizHandle, QuizSummary, Registry};


pub const API_PREFIX: &str = "/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Quiz not found")]
    QuizNotFound,
    #[error("Question not found")]
    QuestionNotFound,
    #[error("{0}")]
    BadRequest(String),
}

impl From<QuestionError> for ApiError {
    fn from(error: QuestionError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::QuizNotFound | ApiError::QuestionNotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct CreateQuizPayload {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub question_index: i64,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(MessageResponse {
            message: message.to_owned(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetails {
    pub id: String,
    pub name: String,
    pub total_questions: usize,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub question_index: usize,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl QuestionDto {
    fn new(question_index: usize, question: &Question) -> Self {
        QuestionDto {
            question_index,
            text: question.text().to_owned(),
            kind: question.kind(),
            options: question.options().map(|o| o.to_vec()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_answer: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub name: String,
    pub score: u32,
    pub total_questions: usize,
}

fn find_quiz(registry: &Registry, id: &str) -> Result<QuizHandle, ApiError> {
    registry.get(id).ok_or(ApiError::QuizNotFound)
}

async fn create_quiz(
    State(registry): State<Arc<Registry>>,
    payload: Result<Json<CreateQuizPayload>, JsonRejection>,
) -> ApiResult<QuizSummary> {
    let Json(payload) = payload?;
    let id = registry.create(&payload.name);
    Ok(Json(QuizSummary {
        id,
        name: payload.name,
    }))
}

async fn list_quizzes(State(registry): State<Arc<Registry>>) -> Json<Vec<QuizSummary>> {
    Json(registry.list())
}

async fn get_quiz(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<String>,
) -> ApiResult<QuizDetails> {
    let quiz_lock = find_quiz(&registry, &id)?;
    let quiz = quiz_lock.lock();
    Ok(Json(QuizDetails {
        name: quiz.name().to_owned(),
        total_questions: quiz.total_questions(),
        id,
    }))
}

async fn add_question(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<String>,
    payload: Result<Json<RawQuestion>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let quiz_lock = find_quiz(&registry, &id)?;
    let Json(raw_question) = payload?;
    let question = Question::try_from(raw_question)?;
    let mut quiz = quiz_lock.lock();
    quiz.add_question(question);
    info!(quiz = %id, total = quiz.total_questions(), "Question added");
    Ok(MessageResponse::new("Question added."))
}

async fn start_quiz(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let quiz_lock = find_quiz(&registry, &id)?;
    quiz_lock.lock().start_session();
    info!(quiz = %id, "New game started");
    Ok(MessageResponse::new("New game started."))
}

async fn next_question(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let quiz_lock = find_quiz(&registry, &id)?;
    let mut quiz = quiz_lock.lock();
    match quiz.next_question() {
        Some((index, question)) => Ok(Json(QuestionDto::new(index, question)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn submit_answer(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<String>,
    payload: Result<Json<AnswerPayload>, JsonRejection>,
) -> ApiResult<AnswerResult> {
    let quiz_lock = find_quiz(&registry, &id)?;
    let Json(payload) = payload?;
    let mut quiz = quiz_lock.lock();
    let question = usize::try_from(payload.question_index)
        .ok()
        .and_then(|index| quiz.question_at(index))
        .ok_or(ApiError::QuestionNotFound)?;

    let is_correct = question.is_correct(&payload.answer);
    let correct_answer = question.correct_answer().to_owned();
    if is_correct {
        quiz.increment_score();
    }
    debug!(
        quiz = %id,
        question = payload.question_index,
        is_correct,
        "Answer submitted"
    );

    Ok(Json(AnswerResult {
        is_correct,
        correct_answer,
    }))
}

async fn get_results(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<String>,
) -> ApiResult<QuizResults> {
    let quiz_lock = find_quiz(&registry, &id)?;
    let quiz = quiz_lock.lock();
    Ok(Json(QuizResults {
        name: quiz.name().to_owned(),
        score: quiz.score(),
        total_questions: quiz.total_questions(),
    }))
}

fn routes(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/quizzes", get(list_quizzes).post(create_quiz))
        .route("/quizzes/{id}", get(get_quiz))
        .route("/quizzes/{id}/questions", post(add_question))
        .route("/quizzes/{id}/start", post(start_quiz))
        .route("/quizzes/{id}/question", get(next_question))
        .route("/quizzes/{id}/answer", post(submit_answer))
        .route("/quizzes/{id}/results", get(get_results))
        .with_state(registry)
}

/// Quiz routes, served both at the root and under `/api` for the browser client.
pub fn router(registry: Arc<Registry>) -> Router {
    let routes = routes(registry);
    Router::new()
        .nest(API_PREFIX, routes.clone())
        .merge(routes)
}
