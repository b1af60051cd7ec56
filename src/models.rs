use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::quiz::ParsedQuiz;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct CourseRow {
    pub id: i64,
    pub title: String,
    pub title_fr: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct ModuleRow {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub title_fr: Option<String>,
    pub module_number: i32,
    pub sort_order: i32,
    pub status: String,
    pub thumbnail_url: Option<String>,
    pub badge_image_url: Option<String>,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct LessonRow {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub title_fr: Option<String>,
    pub lesson_number: i32,
    pub sort_order: i32,
    pub status: String,
    pub quality_gate_status: Option<String>,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct ActivityRow {
    pub id: i64,
    pub lesson_id: i64,
    pub module_id: i64,
    pub slot_index: Option<i32>,
    pub slot_type: Option<String>,
    pub activity_type: String,
    pub title: Option<String>,
    pub title_fr: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub sort_order: i32,
}

#[derive(sqlx::FromRow, Debug, Clone, Copy)]
pub struct QuizCountRow {
    pub lesson_id: i64,
    pub question_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParseQuizReq {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParseQuizResp {
    pub quiz: Option<ParsedQuiz>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GradeQuizReq {
    pub content: String,
    /// question id -> learner's answer
    #[serde(default)]
    pub answers: HashMap<i64, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuizResp {
    pub activity_id: i64,
    pub quiz: Option<ParsedQuiz>,
    /// Raw content, so the client can show it when no quiz could be read.
    pub content: Option<String>,
}
