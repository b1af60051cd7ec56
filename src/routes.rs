use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    course_tree::{self, CourseTree, ModuleNode},
    db::{self, Db},
    error::{AppError, AppResult},
    models::*,
    quiz::{self, ParseOptions, QuizScore},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub parse: ParseOptions,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // quiz ingestion
        .route("/api/quiz/parse", post(parse_quiz))
        .route("/api/quiz/grade", post(grade_quiz))
        .route("/api/activities/:activity_id/quiz", get(activity_quiz))
        // admin read-models
        .route("/api/admin/modules/:module_id/tree", get(module_tree))
        .route("/api/admin/courses/:course_id/tree", get(course_tree))
        .with_state(state)
}

async fn parse_quiz(
    State(state): State<AppState>,
    Json(req): Json<ParseQuizReq>,
) -> Json<ParseQuizResp> {
    let quiz = quiz::parse_quiz_with(&req.content, &state.parse);
    if quiz.is_none() {
        tracing::info!(len = req.content.len(), "content has no readable quiz");
    }
    Json(ParseQuizResp { quiz })
}

async fn grade_quiz(
    State(state): State<AppState>,
    Json(req): Json<GradeQuizReq>,
) -> AppResult<Json<QuizScore>> {
    let parsed = quiz::parse_quiz_with(&req.content, &state.parse)
        .ok_or_else(|| AppError::Unprocessable("content has no readable quiz".into()))?;
    Ok(Json(quiz::score_answers(&parsed.questions, &req.answers)))
}

async fn activity_quiz(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> AppResult<Json<ActivityQuizResp>> {
    let activity = db::fetch_activity(&state.db, activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("activity {activity_id}")))?;

    let quiz = activity
        .content
        .as_deref()
        .and_then(|c| quiz::parse_quiz_with(c, &state.parse));
    if quiz.is_none() {
        tracing::debug!(activity_id, "activity content is not a quiz");
    }

    Ok(Json(ActivityQuizResp {
        activity_id,
        quiz,
        content: activity.content,
    }))
}

async fn module_tree(
    State(state): State<AppState>,
    Path(module_id): Path<i64>,
) -> AppResult<Json<ModuleNode>> {
    let module = db::fetch_module(&state.db, module_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("module {module_id}")))?;

    let mut trees = module_trees(&state.db, vec![module]).await?;
    // one module in, one tree out
    trees
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("module {module_id}")))
}

async fn course_tree(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> AppResult<Json<CourseTree>> {
    let course = db::fetch_course(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {course_id}")))?;

    let modules = db::fetch_modules_for_course(&state.db, course_id).await?;
    let trees = module_trees(&state.db, modules).await?;
    let tree = course_tree::build_course_tree(&course, trees);

    tracing::debug!(course_id, indicator = %tree.structure_indicator, "built course tree");
    Ok(Json(tree))
}

// --- helpers ---

/// Fetches lessons, activities and quiz counts for `modules` in three queries.
async fn module_trees(db: &Db, modules: Vec<ModuleRow>) -> AppResult<Vec<ModuleNode>> {
    let module_ids: Vec<i64> = modules.iter().map(|m| m.id).collect();
    let lessons = db::fetch_lessons(db, &module_ids).await?;
    let lesson_ids: Vec<i64> = lessons.iter().map(|l| l.id).collect();
    let activities = db::fetch_activities(db, &lesson_ids).await?;
    let quiz_counts = db::fetch_quiz_counts(db, &lesson_ids).await?;

    Ok(modules
        .iter()
        .map(|m| {
            let own: Vec<LessonRow> = lessons.iter().filter(|l| l.module_id == m.id).cloned().collect();
            course_tree::build_module_tree(m, &own, &activities, &quiz_counts)
        })
        .collect())
}
