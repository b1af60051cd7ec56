use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::collections::HashMap;

use crate::config::Config;
use crate::models::{ActivityRow, CourseRow, LessonRow, ModuleRow, QuizCountRow};

pub type Db = Pool<Postgres>;

pub async fn connect(cfg: &Config) -> Result<Db, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect(&cfg.database_url)
        .await
}

// ------------- read queries for the admin tree and quiz rendering -------------

pub async fn fetch_course(db: &Db, course_id: i64) -> Result<Option<CourseRow>, sqlx::Error> {
    sqlx::query_as::<_, CourseRow>("SELECT id, title, title_fr, created_at FROM courses WHERE id = $1")
        .bind(course_id)
        .fetch_optional(db)
        .await
}

pub async fn fetch_module(db: &Db, module_id: i64) -> Result<Option<ModuleRow>, sqlx::Error> {
    sqlx::query_as::<_, ModuleRow>(
        r#"
        SELECT id, course_id, title, title_fr, module_number, sort_order, status,
               thumbnail_url, badge_image_url
        FROM course_modules WHERE id = $1
        "#,
    )
    .bind(module_id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_modules_for_course(db: &Db, course_id: i64) -> Result<Vec<ModuleRow>, sqlx::Error> {
    sqlx::query_as::<_, ModuleRow>(
        r#"
        SELECT id, course_id, title, title_fr, module_number, sort_order, status,
               thumbnail_url, badge_image_url
        FROM course_modules WHERE course_id = $1
        ORDER BY sort_order, id
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_lessons(db: &Db, module_ids: &[i64]) -> Result<Vec<LessonRow>, sqlx::Error> {
    sqlx::query_as::<_, LessonRow>(
        r#"
        SELECT id, module_id, title, title_fr, lesson_number, sort_order, status, quality_gate_status
        FROM lessons WHERE module_id = ANY($1)
        ORDER BY sort_order, id
        "#,
    )
    .bind(module_ids)
    .fetch_all(db)
    .await
}

pub async fn fetch_activities(db: &Db, lesson_ids: &[i64]) -> Result<Vec<ActivityRow>, sqlx::Error> {
    sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT id, lesson_id, module_id, slot_index, slot_type, activity_type, title, title_fr,
               content, video_url, audio_url, thumbnail_url, status, sort_order
        FROM activities WHERE lesson_id = ANY($1)
        ORDER BY sort_order, id
        "#,
    )
    .bind(lesson_ids)
    .fetch_all(db)
    .await
}

pub async fn fetch_activity(db: &Db, activity_id: i64) -> Result<Option<ActivityRow>, sqlx::Error> {
    sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT id, lesson_id, module_id, slot_index, slot_type, activity_type, title, title_fr,
               content, video_url, audio_url, thumbnail_url, status, sort_order
        FROM activities WHERE id = $1
        "#,
    )
    .bind(activity_id)
    .fetch_optional(db)
    .await
}

/// lesson id -> number of quiz questions authored for it
pub async fn fetch_quiz_counts(db: &Db, lesson_ids: &[i64]) -> Result<HashMap<i64, i64>, sqlx::Error> {
    let rows = sqlx::query_as::<_, QuizCountRow>(
        r#"
        SELECT lesson_id, COUNT(*) AS question_count
        FROM quiz_questions WHERE lesson_id = ANY($1)
        GROUP BY lesson_id
        "#,
    )
    .bind(lesson_ids)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(|r| (r.lesson_id, r.question_count)).collect())
}
