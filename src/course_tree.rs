//! Admin course tree: module → lesson → activity, annotated with slot
//! completeness and bilingual/content presence.
//!
//! A pure projection over rows the caller already fetched. Nothing is cached;
//! the tree is rebuilt from current rows on every request.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{ActivityRow, CourseRow, LessonRow, ModuleRow};
use crate::slots::{self, display_label, SlotClass, SlotTemplate, REQUIRED_SLOTS};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotNode {
    pub id: i64,
    pub slot_index: Option<i32>,
    pub slot_type: Option<String>,
    pub slot_label: String,
    pub activity_type: String,
    pub title: Option<String>,
    pub title_fr: Option<String>,
    pub has_bilingual: bool,
    pub has_content: bool,
    pub thumbnail_url: Option<String>,
    pub status: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonNode {
    pub id: i64,
    pub title: String,
    pub title_fr: Option<String>,
    pub lesson_number: i32,
    pub sort_order: i32,
    pub status: String,
    pub has_bilingual: bool,
    pub total_slots: usize,
    pub required_present: usize,
    pub required_total: usize,
    pub extras_count: usize,
    pub quiz_question_count: i64,
    pub quality_gate_status: String,
    pub slots_indicator: String,
    pub is_complete: bool,
    /// Required slots that still have no activity.
    pub missing_slots: Vec<SlotTemplate>,
    pub slots: Vec<SlotNode>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleNode {
    pub id: i64,
    pub title: String,
    pub title_fr: Option<String>,
    pub module_number: i32,
    pub sort_order: i32,
    pub status: String,
    pub has_bilingual: bool,
    pub thumbnail_url: Option<String>,
    pub badge_image_url: Option<String>,
    pub total_lessons: usize,
    pub complete_lessons: usize,
    pub lessons_indicator: String,
    pub progress_indicator: String,
    pub lessons: Vec<LessonNode>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseTree {
    pub id: i64,
    pub title: String,
    pub title_fr: Option<String>,
    pub has_bilingual: bool,
    pub total_modules: usize,
    pub total_lessons: usize,
    pub complete_lessons: usize,
    pub total_activities: usize,
    pub structure_indicator: String,
    pub modules: Vec<ModuleNode>,
}

fn present(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.is_empty())
}

fn bilingual(title: Option<&str>, title_fr: Option<&str>) -> bool {
    present(title) && present(title_fr)
}

fn slot_node(act: &ActivityRow) -> SlotNode {
    SlotNode {
        id: act.id,
        slot_index: act.slot_index,
        slot_type: act.slot_type.clone(),
        slot_label: display_label(act.slot_type.as_deref()),
        activity_type: act.activity_type.clone(),
        title: act.title.clone(),
        title_fr: act.title_fr.clone(),
        has_bilingual: bilingual(act.title.as_deref(), act.title_fr.as_deref()),
        has_content: present(act.content.as_deref())
            || present(act.video_url.as_deref())
            || present(act.audio_url.as_deref()),
        thumbnail_url: act.thumbnail_url.clone(),
        status: act.status.clone(),
    }
}

pub fn build_lesson_tree(lesson: &LessonRow, activities: &[&ActivityRow], quiz_count: i64) -> LessonNode {
    let required_present = activities
        .iter()
        .filter(|a| SlotClass::of(a.slot_index) == SlotClass::Required)
        .count();
    let extras_count = activities
        .iter()
        .filter(|a| SlotClass::of(a.slot_index) == SlotClass::Extra)
        .count();

    LessonNode {
        id: lesson.id,
        title: lesson.title.clone(),
        title_fr: lesson.title_fr.clone(),
        lesson_number: lesson.lesson_number,
        sort_order: lesson.sort_order,
        status: lesson.status.clone(),
        has_bilingual: bilingual(Some(&lesson.title), lesson.title_fr.as_deref()),
        total_slots: activities.len(),
        required_present,
        required_total: REQUIRED_SLOTS,
        extras_count,
        quiz_question_count: quiz_count,
        quality_gate_status: lesson
            .quality_gate_status
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "pending".to_string()),
        slots_indicator: format!("{required_present}/{REQUIRED_SLOTS} slots"),
        is_complete: required_present == REQUIRED_SLOTS,
        missing_slots: slots::missing_slots(activities.iter().map(|a| a.slot_index)),
        slots: activities.iter().map(|a| slot_node(a)).collect(),
    }
}

/// `activities` may span other modules; each lesson picks out its own.
pub fn build_module_tree(
    module: &ModuleRow,
    lessons: &[LessonRow],
    activities: &[ActivityRow],
    quiz_counts: &HashMap<i64, i64>,
) -> ModuleNode {
    let lesson_nodes: Vec<LessonNode> = lessons
        .iter()
        .map(|lesson| {
            let own: Vec<&ActivityRow> = activities.iter().filter(|a| a.lesson_id == lesson.id).collect();
            let quiz_count = quiz_counts.get(&lesson.id).copied().unwrap_or(0);
            build_lesson_tree(lesson, &own, quiz_count)
        })
        .collect();

    let complete_lessons = lesson_nodes.iter().filter(|l| l.is_complete).count();
    let total_lessons = lessons.len();

    ModuleNode {
        id: module.id,
        title: module.title.clone(),
        title_fr: module.title_fr.clone(),
        module_number: module.module_number,
        sort_order: module.sort_order,
        status: module.status.clone(),
        has_bilingual: bilingual(Some(&module.title), module.title_fr.as_deref()),
        thumbnail_url: module.thumbnail_url.clone(),
        badge_image_url: module.badge_image_url.clone(),
        total_lessons,
        complete_lessons,
        lessons_indicator: format!("{total_lessons} lessons"),
        progress_indicator: format!("{complete_lessons}/{total_lessons} complete"),
        lessons: lesson_nodes,
    }
}

pub fn build_course_tree(course: &CourseRow, modules: Vec<ModuleNode>) -> CourseTree {
    let total_lessons = modules.iter().map(|m| m.total_lessons).sum();
    let complete_lessons = modules.iter().map(|m| m.complete_lessons).sum();
    let total_activities = modules
        .iter()
        .flat_map(|m| &m.lessons)
        .map(|l| l.total_slots)
        .sum();

    CourseTree {
        id: course.id,
        title: course.title.clone(),
        title_fr: course.title_fr.clone(),
        has_bilingual: bilingual(Some(&course.title), course.title_fr.as_deref()),
        total_modules: modules.len(),
        total_lessons,
        complete_lessons,
        total_activities,
        structure_indicator: format!(
            "{} modules · {} lessons · {} activities",
            modules.len(),
            total_lessons,
            total_activities
        ),
        modules,
    }
}
