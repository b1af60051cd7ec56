// Fixed lesson template: seven required slots, anything after is an extra.

use serde::Serialize;
use std::collections::HashSet;

pub const REQUIRED_SLOTS: usize = 7;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlotTemplate {
    pub slot_index: i32,
    pub slot_type: &'static str,
    pub label: &'static str,
    pub activity_type: &'static str,
}

pub const SLOT_TEMPLATE: [SlotTemplate; REQUIRED_SLOTS] = [
    SlotTemplate { slot_index: 1, slot_type: "introduction", label: "Intro / Hook", activity_type: "text" },
    SlotTemplate { slot_index: 2, slot_type: "video_scenario", label: "Video Scenario", activity_type: "video" },
    SlotTemplate { slot_index: 3, slot_type: "grammar_point", label: "Grammar / Strategy", activity_type: "text" },
    SlotTemplate { slot_index: 4, slot_type: "written_practice", label: "Written Practice", activity_type: "assignment" },
    SlotTemplate { slot_index: 5, slot_type: "oral_practice", label: "Oral Practice", activity_type: "audio" },
    SlotTemplate { slot_index: 6, slot_type: "quiz_slot", label: "Quiz", activity_type: "quiz" },
    SlotTemplate { slot_index: 7, slot_type: "coaching_tip", label: "Coaching Tip", activity_type: "text" },
];

pub fn slot_label(slot_type: &str) -> Option<&'static str> {
    match slot_type {
        "introduction"     => Some("Intro / Hook"),
        "video_scenario"   => Some("Video Scenario"),
        "grammar_point"    => Some("Grammar / Strategy"),
        "written_practice" => Some("Written Practice"),
        "oral_practice"    => Some("Oral Practice"),
        "quiz_slot"        => Some("Quiz"),
        "coaching_tip"     => Some("Coaching Tip"),
        "extra"            => Some("Extra"),
        _ => None,
    }
}

/// Label shown in the admin tree: known label, else the raw type, else "Unknown".
pub fn display_label(slot_type: Option<&str>) -> String {
    match slot_type {
        Some(t) if !t.is_empty() => slot_label(t).unwrap_or(t).to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Template slots with no activity at their index, in slot order.
pub fn missing_slots(filled: impl IntoIterator<Item = Option<i32>>) -> Vec<SlotTemplate> {
    let filled: HashSet<i32> = filled.into_iter().flatten().collect();
    SLOT_TEMPLATE
        .into_iter()
        .filter(|slot| !filled.contains(&slot.slot_index))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClass {
    Required,
    Extra,
    /// null, zero or negative index
    Unslotted,
}

impl SlotClass {
    pub fn of(slot_index: Option<i32>) -> Self {
        match slot_index.unwrap_or(0) {
            1..=7 => SlotClass::Required,
            i if i > 7 => SlotClass::Extra,
            _ => SlotClass::Unslotted,
        }
    }
}
