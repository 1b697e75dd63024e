//! Schedule records handed over by the data source.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::Weekday;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{RenderError, Result};

/// Days in a full timetable, Monday through Sunday.
pub const DAYS_IN_WEEK: usize = 7;

// ============================================================================
// Records
// ============================================================================

/// A full week: week number plus Monday..Sunday.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Timetable {
    #[serde(deserialize_with = "scalar_string")]
    pub week_number: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub days: Vec<Day>,
}

/// One day's column: a title and its lessons in order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Day {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub lessons: Vec<Lesson>,
}

/// One scheduled class block. Every field is a plain string once it has
/// passed the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawLesson")]
pub struct Lesson {
    pub time: LessonTime,
    pub title: String,
    pub teacher: String,
    pub classroom: String,
}

/// Slot number, start time and end time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LessonTime {
    pub slot: String,
    pub start: String,
    pub end: String,
}

impl LessonTime {
    pub fn new(slot: &str, start: &str, end: &str) -> Self {
        LessonTime {
            slot: slot.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// The two-line time range drawn next to the slot number.
    pub fn range(&self) -> String {
        format!("{}\n{}", self.start, self.end)
    }
}

impl Lesson {
    pub fn new(time: LessonTime, title: &str, teacher: &str, classroom: &str) -> Self {
        Lesson {
            time,
            title: title.to_string(),
            teacher: teacher.to_string(),
            classroom: classroom.to_string(),
        }
    }
}

impl Day {
    pub fn new(title: &str, lessons: Vec<Lesson>) -> Self {
        Day {
            title: title.to_string(),
            lessons,
        }
    }
}

impl Timetable {
    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    /// Warns when the data source sent something other than a full week.
    /// Rendering goes ahead with whatever days are present.
    pub fn check_week(&self) {
        if self.days.len() != DAYS_IN_WEEK {
            warn!(
                "timetable for week {} has {} days, expected {}",
                self.week_number,
                self.days.len(),
                DAYS_IN_WEEK
            );
        }
    }
}

// ============================================================================
// Boundary normalization
// ============================================================================

/// Lesson as it arrives over the wire: nullable fields and a time tuple of
/// unchecked arity.
#[derive(Deserialize)]
struct RawLesson {
    #[serde(default)]
    time: Value,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    teacher: Value,
    #[serde(default)]
    classroom: Value,
}

impl From<RawLesson> for Lesson {
    fn from(raw: RawLesson) -> Self {
        let parts: Vec<String> = match &raw.time {
            Value::Array(items) => items.iter().map(value_to_string).collect(),
            Value::Null => Vec::new(),
            other => {
                warn!("lesson time is not a list: {}", other);
                Vec::new()
            }
        };
        if parts.len() != 3 {
            warn!("lesson time has {} parts, expected 3: {:?}", parts.len(), parts);
        }
        let part = |i: usize| parts.get(i).cloned().unwrap_or_default();

        Lesson {
            time: LessonTime {
                slot: part(0),
                start: part(1),
                end: part(2),
            },
            title: value_to_string(&raw.title),
            teacher: value_to_string(&raw.teacher),
            classroom: value_to_string(&raw.classroom),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(&Value::deserialize(deserializer)?))
}

/// A list where `null` means empty and unreadable entries degrade to
/// their default instead of failing the whole document.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            warn!("expected a list, got {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .map(|item| {
            if item.is_null() {
                warn!("null entry replaced with an empty record");
                return T::default();
            }
            serde_json::from_value(item).unwrap_or_else(|e| {
                warn!("unreadable entry replaced with an empty record: {}", e);
                T::default()
            })
        })
        .collect())
}

/// Reads a JSON document (timetable, day, grade sheet, caption pool).
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RenderError::ScheduleError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content).map_err(|e| {
        RenderError::ScheduleError(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

// ============================================================================
// Day selection
// ============================================================================

/// Which day of the week a chat asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    Today,
    Tomorrow,
    Weekday(Weekday),
}

/// Resolved position in a timetable's `days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayIndex {
    pub index: usize,
    /// The day belongs to the following week's timetable.
    pub next_week: bool,
}

impl DaySelector {
    pub fn resolve(self, today: Weekday) -> DayIndex {
        match self {
            DaySelector::Today => DayIndex {
                index: today.num_days_from_monday() as usize,
                next_week: false,
            },
            DaySelector::Tomorrow => {
                let index = today.num_days_from_monday() as usize;
                // Saturday and Sunday roll over to next Monday.
                if index >= 5 {
                    DayIndex { index: 0, next_week: true }
                } else {
                    DayIndex { index: index + 1, next_week: false }
                }
            }
            DaySelector::Weekday(day) => DayIndex {
                index: day.num_days_from_monday() as usize,
                next_week: false,
            },
        }
    }
}

impl FromStr for DaySelector {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        let selector = match s.trim().trim_start_matches('/').to_lowercase().as_str() {
            "today" | "сегодня" => DaySelector::Today,
            "tomorrow" | "завтра" => DaySelector::Tomorrow,
            "monday" | "понедельник" => DaySelector::Weekday(Weekday::Mon),
            "tuesday" | "вторник" => DaySelector::Weekday(Weekday::Tue),
            "wednesday" | "среда" => DaySelector::Weekday(Weekday::Wed),
            "thursday" | "четверг" => DaySelector::Weekday(Weekday::Thu),
            "friday" | "пятница" => DaySelector::Weekday(Weekday::Fri),
            "saturday" | "суббота" => DaySelector::Weekday(Weekday::Sat),
            "sunday" | "воскресенье" => DaySelector::Weekday(Weekday::Sun),
            other => return Err(RenderError::ScheduleError(format!("unknown day '{}'", other))),
        };
        Ok(selector)
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::Today => f.write_str("today"),
            DaySelector::Tomorrow => f.write_str("tomorrow"),
            DaySelector::Weekday(day) => write!(f, "{}", day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_timetable() {
        let json = r#"{
            "week_number": 12,
            "days": [{
                "title": "Понедельник",
                "lessons": [{
                    "time": ["1", "08:30", "09:15"],
                    "title": "Математика",
                    "teacher": "Иванов И.И.",
                    "classroom": "204"
                }]
            }]
        }"#;
        let timetable: Timetable = serde_json::from_str(json).unwrap();
        assert_eq!(timetable.week_number, "12");
        let lesson = &timetable.days[0].lessons[0];
        assert_eq!(lesson.time, LessonTime::new("1", "08:30", "09:15"));
        assert_eq!(lesson.classroom, "204");
    }

    #[test]
    fn malformed_lesson_degrades_to_empty_fields() {
        let json = r#"{"time": [2, "10:00"], "title": null, "classroom": 315}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.time, LessonTime::new("2", "10:00", ""));
        assert_eq!(lesson.title, "");
        assert_eq!(lesson.teacher, "");
        assert_eq!(lesson.classroom, "315");
    }

    #[test]
    fn null_lessons_list_is_empty() {
        let day: Day = serde_json::from_str(r#"{"title": "Среда", "lessons": null}"#).unwrap();
        assert_eq!(day.title, "Среда");
        assert!(day.lessons.is_empty());

        let json = r#"{"week_number": "3", "days": null}"#;
        let week: Timetable = serde_json::from_str(json).unwrap();
        assert!(week.days.is_empty());
    }

    #[test]
    fn null_lesson_entry_becomes_empty_block() {
        let json = r#"{"title": "Четверг", "lessons": [null, {"title": "Химия"}, 17]}"#;
        let day: Day = serde_json::from_str(json).unwrap();
        assert_eq!(day.lessons.len(), 3);
        assert_eq!(day.lessons[0], Lesson::default());
        assert_eq!(day.lessons[1].title, "Химия");
        assert_eq!(day.lessons[2], Lesson::default());
    }

    #[test]
    fn non_list_time_becomes_empty_time() {
        let json = r#"{"time": "1 08:30 09:15", "title": "Физика", "teacher": "Петров"}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.time, LessonTime::default());
        assert_eq!(lesson.title, "Физика");
        assert_eq!(lesson.teacher, "Петров");
    }

    #[test]
    fn oversized_time_tuple_is_truncated() {
        let json = r#"{"time": ["3", "11:00", "11:45", "extra"], "title": "Физика"}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.time, LessonTime::new("3", "11:00", "11:45"));
    }

    #[test]
    fn selectors_accept_both_languages() {
        assert_eq!("/Среда".parse::<DaySelector>().unwrap(), DaySelector::Weekday(Weekday::Wed));
        assert_eq!("TOMORROW".parse::<DaySelector>().unwrap(), DaySelector::Tomorrow);
        assert!("someday".parse::<DaySelector>().is_err());
    }

    #[test]
    fn tomorrow_rolls_over_the_weekend() {
        assert_eq!(
            DaySelector::Tomorrow.resolve(Weekday::Tue),
            DayIndex { index: 2, next_week: false }
        );
        assert_eq!(
            DaySelector::Tomorrow.resolve(Weekday::Sat),
            DayIndex { index: 0, next_week: true }
        );
        assert_eq!(DaySelector::Today.resolve(Weekday::Sun).index, 6);
    }
}
