//! Renders class timetables, single days, grade sheets and demotivators
//! into themed raster images for chat bots.
//!
//! ```no_run
//! use timetable_render::{Composer, Geometry, Theme, Timetable, Typography};
//!
//! # fn main() -> timetable_render::Result<()> {
//! let composer = Composer::new(Typography::embedded()?);
//! let timetable: Timetable = serde_json::from_str(&std::fs::read_to_string("week.json")?)
//!     .expect("valid timetable");
//! composer
//!     .week(&timetable, &Theme::default(), &Geometry::week_wide())
//!     .save("week.png".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod demotivator;
pub mod error;
pub mod grades;
pub mod layout;
pub mod lesson;
pub mod page;
pub mod schedule;
pub mod text;
pub mod theme;

pub use canvas::{random_file_name, Canvas};
pub use demotivator::{load_photo, pick_caption, Caption};
pub use error::{RenderError, Result};
pub use grades::SubjectGrades;
pub use lesson::{BlockStyle, CaptionAlign};
pub use page::{Composer, Geometry};
pub use schedule::{Day, DaySelector, Lesson, LessonTime, Timetable};
pub use text::{FontSizes, TextStyle, Typography};
pub use theme::{Theme, ThemeField};
