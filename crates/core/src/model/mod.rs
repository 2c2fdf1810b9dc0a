mod bookmark;
pub mod handbook;
mod ids;
mod progress;
mod quiz;
mod setting;

pub use bookmark::{Bookmark, BookmarkKind, ContentRef};
pub use handbook::{Chapter, Flashcard, Handbook, Question, Section};
pub use ids::{BookmarkId, QuizResultId, SectionId};
pub use progress::ProgressRecord;
pub use quiz::{QuizResult, QuizScore};
pub use setting::{SettingKey, SettingValue, USER_NAME_KEY};
