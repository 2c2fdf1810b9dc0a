//! Static study material supplied alongside the app.
//!
//! None of this is generated or validated here; it is deserialized as shipped
//! and handed to the test builder, flashcard cursor and dashboard.

use serde::{Deserialize, Serialize};

use crate::model::SectionId;

/// One multiple-choice question from the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

impl Question {
    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub category: String,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handbook {
    pub chapters: Vec<Chapter>,
}

impl Handbook {
    #[must_use]
    pub fn total_sections(&self) -> usize {
        self.chapters.iter().map(|c| c.sections.len()).sum()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.chapters.iter().flat_map(|c| c.sections.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_bank_and_handbook_json() {
        let bank: Vec<Question> = serde_json::from_str(
            r#"[{
                "question": "What does a flashing red light mean?",
                "options": ["Stop", "Slow down", "Proceed"],
                "correctAnswer": 0,
                "explanation": "Treat it like a stop sign."
            }]"#,
        )
        .unwrap();
        assert!(bank[0].is_correct(0));
        assert!(!bank[0].is_correct(2));

        let handbook: Handbook = serde_json::from_str(
            r#"[
                {"title": "Getting your licence", "sections": [
                    {"id": "ch1-s1", "title": "Levels", "content": "..."},
                    {"id": "ch1-s2", "title": "Tests", "content": "..."}
                ]},
                {"title": "Signs", "sections": [
                    {"id": "ch2-s1", "title": "Regulatory", "content": "..."}
                ]}
            ]"#,
        )
        .unwrap();
        assert_eq!(handbook.total_sections(), 3);
        let ids: Vec<&str> = handbook.sections().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["ch1-s1", "ch1-s2", "ch2-s1"]);
    }
}
