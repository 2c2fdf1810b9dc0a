use chrono::{DateTime, Utc};

use crate::model::SectionId;

/// A handbook section the user has finished reading.
///
/// One record per section; writing it again only moves `completed_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    section_id: SectionId,
    completed_at: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(section_id: SectionId, completed_at: DateTime<Utc>) -> Self {
        Self {
            section_id,
            completed_at,
        }
    }

    #[must_use]
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
