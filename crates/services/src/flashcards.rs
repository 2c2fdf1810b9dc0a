use prep_core::model::Flashcard;

/// Which side of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

/// Cursor over the flashcard deck. Navigation wraps at both ends and always
/// lands on the front face.
#[derive(Debug, Clone)]
pub struct FlashcardCursor {
    cards: Vec<Flashcard>,
    index: usize,
    face: Face,
}

impl FlashcardCursor {
    /// `None` for an empty deck.
    #[must_use]
    pub fn new(cards: Vec<Flashcard>) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        Some(Self {
            cards,
            index: 0,
            face: Face::Front,
        })
    }

    #[must_use]
    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    #[must_use]
    pub fn face(&self) -> Face {
        self.face
    }

    /// Text on the visible side.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        let card = self.current();
        match self.face {
            Face::Front => &card.front,
            Face::Back => &card.back,
        }
    }

    /// One-based position and deck size, e.g. `(3, 40)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.cards.len())
    }

    pub fn flip(&mut self) {
        self.face = match self.face {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        };
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.cards.len();
        self.face = Face::Front;
    }

    pub fn previous(&mut self) {
        let len = self.cards.len();
        self.index = (self.index + len - 1) % len;
        self.face = Face::Front;
    }
}
