//! Motivational quote record and the built-in catalog.
//!
//! # Invariants
//! - The catalog is fixed at 25 entries.
//! - Catalog ids are derived from quote text, so they are identical across
//!   process restarts and persisted favorites keep matching.

use crate::model::record::{Record, RecordId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const QUOTE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x7b1e_4f0a_9c2d_4d6e_8a31_5f02_c4e8_91d7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteCategory {
    Success,
    Motivation,
    Leadership,
    Creativity,
    Wisdom,
}

impl QuoteCategory {
    pub const ALL: [Self; 5] = [
        Self::Success,
        Self::Motivation,
        Self::Leadership,
        Self::Creativity,
        Self::Wisdom,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Motivation => "Motivation",
            Self::Leadership => "Leadership",
            Self::Creativity => "Creativity",
            Self::Wisdom => "Wisdom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationalQuote {
    pub id: RecordId,
    pub text: String,
    pub author: String,
    pub category: QuoteCategory,
}

impl MotivationalQuote {
    /// Builds a quote whose id is a v5 UUID of its text.
    pub fn new(text: impl Into<String>, author: impl Into<String>, category: QuoteCategory) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v5(&QUOTE_ID_NAMESPACE, text.as_bytes()),
            text,
            author: author.into(),
            category,
        }
    }
}

impl Record for MotivationalQuote {
    fn id(&self) -> RecordId {
        self.id
    }
}

const CATALOG_ENTRIES: [(&str, &str, QuoteCategory); 25] = [
    (
        "Success is the ability to go from one failure to another with no loss of enthusiasm.",
        "Winston Churchill",
        QuoteCategory::Success,
    ),
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
        QuoteCategory::Motivation,
    ),
    (
        "Leadership is the art of getting someone else to do something you want done because he wants to do it.",
        "Dwight Eisenhower",
        QuoteCategory::Leadership,
    ),
    (
        "Creativity is inventing new things. Innovation is creating new things.",
        "Theodore Levitt",
        QuoteCategory::Creativity,
    ),
    ("Wisdom begins in wonder.", "Socrates", QuoteCategory::Wisdom),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
        QuoteCategory::Motivation,
    ),
    (
        "Don't be afraid to give up the good to go for the great.",
        "John Rockefeller",
        QuoteCategory::Success,
    ),
    (
        "True leadership lies in guiding others to success.",
        "John Gardner",
        QuoteCategory::Leadership,
    ),
    (
        "Creativity requires the courage to let go of certainties.",
        "Erich Fromm",
        QuoteCategory::Creativity,
    ),
    (
        "Wisdom comes from experience, and experience comes from mistakes.",
        "Anonymous",
        QuoteCategory::Wisdom,
    ),
    (
        "Your work is going to fill a large part of your life, and the only way to be truly satisfied is to do what you believe is great work.",
        "Steve Jobs",
        QuoteCategory::Motivation,
    ),
    (
        "Success is not the key to happiness. Happiness is the key to success.",
        "Albert Schweitzer",
        QuoteCategory::Success,
    ),
    (
        "A good leader takes a little more than his share of the blame, a little less than his share of the credit.",
        "Arnold Glasow",
        QuoteCategory::Leadership,
    ),
    (
        "Creativity is just connecting things. When you ask creative people how they did something, they feel a little guilty because they didn't really do it, they just saw something.",
        "Steve Jobs",
        QuoteCategory::Creativity,
    ),
    (
        "Wisdom is the daughter of experience.",
        "Leonardo da Vinci",
        QuoteCategory::Wisdom,
    ),
    (
        "Motivation is what gets you started. Habit is what keeps you going.",
        "Jim Rohn",
        QuoteCategory::Motivation,
    ),
    (
        "Success is a ladder that cannot be climbed with your hands in your pockets.",
        "Zig Ziglar",
        QuoteCategory::Success,
    ),
    (
        "Leadership and learning are indispensable to each other.",
        "John Kennedy",
        QuoteCategory::Leadership,
    ),
    (
        "Creativity is inventing, experimenting, growing, taking risks, breaking rules, making mistakes, and having fun.",
        "Mary Lou Cook",
        QuoteCategory::Creativity,
    ),
    (
        "The only true wisdom is in knowing you know nothing.",
        "Socrates",
        QuoteCategory::Wisdom,
    ),
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Franklin Roosevelt",
        QuoteCategory::Motivation,
    ),
    (
        "Success is walking from failure to failure with no loss of enthusiasm.",
        "Winston Churchill",
        QuoteCategory::Success,
    ),
    (
        "The supreme quality for leadership is unquestionably integrity.",
        "Dwight Eisenhower",
        QuoteCategory::Leadership,
    ),
    (
        "Every artist was first an amateur.",
        "Ralph Emerson",
        QuoteCategory::Creativity,
    ),
    (
        "The journey of a thousand miles begins with one step.",
        "Lao Tzu",
        QuoteCategory::Wisdom,
    ),
];

static CATALOG: Lazy<Vec<MotivationalQuote>> = Lazy::new(|| {
    CATALOG_ENTRIES
        .iter()
        .map(|(text, author, category)| MotivationalQuote::new(*text, *author, *category))
        .collect()
});

/// The built-in quote catalog, in display order.
pub fn quote_catalog() -> &'static [MotivationalQuote] {
    CATALOG.as_slice()
}

/// Looks up a catalog quote by id.
pub fn find_quote(id: RecordId) -> Option<&'static MotivationalQuote> {
    quote_catalog().iter().find(|quote| quote.id == id)
}
