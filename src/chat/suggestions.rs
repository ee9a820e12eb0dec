//! Canned prompts offered before the conversation starts.

/// A prompt the user can pick to populate the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSuggestion {
    /// Full question placed in the input buffer.
    pub question: &'static str,
    /// Leading part of `question` rendered emphasised.
    pub highlight: &'static str,
}

impl PromptSuggestion {
    /// Split `question` into the highlighted prefix and the remainder.
    ///
    /// When `highlight` is not a prefix nothing is highlighted.
    #[must_use]
    pub fn split(&self) -> (&'static str, &'static str) {
        match self.question.strip_prefix(self.highlight) {
            Some(rest) => (self.highlight, rest),
            None => ("", self.question),
        }
    }
}

pub const SUGGESTIONS: &[PromptSuggestion] = &[
    PromptSuggestion {
        question: "Review de empleados en Mercado Libre",
        highlight: "Review de empleados",
    },
    PromptSuggestion {
        question: "Salarios en Naranja X",
        highlight: "Salarios",
    },
    PromptSuggestion {
        question: "Promedio de salarios en Globant",
        highlight: "Promedio de salarios",
    },
    PromptSuggestion {
        question: "Clima laboral en Cocos capital",
        highlight: "Clima laboral",
    },
];

/// Look up a suggestion by position.
#[must_use]
pub fn get(index: usize) -> Option<&'static PromptSuggestion> {
    SUGGESTIONS.get(index)
}
