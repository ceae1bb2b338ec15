//! Add/update word form.
//!
//! [`WordForm`] holds the text inputs of the word add screen. Loading an existing
//! word turns it into the update form; submitting produces the matching domain
//! action and clears the inputs.

use crate::app::actions::{Action, DomainAction};
use crate::domain::{Word, WordId};

/// Feedback shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMessage {
    Error(String),
}

impl ValidationMessage {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Error(message) => message,
        }
    }
}

/// Inputs of the add/update screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordForm {
    pub primary_word: String,
    pub word_meaning: String,
    pub secondary_word: String,
    pub secondary_word_pronunciation: String,
    pub is_favorite: bool,

    /// Identifier of the word being updated; `None` on the add screen.
    pub editing: Option<WordId>,
}

impl WordForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the form from a stored word for the update screen.
    #[must_use]
    pub fn for_update(word: &Word) -> Self {
        let mut form = Self::new();
        form.load(word);
        form
    }

    pub fn load(&mut self, word: &Word) {
        self.primary_word.clone_from(&word.primary_word);
        self.word_meaning.clone_from(&word.word_meaning);
        self.secondary_word.clone_from(&word.secondary_word);
        self.secondary_word_pronunciation.clone_from(&word.secondary_word_pronunciation);
        self.is_favorite = word.is_favorite;
        self.editing = Some(word.id);
    }

    pub fn set_primary_word(&mut self, value: impl Into<String>) {
        self.primary_word = value.into();
    }

    pub fn set_word_meaning(&mut self, value: impl Into<String>) {
        self.word_meaning = value.into();
    }

    pub fn set_secondary_word(&mut self, value: impl Into<String>) {
        self.secondary_word = value.into();
    }

    pub fn set_secondary_word_pronunciation(&mut self, value: impl Into<String>) {
        self.secondary_word_pronunciation = value.into();
    }

    pub fn set_favorite(&mut self, value: bool) {
        self.is_favorite = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Builds the word described by the inputs, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns one [`ValidationMessage::Error`] per missing required input.
    pub fn validate(&self) -> std::result::Result<Word, Vec<ValidationMessage>> {
        let mut errors = Vec::new();
        if self.primary_word.trim().is_empty() {
            errors.push(ValidationMessage::Error("Word is required".to_string()));
        }
        if self.secondary_word.trim().is_empty() {
            errors.push(ValidationMessage::Error("Translation is required".to_string()));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Word::new(
            self.primary_word.trim(),
            self.word_meaning.trim(),
            self.secondary_word.trim(),
            self.secondary_word_pronunciation.trim(),
        )
        .with_id(self.editing.unwrap_or(WordId::UNSAVED))
        .with_favorite(self.is_favorite))
    }

    /// Validates the inputs and returns the action to dispatch.
    ///
    /// `InsertWord` on the add screen, `UpdateWord` when editing. Inputs are
    /// cleared on success and kept on failure.
    ///
    /// # Errors
    ///
    /// Returns the validation messages when required inputs are missing.
    pub fn submit(&mut self) -> std::result::Result<Action, Vec<ValidationMessage>> {
        let word = self.validate()?;
        let action = if self.editing.is_some() {
            DomainAction::UpdateWord(word)
        } else {
            DomainAction::InsertWord(word)
        };
        self.clear();
        Ok(action.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_inputs_produce_both_messages() {
        let mut form = WordForm::new();
        form.set_word_meaning("something");

        let errors = form.submit().unwrap_err();
        let messages: Vec<_> = errors.iter().map(ValidationMessage::message).collect();
        assert_eq!(messages, ["Word is required", "Translation is required"]);
        assert_eq!(form.word_meaning, "something");
    }

    #[test]
    fn submit_on_add_screen_inserts_trimmed_word_and_clears() {
        let mut form = WordForm::new();
        form.set_primary_word(" Book ");
        form.set_secondary_word("Kitab");
        form.set_secondary_word_pronunciation("Ki-taab");

        let action = form.submit().unwrap();
        assert_eq!(
            action,
            Action::Domain(DomainAction::InsertWord(Word::new("Book", "", "Kitab", "Ki-taab")))
        );
        assert_eq!(form, WordForm::default());
    }

    #[test]
    fn loaded_form_updates_same_id() {
        let stored = Word::new("Book", "", "Kitab", "")
            .with_id(WordId::new(4))
            .with_favorite(true);
        let mut form = WordForm::for_update(&stored);
        form.set_word_meaning("A written work");

        let Action::Domain(DomainAction::UpdateWord(word)) = form.submit().unwrap() else {
            panic!("expected update action");
        };
        assert_eq!(word.id, WordId::new(4));
        assert!(word.is_favorite);
        assert_eq!(word.word_meaning, "A written work");
    }

    #[test]
    fn favorite_toggle_carries_into_inserted_word() {
        let mut form = WordForm::new();
        form.set_primary_word("Water");
        form.set_secondary_word("Pani");
        form.set_favorite(true);
        form.set_favorite(false);
        form.set_favorite(true);

        let Action::Domain(DomainAction::InsertWord(word)) = form.submit().unwrap() else {
            panic!("expected insert action");
        };
        assert!(word.is_favorite);
        assert!(!form.is_favorite);
    }
}
