//! Phrase catalog types.
//!
//! A catalog groups short phrases by the droid behaviour that triggers them.
//! Category names double as output directory names, so they are restricted
//! to lowercase ASCII letters, digits, `_` and `-`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};

/// Phrases longer than this are unlikely to fit in a two second clip.
const LONG_PHRASE_CHARS: usize = 40;

/// A phrase to render, tagged with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Text handed to the speech source.
    pub text: String,
    /// Category label (semantic grouping only).
    pub category: String,
    /// 1-based position within the category.
    pub number: usize,
}

/// A named group of phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhraseCategory {
    /// Category name (also the output directory name).
    pub name: String,
    /// Phrases in playback order.
    pub phrases: Vec<String>,
}

impl PhraseCategory {
    /// Creates a category from a name and phrase list.
    pub fn new<I, S>(name: impl Into<String>, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }
}

/// An ordered collection of phrase categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhraseCatalog {
    /// Categories in generation order.
    pub categories: Vec<PhraseCategory>,
}

impl PhraseCatalog {
    /// Creates a catalog from categories.
    pub fn new(categories: Vec<PhraseCategory>) -> Self {
        Self { categories }
    }

    /// The stock droid phrase library.
    ///
    /// Phrases are kept short (under two seconds spoken) to save flash.
    pub fn builtin() -> Self {
        Self::new(vec![
            // Touch top, pet mode, scoring in Pong
            PhraseCategory::new(
                "happy",
                [
                    "Hehe!",
                    "Yay!",
                    "That tickles!",
                    "Ooh I like that!",
                    "Wee!",
                    "That's nice!",
                    "Hee hee!",
                    "Oh boy!",
                    "Yippee!",
                    "Mmm!",
                ],
            ),
            // Touch spam, AI scores in Pong, Simon game over
            PhraseCategory::new(
                "annoyed",
                [
                    "Hey!",
                    "Stop it!",
                    "Okay okay!",
                    "Enough!",
                    "Hmph!",
                    "Cut it out!",
                    "Ugh!",
                    "Quit it!",
                    "Grrr!",
                    "No no no!",
                ],
            ),
            // Touch back (startled)
            PhraseCategory::new(
                "surprised",
                [
                    "Whoa!",
                    "Huh?",
                    "What the?",
                    "Oh!",
                    "Eep!",
                    "Ahh!",
                    "Hey!",
                    "Woah!",
                ],
            ),
            // Going to sleep (dark detected)
            PhraseCategory::new(
                "sleepy",
                [
                    "So sleepy...",
                    "Yawn...",
                    "Night night...",
                    "Getting dark...",
                    "Sleepy time...",
                    "Zzz...",
                ],
            ),
            // Waking up, startup
            PhraseCategory::new(
                "wake",
                [
                    "Good morning!",
                    "I'm awake!",
                    "Hello!",
                    "Hi there!",
                    "Rise and shine!",
                    "Hey hey!",
                    "Waking up!",
                    "Oh hi!",
                ],
            ),
            // Random idle chirps
            PhraseCategory::new(
                "idle",
                [
                    "Hmm...",
                    "Doo dee doo...",
                    "La la la...",
                    "Boop!",
                    "Beep boop!",
                    "Hello?",
                    "Hmm hmm...",
                    "Dum dee dum...",
                    "Boo!",
                    "Hm?",
                ],
            ),
            // Dance, game menu, winning games
            PhraseCategory::new(
                "excited",
                [
                    "Wow!",
                    "Woohoo!",
                    "Amazing!",
                    "Let's go!",
                    "Yeah!",
                    "Awesome!",
                    "Oh yeah!",
                    "Woo!",
                    "Yes!",
                    "Haha!",
                ],
            ),
        ])
    }

    /// Parses a catalog from JSON, then validates it.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate().into_result()?;
        Ok(catalog)
    }

    /// Loads and validates a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the catalog to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&PhraseCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total number of phrases across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.phrases.len()).sum()
    }

    /// Returns true if the catalog holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every phrase in catalog order.
    pub fn phrases(&self) -> impl Iterator<Item = Phrase> + '_ {
        self.categories.iter().flat_map(|category| {
            category
                .phrases
                .iter()
                .enumerate()
                .map(move |(i, text)| Phrase {
                    text: text.clone(),
                    category: category.name.clone(),
                    number: i + 1,
                })
        })
    }

    /// Validates category names and phrase text.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.categories.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyCatalog,
                "catalog must declare at least one category",
                "categories",
            ));
            return result;
        }

        let mut seen = HashSet::new();
        for (i, category) in self.categories.iter().enumerate() {
            let path = format!("categories[{}]", i);

            if !is_valid_category_name(&category.name) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidCategoryName,
                    format!(
                        "category name '{}' must be lowercase letters, digits, '_' or '-'",
                        category.name
                    ),
                    format!("{}.name", path),
                ));
            }

            if !seen.insert(category.name.as_str()) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::DuplicateCategory,
                    format!("category '{}' is declared more than once", category.name),
                    format!("{}.name", path),
                ));
            }

            if category.phrases.is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::EmptyCategory,
                    format!("category '{}' has no phrases", category.name),
                    format!("{}.phrases", path),
                ));
            }

            for (j, phrase) in category.phrases.iter().enumerate() {
                let phrase_path = format!("{}.phrases[{}]", path, j);
                if phrase.trim().is_empty() {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::EmptyPhrase,
                        "phrase text must not be empty",
                        phrase_path,
                    ));
                } else if phrase.chars().count() > LONG_PHRASE_CHARS {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::LongPhrase,
                        format!("phrase '{}' may exceed two seconds", phrase),
                        phrase_path,
                    ));
                }
            }
        }

        result
    }
}

impl Default for PhraseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_valid_category_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
