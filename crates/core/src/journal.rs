use serde::{Deserialize, Serialize};

use crate::error::JournalError;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Every key a session accepted, in order. Replaying it rebuilds the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub inputs: String,
}

impl InputJournal {
    pub fn new() -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, inputs: String::new() }
    }

    pub fn from_inputs(inputs: &str) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, inputs: inputs.to_string() }
    }

    pub fn append(&mut self, key: char) {
        self.inputs.push(key);
    }

    pub fn len(&self) -> usize {
        self.inputs.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn to_json(&self) -> Result<String, JournalError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, JournalError> {
        let journal: Self = serde_json::from_str(json)?;
        if journal.format_version != JOURNAL_FORMAT_VERSION {
            return Err(JournalError::UnsupportedVersion {
                found: journal.format_version,
                expected: JOURNAL_FORMAT_VERSION,
            });
        }
        Ok(journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_versions_are_rejected() {
        let json = r#"{"format_version": 9, "inputs": "N1S"}"#;
        assert!(matches!(
            InputJournal::from_json(json),
            Err(JournalError::UnsupportedVersion { found: 9, expected: 1 })
        ));
    }

    #[test]
    fn malformed_json_surfaces_the_parser_error() {
        assert!(matches!(InputJournal::from_json("{"), Err(JournalError::Json(_))));
    }

    #[test]
    fn appended_keys_survive_json() {
        let mut journal = InputJournal::new();
        for key in "N42SWD".chars() {
            journal.append(key);
        }
        let restored = InputJournal::from_json(&journal.to_json().expect("journal serializes"))
            .expect("journal parses");
        assert_eq!(restored.inputs, "N42SWD");
        assert_eq!(restored.len(), 6);
    }
}
