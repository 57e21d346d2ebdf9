/// Free-text city field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
}

impl QueryInput {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The field accepts no input while a lookup is in flight.
    pub fn is_disabled(&self, busy: bool) -> bool {
        busy
    }

    /// Trimmed city to look up, or `None` for a blank or disabled submission.
    pub fn submit(&self, busy: bool) -> Option<String> {
        if self.is_disabled(busy) {
            return None;
        }
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
