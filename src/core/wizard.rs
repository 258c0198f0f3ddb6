use super::{
    answers::{
        AnswerRecord,
        RawInput,
    },
    schema::{
        self,
        StepDescriptor,
    },
    CardioError,
};

/// Step cursor plus the single answer record of an intake session.
///
/// Navigation never validates field contents; bounds are the only rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    cursor: usize,
    answers: AnswerRecord,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self { cursor: 0, answers: AnswerRecord::default() }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn step_count(&self) -> usize {
        schema::step_count()
    }

    pub fn last_index(&self) -> usize {
        self.step_count() - 1
    }

    pub fn current_step(&self) -> &'static StepDescriptor {
        &schema::STEPS[self.cursor]
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_terminal(&self) -> bool {
        self.cursor == self.last_index()
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn set_field(&mut self, field_id: &str, raw: RawInput) -> Result<(), CardioError> {
        let value = raw.coerce();
        if self.answers.set(field_id, value) {
            Ok(())
        } else {
            Err(CardioError::UnknownField(field_id.to_string()))
        }
    }

    pub fn advance(&mut self) {
        if self.cursor < self.last_index() {
            self.cursor += 1;
        }
    }

    pub fn retreat(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Out-of-range indices are rejected and leave the cursor where it was.
    pub fn jump_to(&mut self, index: usize) -> Result<(), CardioError> {
        let count = self.step_count();
        if index >= count {
            return Err(CardioError::StepOutOfRange { index, count });
        }
        self.cursor = index;
        Ok(())
    }

    /// Hands out a copy of the answers. Only allowed from the terminal step.
    pub fn submit(&self) -> Result<AnswerRecord, CardioError> {
        if !self.is_terminal() {
            return Err(CardioError::NotAtFinalStep);
        }

        let invalid = self.answers.invalid_fields();
        if !invalid.is_empty() {
            log::warn!("Submitting with non-numeric values for: {}", invalid.join(", "));
        }

        Ok(self.answers.clone())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
