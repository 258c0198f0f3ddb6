/// How a field is entered in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Choice(&'static [ChoiceOption]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: i64,
    pub display: &'static str,
}

impl ChoiceOption {
    const fn new(code: i64, display: &'static str) -> Self {
        Self { code, display }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    pub default: f64,
}

impl FieldDescriptor {
    const fn numeric(id: &'static str, label: &'static str, default: f64) -> Self {
        Self { id, kind: FieldKind::Numeric, label, default }
    }

    const fn choice(
        id: &'static str,
        label: &'static str,
        options: &'static [ChoiceOption],
        default: f64,
    ) -> Self {
        Self { id, kind: FieldKind::Choice(options), label, default }
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.kind {
            FieldKind::Choice(options) => options,
            FieldKind::Numeric => &[],
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDescriptor {
    pub title: &'static str,
    pub fields: &'static [FieldDescriptor],
}

const GENDER: &[ChoiceOption] = &[ChoiceOption::new(1, "Male"), ChoiceOption::new(2, "Female")];

const LEVELS: &[ChoiceOption] = &[
    ChoiceOption::new(1, "Normal"),
    ChoiceOption::new(2, "Above Normal"),
    ChoiceOption::new(3, "High"),
];

const SMOKE: &[ChoiceOption] = &[ChoiceOption::new(0, "Non-Smoker"), ChoiceOption::new(1, "Smoker")];
const ALCO: &[ChoiceOption] = &[ChoiceOption::new(0, "No Alcohol"), ChoiceOption::new(1, "Consumer")];
const ACTIVE: &[ChoiceOption] = &[ChoiceOption::new(0, "Inactive"), ChoiceOption::new(1, "Active")];

pub const STEPS: &[StepDescriptor] = &[
    StepDescriptor {
        title: "Personal Vitals",
        fields: &[
            FieldDescriptor::numeric("age", "Age", 50.0),
            FieldDescriptor::choice("gender", "Gender", GENDER, 1.0),
            FieldDescriptor::numeric("height", "Height", 170.0),
            FieldDescriptor::numeric("weight", "Weight", 70.0),
        ],
    },
    StepDescriptor {
        title: "Clinical Data",
        fields: &[
            FieldDescriptor::numeric("ap_hi", "Systolic BP", 120.0),
            FieldDescriptor::numeric("ap_lo", "Diastolic BP", 80.0),
            FieldDescriptor::choice("cholesterol", "Cholesterol", LEVELS, 1.0),
            FieldDescriptor::choice("gluc", "Glucose", LEVELS, 1.0),
        ],
    },
    StepDescriptor {
        title: "Lifestyle Factors",
        fields: &[
            FieldDescriptor::choice("smoke", "Smoking", SMOKE, 0.0),
            FieldDescriptor::choice("alco", "Alcohol", ALCO, 0.0),
            FieldDescriptor::choice("active", "Activity", ACTIVE, 1.0),
        ],
    },
];

pub fn step_count() -> usize {
    STEPS.len()
}

pub fn all_fields() -> impl Iterator<Item = &'static FieldDescriptor> {
    STEPS.iter().flat_map(|step| step.fields.iter())
}

pub fn find_field(id: &str) -> Option<&'static FieldDescriptor> {
    all_fields().find(|field| field.id == id)
}

/// Display label for a feature name coming back from the predictor.
/// Falls back to the raw name for features the form does not collect.
pub fn label_for(feature: &str) -> &str {
    find_field(feature).map(|field| field.label).unwrap_or(feature)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_field_ids_are_unique() {
        let mut seen = HashSet::new();
        for field in all_fields() {
            assert!(seen.insert(field.id), "duplicate field id {}", field.id);
        }
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn test_choice_defaults_are_valid_codes() {
        for field in all_fields().filter(|f| f.is_choice()) {
            assert!(
                field.options().iter().any(|o| o.code as f64 == field.default),
                "{} default is not one of its options",
                field.id
            );
        }
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(label_for("ap_hi"), "Systolic BP");
        assert_eq!(label_for("gluc"), "Glucose");
        assert_eq!(label_for("bmi"), "bmi");
        assert!(find_field("nope").is_none());
        assert!(find_field("age").unwrap().options().is_empty());
    }
}
