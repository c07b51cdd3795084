use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::ValidationError;

use super::store::FormFieldStore;
use super::value::FieldValue;

/// Supported data kinds for form fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Boolean,
    Choice(Vec<String>),
    MultiChoice(Vec<String>),
    Group,
}

type ValidatorCallback = dyn Fn(&FieldValue) -> Result<(), String> + Send + Sync;

/// Built-in validation helpers applied to provided values.
#[derive(Clone)]
pub enum Validator {
    None,
    Email,
    PositiveNumber,
    NonNegativeNumber,
    Date,
    MinLength(usize),
    OneOf(Vec<String>),
    Custom(Arc<ValidatorCallback>),
}

impl Validator {
    pub fn custom(
        func: impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Validator::Custom(Arc::new(func))
    }

    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match self {
            Validator::None => Ok(()),
            Validator::Email => {
                let text = value.as_text().unwrap_or_default().trim();
                match text.split_once('@') {
                    Some((local, domain))
                        if !local.is_empty() && domain.contains('.') && !domain.ends_with('.') =>
                    {
                        Ok(())
                    }
                    _ => Err("Enter a valid email address".into()),
                }
            }
            Validator::PositiveNumber => match value.as_number() {
                Some(number) if number > 0.0 => Ok(()),
                Some(_) => Err("Value must be greater than zero".into()),
                None => Err("Enter a numeric value".into()),
            },
            Validator::NonNegativeNumber => match value.as_number() {
                Some(number) if number >= 0.0 => Ok(()),
                Some(_) => Err("Value must be zero or positive".into()),
                None => Err("Enter a numeric value".into()),
            },
            Validator::Date => value
                .as_text()
                .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
                .map(|_| ())
                .ok_or_else(|| "Use YYYY-MM-DD format".into()),
            Validator::MinLength(min) => {
                let length = value.as_text().unwrap_or_default().chars().count();
                if length >= *min {
                    Ok(())
                } else {
                    Err(format!("Must be at least {min} characters"))
                }
            }
            Validator::OneOf(options) => {
                let normalized = value.to_string().trim().to_lowercase();
                if options
                    .iter()
                    .any(|candidate| candidate.to_lowercase() == normalized)
                {
                    Ok(())
                } else {
                    Err(format!("Value must be one of: {}", options.join(", ")))
                }
            }
            Validator::Custom(func) => func(value),
        }
    }
}

/// Declarative description of a single form field.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        validator: Validator,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            help: None,
            validator,
        }
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    fn check(&self, store: &FormFieldStore) -> Result<(), ValidationError> {
        let Some(value) = store.get(self.key).filter(|value| !value.is_blank()) else {
            return Ok(());
        };
        if let FieldKind::Choice(options) = &self.kind {
            if matches!(self.validator, Validator::None) {
                return Validator::OneOf(options.clone())
                    .validate(value)
                    .map_err(|message| ValidationError::for_field(self.key, message));
            }
        }
        self.validator
            .validate(value)
            .map_err(|message| ValidationError::for_field(self.key, format!("{}: {message}", self.label)))
    }
}

/// Ordered field metadata for one form or one wizard step.
#[derive(Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    /// Fails on the first required field, in descriptor order, that is absent
    /// or blank.
    pub fn check_required(&self, store: &FormFieldStore) -> Result<(), ValidationError> {
        match self
            .fields
            .iter()
            .find(|field| field.required && !store.is_present(field.key))
        {
            Some(field) => Err(ValidationError::missing(field.key, field.label)),
            None => Ok(()),
        }
    }

    /// Required-field check followed by per-field validators.
    pub fn validate(&self, store: &FormFieldStore) -> Result<(), ValidationError> {
        self.check_required(store)?;
        for field in &self.fields {
            field.check(store)?;
        }
        Ok(())
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Review lines shown before final confirmation.
    pub fn summary(&self, store: &FormFieldStore) -> FormSummary {
        let entries = self
            .fields
            .iter()
            .map(|field| {
                let value = store
                    .get(field.key)
                    .filter(|value| !value.is_blank())
                    .map(FieldValue::to_string)
                    .unwrap_or_else(|| "[unfilled]".to_string());
                (field.label.to_string(), value)
            })
            .collect();
        FormSummary { entries }
    }
}

/// Snapshot of collected data displayed before final confirmation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormSummary {
    pub entries: Vec<(String, String)>,
}

impl FormSummary {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["Review your entries:".to_string()];
        for (key, value) in &self.entries {
            lines.push(format!("  {}: {}", key, value));
        }
        lines
    }
}
