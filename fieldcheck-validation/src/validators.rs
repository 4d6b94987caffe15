// Built-in length and presence validators

use crate::ValidationError;

/// How string length is measured by `min`, `max` and `len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthUnit {
    /// UTF-8 bytes.
    #[default]
    Bytes,
    /// Unicode scalar values.
    Chars,
}

impl LengthUnit {
    pub fn measure(&self, value: &str) -> usize {
        match self {
            LengthUnit::Bytes => value.len(),
            LengthUnit::Chars => value.chars().count(),
        }
    }

    /// [`LengthUnit::measure`] as a signed count, for comparing with rule bounds.
    fn measure_signed(&self, value: &str) -> i64 {
        i64::try_from(self.measure(value)).unwrap_or(i64::MAX)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bytes" | "byte" => Some(LengthUnit::Bytes),
            "chars" | "char" | "characters" => Some(LengthUnit::Chars),
            _ => None,
        }
    }
}

/// Validates that a string is not empty.
///
/// Whitespace counts as content: `" "` passes.
pub struct Required;

impl Required {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            Err(
                ValidationError::new(field, format!("Field '{}' is required", field))
                    .with_constraint("required"),
            )
        } else {
            Ok(())
        }
    }
}

/// Validates minimum string length
pub struct MinLength(pub i64);

impl MinLength {
    pub fn validate(&self, value: &str, field: &str, unit: LengthUnit) -> Result<(), ValidationError> {
        if unit.measure_signed(value) < self.0 {
            Err(ValidationError::new(
                field,
                format!("Field '{}' must be at least {} characters long", field, self.0),
            )
            .with_constraint("min")
            .with_value(value))
        } else {
            Ok(())
        }
    }
}

/// Validates maximum string length
pub struct MaxLength(pub i64);

impl MaxLength {
    pub fn validate(&self, value: &str, field: &str, unit: LengthUnit) -> Result<(), ValidationError> {
        if unit.measure_signed(value) > self.0 {
            Err(ValidationError::new(
                field,
                format!("Field '{}' must be at most {} characters long", field, self.0),
            )
            .with_constraint("max")
            .with_value(value))
        } else {
            Ok(())
        }
    }
}

/// Validates exact string length
pub struct ExactLength(pub i64);

impl ExactLength {
    pub fn validate(&self, value: &str, field: &str, unit: LengthUnit) -> Result<(), ValidationError> {
        if unit.measure_signed(value) != self.0 {
            Err(ValidationError::new(
                field,
                format!("Field '{}' must be exactly {} characters long", field, self.0),
            )
            .with_constraint("len")
            .with_value(value))
        } else {
            Ok(())
        }
    }
}
