// Record descriptors

/// A record whose fields can be validated.
///
/// Implementations list their validated fields in declaration order. Usually
/// generated with `#[derive(Validate)]`, but writing one by hand is short:
///
/// ```
/// use fieldcheck_validation::{Field, Validate, Validator};
///
/// struct Login {
///     email: String,
///     password: String,
/// }
///
/// impl Validate for Login {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![
///             Field::text("email", &self.email, "required,email"),
///             Field::text("password", &self.password, "required,min:8").display("Password"),
///         ]
///     }
/// }
///
/// let login = Login { email: "ana@test.com".into(), password: "short".into() };
/// assert_eq!(
///     Validator::new().validate(&login),
///     vec!["Field 'Password' must be at least 8 characters long"]
/// );
/// ```
pub trait Validate {
    fn fields(&self) -> Vec<Field<'_>>;

    /// Validate with the process-wide validator.
    ///
    /// See [`crate::global`].
    fn validate(&self) -> Vec<String>
    where
        Self: Sized,
    {
        crate::global::validate(self)
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

/// One field of a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Declared name.
    pub name: &'a str,
    /// Name used in violation messages instead of `name`.
    pub display_name: Option<&'a str>,
    pub value: FieldValue<'a>,
}

#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// A string leaf with an optional rule specification.
    Text {
        value: &'a str,
        rules: Option<&'a str>,
    },
    /// A nested record. Always walked, whatever rules the field has.
    Record(&'a dyn Validate),
}

impl<'a> Field<'a> {
    pub fn text(name: &'a str, value: &'a str, rules: &'a str) -> Self {
        Self {
            name,
            display_name: None,
            value: FieldValue::Text {
                value,
                rules: Some(rules),
            },
        }
    }

    /// A string field that carries no rules and is never checked.
    pub fn unchecked(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            display_name: None,
            value: FieldValue::Text { value, rules: None },
        }
    }

    pub fn record(name: &'a str, record: &'a dyn Validate) -> Self {
        Self {
            name,
            display_name: None,
            value: FieldValue::Record(record),
        }
    }

    pub fn display(mut self, display_name: &'a str) -> Self {
        self.display_name = Some(display_name);
        self
    }

    /// The display name override if set, else the declared name.
    pub fn label(&self) -> &'a str {
        self.display_name.unwrap_or(self.name)
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Field");
        s.field("name", &self.name).field("display_name", &self.display_name);
        match self.value {
            FieldValue::Text { value, rules } => s.field("value", &value).field("rules", &rules),
            FieldValue::Record(_) => s.field("value", &"<record>"),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl Validate for Empty {
        fn fields(&self) -> Vec<Field<'_>> {
            Vec::new()
        }
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let field = Field::text("email", "", "required");
        assert_eq!(field.label(), "email");
        assert_eq!(field.display("E-mail").label(), "E-mail");
    }

    #[test]
    fn test_forwarding_impls() {
        let boxed: Box<dyn Validate> = Box::new(Empty);
        assert!(boxed.fields().is_empty());
        assert!((&Empty).fields().is_empty());
    }

    #[test]
    fn test_debug_hides_nested_record() {
        let empty = Empty;
        let field = Field::record("inner", &empty);
        assert!(format!("{:?}", field).contains("<record>"));
    }
}
