//! Integration tests for fieldcheck-validation

use fieldcheck_validation::*;
use serde::Deserialize;

#[derive(Validate, Default)]
struct EmailRecord {
    #[validate(rules = "email")]
    email: String,
}

#[derive(Validate, Default)]
struct RequiredRecord {
    #[validate(rules = "required")]
    required: String,
}

#[derive(Validate, Default)]
struct PasswordRecord {
    #[validate(rules = "password")]
    password: String,
}

#[derive(Validate, Default)]
struct MinMax {
    #[validate(rules = "min:1,max:10")]
    field1: String,
    #[validate(rules = "min:3,max:6")]
    field2: String,
}

#[derive(Validate, Default)]
struct Mixed {
    #[validate(rules = "required,email,min:2,max:100")]
    email: String,
    #[validate(rules = "required,min:8,max:10")]
    password: String,
    #[validate(nested)]
    limits: MinMax,
}

fn minmax(field1: &str, field2: &str) -> MinMax {
    MinMax {
        field1: field1.to_string(),
        field2: field2.to_string(),
    }
}

#[test]
fn test_record_table() {
    let validator = Validator::new();
    let cases: Vec<(Vec<String>, bool)> = vec![
        (validator.validate(&EmailRecord { email: "test@test.com".into() }), false),
        (validator.validate(&EmailRecord::default()), true),
        (validator.validate(&RequiredRecord { required: "required".into() }), false),
        (validator.validate(&RequiredRecord::default()), true),
        (validator.validate(&PasswordRecord::default()), true),
        (validator.validate(&PasswordRecord { password: "password".into() }), true),
        (validator.validate(&PasswordRecord { password: "Passwo1!".into() }), false),
        (validator.validate(&minmax("AAAA", "AAAA")), false),
        (validator.validate(&minmax("AA", "AA")), true),
        (
            validator.validate(&Mixed {
                email: "ok@email.com".into(),
                password: "AAAAAAAa1!".into(),
                limits: minmax("AAAA", "AAAA"),
            }),
            false,
        ),
    ];

    for (i, (errors, should_fail)) in cases.iter().enumerate() {
        assert_eq!(!errors.is_empty(), *should_fail, "case {}: {:?}", i, errors);
    }
}

#[test]
fn test_violations_in_traversal_order() {
    let record = Mixed {
        email: "AA".into(),
        password: "AAAAAAAAAAAAA".into(),
        limits: MinMax::default(),
    };

    assert_eq!(
        Validator::new().validate(&record),
        vec![
            "Field 'email' is not a valid email",
            "Field 'password' must be at most 10 characters long",
            "Field 'field1' must be at least 1 characters long",
            "Field 'field2' must be at least 3 characters long",
        ]
    );
}

#[test]
fn test_nested_record_walked_even_when_parent_is_valid() {
    let record = Mixed {
        email: "ok@email.com".into(),
        password: "AAAAAAAa1!".into(),
        limits: MinMax::default(),
    };

    assert_eq!(Validator::new().validate(&record).len(), 2);
}

#[derive(Validate)]
struct UnmarkedNested {
    #[validate(rules = "required")]
    email: String,
    // No `nested`: this record is not part of the descriptor.
    #[allow(dead_code)]
    limits: MinMax,
}

#[test]
fn test_unmarked_nested_record_is_not_walked() {
    let record = UnmarkedNested {
        email: "a@b.cd".into(),
        limits: MinMax::default(),
    };

    assert_eq!(record.fields().len(), 1);
    assert!(Validator::new().validate(&record).is_empty());
    assert_eq!(Validator::new().validate(&MinMax::default()).len(), 2);
}

#[test]
fn test_validation_is_deterministic() {
    let record = Mixed::default();
    let validator = Validator::new();
    let first = validator.validate(&record);
    for _ in 0..10 {
        assert_eq!(validator.validate(&record), first);
    }
}

#[test]
fn test_empty_password_gets_every_class_message() {
    assert_eq!(
        Validator::new().validate(&PasswordRecord::default()),
        vec![
            "Field 'password' requires at least one digit",
            "Field 'password' requires at least one special character",
            "Field 'password' requires at least one upper case letter",
            "Field 'password' requires at least one lower case letter",
        ]
    );
}

#[derive(Validate, Deserialize)]
struct Signup {
    #[serde(rename = "emailAddress")]
    #[validate(rules = "required,email")]
    email: String,
    #[serde(rename = "pw")]
    #[validate(rules = "required", name = "Password")]
    password: String,
    #[validate(rules = "")]
    nickname: String,
    // Not annotated, never checked.
    #[serde(default)]
    internal_id: String,
}

#[test]
fn test_display_names_from_attributes() {
    let signup: Signup = serde_json::from_value(serde_json::json!({
        "emailAddress": "",
        "pw": "",
        "nickname": "",
    }))
    .unwrap();

    assert!(signup.internal_id.is_empty());
    assert_eq!(
        Validator::new().validate(&signup),
        vec![
            "Field 'emailAddress' is required",
            "Field 'emailAddress' is not a valid email",
            "Field 'Password' is required",
        ]
    );

    let names: Vec<&str> = signup.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["email", "password", "nickname"]);
}

#[derive(Validate)]
struct Borrowed<'a> {
    #[validate(rules = "required,max:3")]
    code: &'a str,
    #[validate(rules = "len:2")]
    country: Box<str>,
}

#[test]
fn test_any_as_ref_str_field() {
    let record = Borrowed {
        code: "ABCD",
        country: "ESP".into(),
    };

    assert_eq!(
        Validator::new().validate(&record),
        vec![
            "Field 'code' must be at most 3 characters long",
            "Field 'country' must be exactly 2 characters long",
        ]
    );
}

#[test]
fn test_structured_errors_serialize() {
    let errors = Validator::new().validate_errors(&RequiredRecord::default());
    let json = errors.to_json();

    assert_eq!(json["errors"][0]["field"], "required");
    assert_eq!(json["errors"][0]["constraint"], "required");
    assert_eq!(json["errors"][0]["message"], "Field 'required' is required");
}

#[test]
fn test_chars_unit_counts_scalar_values() {
    let record = MinMax {
        field1: "ñandú".into(),
        field2: "ñandú".into(),
    };

    let bytes = Validator::new();
    let chars = Validator::from_config(ValidatorConfig::new().with_length_unit(LengthUnit::Chars)).unwrap();

    assert_eq!(
        bytes.validate(&record),
        vec!["Field 'field2' must be at most 6 characters long"]
    );
    assert!(chars.validate(&record).is_empty());
}

#[test]
fn test_audit_derived_record() {
    #[derive(Validate)]
    struct Typo {
        #[validate(rules = "required,emial")]
        email: String,
    }

    let record = Typo { email: "a@b.cd".into() };
    let validator = Validator::new();

    assert!(validator.validate(&record).is_empty());
    assert!(matches!(
        Validator::audit(&record),
        Err(RuleError::AtField { path, .. }) if path == "email"
    ));
    assert!(Validator::audit(&Mixed::default()).is_ok());
}
