use super::*;

fn valid_fields() -> FormFields {
    FormFields {
        username: "ab12".into(),
        email: "a@b.com".into(),
        identifier: "1234567890".into(),
        password: "longenough".into(),
    }
}

// =========================================================================
// validate
// =========================================================================

#[test]
fn valid_fields_produce_no_errors() {
    let errors = validate(&valid_fields());
    assert!(errors.is_empty());
    assert_eq!(errors.len(), 0);
}

#[test]
fn empty_form_reports_required_for_every_field() {
    let errors = validate(&FormFields::new());
    assert_eq!(errors.len(), 4);
    for field in Field::ALL {
        assert_eq!(errors.get(field), Some(FieldError::Required), "{field}");
        assert_eq!(errors.message(field).as_deref(), Some("required"));
    }
}

#[test]
fn errors_accumulate_without_short_circuit() {
    let fields = FormFields {
        username: "ab!2".into(),
        email: "nope".into(),
        identifier: "12345".into(),
        password: "short12".into(),
    };
    let errors = validate(&fields);
    assert_eq!(errors.get(Field::Username), Some(FieldError::SpecialCharacters));
    assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidEmail));
    assert_eq!(errors.get(Field::Identifier), Some(FieldError::NotTenDigits));
    assert_eq!(errors.get(Field::Password), Some(FieldError::TooShort));
}

#[test]
fn one_bad_field_does_not_affect_others() {
    let mut fields = valid_fields();
    fields.username = "ab!2".into();
    let errors = validate(&fields);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.message(Field::Username).as_deref(), Some("no special characters allowed"));
    assert!(!errors.contains(Field::Email));
}

#[test]
fn validate_is_idempotent() {
    let mut fields = valid_fields();
    fields.password = "x".into();
    assert_eq!(validate(&fields), validate(&fields));
}

#[test]
fn iter_yields_fields_in_display_order() {
    let errors = validate(&FormFields::new());
    let order: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
    assert_eq!(order, Field::ALL.to_vec());
}

// =========================================================================
// username
// =========================================================================

#[test]
fn username_rules() {
    assert_eq!(check_field(Field::Username, "ab12"), Ok(()));
    assert_eq!(check_field(Field::Username, "ABCxyz09"), Ok(()));
    assert_eq!(check_field(Field::Username, ""), Err(FieldError::Required));
    assert_eq!(check_field(Field::Username, "   "), Err(FieldError::Required));
    assert_eq!(check_field(Field::Username, "ab 12"), Err(FieldError::SpecialCharacters));
    assert_eq!(check_field(Field::Username, "ab_12"), Err(FieldError::SpecialCharacters));
    assert_eq!(check_field(Field::Username, "café"), Err(FieldError::SpecialCharacters));
}

// =========================================================================
// email
// =========================================================================

#[test]
fn email_accepts_simple_shapes() {
    for ok in ["a@b.com", "first.last@sub.example.org", "x+tag@d.io", "a@b..c"] {
        assert_eq!(check_field(Field::Email, ok), Ok(()), "{ok}");
    }
}

#[test]
fn email_rejects_malformed() {
    for bad in ["a@b", "a b@c.d", "@b.co", "a@b.", "a@.b", "a@@b.co", "a@b@c.com", "ab.com", " a@b.com"] {
        assert_eq!(check_field(Field::Email, bad), Err(FieldError::InvalidEmail), "{bad}");
    }
    assert_eq!(check_field(Field::Email, ""), Err(FieldError::Required));
}

// =========================================================================
// identifier
// =========================================================================

#[test]
fn identifier_requires_exactly_ten_digits() {
    assert_eq!(check_field(Field::Identifier, "1234567890"), Ok(()));
    assert_eq!(check_field(Field::Identifier, ""), Err(FieldError::Required));
    assert_eq!(check_field(Field::Identifier, "12345"), Err(FieldError::NotTenDigits));
    assert_eq!(check_field(Field::Identifier, "12345678901"), Err(FieldError::NotTenDigits));
    assert_eq!(check_field(Field::Identifier, "12345abcde"), Err(FieldError::NotTenDigits));
    assert_eq!(check_field(Field::Identifier, "١٢٣٤٥٦٧٨٩٠"), Err(FieldError::NotTenDigits));
    assert_eq!(
        validate(&FormFields { identifier: "12345".into(), ..FormFields::default() })
            .message(Field::Identifier)
            .as_deref(),
        Some("must be exactly 10 digits")
    );
}

// =========================================================================
// password
// =========================================================================

#[test]
fn password_minimum_length() {
    assert_eq!(check_field(Field::Password, ""), Err(FieldError::Required));
    assert_eq!(check_field(Field::Password, "short12"), Err(FieldError::TooShort));
    assert_eq!(check_field(Field::Password, "eight888"), Ok(()));
    assert_eq!(FieldError::TooShort.to_string(), "minimum 8 characters");
}

#[test]
fn password_length_counts_utf16_units() {
    assert_eq!(check_field(Field::Password, "ééééééé"), Err(FieldError::TooShort));
    assert_eq!(check_field(Field::Password, "éééééééé"), Ok(()));
    // Each emoji is a surrogate pair, so four of them reach the minimum.
    assert_eq!(check_field(Field::Password, "😀😀😀😀"), Ok(()));
    assert_eq!(check_field(Field::Password, "😀😀😀a"), Err(FieldError::TooShort));
}

// =========================================================================
// byte-order mark
// =========================================================================

#[test]
fn bom_counts_as_whitespace() {
    assert_eq!(check_field(Field::Username, "\u{FEFF}"), Err(FieldError::Required));
    assert_eq!(check_field(Field::Username, " \u{FEFF} "), Err(FieldError::Required));
    assert_eq!(check_field(Field::Email, "a\u{FEFF}@b.co"), Err(FieldError::InvalidEmail));
    assert_eq!(check_field(Field::Email, "a@b.co\u{FEFF}"), Err(FieldError::InvalidEmail));
}
