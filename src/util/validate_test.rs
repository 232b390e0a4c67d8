use super::*;

// =============================================================
// EMAIL_SHAPE
// =============================================================

#[test]
fn email_shape_accepts_plain_addresses() {
    for email in ["ada@example.com", "a.b+tag@mail.example.co", "x@y.io", "o'brien@example.ie"] {
        assert!(EMAIL_SHAPE.is_match(email), "{email}");
    }
}

#[test]
fn email_shape_rejects_dots_and_punctuation_in_local_part() {
    for email in ["a..b@example.com", ".ada@example.com", "ada.@example.com", "a!#$@example.com", "a\"b@example.com"] {
        assert!(!EMAIL_SHAPE.is_match(email), "{email}");
    }
}

#[test]
fn email_shape_rejects_bad_domains() {
    for email in ["ada@example", "ada@example.c", "ada@.example.com", "ada@example..com", "ada@-example.com", "ada@exa mple.com"] {
        assert!(!EMAIL_SHAPE.is_match(email), "{email}");
    }
}

// =============================================================
// password_has_special
// =============================================================

#[test]
fn each_special_character_passes() {
    for c in PASSWORD_SPECIALS.chars() {
        assert!(password_has_special(&format!("abc{c}")).is_ok(), "{c}");
    }
}

#[test]
fn other_punctuation_does_not_count() {
    let err = password_has_special("under_score-dash?").unwrap_err();
    assert_eq!(err.code, "password_special");
    assert!(password_has_special("longenough").is_err());
}
