//! Registration form state and per-field validation.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use crate::domain::registration::RegistrationSubmission;

/// Letters, whitespace, apostrophes and hyphens.
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").unwrap());

/// Dialing code preselected on a fresh form.
pub const DEFAULT_COUNTRY_CODE: &str = "+1";

/// `Err` carries the message shown next to the field.
pub type FieldResult = Result<(), &'static str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    PhoneNumber,
    CountryCode,
    AcceptTerms,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::FullName,
        FormField::Email,
        FormField::Password,
        FormField::ConfirmPassword,
        FormField::PhoneNumber,
        FormField::CountryCode,
        FormField::AcceptTerms,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "Full name",
            FormField::Email => "Email",
            FormField::Password => "Password",
            FormField::ConfirmPassword => "Confirm password",
            FormField::PhoneNumber => "Phone number",
            FormField::CountryCode => "Country code",
            FormField::AcceptTerms => "Terms",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the user typed, including secrets that never leave the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    pub country_code: String,
    pub accept_terms: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            phone_number: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            accept_terms: false,
        }
    }
}

/// Per-field messages from a failed [`RegistrationForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) need attention", .0.len())]
pub struct FormErrors(BTreeMap<FormField, &'static str>);

impl FormErrors {
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl RegistrationForm {
    /// Validates a single field, as done when the user leaves it.
    pub fn validate_field(&self, field: FormField) -> FieldResult {
        match field {
            FormField::FullName => validate_full_name(&self.full_name),
            FormField::Email => validate_email(&self.email),
            FormField::Password => validate_password(&self.password),
            FormField::ConfirmPassword => {
                validate_confirm_password(&self.password, &self.confirm_password)
            }
            FormField::PhoneNumber => validate_phone(&self.phone_number),
            FormField::CountryCode => Ok(()),
            FormField::AcceptTerms => validate_terms(self.accept_terms),
        }
    }

    /// Re-validates every field and, when all pass, returns the payload to send.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] holding the message for every failing field.
    pub fn validate(&self) -> Result<RegistrationSubmission, FormErrors> {
        let errors: BTreeMap<_, _> = FormField::ALL
            .into_iter()
            .filter_map(|field| self.validate_field(field).err().map(|msg| (field, msg)))
            .collect();

        if !errors.is_empty() {
            return Err(FormErrors(errors));
        }

        Ok(self.to_submission())
    }

    /// The fields sent to the server. Passwords and the terms flag stay behind.
    pub fn to_submission(&self) -> RegistrationSubmission {
        RegistrationSubmission {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            country_code: self.country_code.clone(),
        }
    }

    /// Returns the form to its initial state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn validate_full_name(name: &str) -> FieldResult {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Full name is required");
    }
    if trimmed.chars().count() < 2 {
        return Err("Name must be at least 2 characters");
    }
    if !NAME_REGEX.is_match(name) {
        return Err("Name contains invalid characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> FieldResult {
    if email.is_empty() {
        return Err("Email is required");
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("Please enter a valid email");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> FieldResult {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters");
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return Err("Password must contain uppercase and lowercase letters");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number");
    }
    Ok(())
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> FieldResult {
    if confirm.is_empty() {
        return Err("Please confirm your password");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(())
}

/// Spaces, dashes and parentheses are ignored when counting digits.
pub fn validate_phone(phone: &str) -> FieldResult {
    if phone.is_empty() {
        return Err("Phone number is required");
    }

    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();

    if !PHONE_REGEX.is_match(&digits) {
        return Err("Please enter a valid phone number (10-15 digits)");
    }
    Ok(())
}

pub fn validate_terms(accepted: bool) -> FieldResult {
    if !accepted {
        return Err("You must accept the terms and conditions");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RegistrationForm {
        RegistrationForm {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
            phone_number: "555 123-4567".to_string(),
            country_code: "+1".to_string(),
            accept_terms: true,
        }
    }

    #[test]
    fn test_full_name_rules() {
        assert_eq!(validate_full_name(""), Err("Full name is required"));
        assert_eq!(validate_full_name("   "), Err("Full name is required"));
        assert_eq!(validate_full_name("J"), Err("Name must be at least 2 characters"));
        assert_eq!(validate_full_name("J4ne"), Err("Name contains invalid characters"));
        assert_eq!(validate_full_name("Mary-Jane O'Neil"), Ok(()));
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(""), Err("Email is required"));
        assert_eq!(validate_email("jane@example"), Err("Please enter a valid email"));
        assert_eq!(validate_email("jane doe@example.com"), Err("Please enter a valid email"));
        assert_eq!(validate_email("jane@example.com"), Ok(()));
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password(""), Err("Password is required"));
        assert_eq!(
            validate_password("Ab1"),
            Err("Password must be at least 8 characters")
        );
        assert_eq!(
            validate_password("abcdefg1"),
            Err("Password must contain uppercase and lowercase letters")
        );
        assert_eq!(
            validate_password("Abcdefgh"),
            Err("Password must contain at least one number")
        );
        assert_eq!(validate_password("Abcdefg1"), Ok(()));
    }

    #[test]
    fn test_confirm_password_rules() {
        assert_eq!(
            validate_confirm_password("Secret123", ""),
            Err("Please confirm your password")
        );
        assert_eq!(
            validate_confirm_password("Secret123", "Secret124"),
            Err("Passwords do not match")
        );
        assert_eq!(validate_confirm_password("Secret123", "Secret123"), Ok(()));
    }

    #[test]
    fn test_phone_rules() {
        let invalid = Err("Please enter a valid phone number (10-15 digits)");

        assert_eq!(validate_phone(""), Err("Phone number is required"));
        assert_eq!(validate_phone("555123"), invalid);
        assert_eq!(validate_phone("5551234567890123"), invalid);
        assert_eq!(validate_phone("555-CALL-NOW"), invalid);
        assert_eq!(validate_phone("5551234567"), Ok(()));
        assert_eq!(validate_phone("(555) 123-4567"), Ok(()));
        assert_eq!(validate_phone("123456789012345"), Ok(()));
    }

    #[test]
    fn test_terms_rule() {
        assert_eq!(
            validate_terms(false),
            Err("You must accept the terms and conditions")
        );
        assert_eq!(validate_terms(true), Ok(()));
    }

    #[test]
    fn test_default_form() {
        let form = RegistrationForm::default();

        assert_eq!(form.country_code, "+1");
        assert!(!form.accept_terms);
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = RegistrationForm::default().validate().unwrap_err();

        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get(FormField::FullName), Some("Full name is required"));
        assert_eq!(errors.get(FormField::ConfirmPassword), Some("Please confirm your password"));
        assert_eq!(errors.get(FormField::CountryCode), None);

        let order: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(order.first(), Some(&FormField::FullName));
        assert_eq!(order.last(), Some(&FormField::AcceptTerms));
    }

    #[test]
    fn test_valid_form_yields_submission_without_password() {
        let submission = filled_form().validate().unwrap();

        assert_eq!(submission.full_name, "Jane Doe");
        assert_eq!(submission.phone_number, "555 123-4567");

        let wire = serde_json::to_value(&submission).unwrap();
        assert!(wire.get("password").is_none());
        assert!(wire.get("confirmPassword").is_none());
        assert!(wire.get("acceptTerms").is_none());
    }

    #[test]
    fn test_single_mismatch_is_the_only_error() {
        let mut form = filled_form();
        form.confirm_password = "Different1".to_string();

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn test_clear_resets_form() {
        let mut form = filled_form();
        form.country_code = "+44".to_string();

        form.clear();

        assert_eq!(form, RegistrationForm::default());
    }
}
