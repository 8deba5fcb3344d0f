use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([\w-]+\.)+[\w-]{2,}(/[^\s]*)?$").expect("valid url pattern")
});

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile pattern"));

static PINCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("valid pincode pattern"));

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(19|20)[0-9]{2}$").expect("valid year pattern"));

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const URL_MESSAGE: &str = "Please enter a valid website URL";
pub const MOBILE_MESSAGE: &str = "Please enter a valid 10-digit mobile number";
pub const PINCODE_MESSAGE: &str = "Please enter a valid 6-digit pincode";
pub const YEAR_MESSAGE: &str = "Please enter a valid year";
pub const NUMBER_MESSAGE: &str = "Please enter a numeric value";

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value.trim())
}

pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE_RE.is_match(value.trim())
}

pub fn is_valid_pincode(value: &str) -> bool {
    PINCODE_RE.is_match(value.trim())
}

pub fn is_valid_year(value: &str) -> bool {
    YEAR_RE.is_match(value.trim())
}

pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Outcome of validating one step. `ok()` holds iff no messages were collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records `message` unless `condition` holds.
    pub fn ensure(&mut self, condition: bool, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.push(message);
        }
        self
    }

    pub fn require(&mut self, value: &str, message: impl Into<String>) -> &mut Self {
        self.ensure(!value.trim().is_empty(), message)
    }

    /// Checks `value` only when something was entered.
    pub fn optional(
        &mut self,
        value: &str,
        check: impl Fn(&str) -> bool,
        message: impl Into<String>,
    ) -> &mut Self {
        if value.trim().is_empty() {
            return self;
        }
        self.ensure(check(value), message)
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }
}

type ValidatorCallback = dyn Fn(&str) -> Result<(), String> + Send + Sync;

/// Built-in format checks attached to individual fields.
#[derive(Clone)]
pub enum Validator {
    None,
    Email,
    Url,
    Mobile,
    Pincode,
    Year,
    Number { min: Option<f64>, max: Option<f64> },
    Custom(Arc<ValidatorCallback>),
}

impl Validator {
    pub fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let trimmed = input.trim();
        match self {
            Validator::None => Ok(()),
            Validator::Email => check(is_valid_email(trimmed), EMAIL_MESSAGE),
            Validator::Url => check(is_valid_url(trimmed), URL_MESSAGE),
            Validator::Mobile => check(is_valid_mobile(trimmed), MOBILE_MESSAGE),
            Validator::Pincode => check(is_valid_pincode(trimmed), PINCODE_MESSAGE),
            Validator::Year => check(is_valid_year(trimmed), YEAR_MESSAGE),
            Validator::Number { min, max } => {
                let value =
                    parse_number(trimmed).ok_or_else(|| ValidationError::new(NUMBER_MESSAGE))?;
                if let Some(min) = min {
                    if value < *min {
                        return Err(ValidationError::new(format!(
                            "Value must be at least {}",
                            min
                        )));
                    }
                }
                if let Some(max) = max {
                    if value > *max {
                        return Err(ValidationError::new(format!(
                            "Value must be at most {}",
                            max
                        )));
                    }
                }
                Ok(())
            }
            Validator::Custom(func) => func(trimmed).map_err(ValidationError::new),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::None => write!(f, "None"),
            Validator::Email => write!(f, "Email"),
            Validator::Url => write!(f, "Url"),
            Validator::Mobile => write!(f, "Mobile"),
            Validator::Pincode => write!(f, "Pincode"),
            Validator::Year => write!(f, "Year"),
            Validator::Number { min, max } => write!(f, "Number({:?}..{:?})", min, max),
            Validator::Custom(_) => write!(f, "Custom"),
        }
    }
}

fn check(condition: bool, message: &str) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("asha@example.com"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha example@x.com"));
    }

    #[test]
    fn url_shape_accepts_optional_scheme() {
        assert!(is_valid_url("https://iitb.ac.in"));
        assert!(is_valid_url("www.iitb.ac.in/admissions"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn mobile_requires_exactly_ten_digits() {
        assert!(is_valid_mobile("9876543210"));
        assert!(!is_valid_mobile("12345"));
        assert!(!is_valid_mobile("98765432101"));
        assert!(!is_valid_mobile("98765abcde"));
    }

    #[test]
    fn number_validator_enforces_bounds() {
        let percentage = Validator::Number {
            min: Some(0.0),
            max: Some(100.0),
        };
        assert!(percentage.validate("87.5").is_ok());
        assert_eq!(
            percentage.validate("120").unwrap_err().message,
            "Value must be at most 100"
        );
        assert_eq!(
            percentage.validate("abc").unwrap_err().message,
            NUMBER_MESSAGE
        );
    }

    #[test]
    fn custom_validator_reports_message() {
        let validator = Validator::Custom(Arc::new(|input| {
            if input.len() > 3 {
                Ok(())
            } else {
                Err("Too short".into())
            }
        }));
        assert_eq!(validator.validate("ab").unwrap_err().message, "Too short");
    }

    #[test]
    fn result_helpers_collect_in_order() {
        let mut result = ValidationResult::new();
        result
            .require("", "Name is required")
            .optional("", is_valid_email, EMAIL_MESSAGE)
            .optional("bad", is_valid_email, EMAIL_MESSAGE);
        assert!(!result.ok());
        assert_eq!(result.errors(), ["Name is required", EMAIL_MESSAGE]);
    }
}
