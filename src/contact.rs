//! Quote-request form validation.

use crate::catalog::ProductCategory;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// RFC 5322 style address check, simplified.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// A plain count, optionally followed by `+` ("1000+").
static QUANTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\+?$").expect("quantity pattern is valid"));

const MAX_EMAIL_LEN: usize = 254;

static DISPOSABLE_DOMAINS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "10minutemail.com",
        "10minutemail.net",
        "10minutemail.org",
        "20minutemail.com",
        "20minutemail.net",
        "33mail.com",
        "33m.co",
        "guerrillamail.com",
        "guerrillamail.net",
        "guerrillamail.org",
        "mailinator.com",
        "mailinator.net",
        "mailinator.org",
        "tempmail.com",
        "tempmail.net",
        "tempmail.org",
        "temp-mail.org",
        "temp-mail.io",
        "temp-mail.ru",
        "temp-mail.com",
        "throwaway.email",
        "yopmail.com",
        "yopmail.fr",
        "yopmail.net",
        "getnada.com",
        "nada.email",
        "mohmal.com",
        "mohmal.im",
        "fakeinbox.com",
        "fakeinbox.net",
        "dispostable.com",
        "mintemail.com",
        "mytrashmail.com",
        "sharklasers.com",
        "maildrop.cc",
        "meltmail.com",
        "spamgourmet.com",
        "spamhole.com",
        "tempail.com",
        "tempinbox.com",
        "trashmail.com",
        "trashmail.net",
        "trashmail.org",
        "mailnesia.com",
        "mailcatch.com",
    ]
    .into_iter()
    .collect()
});

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Required,
    #[error("Please enter a valid email address")]
    Invalid,
    #[error("Email address is too long (maximum 254 characters)")]
    TooLong,
    #[error(
        "Temporary or disposable email addresses are not allowed. Please use a permanent email address."
    )]
    Disposable,
}

/// Checks an address for syntax and rejects known disposable-mail domains.
pub fn validate_email(email: &str) -> Result<(), EmailError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EmailError::Required);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(EmailError::Invalid);
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(EmailError::TooLong);
    }
    if email.contains("..") {
        return Err(EmailError::Invalid);
    }

    let mut parts = email.split('@');
    let (Some(_local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(EmailError::Invalid);
    };

    let domain = domain.trim().to_lowercase();
    if !domain.contains('.') {
        return Err(EmailError::Invalid);
    }

    // Subdomains of a disposable service are caught through the last two labels.
    let labels: Vec<&str> = domain.split('.').collect();
    let base_domain = labels[labels.len().saturating_sub(2)..].join(".");
    if DISPOSABLE_DOMAINS.contains(domain.as_str())
        || DISPOSABLE_DOMAINS.contains(base_domain.as_str())
    {
        return Err(EmailError::Disposable);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Product,
    Quantity,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Product => "product",
            Field::Quantity => "quantity",
        })
    }
}

/// Every failing field with the message shown next to it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FormErrors(pub BTreeMap<Field, String>);

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Product choices offered by the form besides the catalog categories.
pub const EXTRA_PRODUCT_CHOICES: [&str; 2] = ["multiple", "other"];

/// A quote request as typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    /// Catalog slug, `multiple`, or `other`.
    pub product: String,
    pub quantity: String,
    pub message: String,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = BTreeMap::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, "Name is required".to_string());
        } else if name.chars().count() < 2 {
            errors.insert(Field::Name, "Name must be at least 2 characters".to_string());
        }

        if let Err(e) = validate_email(&self.email) {
            errors.insert(Field::Email, e.to_string());
        }

        let product = self.product.trim();
        let known = product.parse::<ProductCategory>().is_ok()
            || EXTRA_PRODUCT_CHOICES.contains(&product);
        if !known {
            errors.insert(Field::Product, "Please select a product type".to_string());
        }

        let quantity = self.quantity.trim();
        if quantity.is_empty() {
            errors.insert(Field::Quantity, "Quantity is required".to_string());
        } else if !QUANTITY_RE.is_match(quantity) {
            errors.insert(
                Field::Quantity,
                "Please enter a valid quantity (e.g., 500, 1000+)".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> QuoteRequest {
        QuoteRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            product: "mug".to_string(),
            quantity: "500".to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn accepts_ordinary_addresses() {
        assert_eq!(validate_email("ada@example.com"), Ok(()));
        assert_eq!(validate_email("  first.last+tag@mail.example.co.uk "), Ok(()));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(validate_email("   "), Err(EmailError::Required));
        assert_eq!(validate_email("ada"), Err(EmailError::Invalid));
        assert_eq!(validate_email("ada@localhost"), Err(EmailError::Invalid));
        assert_eq!(validate_email("ada..b@example.com"), Err(EmailError::Invalid));
        assert_eq!(validate_email("a@b@example.com"), Err(EmailError::Invalid));
        assert_eq!(validate_email("ada@-example.com"), Err(EmailError::Invalid));
    }

    #[test]
    fn rejects_long_addresses() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate_email(&email), Err(EmailError::TooLong));
    }

    #[test]
    fn rejects_disposable_domains() {
        assert_eq!(validate_email("x@mailinator.com"), Err(EmailError::Disposable));
        assert_eq!(validate_email("x@YOPMAIL.fr"), Err(EmailError::Disposable));
        assert_eq!(validate_email("x@inbox.trashmail.net"), Err(EmailError::Disposable));
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(request().validate(), Ok(()));

        let mut bulk = request();
        bulk.quantity = "1000+".to_string();
        bulk.product = "multiple".to_string();
        assert_eq!(bulk.validate(), Ok(()));
    }

    #[test]
    fn collects_every_failing_field() {
        let errors = QuoteRequest {
            name: "A".to_string(),
            email: String::new(),
            product: String::new(),
            quantity: "lots".to_string(),
            message: String::new(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.0.len(), 4);
        assert_eq!(errors.get(Field::Name), Some("Name must be at least 2 characters"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Product), Some("Please select a product type"));
        assert_eq!(
            errors.get(Field::Quantity),
            Some("Please enter a valid quantity (e.g., 500, 1000+)")
        );
    }

    #[test]
    fn empty_quantity_is_required() {
        let mut req = request();
        req.quantity = "  ".to_string();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get(Field::Quantity), Some("Quantity is required"));
        assert_eq!(errors.get(Field::Name), None);
    }
}
