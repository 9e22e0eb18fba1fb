use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

// Field patterns; accented Latin vowels and n-tilde are accepted in
// names, addresses and destinations.
static ALPHABETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ ]+$").unwrap());
static TEN_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9áéíóúÁÉÍÓÚñÑ .,]+$").unwrap());
static DESTINATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s.,]+$").unwrap());
static PRICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").unwrap());

/// A field rule violation. Checks short-circuit: callers get the first
/// failing field's error, never an aggregate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The {0} field is required.")]
    Required(&'static str),
    #[error("The {0} may only contain letters and spaces.")]
    NotAlphabetic(&'static str),
    #[error("The {0} must contain exactly 10 digits.")]
    NotTenDigits(&'static str),
    #[error("The email must have the form local@domain.tld.")]
    MalformedEmail,
    #[error("The address may only contain letters, digits, spaces, periods and commas.")]
    MalformedAddress,
    #[error("The destination may only contain letters, spaces, periods and commas.")]
    MalformedDestination,
    #[error("The {0} must be a date in YYYY-MM-DD format.")]
    MalformedDate(&'static str),
    #[error("The travel date cannot be earlier than the reservation date.")]
    TravelDateBeforeReservation,
    #[error("The price must be a valid number with at most 2 decimal places.")]
    MalformedPrice,
    #[error("The price must be greater than 0.")]
    NonPositivePrice,
}

/// Reservation fields in their parsed form, produced by
/// [`validate_reservation`]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReservation {
    pub reservation_date: NaiveDate,
    pub travel_date: NaiveDate,
    pub price: Decimal,
}

fn check_required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

fn check_name(value: &str, field: &'static str) -> Result<(), ValidationError> {
    check_required(value, field)?;
    if !ALPHABETIC.is_match(value.trim()) {
        return Err(ValidationError::NotAlphabetic(field));
    }
    Ok(())
}

fn check_ten_digits(value: &str, field: &'static str) -> Result<(), ValidationError> {
    check_required(value, field)?;
    if !TEN_DIGITS.is_match(value.trim()) {
        return Err(ValidationError::NotTenDigits(field));
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), ValidationError> {
    check_required(value, "email")?;
    if !EMAIL.is_match(value.trim()) {
        return Err(ValidationError::MalformedEmail);
    }
    Ok(())
}

fn check_address(value: &str) -> Result<(), ValidationError> {
    check_required(value, "address")?;
    if !ADDRESS.is_match(value.trim()) {
        return Err(ValidationError::MalformedAddress);
    }
    Ok(())
}

fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    check_required(value, field)?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::MalformedDate(field))
}

/// Validate all six customer fields, in field order
pub fn validate_customer(
    first_name: &str,
    last_name: &str,
    national_id: &str,
    phone: &str,
    email: &str,
    address: &str,
) -> Result<(), ValidationError> {
    check_name(first_name, "first name")?;
    check_name(last_name, "last name")?;
    check_ten_digits(national_id, "national id")?;
    check_ten_digits(phone, "phone")?;
    check_email(email)?;
    check_address(address)?;
    Ok(())
}

/// Validate reservation fields and parse the string-typed ones.
///
/// The date comparison is date-only by construction: both fields parse
/// to plain dates with no time component.
pub fn validate_reservation(
    destination: &str,
    reservation_date: &str,
    travel_date: &str,
    price: &str,
) -> Result<ValidatedReservation, ValidationError> {
    check_required(destination, "destination")?;
    if !DESTINATION.is_match(destination.trim()) {
        return Err(ValidationError::MalformedDestination);
    }

    let reservation_date = parse_date(reservation_date, "reservation date")?;
    let travel_date = parse_date(travel_date, "travel date")?;
    if travel_date < reservation_date {
        return Err(ValidationError::TravelDateBeforeReservation);
    }

    check_required(price, "price")?;
    if !PRICE.is_match(price.trim()) {
        return Err(ValidationError::MalformedPrice);
    }
    let price = Decimal::from_str(price.trim()).map_err(|_| ValidationError::MalformedPrice)?;
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }

    Ok(ValidatedReservation {
        reservation_date,
        travel_date,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_customer() -> Result<(), ValidationError> {
        validate_customer(
            "María José",
            "Peña",
            "1712345678",
            "0991234567",
            "maria.jose@example.com",
            "Av. Amazonas 123, Quito",
        )
    }

    #[test]
    fn test_valid_customer_passes() {
        assert!(valid_customer().is_ok());
    }

    #[test]
    fn test_customer_first_failure_wins() {
        // Both name and phone are bad; the name error is reported
        let result = validate_customer(
            "Maria123",
            "Peña",
            "1712345678",
            "99",
            "maria@example.com",
            "Av. Amazonas 123",
        );
        assert_eq!(result, Err(ValidationError::NotAlphabetic("first name")));
    }

    #[test]
    fn test_customer_field_rules() {
        let ok = |f: &str, l: &str, d: &str, t: &str, e: &str, a: &str| {
            validate_customer(f, l, d, t, e, a)
        };

        assert_eq!(
            ok("", "Peña", "1712345678", "0991234567", "a@b.com", "X 1"),
            Err(ValidationError::Required("first name"))
        );
        assert_eq!(
            ok("Ana", "Peña", "17123", "0991234567", "a@b.com", "X 1"),
            Err(ValidationError::NotTenDigits("national id"))
        );
        assert_eq!(
            ok("Ana", "Peña", "1712345678", "telefono99", "a@b.com", "X 1"),
            Err(ValidationError::NotTenDigits("phone"))
        );
        assert_eq!(
            ok("Ana", "Peña", "1712345678", "0991234567", "not-an-email", "X 1"),
            Err(ValidationError::MalformedEmail)
        );
        assert_eq!(
            ok("Ana", "Peña", "1712345678", "0991234567", "a@b", "X 1"),
            Err(ValidationError::MalformedEmail)
        );
        assert_eq!(
            ok("Ana", "Peña", "1712345678", "0991234567", "a@b.com", "Calle #42"),
            Err(ValidationError::MalformedAddress)
        );
    }

    #[test]
    fn test_valid_reservation_parses() {
        let validated =
            validate_reservation("Galápagos", "2025-03-01", "2025-04-15", "1250.50")
                .expect("Should validate");
        assert_eq!(
            validated.reservation_date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(validated.price, dec!(1250.50));
    }

    #[test]
    fn test_travel_date_must_not_precede_reservation_date() {
        let result = validate_reservation("Quito", "2025-04-15", "2025-03-01", "100");
        assert_eq!(result, Err(ValidationError::TravelDateBeforeReservation));

        // Same day is allowed
        assert!(validate_reservation("Quito", "2025-03-01", "2025-03-01", "100").is_ok());
    }

    #[test]
    fn test_price_rules() {
        let check = |p: &str| validate_reservation("Quito", "2025-03-01", "2025-04-15", p);

        assert!(check("150.50").is_ok());
        assert!(check("150.5").is_ok());
        assert!(check("150").is_ok());
        assert_eq!(check("150.505"), Err(ValidationError::MalformedPrice));
        assert_eq!(check("-150"), Err(ValidationError::MalformedPrice));
        assert_eq!(check("abc"), Err(ValidationError::MalformedPrice));
        assert_eq!(check("0"), Err(ValidationError::NonPositivePrice));
        assert_eq!(check("0.00"), Err(ValidationError::NonPositivePrice));
    }

    #[test]
    fn test_destination_rules() {
        let check = |d: &str| validate_reservation(d, "2025-03-01", "2025-04-15", "100");

        assert!(check("Bahía de Caráquez, Manabí").is_ok());
        assert_eq!(check(""), Err(ValidationError::Required("destination")));
        assert_eq!(check("Quito 2"), Err(ValidationError::MalformedDestination));
    }

    #[test]
    fn test_malformed_dates_rejected() {
        assert_eq!(
            validate_reservation("Quito", "01-03-2025", "2025-04-15", "100"),
            Err(ValidationError::MalformedDate("reservation date"))
        );
        assert_eq!(
            validate_reservation("Quito", "2025-03-01", "2025-02-30", "100"),
            Err(ValidationError::MalformedDate("travel date"))
        );
    }
}
