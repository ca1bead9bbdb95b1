use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Woman,
    NonBinary,
    Other,
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "woman" => Ok(Gender::Woman),
            "non-binary" => Ok(Gender::NonBinary),
            "other" => Ok(Gender::Other),
            _ => Err(CoreError::validation(format!(
                "Gender must be one of Male, Woman, Non-Binary, Other (got '{}')",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Woman => "Woman",
            Gender::NonBinary => "Non-Binary",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Raw personal details as collected from the customer, in prompt order.
#[derive(Debug, Clone, Deserialize)]
pub struct PassengerDetails {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub passport: String,
}

/// Raw payment details as collected from the customer.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDetails {
    pub card_number: String,
    pub security_code: u32,
}

/// Masked card kept on a booked passenger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentCard {
    pub last_four: String,
}

/// Passenger attached to a ticket once it is booked.
///
/// Every setter validates its field; construction goes through [`Passenger::from_details`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    first_name: String,
    last_name: String,
    age: u8,
    gender: Gender,
    email: String,
    phone: String,
    passport: String,
    card: Option<PaymentCard>,
}

impl Passenger {
    pub fn from_details(details: &PassengerDetails) -> CoreResult<Self> {
        let mut passenger = Self {
            first_name: String::new(),
            last_name: String::new(),
            age: 0,
            gender: Gender::Other,
            email: String::new(),
            phone: String::new(),
            passport: String::new(),
            card: None,
        };

        passenger.set_first_name(&details.first_name)?;
        passenger.set_last_name(&details.last_name)?;
        passenger.set_age(details.age)?;
        passenger.set_gender(&details.gender)?;
        passenger.set_email(&details.email)?;
        passenger.set_phone(&details.phone)?;
        passenger.set_passport(&details.passport)?;

        Ok(passenger)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn passport(&self) -> &str {
        &self.passport
    }

    pub fn card(&self) -> Option<&PaymentCard> {
        self.card.as_ref()
    }

    pub fn set_first_name(&mut self, value: &str) -> CoreResult<()> {
        self.first_name = validate_name("First name", value)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> CoreResult<()> {
        self.last_name = validate_name("Last name", value)?;
        Ok(())
    }

    pub fn set_age(&mut self, value: i32) -> CoreResult<()> {
        if !(0..=120).contains(&value) {
            return Err(CoreError::validation(format!(
                "Age must be between 0 and 120 (got {value})"
            )));
        }
        self.age = value as u8;
        Ok(())
    }

    pub fn set_gender(&mut self, value: &str) -> CoreResult<()> {
        self.gender = value.parse()?;
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> CoreResult<()> {
        let value = value.trim();
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && !value.contains(char::is_whitespace)
                    && domain
                        .rsplit_once('.')
                        .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
            }
            None => false,
        };

        if !valid {
            return Err(CoreError::validation(format!("Invalid email address '{value}'")));
        }
        self.email = value.to_string();
        Ok(())
    }

    pub fn set_phone(&mut self, value: &str) -> CoreResult<()> {
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        let digits = compact.strip_prefix('+').unwrap_or(&compact);

        if !(8..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::validation(format!("Invalid phone number '{}'", value.trim())));
        }
        self.phone = compact;
        Ok(())
    }

    pub fn set_passport(&mut self, value: &str) -> CoreResult<()> {
        let value = value.trim();
        if value.is_empty() || value.len() > 9 || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::validation(
                "Passport number must be 1 to 9 letters or digits",
            ));
        }
        self.passport = value.to_ascii_uppercase();
        Ok(())
    }

    /// Validates the card and keeps only its last four digits.
    pub fn set_payment(&mut self, payment: &PaymentDetails) -> CoreResult<()> {
        let digits: String = payment
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::validation("Card number must be 12 to 19 digits"));
        }
        if !(100..=9999).contains(&payment.security_code) {
            return Err(CoreError::validation("Security code must be 3 or 4 digits"));
        }

        self.card = Some(PaymentCard {
            last_four: digits[digits.len() - 4..].to_string(),
        });
        Ok(())
    }
}

fn validate_name(field: &str, value: &str) -> CoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::validation(format!("{field} cannot be empty")));
    }
    if !value
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
    {
        return Err(CoreError::validation(format!(
            "{field} must only contain letters, spaces, hyphens or apostrophes"
        )));
    }
    Ok(value.to_string())
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) passport {} email {} phone {}",
            self.full_name(),
            self.age,
            self.gender,
            self.passport,
            self.email,
            self.phone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PassengerDetails {
        PassengerDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            age: 36,
            gender: "Woman".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0412 345 678".to_string(),
            passport: "pa1234567".to_string(),
        }
    }

    #[test]
    fn test_valid_details() {
        let passenger = Passenger::from_details(&details()).unwrap();
        assert_eq!(passenger.full_name(), "Ada Lovelace");
        assert_eq!(passenger.age(), 36);
        assert_eq!(passenger.gender(), Gender::Woman);
        assert_eq!(passenger.phone(), "0412345678");
        assert_eq!(passenger.passport(), "PA1234567");
        assert!(passenger.card().is_none());
    }

    #[test]
    fn test_gender_is_case_insensitive() {
        assert_eq!("non-binary".parse::<Gender>().unwrap(), Gender::NonBinary);
        assert_eq!(" MALE ".parse::<Gender>().unwrap(), Gender::Male);
        assert!("robot".parse::<Gender>().is_err());
    }

    #[test]
    fn test_rejects_malformed_fields() {
        let mut bad = details();
        bad.email = "ada.example.com".to_string();
        assert!(Passenger::from_details(&bad).is_err());

        let mut bad = details();
        bad.age = -1;
        assert!(Passenger::from_details(&bad).is_err());

        let mut bad = details();
        bad.first_name = "Ad4".to_string();
        assert!(Passenger::from_details(&bad).is_err());

        let mut bad = details();
        bad.phone = "12ab".to_string();
        assert!(Passenger::from_details(&bad).is_err());

        let mut bad = details();
        bad.passport = "TOOLONG1234".to_string();
        assert!(Passenger::from_details(&bad).is_err());
    }

    #[test]
    fn test_payment_keeps_last_four_digits() {
        let mut passenger = Passenger::from_details(&details()).unwrap();
        passenger
            .set_payment(&PaymentDetails {
                card_number: "4111 1111 1111 1234".to_string(),
                security_code: 123,
            })
            .unwrap();
        assert_eq!(passenger.card().unwrap().last_four, "1234");
    }

    #[test]
    fn test_payment_rejects_short_security_code() {
        let mut passenger = Passenger::from_details(&details()).unwrap();
        let result = passenger.set_payment(&PaymentDetails {
            card_number: "4111111111111234".to_string(),
            security_code: 12,
        });
        assert!(result.is_err());
        assert!(passenger.card().is_none());
    }
}
