use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Unknown,
}

impl CardBrand {
    pub fn cvv_len(&self) -> usize {
        match self {
            CardBrand::Amex => 4,
            _ => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn parse(raw: &str) -> Self {
        Self(raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect())
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn brand(&self) -> CardBrand {
        let two: u32 = self.0.get(..2).and_then(|p| p.parse().ok()).unwrap_or(0);
        if self.0.starts_with('4') {
            CardBrand::Visa
        } else if (51..=55).contains(&two) || (22..=27).contains(&two) {
            CardBrand::Mastercard
        } else if two == 34 || two == 37 {
            CardBrand::Amex
        } else {
            CardBrand::Unknown
        }
    }

    pub fn is_valid(&self) -> bool {
        (13..=19).contains(&self.0.len())
            && self.0.bytes().all(|b| b.is_ascii_digit())
            && luhn(&self.0)
    }

    pub fn last4(&self) -> &str {
        let len = self.0.len();
        self.0.get(len.saturating_sub(4)..).unwrap_or("")
    }
}

pub fn luhn(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in digits.bytes().rev().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        let mut d = (b - b'0') as u32;
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    !digits.is_empty() && sum % 10 == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryError {
    Missing,
    InvalidMonth,
    InvalidYear,
    Expired,
}

/// Checks a card expiry given as month and two-digit year. A card expiring
/// in the current month is still valid. Four-digit years are folded to two.
pub fn check_expiry(month: &str, year: &str, today: NaiveDate) -> Result<(), ExpiryError> {
    let (month, year) = (month.trim(), year.trim());
    if month.is_empty() || year.is_empty() {
        return Err(ExpiryError::Missing);
    }
    let month: u32 = month.parse().map_err(|_| ExpiryError::InvalidMonth)?;
    if !(1..=12).contains(&month) {
        return Err(ExpiryError::InvalidMonth);
    }
    if !matches!(year.len(), 2 | 4) {
        return Err(ExpiryError::InvalidYear);
    }
    let year: u32 = year
        .parse::<u32>()
        .map_err(|_| ExpiryError::InvalidYear)?
        % 100;

    let current_year = today.year().rem_euclid(100) as u32;
    let current_month = today.month();
    if (year, month) < (current_year, current_month) {
        return Err(ExpiryError::Expired);
    }
    Ok(())
}
