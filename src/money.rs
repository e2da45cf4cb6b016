use std::fmt;
use std::fmt::Formatter;
use std::iter::Sum;
use std::ops::Add;
use serde::{Deserialize, Serialize};

/// Absorbs representation error such as 0.29 * 100 = 28.999999999999996 before flooring cents
const CENT_EPSILON: f64 = 1e-9;

/// An amount in euros
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Money {
    euros: f64,
}

impl Money {
    pub fn new(euros: f64) -> Money {
        Money { euros }
    }

    pub fn zero() -> Money {
        Money { euros: 0.0 }
    }

    pub fn euros(&self) -> f64 {
        self.euros
    }

    pub fn multiply(&self, factor: f64) -> Money {
        Money::new(self.euros * factor)
    }

    /// Formats the amount as whole euros with dot grouping and floored cents, e.g. `1.234,56`.
    /// Negative amounts get a leading minus.
    pub fn formatted(&self) -> String {
        format!("{}{}", self.sign(), Self::unsigned(self.euros.abs()))
    }

    fn sign(&self) -> &'static str {
        if self.euros < 0.0 { "-" } else { "" }
    }

    fn unsigned(amount: f64) -> String {
        let total_cents = (amount * 100.0 + CENT_EPSILON).floor() as u64;
        let whole = total_cents / 100;
        let cents = total_cents % 100;

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        format!("{},{:02}", grouped, cents)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.euros + other.euros)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Money {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}€ {}", self.sign(), Self::unsigned(self.euros.abs()))
    }
}
