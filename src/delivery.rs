//! Delivery details
//!
//! Made-up courier details shown alongside an order. Nothing is persisted; seeding the
//! generator with the order id gives the same courier every time the order is viewed.

use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::Serialize;

use crate::orders::OrderId;

const FIRST_NAMES: [&str; 16] = [
    "Rajesh", "Amit", "Rahul", "Vikram", "Arjun", "Deepak", "Suresh", "Manoj", "Priya", "Neha",
    "Anjali", "Kavita", "Sunita", "Rekha", "Meena", "Pooja",
];

const LAST_NAMES: [&str; 15] = [
    "Sharma", "Patel", "Singh", "Kumar", "Gupta", "Verma", "Yadav", "Jain", "Malhotra",
    "Choudhary", "Reddy", "Mishra", "Pandey", "Joshi", "Agarwal",
];

const VEHICLE_TYPES: [&str; 4] = ["Truck", "Car", "Bolero", "Van"];

const VEHICLE_SERIES: [&str; 8] = ["DL", "HR", "PB", "CH", "KA", "TN", "MH", "GJ"];

const PHONE_PREFIXES: [&str; 10] = ["98", "99", "97", "96", "95", "94", "93", "92", "91", "90"];

/// Courier assigned to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryDetails {
    /// Courier's full name
    pub name: String,

    /// `+91` mobile number
    pub phone: String,

    /// Registration plate, e.g. `DL 0420 KX`
    pub vehicle_number: String,

    /// Kind of vehicle
    pub vehicle_type: String,
}

impl DeliveryDetails {
    /// Stable details for an order.
    pub fn for_order(id: OrderId) -> Self {
        DeliveryDetailsGenerator::seeded(id.0).generate()
    }
}

impl fmt::Display for DeliveryDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), {} {}",
            self.name, self.phone, self.vehicle_type, self.vehicle_number
        )
    }
}

/// Produces random [`DeliveryDetails`].
#[derive(Debug)]
pub struct DeliveryDetailsGenerator<R> {
    rng: R,
}

impl DeliveryDetailsGenerator<StdRng> {
    /// A deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DeliveryDetailsGenerator<R> {
    /// Wrap a random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one set of details.
    pub fn generate(&mut self) -> DeliveryDetails {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);

        DeliveryDetails {
            name: format!("{first} {last}"),
            phone: self.phone(),
            vehicle_number: self.vehicle_number(),
            vehicle_type: self.pick(&VEHICLE_TYPES).to_string(),
        }
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn phone(&mut self) -> String {
        let prefix = self.pick(&PHONE_PREFIXES);
        let number: u32 = self.rng.gen_range(0..100_000_000);

        format!("+91 {prefix}{number:08}")
    }

    fn vehicle_number(&mut self) -> String {
        let series = self.pick(&VEHICLE_SERIES);
        let number: u16 = self.rng.gen_range(0..10_000);
        let letters: String = (0..2)
            .map(|_| char::from(b'A' + self.rng.gen_range(0..26_u8)))
            .collect();

        format!("{series} {number:04} {letters}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_details() {
        let first = DeliveryDetailsGenerator::seeded(42).generate();
        let second = DeliveryDetailsGenerator::seeded(42).generate();

        assert_eq!(first, second);
        assert_eq!(
            DeliveryDetails::for_order(OrderId(42)),
            DeliveryDetails::for_order(OrderId(42))
        );
    }

    #[test]
    fn details_have_expected_shape() {
        let mut generator = DeliveryDetailsGenerator::seeded(7);

        for _ in 0..200 {
            let details = generator.generate();

            let (first, last) = details.name.split_once(' ').unwrap_or_default();
            assert!(FIRST_NAMES.contains(&first), "{}", details.name);
            assert!(LAST_NAMES.contains(&last), "{}", details.name);

            let digits = details.phone.strip_prefix("+91 9").unwrap_or_default();
            assert_eq!(digits.len(), 9, "{}", details.phone);
            assert!(digits.chars().all(|c| c.is_ascii_digit()), "{}", details.phone);

            let parts: Vec<_> = details.vehicle_number.split(' ').collect();
            let [series, number, letters] = parts.as_slice() else {
                panic!("malformed vehicle number {}", details.vehicle_number);
            };
            assert!(VEHICLE_SERIES.contains(series), "{}", details.vehicle_number);
            assert_eq!(number.len(), 4, "{}", details.vehicle_number);
            assert!(number.chars().all(|c| c.is_ascii_digit()), "{}", details.vehicle_number);
            assert_eq!(letters.len(), 2, "{}", details.vehicle_number);
            assert!(letters.chars().all(|c| c.is_ascii_uppercase()), "{}", details.vehicle_number);

            assert!(VEHICLE_TYPES.contains(&details.vehicle_type.as_str()));
        }
    }
}
