use tracing::{debug, instrument};

use crate::config::MAX_COMPARE_CAPACITY;
use crate::contract::model::{Car, CompareEntry};
use crate::domain::error::DomainError;
use crate::domain::state::{keys, StateStore};

/// Bounded list of car snapshots under `compareList`.
#[derive(Clone)]
pub struct CompareEngine {
    state: StateStore,
    capacity: usize,
}

impl CompareEngine {
    /// `capacity` is clamped to `1..=MAX_COMPARE_CAPACITY`.
    pub fn new(state: StateStore, capacity: usize) -> Self {
        Self {
            state,
            capacity: capacity.clamp(1, MAX_COMPARE_CAPACITY),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> Result<Vec<CompareEntry>, DomainError> {
        self.state.load_or_default(keys::COMPARE_LIST)
    }

    pub fn is_present(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.entries()?.iter().any(|e| e.id == id))
    }

    /// Append a snapshot of `car`. A full list is reported before a duplicate.
    #[instrument(name = "car_market.compare.add", skip(self, car), fields(car_id = %car.id))]
    pub fn add(&self, car: &Car) -> Result<Vec<CompareEntry>, DomainError> {
        let mut entries = self.entries()?;
        if entries.len() >= self.capacity {
            return Err(DomainError::compare_full(self.capacity));
        }
        if entries.iter().any(|e| e.id == car.id) {
            return Err(DomainError::already_in_comparison(&car.id));
        }

        entries.push(CompareEntry::from(car));
        self.state.save(keys::COMPARE_LIST, &entries)?;
        debug!(len = entries.len(), "added to comparison");
        Ok(entries)
    }

    pub fn remove(&self, id: &str) -> Result<Vec<CompareEntry>, DomainError> {
        let mut entries = self.entries()?;
        entries.retain(|e| e.id != id);
        self.state.save(keys::COMPARE_LIST, &entries)?;
        Ok(entries)
    }

    pub fn clear(&self) -> Result<(), DomainError> {
        self.state.save(keys::COMPARE_LIST, &Vec::<CompareEntry>::new())
    }
}

/// Winning value of a numeric attribute across compared cars: lowest `price`
/// and `mileage`, highest `year`. Other attributes have no winner. Entries
/// missing the value do not take part.
pub fn best_value_for(attribute: &str, entries: &[CompareEntry]) -> Option<u64> {
    match attribute {
        "price" => entries.iter().filter_map(|e| e.price).min(),
        "mileage" => entries.iter().filter_map(|e| e.mileage).min(),
        "year" => entries
            .iter()
            .filter_map(|e| e.year)
            .max()
            .and_then(|y| u64::try_from(y).ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, price: Option<u64>, year: Option<i32>) -> CompareEntry {
        CompareEntry {
            id: id.into(),
            title: String::new(),
            brand: String::new(),
            model: String::new(),
            variant: String::new(),
            year,
            price,
            mileage: None,
            fuel_type: String::new(),
            transmission: String::new(),
            engine: String::new(),
            body_type: String::new(),
            color: String::new(),
            city: String::new(),
            condition: None,
            image_url: String::new(),
        }
    }

    #[test]
    fn best_price_skips_missing() {
        let entries = [
            entry("a", Some(3_000_000), None),
            entry("b", Some(2_500_000), None),
            entry("c", None, None),
        ];
        assert_eq!(best_value_for("price", &entries), Some(2_500_000));
    }

    #[test]
    fn best_year_is_max() {
        let entries = [entry("a", None, Some(2019)), entry("b", None, Some(2022))];
        assert_eq!(best_value_for("year", &entries), Some(2022));
    }

    #[test]
    fn no_winner() {
        let entries = [entry("a", Some(1), Some(2020))];
        assert_eq!(best_value_for("color", &entries), None);
        assert_eq!(best_value_for("mileage", &entries), None);
        assert_eq!(best_value_for("price", &[]), None);
    }
}
