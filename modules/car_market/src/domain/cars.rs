use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    Car, CarFilter, CarPatch, CarStats, Condition, ListingStatus, NewCar,
};
use crate::domain::error::DomainError;
use crate::domain::listing::{matches_search, ListingQuery};
use crate::domain::seed;
use crate::domain::state::{keys, StateStore};

/// Owns the `cars` collection.
///
/// Every mutation reads the whole collection, changes it and writes it back.
/// Nothing isolates two such sequences from each other.
#[derive(Clone)]
pub struct CarRepository {
    state: StateStore,
}

impl CarRepository {
    pub fn new(state: StateStore) -> Self {
        Self { state }
    }

    /// Write the demo listings if no collection exists yet. Returns whether it
    /// seeded.
    #[instrument(name = "car_market.cars.initialize", skip(self))]
    pub fn initialize(&self) -> Result<bool, DomainError> {
        if self.state.load::<Vec<Car>>(keys::CARS)?.is_some() {
            debug!("car collection already present");
            return Ok(false);
        }
        let cars = seed::demo_cars();
        self.persist(&cars)?;
        info!(count = cars.len(), "seeded demo cars");
        Ok(true)
    }

    /// Every listing, in insertion order.
    pub fn get_all(&self) -> Result<Vec<Car>, DomainError> {
        self.state.load_or_default(keys::CARS)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Car>, DomainError> {
        Ok(self.get_all()?.into_iter().find(|c| c.id == id))
    }

    pub fn get_by_condition(&self, condition: Condition) -> Result<Vec<Car>, DomainError> {
        self.select(|c| c.condition == condition)
    }

    pub fn get_new(&self) -> Result<Vec<Car>, DomainError> {
        self.get_by_condition(Condition::New)
    }

    pub fn get_used(&self) -> Result<Vec<Car>, DomainError> {
        self.get_by_condition(Condition::Used)
    }

    pub fn get_certified(&self) -> Result<Vec<Car>, DomainError> {
        self.get_by_condition(Condition::Certified)
    }

    /// Listings whose seller name matches exactly.
    pub fn get_by_seller(&self, seller_name: &str) -> Result<Vec<Car>, DomainError> {
        self.select(|c| c.seller_name == seller_name)
    }

    #[instrument(
        name = "car_market.cars.add",
        skip(self, new_car),
        fields(brand = %new_car.brand, model = %new_car.model)
    )]
    pub fn add(&self, new_car: NewCar) -> Result<Car, DomainError> {
        validate_new_car(&new_car)?;
        let mut cars = self.get_all()?;

        let title = if new_car.title.trim().is_empty() {
            default_title(&new_car)
        } else {
            new_car.title
        };
        let car = Car {
            id: Uuid::now_v7().to_string(),
            title,
            brand: new_car.brand,
            model: new_car.model,
            variant: new_car.variant,
            year: new_car.year,
            price: new_car.price,
            mileage: new_car.mileage,
            fuel_type: new_car.fuel_type,
            transmission: new_car.transmission,
            engine: new_car.engine,
            body_type: new_car.body_type,
            color: new_car.color,
            city: new_car.city,
            certified: new_car.condition == Condition::Certified,
            condition: new_car.condition,
            image_url: new_car.image_url,
            features: new_car.features,
            description: new_car.description,
            seller_name: new_car.seller_name,
            seller_phone: new_car.seller_phone,
            views: 0,
            inquiries: 0,
            listed_date: Utc::now().date_naive(),
            status: ListingStatus::Active,
        };

        cars.push(car.clone());
        self.persist(&cars)?;

        info!(car_id = %car.id, "listed car");
        Ok(car)
    }

    /// Merge the present fields of `patch` into the listing. `None` when the
    /// id is unknown; nothing is written then.
    #[instrument(name = "car_market.cars.update", skip(self, patch), fields(car_id = %id))]
    pub fn update(&self, id: &str, patch: CarPatch) -> Result<Option<Car>, DomainError> {
        let mut cars = self.get_all()?;
        let Some(car) = cars.iter_mut().find(|c| c.id == id) else {
            debug!("update of unknown car ignored");
            return Ok(None);
        };

        apply_patch(car, patch);
        let updated = car.clone();
        self.persist(&cars)?;

        info!("updated car");
        Ok(Some(updated))
    }

    /// Hard delete. An unknown id is reported rather than ignored.
    #[instrument(name = "car_market.cars.delete", skip(self), fields(car_id = %id))]
    pub fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut cars = self.get_all()?;
        let before = cars.len();
        cars.retain(|c| c.id != id);

        if cars.len() == before {
            return Err(DomainError::car_not_found(id));
        }

        self.persist(&cars)?;
        info!("deleted car");
        Ok(())
    }

    /// New view count, `None` for an unknown id.
    pub fn increment_views(&self, id: &str) -> Result<Option<u64>, DomainError> {
        self.bump(id, |c| &mut c.views)
    }

    /// New inquiry count, `None` for an unknown id.
    pub fn increment_inquiries(&self, id: &str) -> Result<Option<u64>, DomainError> {
        self.bump(id, |c| &mut c.inquiries)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Car>, DomainError> {
        self.select(|c| matches_search(c, query))
    }

    pub fn filter(&self, criteria: &CarFilter) -> Result<Vec<Car>, DomainError> {
        self.select(|c| criteria.matches(c))
    }

    /// Listing-page view: text, criteria and price bucket, sorted.
    pub fn browse(&self, query: &ListingQuery) -> Result<Vec<Car>, DomainError> {
        Ok(query.apply(&self.get_all()?))
    }

    pub fn get_brands(&self) -> Result<Vec<String>, DomainError> {
        self.distinct(|c| &c.brand)
    }

    pub fn get_cities(&self) -> Result<Vec<String>, DomainError> {
        self.distinct(|c| &c.city)
    }

    pub fn get_stats(&self) -> Result<CarStats, DomainError> {
        Ok(stats_for(&self.get_all()?))
    }

    /// Same aggregate restricted to one seller's listings.
    pub fn seller_stats(&self, seller_name: &str) -> Result<CarStats, DomainError> {
        Ok(stats_for(&self.get_by_seller(seller_name)?))
    }

    // --- helpers ---

    fn persist(&self, cars: &[Car]) -> Result<(), DomainError> {
        self.state.save(keys::CARS, cars)
    }

    fn select(&self, keep: impl Fn(&Car) -> bool) -> Result<Vec<Car>, DomainError> {
        Ok(self.get_all()?.into_iter().filter(|c| keep(c)).collect())
    }

    fn distinct(&self, field: impl Fn(&Car) -> &String) -> Result<Vec<String>, DomainError> {
        let cars = self.get_all()?;
        let set: BTreeSet<&String> = cars.iter().map(field).collect();
        Ok(set.into_iter().cloned().collect())
    }

    fn bump(
        &self,
        id: &str,
        counter: impl Fn(&mut Car) -> &mut u64,
    ) -> Result<Option<u64>, DomainError> {
        let mut cars = self.get_all()?;
        let Some(car) = cars.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        let slot = counter(car);
        *slot = slot.saturating_add(1);
        let value = *slot;
        self.persist(&cars)?;
        Ok(Some(value))
    }
}

fn validate_new_car(new_car: &NewCar) -> Result<(), DomainError> {
    if new_car.brand.trim().is_empty() {
        return Err(DomainError::validation("brand", "must not be empty"));
    }
    if new_car.model.trim().is_empty() {
        return Err(DomainError::validation("model", "must not be empty"));
    }
    Ok(())
}

/// "Brand Model Variant Year", skipping an empty variant.
fn default_title(new_car: &NewCar) -> String {
    let mut parts: Vec<String> = [&new_car.brand, &new_car.model, &new_car.variant]
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    parts.push(new_car.year.to_string());
    parts.join(" ")
}

fn apply_patch(car: &mut Car, patch: CarPatch) {
    macro_rules! merge {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = patch.$field { car.$field = v; })*
        };
    }
    merge!(
        title,
        brand,
        model,
        variant,
        year,
        price,
        mileage,
        fuel_type,
        transmission,
        engine,
        body_type,
        color,
        city,
        condition,
        image_url,
        features,
        description,
        seller_name,
        seller_phone,
        status,
    );
    car.certified = car.condition == Condition::Certified;
}

fn stats_for(cars: &[Car]) -> CarStats {
    cars.iter().fold(CarStats::default(), |mut s, c| {
        s.total += 1;
        match c.condition {
            Condition::New => s.new += 1,
            Condition::Used => s.used += 1,
            Condition::Certified => s.certified += 1,
        }
        if c.status == ListingStatus::Active {
            s.active += 1;
        }
        s.total_views += c.views;
        s.total_inquiries += c.inquiries;
        s
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_recomputes_certified_flag() {
        let mut car = seed::demo_cars().remove(6);
        assert_eq!(car.condition, Condition::Used);

        apply_patch(
            &mut car,
            CarPatch {
                condition: Some(Condition::Certified),
                price: Some(1_200_000),
                ..Default::default()
            },
        );

        assert!(car.certified);
        assert_eq!(car.price, 1_200_000);
        assert_eq!(car.title, "Suzuki Mehran VXR 2018");
    }

    #[test]
    fn missing_title_is_composed() {
        let new_car = NewCar {
            brand: "Kia".into(),
            model: "Picanto".into(),
            year: 2023,
            ..Default::default()
        };
        assert_eq!(default_title(&new_car), "Kia Picanto 2023");
        assert!(validate_new_car(&new_car).is_ok());
        assert!(validate_new_car(&NewCar::default()).is_err());
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let original = seed::demo_cars().remove(0);
        let mut car = original.clone();
        apply_patch(&mut car, CarPatch::default());
        assert_eq!(car, original);
    }

    #[test]
    fn stats_count_conditions_and_sum_counters() {
        let mut cars = seed::demo_cars();
        cars[0].views = 10;
        cars[1].inquiries = 3;
        cars[2].status = ListingStatus::Sold;

        let stats = stats_for(&cars);
        assert_eq!(stats.total, 16);
        assert_eq!((stats.new, stats.used, stats.certified), (6, 6, 4));
        assert_eq!(stats.active, 15);
        assert_eq!(stats.total_views, 10);
        assert_eq!(stats.total_inquiries, 3);
    }
}
