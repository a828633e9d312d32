use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;

use car_market::config::CarMarketConfig;
use car_market::domain::error::DomainError;
use car_market::domain::listing::{ListingQuery, PriceBracket};
use car_market::infra::storage::InMemoryStore;
use car_market::model::{CarFilter, CarPatch, Condition, ListingStatus, NewCar};
use car_market::CarMarket;

/// A fresh market over an empty in-memory store, seeded.
fn seeded_market() -> Result<CarMarket> {
    let market = CarMarket::new(Arc::new(InMemoryStore::new()), CarMarketConfig::default());
    market.initialize()?;
    Ok(market)
}

fn sample_car(seller: &str) -> NewCar {
    NewCar {
        title: "Honda Civic Oriel 2017".into(),
        brand: "Honda".into(),
        model: "Civic".into(),
        variant: "Oriel".into(),
        year: 2017,
        price: 3_600_000,
        mileage: 82_000,
        fuel_type: "Petrol".into(),
        transmission: "Automatic".into(),
        body_type: "Sedan".into(),
        city: "Lahore".into(),
        condition: Condition::Used,
        seller_name: seller.into(),
        ..Default::default()
    }
}

#[test]
fn seed_scenario() -> Result<()> {
    let market = seeded_market()?;
    let cars = market.cars();

    assert_eq!(cars.get_all()?.len(), 16);
    assert_eq!(cars.get_new()?.len(), 6);
    assert_eq!(cars.get_used()?.len(), 6);
    assert_eq!(cars.get_certified()?.len(), 4);

    let stats = cars.get_stats()?;
    assert_eq!(stats.total, 16);
    assert_eq!(stats.active, 16);
    assert_eq!(stats.total_views, 0);
    Ok(())
}

#[test]
fn initialize_is_idempotent() -> Result<()> {
    let market = seeded_market()?;
    market.cars().add(sample_car("Ahmed Khan"))?;

    assert!(!market.cars().initialize()?);
    market.initialize()?;

    assert_eq!(market.cars().get_all()?.len(), 17);
    Ok(())
}

#[test]
fn seeding_can_be_disabled() -> Result<()> {
    let config = CarMarketConfig {
        seed_demo_data: false,
        ..Default::default()
    };
    let market = CarMarket::new(Arc::new(InMemoryStore::new()), config);
    market.initialize()?;

    assert!(market.cars().get_all()?.is_empty());
    Ok(())
}

#[test]
fn ids_stay_unique_across_adds() -> Result<()> {
    let market = seeded_market()?;
    for _ in 0..25 {
        market.cars().add(sample_car("Ahmed Khan"))?;
    }

    let cars = market.cars().get_all()?;
    let ids: HashSet<_> = cars.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids.len(), cars.len());
    assert_eq!(cars.len(), 41);
    Ok(())
}

#[test]
fn add_assigns_defaults() -> Result<()> {
    let market = seeded_market()?;
    let mut new_car = sample_car("Ahmed Khan");
    new_car.condition = Condition::Certified;

    let car = market.cars().add(new_car)?;

    assert_eq!(car.views, 0);
    assert_eq!(car.inquiries, 0);
    assert_eq!(car.status, ListingStatus::Active);
    assert!(car.certified);
    assert_eq!(car.listed_date, chrono::Utc::now().date_naive());
    assert_eq!(market.cars().get_by_id(&car.id)?, Some(car));
    Ok(())
}

#[test]
fn update_merges_and_keeps_identity() -> Result<()> {
    let market = seeded_market()?;
    let before = market.cars().get_by_id("9")?.expect("seed car 9");

    let updated = market
        .cars()
        .update(
            "9",
            CarPatch {
                price: Some(2_600_000),
                status: Some(ListingStatus::Sold),
                ..Default::default()
            },
        )?
        .expect("car 9 exists");

    assert_eq!(updated.id, before.id);
    assert_eq!(updated.listed_date, before.listed_date);
    assert_eq!(updated.brand, before.brand);
    assert_eq!(updated.price, 2_600_000);
    assert_eq!(updated.status, ListingStatus::Sold);
    assert_eq!(market.cars().get_stats()?.active, 15);
    Ok(())
}

#[test]
fn update_of_unknown_id_writes_nothing() -> Result<()> {
    let market = seeded_market()?;
    let before = market.cars().get_all()?;

    let result = market.cars().update(
        "nope",
        CarPatch {
            price: Some(1),
            ..Default::default()
        },
    )?;

    assert!(result.is_none());
    assert_eq!(market.cars().get_all()?, before);
    Ok(())
}

#[test]
fn delete_removes_and_reports_unknown_ids() -> Result<()> {
    let market = seeded_market()?;

    market.cars().delete("3")?;
    assert!(market.cars().get_by_id("3")?.is_none());
    assert_eq!(market.cars().get_all()?.len(), 15);

    let err = market.cars().delete("3").unwrap_err();
    assert_eq!(err, DomainError::car_not_found("3"));
    assert_eq!(err.to_string(), "Car not found: 3");
    assert_eq!(market.cars().get_all()?.len(), 15);
    Ok(())
}

#[test]
fn counters_are_monotonic_across_updates() -> Result<()> {
    let market = seeded_market()?;
    let cars = market.cars();

    assert_eq!(cars.increment_views("5")?, Some(1));
    cars.update(
        "5",
        CarPatch {
            price: Some(8_000_000),
            ..Default::default()
        },
    )?;
    assert_eq!(cars.increment_views("5")?, Some(2));
    assert_eq!(cars.increment_inquiries("5")?, Some(1));
    cars.update(
        "5",
        CarPatch {
            city: Some("Lahore".into()),
            ..Default::default()
        },
    )?;
    assert_eq!(cars.increment_views("5")?, Some(3));

    let car = cars.get_by_id("5")?.expect("seed car 5");
    assert_eq!((car.views, car.inquiries), (3, 1));
    assert_eq!(car.price, 8_000_000);

    assert_eq!(cars.increment_views("missing")?, None);
    assert_eq!(cars.get_stats()?.total_views, 3);
    Ok(())
}

#[test]
fn toyota_under_two_million_is_empty() -> Result<()> {
    let market = seeded_market()?;
    let query = ListingQuery {
        criteria: CarFilter {
            brand: Some("Toyota".into()),
            ..Default::default()
        },
        bracket: Some(PriceBracket::Under2M),
        ..Default::default()
    };

    assert!(market.cars().browse(&query)?.is_empty());
    Ok(())
}

#[test]
fn search_keeps_store_order() -> Result<()> {
    let market = seeded_market()?;
    let ids: Vec<_> = market
        .cars()
        .search("toyota")?
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec!["1", "6", "9", "12", "13", "15"]);
    Ok(())
}

#[test]
fn brands_and_cities_are_distinct_and_sorted() -> Result<()> {
    let market = seeded_market()?;

    let brands = market.cars().get_brands()?;
    assert_eq!(
        brands,
        vec!["Daihatsu", "Honda", "Hyundai", "Kia", "Suzuki", "Toyota"]
    );

    let cities = market.cars().get_cities()?;
    assert_eq!(
        cities,
        vec![
            "Faisalabad",
            "Islamabad",
            "Karachi",
            "Lahore",
            "Multan",
            "Rawalpindi"
        ]
    );
    Ok(())
}

#[test]
fn seller_dashboard_sees_only_own_listings() -> Result<()> {
    let market = seeded_market()?;
    let first = market.cars().add(sample_car("Ahmed Khan"))?;
    market.cars().add(sample_car("Ahmed Khan"))?;
    market.cars().increment_inquiries(&first.id)?;

    let mine = market.cars().get_by_seller("Ahmed Khan")?;
    assert_eq!(mine.len(), 2);

    let stats = market.cars().seller_stats("Ahmed Khan")?;
    assert_eq!(stats.total, 2);
    assert_eq!(stats.used, 2);
    assert_eq!(stats.total_inquiries, 1);

    assert_eq!(market.cars().seller_stats("CarMarket Certified")?.total, 4);
    Ok(())
}
