//! Demo records written on first initialization.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::contract::model::{Car, Condition, ListingStatus, Role, User};

struct SeedCar {
    id: &'static str,
    brand: &'static str,
    model: &'static str,
    variant: &'static str,
    year: i32,
    price: u64,
    mileage: u64,
    fuel_type: &'static str,
    transmission: &'static str,
    engine: &'static str,
    body_type: &'static str,
    color: &'static str,
    city: &'static str,
    condition: Condition,
    listed: (i32, u32, u32),
    seller: (&'static str, &'static str),
    features: &'static [&'static str],
}

const SEED_CARS: &[SeedCar] = &[
    SeedCar {
        id: "1",
        brand: "Toyota",
        model: "Corolla",
        variant: "Altis 1.8 CVT-i",
        year: 2024,
        price: 6_599_000,
        mileage: 0,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "1800cc",
        body_type: "Sedan",
        color: "White",
        city: "Karachi",
        condition: Condition::New,
        listed: (2024, 9, 2),
        seller: ("Toyota Central Motors", "0300-1112233"),
        features: &["Cruise Control", "Push Start", "Climate Control", "Alloy Rims"],
    },
    SeedCar {
        id: "2",
        brand: "Honda",
        model: "Civic",
        variant: "RS 1.5 Turbo",
        year: 2024,
        price: 9_149_000,
        mileage: 0,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "1500cc Turbo",
        body_type: "Sedan",
        color: "Black",
        city: "Lahore",
        condition: Condition::New,
        listed: (2024, 9, 5),
        seller: ("Honda Fort Lahore", "0301-2223344"),
        features: &["Sunroof", "Lane Watch", "Apple CarPlay", "LED Headlamps"],
    },
    SeedCar {
        id: "3",
        brand: "Suzuki",
        model: "Swift",
        variant: "GLX CVT",
        year: 2024,
        price: 4_599_000,
        mileage: 0,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "1200cc",
        body_type: "Hatchback",
        color: "Red",
        city: "Islamabad",
        condition: Condition::New,
        listed: (2024, 9, 8),
        seller: ("Suzuki Capital Motors", "0302-3334455"),
        features: &["Touchscreen", "Rear Camera", "Keyless Entry"],
    },
    SeedCar {
        id: "4",
        brand: "Kia",
        model: "Sportage",
        variant: "AWD",
        year: 2024,
        price: 8_750_000,
        mileage: 0,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "2000cc",
        body_type: "SUV",
        color: "Grey",
        city: "Lahore",
        condition: Condition::New,
        listed: (2024, 9, 10),
        seller: ("Kia Lahore Motors", "0303-4445566"),
        features: &["Panoramic Roof", "AWD", "Heated Seats", "Wireless Charging"],
    },
    SeedCar {
        id: "5",
        brand: "Hyundai",
        model: "Tucson",
        variant: "FWD A/T GLS",
        year: 2024,
        price: 8_199_000,
        mileage: 0,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "2000cc",
        body_type: "SUV",
        color: "Blue",
        city: "Karachi",
        condition: Condition::New,
        listed: (2024, 9, 12),
        seller: ("Hyundai Clifton", "0304-5556677"),
        features: &["Smart Cruise", "Blind Spot Monitor", "Power Tailgate"],
    },
    SeedCar {
        id: "6",
        brand: "Toyota",
        model: "Yaris",
        variant: "ATIV X CVT 1.5",
        year: 2024,
        price: 5_549_000,
        mileage: 0,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "1500cc",
        body_type: "Sedan",
        color: "Silver",
        city: "Islamabad",
        condition: Condition::New,
        listed: (2024, 9, 15),
        seller: ("Toyota Islamabad Motors", "0305-6667788"),
        features: &["Push Start", "Auto Headlamps", "Alloy Rims"],
    },
    SeedCar {
        id: "7",
        brand: "Suzuki",
        model: "Mehran",
        variant: "VXR",
        year: 2018,
        price: 1_050_000,
        mileage: 78_000,
        fuel_type: "Petrol",
        transmission: "Manual",
        engine: "800cc",
        body_type: "Hatchback",
        color: "White",
        city: "Karachi",
        condition: Condition::Used,
        listed: (2024, 8, 20),
        seller: ("Bilal Ahmed", "0311-1234567"),
        features: &["Air Conditioning", "Radio"],
    },
    SeedCar {
        id: "8",
        brand: "Honda",
        model: "City",
        variant: "1.3 i-VTEC",
        year: 2019,
        price: 2_950_000,
        mileage: 65_000,
        fuel_type: "Petrol",
        transmission: "Manual",
        engine: "1300cc",
        body_type: "Sedan",
        color: "Grey",
        city: "Lahore",
        condition: Condition::Used,
        listed: (2024, 8, 22),
        seller: ("Usman Tariq", "0312-2345678"),
        features: &["Power Windows", "Power Steering", "Alloy Rims"],
    },
    SeedCar {
        id: "9",
        brand: "Toyota",
        model: "Corolla",
        variant: "GLi 1.3 VVTi",
        year: 2016,
        price: 2_750_000,
        mileage: 110_000,
        fuel_type: "Petrol",
        transmission: "Manual",
        engine: "1300cc",
        body_type: "Sedan",
        color: "White",
        city: "Rawalpindi",
        condition: Condition::Used,
        listed: (2024, 8, 25),
        seller: ("Imran Shah", "0313-3456789"),
        features: &["Power Windows", "Immobilizer"],
    },
    SeedCar {
        id: "10",
        brand: "Suzuki",
        model: "Cultus",
        variant: "VXL",
        year: 2020,
        price: 2_250_000,
        mileage: 45_000,
        fuel_type: "Petrol",
        transmission: "Manual",
        engine: "1000cc",
        body_type: "Hatchback",
        color: "Silver",
        city: "Faisalabad",
        condition: Condition::Used,
        listed: (2024, 8, 28),
        seller: ("Hamza Iqbal", "0314-4567890"),
        features: &["ABS", "Airbags", "Power Windows"],
    },
    SeedCar {
        id: "11",
        brand: "Daihatsu",
        model: "Mira",
        variant: "X SA III",
        year: 2017,
        price: 1_850_000,
        mileage: 60_000,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "660cc",
        body_type: "Hatchback",
        color: "Pink",
        city: "Islamabad",
        condition: Condition::Used,
        listed: (2024, 8, 30),
        seller: ("Ayesha Malik", "0315-5678901"),
        features: &["Eco Idle", "Keyless Entry"],
    },
    SeedCar {
        id: "12",
        brand: "Toyota",
        model: "Hilux",
        variant: "Revo V 2.8",
        year: 2021,
        price: 9_800_000,
        mileage: 55_000,
        fuel_type: "Diesel",
        transmission: "Automatic",
        engine: "2800cc",
        body_type: "Pickup",
        color: "White",
        city: "Multan",
        condition: Condition::Used,
        listed: (2024, 9, 1),
        seller: ("Faisal Rana", "0316-6789012"),
        features: &["4x4", "Cruise Control", "Climate Control"],
    },
    SeedCar {
        id: "13",
        brand: "Toyota",
        model: "Fortuner",
        variant: "2.7 V",
        year: 2022,
        price: 11_500_000,
        mileage: 30_000,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "2700cc",
        body_type: "SUV",
        color: "Black",
        city: "Lahore",
        condition: Condition::Certified,
        listed: (2024, 9, 3),
        seller: ("CarMarket Certified", "0320-1112222"),
        features: &["200-Point Inspection", "Warranty", "Leather Seats", "4x4"],
    },
    SeedCar {
        id: "14",
        brand: "Honda",
        model: "BR-V",
        variant: "i-VTEC S",
        year: 2021,
        price: 4_250_000,
        mileage: 38_000,
        fuel_type: "Petrol",
        transmission: "Automatic",
        engine: "1500cc",
        body_type: "SUV",
        color: "White",
        city: "Karachi",
        condition: Condition::Certified,
        listed: (2024, 9, 6),
        seller: ("CarMarket Certified", "0320-1112222"),
        features: &["200-Point Inspection", "Warranty", "7 Seats"],
    },
    SeedCar {
        id: "15",
        brand: "Toyota",
        model: "Prius",
        variant: "S Touring",
        year: 2019,
        price: 5_300_000,
        mileage: 42_000,
        fuel_type: "Hybrid",
        transmission: "Automatic",
        engine: "1800cc",
        body_type: "Hatchback",
        color: "Blue",
        city: "Islamabad",
        condition: Condition::Certified,
        listed: (2024, 9, 9),
        seller: ("CarMarket Certified", "0320-1112222"),
        features: &["200-Point Inspection", "Warranty", "Hybrid Battery Check"],
    },
    SeedCar {
        id: "16",
        brand: "Suzuki",
        model: "Wagon R",
        variant: "VXL",
        year: 2022,
        price: 2_450_000,
        mileage: 22_000,
        fuel_type: "Petrol",
        transmission: "Manual",
        engine: "1000cc",
        body_type: "Hatchback",
        color: "Silver",
        city: "Lahore",
        condition: Condition::Certified,
        listed: (2024, 9, 11),
        seller: ("CarMarket Certified", "0320-1112222"),
        features: &["200-Point Inspection", "Warranty"],
    },
];

fn build_car(seed: &SeedCar) -> Car {
    let (y, m, d) = seed.listed;
    let title = format!("{} {} {} {}", seed.brand, seed.model, seed.variant, seed.year);
    Car {
        id: seed.id.to_string(),
        description: format!(
            "{} in {} with {} km on the clock, {} {}.",
            title,
            seed.color.to_lowercase(),
            seed.mileage,
            seed.fuel_type.to_lowercase(),
            seed.transmission.to_lowercase()
        ),
        title,
        brand: seed.brand.to_string(),
        model: seed.model.to_string(),
        variant: seed.variant.to_string(),
        year: seed.year,
        price: seed.price,
        mileage: seed.mileage,
        fuel_type: seed.fuel_type.to_string(),
        transmission: seed.transmission.to_string(),
        engine: seed.engine.to_string(),
        body_type: seed.body_type.to_string(),
        color: seed.color.to_string(),
        city: seed.city.to_string(),
        condition: seed.condition,
        certified: seed.condition == Condition::Certified,
        image_url: format!("/images/cars/{}.jpg", seed.id),
        features: seed.features.iter().map(|f| f.to_string()).collect(),
        seller_name: seed.seller.0.to_string(),
        seller_phone: seed.seller.1.to_string(),
        views: 0,
        inquiries: 0,
        listed_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        status: ListingStatus::Active,
    }
}

/// The 16 demo listings: 6 new, 6 used, 4 certified.
pub fn demo_cars() -> Vec<Car> {
    SEED_CARS.iter().map(build_car).collect()
}

/// One seller and one buyer account.
pub fn demo_users() -> Vec<User> {
    let created_at = Utc
        .with_ymd_and_hms(2024, 9, 1, 9, 0, 0)
        .single()
        .unwrap_or_default();
    vec![
        User {
            id: "1".to_string(),
            name: "Ahmed Khan".to_string(),
            email: "seller@carmarket.pk".to_string(),
            password: "seller123".to_string(),
            phone: "0300-1234567".to_string(),
            city: "Lahore".to_string(),
            role: Role::Seller,
            created_at,
        },
        User {
            id: "2".to_string(),
            name: "Sara Ali".to_string(),
            email: "buyer@carmarket.pk".to_string(),
            password: "buyer123".to_string(),
            phone: "0321-7654321".to_string(),
            city: "Karachi".to_string(),
            role: Role::Buyer,
            created_at,
        },
    ]
}
