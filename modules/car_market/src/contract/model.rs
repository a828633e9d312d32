use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace category of a listing; decides which listing page shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    #[default]
    Used,
    Certified,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Used, Condition::Certified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
            Condition::Certified => "certified",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            "certified" => Ok(Condition::Certified),
            other => Err(format!("unknown condition '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Pending,
    Sold,
    Inactive,
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ListingStatus::Active),
            "pending" => Ok(ListingStatus::Pending),
            "sold" => Ok(ListingStatus::Sold),
            "inactive" => Ok(ListingStatus::Inactive),
            other => Err(format!("unknown listing status '{}'", other)),
        }
    }
}

/// A car listing as persisted under the `cars` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub variant: String,
    pub year: i32,
    pub price: u64,
    pub mileage: u64,
    pub fuel_type: String,
    pub transmission: String,
    #[serde(default)]
    pub engine: String,
    pub body_type: String,
    #[serde(default)]
    pub color: String,
    pub city: String,
    pub condition: Condition,
    /// Mirrors `condition == Certified`; maintained by the repository.
    #[serde(default)]
    pub certified: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_phone: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub inquiries: u64,
    pub listed_date: NaiveDate,
    #[serde(default)]
    pub status: ListingStatus,
}

/// Data for a new listing. Identity, counters, date and status are assigned
/// by the repository.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCar {
    pub title: String,
    pub brand: String,
    pub model: String,
    pub variant: String,
    pub year: i32,
    pub price: u64,
    pub mileage: u64,
    pub fuel_type: String,
    pub transmission: String,
    pub engine: String,
    pub body_type: String,
    pub color: String,
    pub city: String,
    pub condition: Condition,
    pub image_url: String,
    pub features: Vec<String>,
    pub description: String,
    pub seller_name: String,
    pub seller_phone: String,
}

/// Shallow patch for a listing; `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarPatch {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub variant: Option<String>,
    pub year: Option<i32>,
    pub price: Option<u64>,
    pub mileage: Option<u64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub engine: Option<String>,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub city: Option<String>,
    pub condition: Option<Condition>,
    pub image_url: Option<String>,
    pub features: Option<Vec<String>>,
    pub description: Option<String>,
    pub seller_name: Option<String>,
    pub seller_phone: Option<String>,
    pub status: Option<ListingStatus>,
}

/// Aggregates over a set of listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarStats {
    pub total: usize,
    pub new: usize,
    pub used: usize,
    pub certified: usize,
    pub active: usize,
    pub total_views: u64,
    pub total_inquiries: u64,
}

/// Conjunctive filter criteria. A `None` field, or a field holding `"all"`,
/// puts no constraint on that attribute. Price bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarFilter {
    #[serde(deserialize_with = "crate::domain::listing::condition_criterion")]
    pub condition: Option<Condition>,
    pub brand: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub body_type: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Exact, lowercase match only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            other => Err(other.to_string()),
        }
    }
}

/// An account as persisted under the `users` key.
///
/// The password is kept in clear text; this is a demo store, not an
/// authentication system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Registration data; `role` defaults to buyer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub city: String,
    pub role: Option<Role>,
}

/// Profile fields a signed-in user may change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// Redacted projection of a `User` held by a session. Has no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            city: user.city.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Denormalized copy of a car held by the comparison list. Numeric fields are
/// optional: older or hand-edited entries may lack them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub mileage: Option<u64>,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub body_type: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub image_url: String,
}

impl From<&Car> for CompareEntry {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id.clone(),
            title: car.title.clone(),
            brand: car.brand.clone(),
            model: car.model.clone(),
            variant: car.variant.clone(),
            year: Some(car.year),
            price: Some(car.price),
            mileage: Some(car.mileage),
            fuel_type: car.fuel_type.clone(),
            transmission: car.transmission.clone(),
            engine: car.engine.clone(),
            body_type: car.body_type.clone(),
            color: car.color.clone(),
            city: car.city.clone(),
            condition: Some(car.condition),
            image_url: car.image_url.clone(),
        }
    }
}

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    #[serde(flatten)]
    pub request: ContactRequest,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}
