//! Predicates shared by the repository and the listing pages.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::contract::model::{Car, CarFilter, Condition};

/// Criterion value that places no constraint on a text attribute.
pub const ANY: &str = "all";

fn constraint(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| *v != ANY)
}

impl Condition {
    /// Parse a condition criterion; `"all"` yields `None`.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, String> {
        if s.trim().eq_ignore_ascii_case(ANY) {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

/// Serde adapter for `CarFilter::condition`: accepts null, `"all"` or a condition.
pub(crate) fn condition_criterion<'de, D>(deserializer: D) -> Result<Option<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => Condition::parse_optional(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl CarFilter {
    /// True iff `car` satisfies every constrained criterion.
    pub fn matches(&self, car: &Car) -> bool {
        let text_ok = |criterion: &Option<String>, actual: &str| {
            constraint(criterion).map_or(true, |wanted| wanted == actual)
        };

        self.condition.map_or(true, |c| car.condition == c)
            && text_ok(&self.brand, &car.brand)
            && self.min_price.map_or(true, |min| car.price >= min)
            && self.max_price.map_or(true, |max| car.price <= max)
            && self.year.map_or(true, |y| car.year == y)
            && text_ok(&self.fuel_type, &car.fuel_type)
            && text_ok(&self.transmission, &car.transmission)
            && text_ok(&self.body_type, &car.body_type)
            && text_ok(&self.city, &car.city)
    }
}

/// Case-insensitive substring match over title, brand, model and city.
pub fn matches_search(car: &Car, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    [&car.title, &car.brand, &car.model, &car.city]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Price buckets offered by the listing pages: half-open `[lo, hi)`, the top
/// bucket unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBracket {
    #[serde(rename = "under2m")]
    Under2M,
    #[serde(rename = "2m-3m")]
    From2MTo3M,
    #[serde(rename = "3m-5m")]
    From3MTo5M,
    #[serde(rename = "above5m")]
    Above5M,
}

impl PriceBracket {
    pub const ALL: [PriceBracket; 4] = [
        PriceBracket::Under2M,
        PriceBracket::From2MTo3M,
        PriceBracket::From3MTo5M,
        PriceBracket::Above5M,
    ];

    /// Inclusive lower bound and exclusive upper bound.
    pub fn bounds(&self) -> (u64, Option<u64>) {
        match self {
            PriceBracket::Under2M => (0, Some(2_000_000)),
            PriceBracket::From2MTo3M => (2_000_000, Some(3_000_000)),
            PriceBracket::From3MTo5M => (3_000_000, Some(5_000_000)),
            PriceBracket::Above5M => (5_000_000, None),
        }
    }

    pub fn contains(&self, price: u64) -> bool {
        let (lo, hi) = self.bounds();
        price >= lo && hi.map_or(true, |hi| price < hi)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBracket::Under2M => "under2m",
            PriceBracket::From2MTo3M => "2m-3m",
            PriceBracket::From3MTo5M => "3m-5m",
            PriceBracket::Above5M => "above5m",
        }
    }

    /// Parse a bucket token; `"all"` yields `None`.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, String> {
        if s.trim().eq_ignore_ascii_case(ANY) {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for PriceBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBracket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        PriceBracket::ALL
            .into_iter()
            .find(|b| b.as_str() == token)
            .ok_or_else(|| format!("unknown price range '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently listed first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    YearDesc,
    MileageAsc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "year-desc" => Ok(SortOrder::YearDesc),
            "mileage-asc" => Ok(SortOrder::MileageAsc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

impl SortOrder {
    /// Stable sort; ties keep store order.
    pub fn apply(&self, cars: &mut [Car]) {
        match self {
            SortOrder::Newest => cars.sort_by_key(|c| Reverse(c.listed_date)),
            SortOrder::PriceAsc => cars.sort_by_key(|c| c.price),
            SortOrder::PriceDesc => cars.sort_by_key(|c| Reverse(c.price)),
            SortOrder::YearDesc => cars.sort_by_key(|c| Reverse(c.year)),
            SortOrder::MileageAsc => cars.sort_by_key(|c| c.mileage),
        }
    }
}

/// What a listing page asks for: title text AND categorical criteria AND an
/// optional price bucket. An empty result is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingQuery {
    pub text: Option<String>,
    pub criteria: CarFilter,
    pub bracket: Option<PriceBracket>,
    pub sort: SortOrder,
}

impl ListingQuery {
    pub fn matches(&self, car: &Car) -> bool {
        let text_ok = match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                car.title.to_lowercase().contains(&text.to_lowercase())
            }
            _ => true,
        };
        text_ok
            && self.criteria.matches(car)
            && self.bracket.map_or(true, |b| b.contains(car.price))
    }

    /// Matching cars from `cars`, ordered by `sort`.
    pub fn apply(&self, cars: &[Car]) -> Vec<Car> {
        let mut hits: Vec<Car> = cars.iter().filter(|c| self.matches(c)).cloned().collect();
        self.sort.apply(&mut hits);
        hits
    }
}
