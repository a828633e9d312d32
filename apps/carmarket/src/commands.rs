use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use car_market::domain::compare::best_value_for;
use car_market::domain::error::DomainError;
use car_market::domain::listing::{ListingQuery, PriceBracket};
use car_market::domain::session::Session;
use car_market::error::CarMarketError;
use car_market::model::{
    CarFilter, CarPatch, ContactRequest, NewCar, NewUser, ProfilePatch, Role, SessionUser,
};
use car_market::CarMarket;

use crate::cli::{
    AuthCommand, CarsCommand, Commands, CompareCommand, ContactArgs, FavoritesCommand,
    FilterArgs, PayloadArgs,
};

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error(domain_error: DomainError) -> anyhow::Error {
    if let DomainError::Storage { message } = &domain_error {
        tracing::error!(%message, "storage failure");
    }
    CarMarketError::from(domain_error).into()
}

trait Public<T> {
    fn public(self) -> Result<T>;
}

impl<T> Public<T> for Result<T, DomainError> {
    fn public(self) -> Result<T> {
        self.map_err(map_domain_error)
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("failed to encode output")
}

/// Run one marketplace command. `Check` is handled by the caller.
pub fn execute(command: Commands, market: &CarMarket, session: &mut Session) -> Result<Value> {
    match command {
        Commands::Check => Ok(Value::Null),
        Commands::Cars(cmd) => cars(cmd, market, session),
        Commands::Auth(cmd) => auth(cmd, market, session),
        Commands::Compare(cmd) => compare(cmd, market),
        Commands::Favorites(cmd) => favorites(cmd, market),
        Commands::Newsletter { email } => {
            to_json(market.outreach().subscribe_newsletter(&email).public()?)
        }
        Commands::Contact(args) => contact(args, market),
    }
}

fn cars(cmd: CarsCommand, market: &CarMarket, session: &Session) -> Result<Value> {
    let cars = market.cars();
    match cmd {
        CarsCommand::List { condition } => match condition {
            Some(condition) => to_json(cars.get_by_condition(condition).public()?),
            None => to_json(cars.get_all().public()?),
        },
        CarsCommand::Show { id } => {
            let car = cars
                .get_by_id(&id)
                .public()?
                .ok_or_else(|| map_domain_error(DomainError::car_not_found(&id)))?;
            to_json(car)
        }
        CarsCommand::Search { query } => {
            market.outreach().record_search(&query).public()?;
            to_json(cars.search(&query).public()?)
        }
        CarsCommand::Filter(criteria) => {
            to_json(cars.filter(&filter_criteria(criteria)?).public()?)
        }
        CarsCommand::Browse {
            text,
            criteria,
            price_range,
            sort,
        } => {
            let bracket = PriceBracket::parse_optional(&price_range)
                .map_err(|e| anyhow::Error::from(CarMarketError::validation(e)))?;
            let query = ListingQuery {
                text,
                criteria: filter_criteria(criteria)?,
                bracket,
                sort,
            };
            to_json(cars.browse(&query).public()?)
        }
        CarsCommand::Add(payload) => {
            let seller = require_seller(session)?;
            let mut new_car: NewCar = read_payload(&payload)?;
            if new_car.seller_name.trim().is_empty() {
                new_car.seller_name = seller.name.clone();
            }
            if new_car.seller_phone.trim().is_empty() {
                new_car.seller_phone = seller.phone.clone();
            }
            to_json(cars.add(new_car).public()?)
        }
        CarsCommand::Update { id, payload } => {
            require_seller(session)?;
            let patch: CarPatch = read_payload(&payload)?;
            let car = cars
                .update(&id, patch)
                .public()?
                .ok_or_else(|| map_domain_error(DomainError::car_not_found(&id)))?;
            to_json(car)
        }
        CarsCommand::Delete { id } => {
            require_seller(session)?;
            cars.delete(&id).public()?;
            Ok(json!({ "deleted": id }))
        }
        CarsCommand::View { id } => {
            let views = cars
                .increment_views(&id)
                .public()?
                .ok_or_else(|| map_domain_error(DomainError::car_not_found(&id)))?;
            Ok(json!({ "id": id, "views": views }))
        }
        CarsCommand::Inquire { id } => {
            let inquiries = cars
                .increment_inquiries(&id)
                .public()?
                .ok_or_else(|| map_domain_error(DomainError::car_not_found(&id)))?;
            Ok(json!({ "id": id, "inquiries": inquiries }))
        }
        CarsCommand::Stats => to_json(cars.get_stats().public()?),
        CarsCommand::Brands => to_json(cars.get_brands().public()?),
        CarsCommand::Cities => to_json(cars.get_cities().public()?),
        CarsCommand::Mine => {
            let seller = require_seller(session)?;
            Ok(json!({
                "listings": to_json(cars.get_by_seller(&seller.name).public()?)?,
                "stats": to_json(cars.seller_stats(&seller.name).public()?)?,
            }))
        }
    }
}

fn auth(cmd: AuthCommand, market: &CarMarket, session: &mut Session) -> Result<Value> {
    let auth = market.auth();
    match cmd {
        AuthCommand::Register {
            name,
            email,
            password,
            phone,
            city,
            role,
        } => {
            let role = role
                .map(|r| r.parse::<Role>().map_err(DomainError::invalid_role))
                .transpose()
                .public()?;
            let new_user = NewUser {
                name,
                email,
                password,
                phone,
                city,
                role,
            };
            to_json(auth.register(session, new_user).public()?)
        }
        AuthCommand::Login { email, password } => {
            to_json(auth.login(session, &email, &password).public()?)
        }
        AuthCommand::Logout => {
            auth.logout(session).public()?;
            Ok(json!({ "signedIn": false }))
        }
        AuthCommand::Whoami => to_json(auth.current_user(session)),
        AuthCommand::Profile { name, phone, city } => {
            let patch = ProfilePatch { name, phone, city };
            to_json(auth.update_profile(session, patch).public()?)
        }
        AuthCommand::Password { old, new } => {
            auth.change_password(session, &old, &new).public()?;
            Ok(json!({ "passwordChanged": true }))
        }
        AuthCommand::Role { role } => to_json(auth.switch_role(session, &role).public()?),
    }
}

fn compare(cmd: CompareCommand, market: &CarMarket) -> Result<Value> {
    let compare = market.compare();
    match cmd {
        CompareCommand::Add { id } => {
            let car = market
                .cars()
                .get_by_id(&id)
                .public()?
                .ok_or_else(|| map_domain_error(DomainError::car_not_found(&id)))?;
            to_json(compare.add(&car).public()?)
        }
        CompareCommand::Remove { id } => to_json(compare.remove(&id).public()?),
        CompareCommand::Clear => {
            compare.clear().public()?;
            Ok(json!([]))
        }
        CompareCommand::Show => {
            let entries = compare.entries().public()?;
            Ok(json!({
                "capacity": compare.capacity(),
                "best": {
                    "price": best_value_for("price", &entries),
                    "mileage": best_value_for("mileage", &entries),
                    "year": best_value_for("year", &entries),
                },
                "cars": to_json(entries)?,
            }))
        }
    }
}

fn favorites(cmd: FavoritesCommand, market: &CarMarket) -> Result<Value> {
    let favorites = market.favorites();
    match cmd {
        FavoritesCommand::Toggle { id } => {
            let favorite = favorites.toggle(&id).public()?;
            Ok(json!({ "id": id, "favorite": favorite }))
        }
        FavoritesCommand::List => {
            let ids = favorites.list().public()?;
            let cars: Vec<_> = market
                .cars()
                .get_all()
                .public()?
                .into_iter()
                .filter(|c| ids.contains(&c.id))
                .collect();
            to_json(cars)
        }
        FavoritesCommand::Clear => {
            favorites.clear().public()?;
            Ok(json!([]))
        }
    }
}

fn contact(args: ContactArgs, market: &CarMarket) -> Result<Value> {
    let request = ContactRequest {
        name: args.name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        message: args.message,
    };
    to_json(market.outreach().submit_contact(request).public()?)
}

fn filter_criteria(args: FilterArgs) -> Result<CarFilter> {
    CarFilter::try_from(args).map_err(|e| CarMarketError::validation(e).into())
}

/// Listing changes are reserved for seller accounts.
fn require_seller(session: &Session) -> Result<&SessionUser> {
    let user = session
        .user()
        .ok_or_else(|| map_domain_error(DomainError::not_authenticated()))?;
    if !session.is_seller() {
        return Err(CarMarketError::unauthorized("Seller account required").into());
    }
    Ok(user)
}

fn read_payload<T: DeserializeOwned>(payload: &PayloadArgs) -> Result<T> {
    let raw = match (&payload.json, &payload.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => {
            return Err(CarMarketError::validation("either --json or --file is required").into())
        }
    };
    serde_json::from_str(&raw)
        .map_err(|e| CarMarketError::validation(format!("invalid car data: {}", e)).into())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read '{}'", path.display()))
}
