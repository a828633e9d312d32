use std::sync::Arc;

use anyhow::Result;

use car_market::config::CarMarketConfig;
use car_market::domain::error::DomainError;
use car_market::domain::ports::KeyValueStore;
use car_market::domain::session::Session;
use car_market::domain::state::keys;
use car_market::infra::storage::InMemoryStore;
use car_market::model::{NewUser, ProfilePatch, Role, User};
use car_market::CarMarket;

fn market_with_backend() -> Result<(Arc<InMemoryStore>, CarMarket)> {
    let backend = Arc::new(InMemoryStore::new());
    let market = CarMarket::new(backend.clone(), CarMarketConfig::default());
    market.initialize()?;
    Ok((backend, market))
}

fn registration(email: &str) -> NewUser {
    NewUser {
        name: "Zainab Hussain".into(),
        email: email.into(),
        password: "s3cret-pass".into(),
        phone: "0333-0000000".into(),
        city: "Multan".into(),
        role: None,
    }
}

#[test]
fn register_login_round_trip_never_exposes_password() -> Result<()> {
    let (backend, market) = market_with_backend()?;
    let auth = market.auth();

    let mut session = Session::anonymous();
    let registered = auth.register(&mut session, registration("zainab@x.pk"))?;
    assert!(auth.is_authenticated(&session));

    let mirrored = backend
        .get(keys::CURRENT_USER)?
        .expect("session mirrored to store");
    assert!(!mirrored.contains("password"));
    assert!(!mirrored.contains("s3cret-pass"));

    let serialized = serde_json::to_value(auth.current_user(&session))?;
    assert!(serialized.get("password").is_none());

    auth.logout(&mut session)?;
    assert!(auth.current_user(&session).is_none());
    assert!(backend.get(keys::CURRENT_USER)?.is_none());

    let logged_in = auth.login(&mut session, "zainab@x.pk", "s3cret-pass")?;
    assert_eq!(logged_in, registered);
    assert_eq!(logged_in.role, Role::Buyer);
    Ok(())
}

#[test]
fn duplicate_email_leaves_users_unchanged() -> Result<()> {
    let (backend, market) = market_with_backend()?;
    let before = backend.get(keys::USERS)?;

    let mut session = Session::anonymous();
    let err = market
        .auth()
        .register(&mut session, registration("seller@carmarket.pk"))
        .unwrap_err();

    assert_eq!(err, DomainError::duplicate_email("seller@carmarket.pk"));
    assert_eq!(backend.get(keys::USERS)?, before);
    assert!(!session.is_authenticated());
    Ok(())
}

#[test]
fn email_match_is_case_sensitive() -> Result<()> {
    let (_, market) = market_with_backend()?;
    let mut session = Session::anonymous();

    market
        .auth()
        .register(&mut session, registration("Seller@carmarket.pk"))?;

    let err = market
        .auth()
        .login(&mut session, "SELLER@carmarket.pk", "seller123")
        .unwrap_err();
    assert_eq!(err, DomainError::InvalidCredentials);
    Ok(())
}

#[test]
fn wrong_password_is_rejected() -> Result<()> {
    let (_, market) = market_with_backend()?;
    let mut session = Session::anonymous();

    let err = market
        .auth()
        .login(&mut session, "buyer@carmarket.pk", "nope")
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!session.is_authenticated());
    Ok(())
}

#[test]
fn session_survives_a_new_service_instance() -> Result<()> {
    let (backend, market) = market_with_backend()?;
    let mut session = Session::anonymous();
    market
        .auth()
        .login(&mut session, "seller@carmarket.pk", "seller123")?;

    let later = CarMarket::new(backend, CarMarketConfig::default());
    let restored = later.auth().restore_session()?;

    assert_eq!(restored, session);
    assert!(restored.is_seller());
    Ok(())
}

#[test]
fn profile_and_role_changes_refresh_the_session() -> Result<()> {
    let (backend, market) = market_with_backend()?;
    let auth = market.auth();
    let mut session = Session::anonymous();
    auth.login(&mut session, "buyer@carmarket.pk", "buyer123")?;

    let updated = auth.update_profile(
        &mut session,
        ProfilePatch {
            city: Some("Quetta".into()),
            ..Default::default()
        },
    )?;
    assert_eq!(updated.city, "Quetta");
    assert_eq!(updated.name, "Sara Ali");

    auth.switch_role(&mut session, "seller")?;
    assert!(session.is_seller());

    let users: Vec<User> = serde_json::from_str(&backend.get(keys::USERS)?.unwrap_or_default())?;
    let stored = users.iter().find(|u| u.id == "2").expect("buyer account");
    assert_eq!(stored.city, "Quetta");
    assert_eq!(stored.role, Role::Seller);

    assert_eq!(auth.restore_session()?, session);
    Ok(())
}

#[test]
fn anonymous_sessions_cannot_modify_accounts() -> Result<()> {
    let (_, market) = market_with_backend()?;
    let auth = market.auth();
    let mut session = Session::anonymous();

    assert_eq!(
        auth.update_profile(&mut session, ProfilePatch::default())
            .unwrap_err(),
        DomainError::NotAuthenticated
    );
    assert_eq!(
        auth.change_password(&session, "a", "b").unwrap_err(),
        DomainError::NotAuthenticated
    );
    assert_eq!(
        auth.switch_role(&mut session, "seller").unwrap_err(),
        DomainError::NotAuthenticated
    );
    Ok(())
}

#[test]
fn change_password_checks_the_old_one() -> Result<()> {
    let (_, market) = market_with_backend()?;
    let auth = market.auth();
    let mut session = Session::anonymous();
    auth.login(&mut session, "seller@carmarket.pk", "seller123")?;

    assert_eq!(
        auth.change_password(&session, "wrong", "next").unwrap_err(),
        DomainError::IncorrectPassword
    );
    auth.change_password(&session, "seller123", "next")?;

    auth.logout(&mut session)?;
    assert!(auth
        .login(&mut session, "seller@carmarket.pk", "seller123")
        .is_err());
    auth.login(&mut session, "seller@carmarket.pk", "next")?;
    Ok(())
}
