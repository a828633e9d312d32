use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{NewUser, ProfilePatch, Role, SessionUser, User};
use crate::domain::error::DomainError;
use crate::domain::seed;
use crate::domain::session::Session;
use crate::domain::state::{keys, StateStore};

/// Accounts under `users` plus the session mirror under `currentUser`.
///
/// Every change to a session is written through to the mirror, so a later
/// process can pick it up with [`AuthService::restore_session`].
#[derive(Clone)]
pub struct AuthService {
    state: StateStore,
}

impl AuthService {
    pub fn new(state: StateStore) -> Self {
        Self { state }
    }

    /// Write the demo accounts if no users collection exists yet.
    #[instrument(name = "car_market.auth.initialize", skip(self))]
    pub fn initialize(&self) -> Result<bool, DomainError> {
        if self.state.load::<Vec<User>>(keys::USERS)?.is_some() {
            debug!("users collection already present");
            return Ok(false);
        }
        let users = seed::demo_users();
        self.save_users(&users)?;
        info!(count = users.len(), "seeded demo users");
        Ok(true)
    }

    #[instrument(name = "car_market.auth.register", skip(self, session, new_user), fields(email = %new_user.email))]
    pub fn register(
        &self,
        session: &mut Session,
        new_user: NewUser,
    ) -> Result<SessionUser, DomainError> {
        validate_registration(&new_user)?;

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == new_user.email) {
            warn!("registration rejected: email taken");
            return Err(DomainError::duplicate_email(new_user.email));
        }

        let user = User {
            id: Uuid::now_v7().to_string(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            phone: new_user.phone,
            city: new_user.city,
            role: new_user.role.unwrap_or_default(),
            created_at: Utc::now(),
        };
        let projection = SessionUser::from(&user);

        users.push(user);
        self.save_users(&users)?;
        self.sign_in(session, projection.clone())?;

        info!(user_id = %projection.id, "registered user");
        Ok(projection)
    }

    #[instrument(name = "car_market.auth.login", skip(self, session, password))]
    pub fn login(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, DomainError> {
        let users = self.users()?;
        let Some(user) = users
            .iter()
            .find(|u| u.email == email && u.password == password)
        else {
            debug!("login rejected");
            return Err(DomainError::invalid_credentials());
        };

        let projection = SessionUser::from(user);
        self.sign_in(session, projection.clone())?;
        info!(user_id = %projection.id, "signed in");
        Ok(projection)
    }

    #[instrument(name = "car_market.auth.logout", skip(self, session))]
    pub fn logout(&self, session: &mut Session) -> Result<(), DomainError> {
        session.clear();
        self.state.clear(keys::CURRENT_USER)?;
        debug!("signed out");
        Ok(())
    }

    pub fn current_user<'a>(&self, session: &'a Session) -> Option<&'a SessionUser> {
        session.user()
    }

    pub fn is_authenticated(&self, session: &Session) -> bool {
        session.is_authenticated()
    }

    pub fn is_seller(&self, session: &Session) -> bool {
        session.is_seller()
    }

    /// Session recorded by an earlier process, or an anonymous one.
    pub fn restore_session(&self) -> Result<Session, DomainError> {
        Ok(self
            .state
            .load::<SessionUser>(keys::CURRENT_USER)?
            .map(Session::signed_in)
            .unwrap_or_default())
    }

    #[instrument(name = "car_market.auth.update_profile", skip(self, session, patch))]
    pub fn update_profile(
        &self,
        session: &mut Session,
        patch: ProfilePatch,
    ) -> Result<SessionUser, DomainError> {
        self.modify_current(session, |user| {
            if let Some(name) = patch.name {
                user.name = name;
            }
            if let Some(phone) = patch.phone {
                user.phone = phone;
            }
            if let Some(city) = patch.city {
                user.city = city;
            }
            Ok(())
        })
    }

    #[instrument(name = "car_market.auth.change_password", skip_all)]
    pub fn change_password(
        &self,
        session: &Session,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let current = session.user().ok_or_else(DomainError::not_authenticated)?;
        let mut users = self.users()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == current.id)
            .ok_or_else(|| DomainError::user_not_found(&current.id))?;
        if user.password != old_password {
            return Err(DomainError::incorrect_password());
        }
        if new_password.is_empty() {
            return Err(DomainError::validation("password", "must not be empty"));
        }

        user.password = new_password.to_string();
        self.save_users(&users)?;
        info!(user_id = %current.id, "password changed");
        Ok(())
    }

    #[instrument(name = "car_market.auth.switch_role", skip(self, session))]
    pub fn switch_role(
        &self,
        session: &mut Session,
        role: &str,
    ) -> Result<SessionUser, DomainError> {
        let role: Role = role.parse().map_err(DomainError::invalid_role)?;
        self.modify_current(session, |user| {
            user.role = role;
            Ok(())
        })
    }

    // --- helpers ---

    fn users(&self) -> Result<Vec<User>, DomainError> {
        self.state.load_or_default(keys::USERS)
    }

    fn save_users(&self, users: &[User]) -> Result<(), DomainError> {
        self.state.save(keys::USERS, users)
    }

    fn sign_in(&self, session: &mut Session, user: SessionUser) -> Result<(), DomainError> {
        self.state.save(keys::CURRENT_USER, &user)?;
        session.set(user);
        Ok(())
    }

    /// Apply `change` to the signed-in user's record, persist it and refresh
    /// the session projection.
    fn modify_current(
        &self,
        session: &mut Session,
        change: impl FnOnce(&mut User) -> Result<(), DomainError>,
    ) -> Result<SessionUser, DomainError> {
        let id = session
            .user()
            .map(|u| u.id.clone())
            .ok_or_else(DomainError::not_authenticated)?;

        let mut users = self.users()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::user_not_found(&id))?;
        change(user)?;
        let projection = SessionUser::from(&*user);

        self.save_users(&users)?;
        self.sign_in(session, projection.clone())?;
        info!(user_id = %id, "updated user");
        Ok(projection)
    }
}

fn validate_registration(new_user: &NewUser) -> Result<(), DomainError> {
    if new_user.name.trim().is_empty() {
        return Err(DomainError::validation("name", "must not be empty"));
    }
    if !new_user.email.contains('@') {
        return Err(DomainError::validation("email", "must be an email address"));
    }
    if new_user.password.is_empty() {
        return Err(DomainError::validation("password", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::InMemoryStore;
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn service() -> AuthService {
        let auth = AuthService::new(StateStore::new(Arc::new(InMemoryStore::new())));
        auth.initialize().unwrap();
        auth
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Bilal".into(),
            email: email.into(),
            password: "pw".into(),
            ..Default::default()
        }
    }

    #[test]
    fn registration_validates_input() {
        let auth = service();
        let mut session = Session::anonymous();

        let err = auth
            .register(&mut session, new_user("not-an-email"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "email"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn role_defaults_to_buyer() {
        let auth = service();
        let mut session = Session::anonymous();
        let user = auth.register(&mut session, new_user("b@x.pk")).unwrap();
        assert_eq!(user.role, Role::Buyer);
        assert!(!auth.is_seller(&session));
    }

    #[test]
    fn role_names_are_exact() {
        let auth = service();
        let mut session = Session::anonymous();
        auth.login(&mut session, "buyer@carmarket.pk", "buyer123")
            .unwrap();

        let err = auth.switch_role(&mut session, "Seller").unwrap_err();
        assert_eq!(err, DomainError::invalid_role("Seller"));

        auth.switch_role(&mut session, "seller").unwrap();
        assert!(auth.is_seller(&session));
    }

    #[test]
    fn vanished_account_reports_user_not_found() {
        let auth = service();
        let mut session = Session::signed_in(SessionUser {
            id: "ghost".into(),
            name: "Ghost".into(),
            email: "ghost@x.pk".into(),
            phone: String::new(),
            city: String::new(),
            role: Role::Buyer,
            created_at: Utc::now(),
        });

        let err = auth
            .update_profile(&mut session, ProfilePatch::default())
            .unwrap_err();
        assert_eq!(err, DomainError::user_not_found("ghost"));
    }

    #[traced_test]
    #[test]
    fn old_password_is_checked_before_the_new_one() {
        let auth = service();
        let mut session = Session::anonymous();
        auth.login(&mut session, "buyer@carmarket.pk", "buyer123").unwrap();

        assert_eq!(
            auth.change_password(&session, "wrong", "").unwrap_err(),
            DomainError::incorrect_password()
        );
        assert!(matches!(
            auth.change_password(&session, "buyer123", "").unwrap_err(),
            DomainError::Validation { .. }
        ));
        auth.change_password(&session, "buyer123", "fresh").unwrap();
    }

    #[traced_test]
    #[test]
    fn login_is_traced() {
        let auth = service();
        let mut session = Session::anonymous();
        auth.login(&mut session, "seller@carmarket.pk", "seller123")
            .unwrap();
        assert!(logs_contain("signed in"));
        assert!(!logs_contain("seller123"));
    }
}
