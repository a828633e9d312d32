//! Newsletter sign-ups, contact-form messages and the recent-searches list.

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{ContactRequest, ContactSubmission, NewsletterSubscriber};
use crate::domain::error::DomainError;
use crate::domain::state::{keys, StateStore};

#[derive(Clone)]
pub struct OutreachService {
    state: StateStore,
    recent_searches_limit: usize,
}

impl OutreachService {
    pub fn new(state: StateStore, recent_searches_limit: usize) -> Self {
        Self {
            state,
            recent_searches_limit,
        }
    }

    /// Email addresses are compared trimmed and lowercased.
    #[instrument(name = "car_market.outreach.subscribe_newsletter", skip(self))]
    pub fn subscribe_newsletter(&self, email: &str) -> Result<NewsletterSubscriber, DomainError> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(DomainError::validation("email", "must be an email address"));
        }

        let mut subscribers: Vec<NewsletterSubscriber> =
            self.state.load_or_default(keys::NEWSLETTER_SUBSCRIBERS)?;
        if subscribers.iter().any(|s| s.email == email) {
            return Err(DomainError::already_subscribed(email));
        }

        let subscriber = NewsletterSubscriber {
            email,
            subscribed_at: Utc::now(),
        };
        subscribers.push(subscriber.clone());
        self.state.save(keys::NEWSLETTER_SUBSCRIBERS, &subscribers)?;

        info!(total = subscribers.len(), "newsletter subscription added");
        Ok(subscriber)
    }

    pub fn subscribers(&self) -> Result<Vec<NewsletterSubscriber>, DomainError> {
        self.state.load_or_default(keys::NEWSLETTER_SUBSCRIBERS)
    }

    #[instrument(name = "car_market.outreach.submit_contact", skip(self, request))]
    pub fn submit_contact(&self, request: ContactRequest) -> Result<ContactSubmission, DomainError> {
        for (field, value) in [
            ("name", &request.name),
            ("email", &request.email),
            ("message", &request.message),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(field, "must not be empty"));
            }
        }

        let mut submissions = self.contact_submissions()?;
        let submission = ContactSubmission {
            id: Uuid::now_v7().to_string(),
            request,
            submitted_at: Utc::now(),
        };
        submissions.push(submission.clone());
        self.state.save(keys::CONTACT_SUBMISSIONS, &submissions)?;

        info!(submission_id = %submission.id, "contact message stored");
        Ok(submission)
    }

    pub fn contact_submissions(&self) -> Result<Vec<ContactSubmission>, DomainError> {
        self.state.load_or_default(keys::CONTACT_SUBMISSIONS)
    }

    /// Put `query` at the front of the recent list. Blank queries are ignored;
    /// an earlier identical query moves to the front.
    pub fn record_search(&self, query: &str) -> Result<Vec<String>, DomainError> {
        let query = query.trim();
        let mut recent = self.recent_searches()?;
        if query.is_empty() {
            return Ok(recent);
        }

        recent.retain(|q| q != query);
        recent.insert(0, query.to_string());
        recent.truncate(self.recent_searches_limit);
        self.state.save(keys::RECENT_SEARCHES, &recent)?;

        debug!(query, "recorded search");
        Ok(recent)
    }

    /// Most recent first.
    pub fn recent_searches(&self) -> Result<Vec<String>, DomainError> {
        self.state.load_or_default(keys::RECENT_SEARCHES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::InMemoryStore;
    use std::sync::Arc;

    fn service(limit: usize) -> OutreachService {
        OutreachService::new(StateStore::new(Arc::new(InMemoryStore::new())), limit)
    }

    #[test]
    fn recent_searches_are_bounded_and_deduplicated() {
        let outreach = service(3);
        for q in ["civic", "corolla", " civic ", "", "mehran", "yaris"] {
            outreach.record_search(q).unwrap();
        }
        assert_eq!(
            outreach.recent_searches().unwrap(),
            vec!["yaris", "mehran", "civic"]
        );
    }

    #[test]
    fn newsletter_rejects_repeat_subscription() {
        let outreach = service(5);
        outreach.subscribe_newsletter("Fan@Cars.pk").unwrap();

        let err = outreach.subscribe_newsletter(" fan@cars.pk").unwrap_err();
        assert_eq!(err, DomainError::already_subscribed("fan@cars.pk"));
        assert_eq!(outreach.subscribers().unwrap().len(), 1);
    }

    #[test]
    fn contact_requires_message() {
        let outreach = service(5);
        let err = outreach
            .submit_contact(ContactRequest {
                name: "Ali".into(),
                email: "ali@x.pk".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "message"));

        let stored = outreach
            .submit_contact(ContactRequest {
                name: "Ali".into(),
                email: "ali@x.pk".into(),
                message: "Is the Civic still available?".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(outreach.contact_submissions().unwrap(), vec![stored]);
    }
}
