//! Tests for the registration orchestrator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rstest::{fixture, rstest};
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{
    MockPasswordHasher, MockUserRepository, PasswordHashError, UserPersistenceError,
};
use crate::domain::registration::{
    DUPLICATE_EMAIL_MESSAGE, GENERIC_FAILURE_MESSAGE, RedirectTarget, SUCCESS_MESSAGE,
    ValidationCode,
};
use crate::domain::{EmailAddress, FlashSeverity, PasswordHash, UserId};

const STORED_HASH: &str = "$2b$04$abcdefghijklmnopqrstuuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0";

fn request(
    name: &str,
    email: &str,
    email_confirm: &str,
    password: &str,
    password_confirm: &str,
) -> RegistrationRequest {
    RegistrationRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        email_confirm: email_confirm.to_owned(),
        password: Zeroizing::new(password.to_owned()),
        password_confirm: Zeroizing::new(password_confirm.to_owned()),
    }
}

#[fixture]
fn ann_lee() -> RegistrationRequest {
    request("Ann Lee", "ann@x.com", "ann@x.com", "Ab1!defg", "Ab1!defg")
}

fn stored(user: &NewUser) -> User {
    User::new(
        UserId::random(),
        user.name.clone(),
        user.email.clone(),
        user.password_hash.clone(),
        Utc::now(),
    )
}

fn make_service(
    repo: MockUserRepository,
    hasher: MockPasswordHasher,
) -> RegistrationService<MockUserRepository, MockPasswordHasher> {
    RegistrationService::new(Arc::new(repo), Arc::new(hasher))
}

fn untouched_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();
    hasher
}

fn texts(outcome: &RegistrationOutcome) -> Vec<(FlashSeverity, &str)> {
    outcome
        .messages
        .iter()
        .map(|m| (m.severity, m.text.as_str()))
        .collect()
}

#[rstest]
#[tokio::test]
async fn missing_special_character_is_rejected_without_side_effects() {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists().never();
    repo.expect_save_user().never();
    let service = make_service(repo, untouched_hasher());

    let outcome = service
        .register(request("Al", "a@b.com", "a@b.com", "abc12345", "abc12345"))
        .await;

    assert_eq!(outcome.redirect, RedirectTarget::RegistrationForm);
    match &outcome.result {
        Err(RegistrationFailure::Invalid(errors)) => {
            let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
            assert_eq!(codes, [ValidationCode::MissingSpecial]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(
        texts(&outcome),
        [(
            FlashSeverity::Error,
            "Password must contain at least one special character"
        )]
    );
}

#[rstest]
#[tokio::test]
async fn fresh_valid_submission_registers_and_redirects_to_login(ann_lee: RegistrationRequest) {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists()
        .withf(|email| email.as_ref() == "ann@x.com")
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_save_user()
        .withf(|user| {
            user.name.as_ref() == "Ann Lee"
                && user.email.as_ref() == "ann@x.com"
                && user.password_hash.as_str() == STORED_HASH
        })
        .times(1)
        .returning(|user| Ok(stored(user)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|plaintext| plaintext == "Ab1!defg")
        .times(1)
        .return_once(|_| Ok(PasswordHash::new(STORED_HASH)));
    let service = make_service(repo, hasher);

    let outcome = service.register(ann_lee).await;

    assert_eq!(outcome.redirect, RedirectTarget::Login);
    let user = outcome.result.as_ref().expect("registered");
    assert_eq!(user.email().as_ref(), "ann@x.com");
    assert_ne!(user.password_hash().as_str(), "Ab1!defg");
    assert_eq!(texts(&outcome), [(FlashSeverity::Success, SUCCESS_MESSAGE)]);
}

#[rstest]
#[tokio::test]
async fn registered_email_yields_single_warning(ann_lee: RegistrationRequest) {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists().times(1).return_once(|_| Ok(true));
    repo.expect_save_user().never();
    let service = make_service(repo, untouched_hasher());

    let outcome = service.register(ann_lee).await;

    assert_eq!(outcome.redirect, RedirectTarget::RegistrationForm);
    assert!(matches!(
        outcome.result,
        Err(RegistrationFailure::DuplicateEmail(ref email)) if email.as_ref() == "ann@x.com"
    ));
    assert_eq!(
        texts(&outcome),
        [(FlashSeverity::Warning, DUPLICATE_EMAIL_MESSAGE)]
    );
}

#[rstest]
#[tokio::test]
async fn uniqueness_check_uses_normalized_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists()
        .withf(|email| email == &EmailAddress::parse("ann@x.com").expect("valid"))
        .times(1)
        .return_once(|_| Ok(true));
    let service = make_service(repo, untouched_hasher());

    let outcome = service
        .register(request(
            "Ann Lee",
            "  ANN@X.com",
            "  ANN@X.com",
            "Ab1!defg",
            "Ab1!defg",
        ))
        .await;

    assert!(matches!(
        outcome.result,
        Err(RegistrationFailure::DuplicateEmail(_))
    ));
}

#[rstest]
#[tokio::test]
async fn email_confirmation_with_leading_space_is_a_mismatch() {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists().never();
    let service = make_service(repo, untouched_hasher());

    let outcome = service
        .register(request("Xavier", "x@y.com", " x@y.com", "Ab1!defg", "Ab1!defg"))
        .await;

    assert_eq!(
        texts(&outcome),
        [(FlashSeverity::Error, "Email addresses must match")]
    );
}

#[rstest]
#[tokio::test]
async fn every_failing_rule_becomes_one_error_flash() {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists().never();
    repo.expect_save_user().never();
    let service = make_service(repo, untouched_hasher());

    let outcome = service.register(request("", "", "x", "", "y")).await;

    // name, email, emailConfirm, three password checks, passwordConfirm
    assert_eq!(outcome.messages.len(), 7);
    assert!(
        outcome
            .messages
            .iter()
            .all(|m| m.severity == FlashSeverity::Error)
    );
}

#[rstest]
#[tokio::test]
async fn unique_constraint_violation_is_reported_as_duplicate(ann_lee: RegistrationRequest) {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists().return_once(|_| Ok(false));
    repo.expect_save_user()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_email("ann@x.com")));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new(STORED_HASH)));
    let service = make_service(repo, hasher);

    let outcome = service.register(ann_lee).await;

    assert_eq!(
        texts(&outcome),
        [(FlashSeverity::Warning, DUPLICATE_EMAIL_MESSAGE)]
    );
    assert_eq!(outcome.redirect, RedirectTarget::RegistrationForm);
}

#[rstest]
#[case::lookup_connection(
    Err(UserPersistenceError::connection("refused")),
    None,
    None
)]
#[case::hash_failure(
    Ok(false),
    Some(Err(PasswordHashError::worker("panicked"))),
    None
)]
#[case::save_query(
    Ok(false),
    Some(Ok(PasswordHash::new(STORED_HASH))),
    Some(UserPersistenceError::query("disk full"))
)]
#[tokio::test]
async fn infrastructure_failures_become_generic_error(
    ann_lee: RegistrationRequest,
    #[case] exists: Result<bool, UserPersistenceError>,
    #[case] hashed: Option<Result<PasswordHash, PasswordHashError>>,
    #[case] save_error: Option<UserPersistenceError>,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_email_exists().return_once(move |_| exists);
    let mut hasher = MockPasswordHasher::new();
    match hashed {
        Some(result) => {
            hasher.expect_hash().times(1).return_once(move |_| result);
        }
        None => {
            hasher.expect_hash().never();
        }
    }
    match save_error {
        Some(error) => {
            repo.expect_save_user().times(1).return_once(move |_| Err(error));
        }
        None => {
            repo.expect_save_user().never();
        }
    }
    let service = make_service(repo, hasher);

    let outcome = service.register(ann_lee).await;

    assert!(matches!(
        outcome.result,
        Err(RegistrationFailure::Infrastructure(_))
    ));
    assert_eq!(
        texts(&outcome),
        [(FlashSeverity::Error, GENERIC_FAILURE_MESSAGE)]
    );
    assert_eq!(outcome.redirect, RedirectTarget::RegistrationForm);
}

struct StalledRepository;

#[async_trait]
impl UserRepository for StalledRepository {
    async fn email_exists(&self, _email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(false)
    }

    async fn save_user(&self, _user: &NewUser) -> Result<User, UserPersistenceError> {
        Err(UserPersistenceError::query("not reached"))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(Vec::new())
    }
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn stalled_store_times_out(ann_lee: RegistrationRequest) {
    let service = RegistrationService::new(Arc::new(StalledRepository), Arc::new(untouched_hasher()))
        .with_io_timeout(Duration::from_millis(250));

    let outcome = service.register(ann_lee).await;

    assert_eq!(
        outcome.result.err(),
        Some(RegistrationFailure::Infrastructure(
            InfrastructureFailure::Timeout {
                operation: "email_exists"
            }
        ))
    );
    assert_eq!(outcome.redirect, RedirectTarget::RegistrationForm);
}
