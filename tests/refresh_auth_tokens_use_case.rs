use std::sync::Arc;

use dental_auth::application::{
    commands::users::{
        REFRESH_SUCCESS, RefreshAuthTokensCommand, RefreshAuthTokensDependencies,
        RefreshAuthTokensUseCase,
    },
    error::{ApplicationError, SerializedError},
};
use dental_auth::domain::{token::TokenKind, user::UserId};

mod support;

use support::{
    CallLog, MockTokenGenerator, MockTokenStore, MockTokenVerifier, RecordingLogger,
    security::token_entity,
};

const PRESENTED: &str = "refresh-presented";

struct Harness {
    calls: CallLog,
    tokens: Arc<MockTokenStore>,
    access: Arc<MockTokenGenerator>,
    refresh: Arc<MockTokenGenerator>,
    logger: Arc<RecordingLogger>,
    use_case: RefreshAuthTokensUseCase,
}

enum Scenario {
    Invalid,
    NotStored,
    Stored,
}

fn harness(user_id: UserId, scenario: Scenario) -> Harness {
    let calls = CallLog::new();
    let presented = token_entity(user_id, TokenKind::Refresh, PRESENTED);

    let verifier = match scenario {
        Scenario::Invalid => MockTokenVerifier::rejecting(calls.clone()),
        Scenario::NotStored | Scenario::Stored => {
            MockTokenVerifier::accepting(calls.clone(), presented.clone())
        }
    };
    let store = MockTokenStore::new(calls.clone());
    let tokens = Arc::new(match scenario {
        Scenario::Stored => store.with_stored(presented),
        Scenario::Invalid | Scenario::NotStored => store,
    });
    let access = Arc::new(MockTokenGenerator::new(calls.clone(), TokenKind::Access));
    let refresh = Arc::new(MockTokenGenerator::new(calls.clone(), TokenKind::Refresh));
    let logger = Arc::new(RecordingLogger::default());

    let use_case = RefreshAuthTokensUseCase::new(RefreshAuthTokensDependencies {
        verifier: Arc::new(verifier),
        token_by_user_id: tokens.clone(),
        token_remover: tokens.clone(),
        refresh_token_generator: refresh.clone(),
        access_token_generator: access.clone(),
        token_saver: tokens.clone(),
        logger: logger.clone(),
    });

    Harness {
        calls,
        tokens,
        access,
        refresh,
        logger,
        use_case,
    }
}

fn command() -> RefreshAuthTokensCommand {
    RefreshAuthTokensCommand {
        token: PRESENTED.into(),
    }
}

fn assert_opaque_unauthorized(err: &ApplicationError) {
    assert!(matches!(err, ApplicationError::Unauthorized(_)), "{err:?}");
    assert_eq!(err.status_code(), 401);
    assert_eq!(err.client_errors(), vec![SerializedError::new("Unauthorized")]);
}

#[tokio::test]
async fn unverifiable_token_stops_before_any_store_access() {
    let h = harness(UserId::generate(), Scenario::Invalid);

    let err = h.use_case.execute(command()).await.unwrap_err();

    assert_opaque_unauthorized(&err);
    assert_eq!(h.calls.calls(), vec!["verify"]);
    assert_eq!(h.access.issued() + h.refresh.issued(), 0);
    assert_eq!(h.logger.errors(), vec!["Unauthorized: invalid token.".to_owned()]);
}

#[tokio::test]
async fn unknown_token_is_looked_up_once_and_nothing_else() {
    let h = harness(UserId::generate(), Scenario::NotStored);

    let err = h.use_case.execute(command()).await.unwrap_err();

    assert_opaque_unauthorized(&err);
    assert_eq!(h.calls.calls(), vec!["verify", "get_token_by_user_id"]);
    assert!(h.tokens.deleted().is_empty());
    assert_eq!(h.access.issued() + h.refresh.issued(), 0);
    assert_eq!(h.logger.errors(), vec!["Unauthorized: token not found.".to_owned()]);
}

#[tokio::test]
async fn stored_token_is_rotated() {
    let user_id = UserId::generate();
    let h = harness(user_id, Scenario::Stored);

    let envelope = h.use_case.execute(command()).await.unwrap();

    assert_eq!(envelope.message, REFRESH_SUCCESS);
    let pair = envelope.data.expect("token pair");
    assert_ne!(pair.refresh_token.token, PRESENTED);
    assert_ne!(pair.access_token.token, PRESENTED);
    assert_eq!(pair.refresh_token.user_id, user_id);

    assert_eq!(h.tokens.deleted(), vec![(user_id, PRESENTED.to_owned())]);
    assert_eq!(h.tokens.saved(), vec![pair.refresh_token.clone()]);
    assert_eq!(
        h.calls.calls(),
        vec![
            "verify",
            "get_token_by_user_id",
            "delete_token_by_user_id",
            "generate_refresh",
            "generate_access",
            "save_token"
        ]
    );
    assert_eq!(
        h.logger.infos(),
        vec![format!("{REFRESH_SUCCESS}: {user_id}.")]
    );
}
