use avacloud_core::config::{AvaCloudConfig, Credentials};
use avacloud_core::contract::{MockTokenTransport, TokenRequest, TransportResponse};
use avacloud_core::error::TokenError;
use avacloud_core::session::Session;
use avacloud_core::token::get_oauth2_access_token;

const TOKEN_URL: &str = "https://identity.example.test/connect/token";

fn credentials() -> Credentials {
    Credentials::new("my-client", "my-secret")
}

fn respond(status: u16, body: &str) -> MockTokenTransport {
    let body = body.to_string();
    let mut transport = MockTokenTransport::new();
    transport.expect_post_form().times(1).returning(move |_| {
        Ok(TransportResponse {
            status,
            body: body.clone(),
        })
    });
    transport
}

#[tokio::test]
async fn returns_access_token_from_successful_response() {
    let transport = respond(200, r#"{"access_token": "T"}"#);

    let token = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .expect("token should be returned");

    assert_eq!(token.as_str(), "T");
}

#[tokio::test]
async fn sends_client_credentials_grant_with_basic_credentials() {
    let mut transport = MockTokenTransport::new();
    transport
        .expect_post_form()
        .withf(|req: &TokenRequest| {
            req.url == TOKEN_URL
                && req.client_id == "my-client"
                && req.client_secret == "my-secret"
                && req.form() == [("grant_type", "client_credentials"), ("scope", "avacloud")]
        })
        .times(1)
        .returning(|_| {
            Ok(TransportResponse {
                status: 200,
                body: r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600}"#
                    .to_string(),
            })
        });

    let token = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .expect("token should be returned");
    assert_eq!(token.into_inner(), "abc");
}

#[tokio::test]
async fn empty_client_id_fails_without_network_call() {
    // No expectations: any call to post_form panics.
    let transport = MockTokenTransport::new();

    let err = get_oauth2_access_token(
        &transport,
        &Credentials::new("", "my-secret"),
        TOKEN_URL,
        "avacloud",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TokenError::Configuration(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_client_secret_fails_without_network_call() {
    let mut transport = MockTokenTransport::new();
    transport.expect_post_form().times(0);

    let err = get_oauth2_access_token(
        &transport,
        &Credentials::new("my-client", ""),
        TOKEN_URL,
        "avacloud",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TokenError::Configuration(_)), "got {err:?}");
}

#[tokio::test]
async fn unauthorized_response_reports_status() {
    let transport = respond(401, r#"{"error":"invalid_client"}"#);

    let err = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .unwrap_err();

    assert!(
        matches!(err, TokenError::TokenRequestFailed { status: 401 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn non_200_success_status_is_accepted() {
    let transport = respond(201, r#"{"access_token":"created"}"#);

    let token = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .expect("2xx is a success");
    assert_eq!(token.as_str(), "created");
}

#[tokio::test]
async fn missing_access_token_is_reported() {
    let transport = respond(200, r#"{"token_type":"Bearer"}"#);

    let err = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .unwrap_err();

    assert!(
        matches!(err, TokenError::TokenMissingInResponse),
        "got {err:?}"
    );
}

#[tokio::test]
async fn empty_access_token_is_reported_as_missing() {
    let transport = respond(200, r#"{"access_token":""}"#);

    let err = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .unwrap_err();

    assert!(matches!(err, TokenError::TokenMissingInResponse));
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let transport = respond(200, "<html>gateway</html>");

    let err = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .unwrap_err();

    assert!(matches!(err, TokenError::ResponseParse(_)), "got {err:?}");
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    let mut transport = MockTokenTransport::new();
    transport
        .expect_post_form()
        .times(1)
        .returning(|_| Err("connection refused".into()));

    let err = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
        .await
        .unwrap_err();

    match err {
        TokenError::Network(source) => assert_eq!(source.to_string(), "connection refused"),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn session_binds_token_to_configured_base_url() {
    let transport = respond(200, r#"{"access_token":"session-token"}"#);
    let config = AvaCloudConfig {
        identity_token_url: TOKEN_URL.to_string(),
        avacloud_base_url: "https://avacloud.example.test/".to_string(),
        scope: "avacloud".to_string(),
    };

    let session = Session::connect(&transport, &config, &credentials())
        .await
        .expect("session should connect");

    assert_eq!(session.token.as_str(), "session-token");
    assert_eq!(
        session.endpoint_url("/conversion/gaeb/ava"),
        "https://avacloud.example.test/conversion/gaeb/ava"
    );
}

#[test]
fn secrets_are_redacted_in_debug_output() {
    let request = TokenRequest {
        url: TOKEN_URL.to_string(),
        client_id: "my-client".to_string(),
        client_secret: "my-secret".to_string(),
        scope: "avacloud".to_string(),
    };
    let token = avacloud_core::token::AccessToken::new("bearer-value");

    assert!(!format!("{request:?}").contains("my-secret"));
    assert!(!format!("{:?}", credentials()).contains("my-secret"));
    assert!(!format!("{token:?}").contains("bearer-value"));
}

#[tokio::test]
async fn loosely_typed_expiry_fields_do_not_fail_the_flow() {
    for body in [
        r#"{"access_token":"T","expires_in":"3599"}"#,
        r#"{"access_token":"T","expires_in":3600.0,"token_type":null}"#,
        r#"{"access_token":"T","expires_in":null,"token_type":7}"#,
    ] {
        let transport = respond(200, body);

        let token = get_oauth2_access_token(&transport, &credentials(), TOKEN_URL, "avacloud")
            .await
            .unwrap_or_else(|e| panic!("body {body} should yield a token, got {e:?}"));

        assert_eq!(token.as_str(), "T");
    }
}
