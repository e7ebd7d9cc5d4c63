//! Integration tests for the ALTR HTTP client using wiremock
//!
//! The configured base URL here puts the `altrnet` marker in the path, so the
//! derived sidecar gateway lands on the same mock server under
//! `/sc-control/v1` and request routing can be asserted with path matchers.

use altrctl::altr::client::AltrClient;
use altrctl::altr::error::Error;
use altrctl::altr::listener::RegisterListenerInput;
use altrctl::altr::repo::{CreateRepoInput, UpdateRepoInput};
use altrctl::altr::repo_user::{AwsSecretsManager, CreateRepoUserInput, CredentialStore};
use altrctl::altr::sidecar::CreateSidecarInput;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> AltrClient {
    AltrClient::new(
        "org1",
        "test-key",
        "test-secret",
        &format!("{}/altrnet", server.uri()),
    )
    .expect("client should build")
}

mod sidecar_tests {
    use super::*;

    #[tokio::test]
    async fn create_sidecar_posts_to_sidecar_gateway_with_basic_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sc-control/v1/sidecars"))
            .and(basic_auth("test-key", "test-secret"))
            .and(body_partial_json(json!({
                "name": "edge-1",
                "hostname": "edge1.example.com"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "6f1c0b5e-9b2a-4c3d-8e4f-0a1b2c3d4e5f",
                "name": "edge-1",
                "hostname": "edge1.example.com",
                "unsupported_query_bypass": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let sidecar = client
            .create_sidecar(&CreateSidecarInput {
                name: "edge-1".to_string(),
                description: String::new(),
                hostname: "edge1.example.com".to_string(),
                public_key_1: Some("ssh-rsa AAA".to_string()),
                public_key_2: None,
                unsupported_query_bypass: false,
            })
            .await
            .expect("create should succeed");

        assert_eq!(sidecar.id, "6f1c0b5e-9b2a-4c3d-8e4f-0a1b2c3d4e5f");
        assert_eq!(sidecar.name, "edge-1");
    }

    #[tokio::test]
    async fn get_sidecar_absence_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/sidecars/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.get_sidecar("missing").await.expect("404 is not an error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_sidecar_is_idempotent() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/sc-control/v1/sidecars/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .delete_sidecar("gone")
            .await
            .expect("deleting an absent sidecar succeeds");
    }
}

mod repo_tests {
    use super::*;

    #[tokio::test]
    async fn create_repo_round_trips_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sc-control/v1/repos"))
            .and(body_partial_json(json!({
                "name": "orders",
                "type": "Postgres",
                "port": 5432
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "name": "orders",
                "type": "Postgres",
                "hostname": "db.internal",
                "port": 5432
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let repo = client
            .create_repo(&CreateRepoInput {
                name: "orders".to_string(),
                description: String::new(),
                database_type: "Postgres".to_string(),
                hostname: "db.internal".to_string(),
                port: 5432,
            })
            .await
            .expect("create should succeed");

        assert_eq!(repo.database_type, "Postgres");
        assert_eq!(repo.port, 5432);
    }

    #[tokio::test]
    async fn update_repo_patches_description_only() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/sc-control/v1/repos/orders"))
            .and(body_partial_json(json!({"description": "order data"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "orders",
                "description": "order data"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let repo = client
            .update_repo(
                "orders",
                &UpdateRepoInput {
                    description: "order data".to_string(),
                },
            )
            .await
            .expect("update should succeed");

        assert_eq!(repo.description, "order data");
    }

    #[tokio::test]
    async fn repo_name_is_escaped_in_the_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/repos/my%20repo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "my repo"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let repo = client
            .get_repo("my repo")
            .await
            .expect("get should succeed")
            .expect("repo should be present");
        assert_eq!(repo.name, "my repo");
    }
}

mod error_decoding_tests {
    use super::*;

    fn assert_api_error(err: Error, status: u16, code: i64, message_fragment: &str) {
        match err {
            Error::Api {
                status: got_status,
                code: got_code,
                message,
            } => {
                assert_eq!(got_status, status);
                assert_eq!(got_code, code);
                assert!(
                    message.contains(message_fragment),
                    "message {message:?} should contain {message_fragment:?}"
                );
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nested_error_envelope_is_decoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/repos/orders"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"error_code": 1001, "message": "internal failure"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.get_repo("orders").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_api_error(err, 500, 1001, "internal failure");
    }

    #[tokio::test]
    async fn flat_error_body_is_decoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/repos/orders"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error_code": 2002, "message": "bad request"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.get_repo("orders").await.unwrap_err();
        assert_api_error(err, 400, 2002, "bad request");
    }

    #[tokio::test]
    async fn unparseable_error_body_surfaces_the_raw_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/repos/orders"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream gateway exploded"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.get_repo("orders").await.unwrap_err();
        match err {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 502);
                assert!(message.contains("upstream gateway exploded"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}

mod repo_user_tests {
    use super::*;

    #[tokio::test]
    async fn create_repo_user_sends_exactly_one_store() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sc-control/v1/repos/orders/users"))
            .and(body_partial_json(json!({
                "username": "svc_reader",
                "aws_secrets_manager": {"secrets_path": "prod/orders"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "username": "svc_reader",
                "repo_name": "orders",
                "aws_secrets_manager": {"secrets_path": "prod/orders"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let user = client
            .create_repo_user(
                "orders",
                &CreateRepoUserInput {
                    username: "svc_reader".to_string(),
                    store: CredentialStore::AwsSecretsManager(AwsSecretsManager {
                        iam_role: String::new(),
                        secrets_path: "prod/orders".to_string(),
                    }),
                },
            )
            .await
            .expect("create should succeed");

        assert_eq!(user.username, "svc_reader");
        assert!(matches!(
            user.credential_store(),
            Some(CredentialStore::AwsSecretsManager(_))
        ));
    }

    #[tokio::test]
    async fn delete_repo_user_is_idempotent() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/sc-control/v1/repos/orders/users/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .delete_repo_user("orders", "gone")
            .await
            .expect("deleting an absent user succeeds");
    }
}

mod listener_tests {
    use super::*;

    #[tokio::test]
    async fn get_listener_finds_its_port_in_the_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/sidecars/sid-1/ports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sidecar_listeners": [
                    {"port": 5432, "database_type": "Postgres", "advertised_version": "15.0"},
                    {"port": 1521, "database_type": "Oracle", "advertised_version": ""}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let listener = client
            .get_listener("sid-1", 1521)
            .await
            .expect("listing should succeed")
            .expect("port 1521 is registered");
        assert_eq!(listener.database_type, "Oracle");

        let missing = client
            .get_listener("sid-1", 3306)
            .await
            .expect("listing should succeed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn register_listener_posts_the_port() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sc-control/v1/sidecars/sid-1/ports"))
            .and(body_partial_json(json!({
                "port": 5432,
                "database_type": "Postgres"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .register_listener(
                "sid-1",
                &RegisterListenerInput {
                    port: 5432,
                    database_type: "Postgres".to_string(),
                    advertised_version: None,
                },
            )
            .await
            .expect("register should succeed");
    }

    #[tokio::test]
    async fn listing_an_unknown_sidecar_yields_an_empty_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/sidecars/unknown/ports"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let listeners = client
            .list_listeners("unknown")
            .await
            .expect("404 is not an error");
        assert!(listeners.is_empty());
    }
}

mod binding_tests {
    use super::*;

    #[tokio::test]
    async fn get_binding_unwraps_the_response_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(
                "/sc-control/v1/sidecars/sid-1/bindings/ports/5432/repos/orders",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "repo_sidecar_binding": {
                    "port": 5432,
                    "sidecar_id": "sid-1",
                    "repo_name": "orders"
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let binding = client
            .get_binding("sid-1", 5432, "orders")
            .await
            .expect("get should succeed")
            .expect("binding should be present");
        assert_eq!(binding.repo_name, "orders");
        assert_eq!(binding.port, 5432);
    }

    #[tokio::test]
    async fn bind_repo_posts_without_a_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(
                "/sc-control/v1/sidecars/sid-1/bindings/ports/5432/repos/orders",
            ))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .bind_repo("sid-1", 5432, "orders")
            .await
            .expect("bind should succeed");
    }

    #[tokio::test]
    async fn repo_bindings_list_unwraps_the_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sc-control/v1/repos/orders/bindings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "repo_bindings": [
                    {"port": 5432, "sidecar_id": "sid-1", "repo_name": "orders"},
                    {"port": 5433, "sidecar_id": "sid-2", "repo_name": "orders"}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let bindings = client
            .list_repo_bindings("orders")
            .await
            .expect("list should succeed");
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[1].sidecar_id, "sid-2");
    }

    #[tokio::test]
    async fn unbind_is_idempotent() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(
                "/sc-control/v1/sidecars/sid-1/bindings/ports/5432/repos/orders",
            ))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .unbind_repo("sid-1", 5432, "orders")
            .await
            .expect("unbinding an absent binding succeeds");
    }
}
