#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::SigningSecret;
use auth_service::client::IntrospectionClient;
use auth_service::domain::user::ports::UserServicePort;
use auth_service::domain::user::service::UserService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::proto::user_service_server::UserServiceServer;
use serde_json::json;
use serde_json::Value;
use tonic::transport::server::TcpIncoming;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub fn test_secret() -> SigningSecret {
    SigningSecret::new(TEST_SECRET).expect("Test secret must not be empty")
}

/// Test application that spawns real HTTP and gRPC servers over an
/// in-memory user store
pub struct TestApp {
    pub address: String,
    pub grpc_address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn both servers in background tasks and return TestApp
    pub async fn spawn() -> Self {
        let authenticator = Arc::new(Authenticator::new(&test_secret()));
        let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));

        // Use random ports (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(Arc::clone(&user_service), authenticator);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let grpc_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let grpc_port = grpc_listener.local_addr().unwrap().port();
        let grpc_address = format!("http://127.0.0.1:{}", grpc_port);

        let incoming = TcpIncoming::from_listener(grpc_listener, true, None)
            .expect("Failed to wrap gRPC listener");
        let grpc_service = AuthGrpcService::new(user_service);
        tokio::spawn(async move {
            tonic::transport::Server::builder()
                .add_service(UserServiceServer::new(grpc_service))
                .serve_with_incoming(incoming)
                .await
                .expect("gRPC server error");
        });

        Self {
            address,
            grpc_address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(&test_secret()),
        }
    }

    pub async fn introspection_client(&self) -> IntrospectionClient {
        IntrospectionClient::connect(&self.grpc_address)
            .await
            .expect("Failed to connect to gRPC server")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/v1/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response `data`
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/v1/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Register then log in, returning the login `data`
    pub async fn register_and_login(&self, email: &str, password: &str) -> Value {
        self.register("Alice", email, password).await;
        self.login(email, password).await
    }
}
