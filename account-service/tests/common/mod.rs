use std::sync::Arc;

use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::user_store::AccountAuthenticator;
use account_service::outbound::user_store::RepositoryUserStore;
use auth::Authenticator;
use reqwest::StatusCode;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ACCESS_TOKEN_MINUTES: i64 = 30;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Shares the server's secret and store, for minting tokens directly
    pub authenticator: Arc<AccountAuthenticator<InMemoryUserRepository>>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            Arc::new(RepositoryUserStore::new(Arc::clone(&user_repository))),
        ));
        let user_service = Arc::new(UserService::new(user_repository));

        let router = create_router(
            user_service,
            Arc::clone(&authenticator),
            chrono::Duration::minutes(ACCESS_TOKEN_MINUTES),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user, asserting success
    pub async fn register(&self, email: &str, password: &str) {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Submit an OAuth2 password grant
    pub async fn request_token(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/token")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in, asserting success, and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self.request_token(email, password).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}
