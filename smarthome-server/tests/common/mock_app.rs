use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use smarthome_server::app::create_app;
use smarthome_server::configs::{Admin, Auth, Cors, Database, Logger, Server, Settings, Store};
use smarthome_server::services::TokenService;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

pub struct MockApp {
    pub router: Router,
    pub token_service: Arc<TokenService>,
    pub shutdown: CancellationToken,
    pub token: String,
}

impl MockApp {
    pub async fn new() -> Self {
        let settings = Arc::new(Settings {
            server: Server {
                host: String::from("127.0.0.1"),
                port: 0,
            },
            logger: Logger {
                level: String::from("debug"),
            },
            database: Database {
                clean_start: true,
                url: String::from("sqlite::memory:"),
            },
            store: Store::default(),
            auth: Auth {
                secret: String::from("test"),
                expiration: 1000,
                admin: Some(Admin {
                    username: String::from(ADMIN_USERNAME),
                    password: String::from(ADMIN_PASSWORD),
                }),
            },
            cors: Cors {
                origins: vec![String::from("*")],
            },
        });

        let shutdown = CancellationToken::new();
        let router = create_app(&settings, shutdown.clone()).await.unwrap();
        let token_service = Arc::new(TokenService::new(&settings.auth));
        let token = token_service.issue_default(ADMIN_USERNAME).unwrap().token;

        Self {
            router,
            token_service,
            shutdown,
            token,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut request = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let body = match body {
            Some(body) => {
                request = request.header("Content-Type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap()
    }
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&body).unwrap()
}
