use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/contact-api");
        cmd.env("CONTACT_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Integration tests need a configured database; callers skip when absent.
pub fn database_available() -> bool {
    std::env::var("DATABASE_URL").is_ok() || dotenvy::var("DATABASE_URL").is_ok()
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique username per test run; tests share one database.
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

pub async fn register_user(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<()> {
    let res = client
        .post(format!("{}/api/users", base_url))
        .json(&serde_json::json!({
            "username": username,
            "password": password,
            "name": "Test User",
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "register failed with {}",
        res.status()
    );
    Ok(())
}

pub async fn login_user(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/api/users/login", base_url))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed with {}", res.status());
    let payload = res.json::<serde_json::Value>().await?;
    payload["data"]["token"]
        .as_str()
        .map(|s| s.to_string())
        .context("login response missing token")
}

/// Register a fresh user and return (username, token)
pub async fn register_and_login(
    client: &reqwest::Client,
    base_url: &str,
    prefix: &str,
) -> Result<(String, String)> {
    let username = unique_username(prefix);
    register_user(client, base_url, &username, "secret").await?;
    let token = login_user(client, base_url, &username, "secret").await?;
    Ok((username, token))
}
