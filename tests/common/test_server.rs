use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use tempfile::TempDir;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "integration-test-password";
pub const SIGNING_KEY: &str = "integration-test-signing-key";

pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    server_process: Option<Child>,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let data_dir = temp_dir.path().join("data");
        let content_dir = temp_dir.path().join("posts");
        let site_dir = temp_dir.path().join("site");
        std::fs::create_dir_all(&site_dir).expect("create site dir");

        let binary = env!("CARGO_BIN_EXE_scrivener");

        let init_output = Command::new(binary)
            .args([
                "admin",
                "init",
                "--non-interactive",
                "--username",
                ADMIN_USERNAME,
                "--password",
                ADMIN_PASSWORD,
                "--data-dir",
            ])
            .arg(&data_dir)
            .output()
            .expect("run init");
        assert!(init_output.status.success(), "Failed to initialize database");

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let base_url = format!("http://127.0.0.1:{}", port);

        let server_process = Command::new(binary)
            .args(["serve", "--host", "127.0.0.1", "--port"])
            .arg(port.to_string())
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--content-dir")
            .arg(&content_dir)
            .arg("--site-dir")
            .arg(&site_dir)
            .env("SCRIVENER_SECRET_KEY", SIGNING_KEY)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("start server");

        Self::wait_for_ready(&base_url).await;

        Self {
            temp_dir,
            base_url,
            server_process: Some(server_process),
        }
    }

    async fn wait_for_ready(base_url: &str) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", base_url))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("Server did not become ready");
    }

    pub fn content_dir(&self) -> PathBuf {
        self.temp_dir.path().join("posts")
    }

    /// Logs in with the provisioned admin account and returns a bearer token.
    pub async fn login(&self) -> String {
        let client = reqwest::Client::new();
        let resp: serde_json::Value = client
            .post(format!("{}/token", self.base_url))
            .form(&[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
            .send()
            .await
            .expect("login")
            .json()
            .await
            .expect("parse login response");

        resp["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(mut process) = self.server_process.take() {
            let _ = process.kill();
            let _ = process.wait();
        }
    }
}
