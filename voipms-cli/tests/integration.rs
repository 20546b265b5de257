use assert_cmd::Command;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::TempDir;

fn voipms() -> Command {
    let mut cmd = Command::cargo_bin("voipms").unwrap();
    cmd.env_remove("VOIPMS_API_USERNAME")
        .env_remove("VOIPMS_API_PASSWORD")
        .env_remove("VOIPMS_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn secrets_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("VOIPMS_API_USERNAME"), "alice@example.com\n").unwrap();
    fs::write(dir.path().join("VOIPMS_API_PASSWORD"), "s3cret\n").unwrap();
    dir
}

/// Answers `bodies.len()` requests in order and returns their request lines.
fn stub_server(bodies: Vec<&'static str>) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let mut lines = Vec::new();
        for body in bodies {
            let (mut sock, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = sock.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let head = String::from_utf8_lossy(&buf).into_owned();
            lines.push(head.lines().next().unwrap_or_default().to_string());
            let resp = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            sock.write_all(resp.as_bytes()).unwrap();
        }
        lines
    });
    (base, handle)
}

#[test]
fn describe_node_prints_schema() {
    let out = voipms()
        .args(["describe", "node", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["name"], "voipMs");
    assert_eq!(v["credentials"][0]["name"], "voipMsApi");
}

#[test]
fn describe_credentials_lists_three_fields() {
    let out = voipms()
        .args(["describe", "credentials", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let names: Vec<_> = v["properties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["apiUsername", "apiPassword", "baseUrl"]);
}

#[test]
fn validate_accepts_a_good_batch() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("items.yaml");
    fs::write(
        &path,
        r#"
- resource: account
  operation: getBalance
- resource: sms
  operation: sendSMS
  source: "5551234567"
  destination: "5557654321"
  message: hello
"#,
    )
    .unwrap();

    voipms().args(["validate", path.to_str().unwrap()]).assert().success();
}

#[test]
fn validate_rejects_unsupported_pair() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("items.json");
    fs::write(&path, r#"[{"resource":"did","operation":"sendSMS"}]"#).unwrap();

    voipms()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn validate_rejects_unparseable_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("items.yaml");
    fs::write(&path, "invalid: yaml: content").unwrap();

    voipms()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn execute_without_credentials_is_a_run_failure() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("items.json");
    fs::write(&path, r#"[{"resource":"account","operation":"getBalance"}]"#).unwrap();

    let out = voipms()
        .args(["execute", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&out).contains("No credentials got returned!"));
}

#[test]
fn unknown_secrets_provider_is_a_runtime_error() {
    voipms()
        .args(["balance", "--secrets", "vault"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn execute_runs_batch_against_base_url() {
    let (base, server) = stub_server(vec![
        r#"{"status":"success","balance":{"balance":"10.00"}}"#,
        r#"{"status":"success","dids":[]}"#,
    ]);
    let secrets = secrets_dir();
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("items.json");
    fs::write(
        &path,
        r#"[{"resource":"account","operation":"getBalance"},{"resource":"did","operation":"listDIDs"}]"#,
    )
    .unwrap();

    let out = voipms()
        .args([
            "execute",
            path.to_str().unwrap(),
            "--secrets",
            &format!("file:{}", secrets.path().display()),
            "--base-url",
            &base,
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        v,
        serde_json::json!([
            {"status":"success","balance":{"balance":"10.00"}},
            {"status":"success","dids":[]}
        ])
    );

    let lines = server.join().unwrap();
    assert!(lines[0].contains("method=getBalance"), "{}", lines[0]);
    assert!(lines[1].contains("method=getDIDs"), "{}", lines[1]);
}

#[test]
fn send_sms_with_bad_number_fails_preflight() {
    voipms()
        .args([
            "send-sms",
            "--source",
            "not-a-number",
            "--destination",
            "5557654321",
            "--message",
            "hi",
        ])
        .assert()
        .failure()
        .code(2);
}
