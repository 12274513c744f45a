//! CLI integration tests against the file-backed store.

mod common;

use std::path::{Path, PathBuf};

use chrono::{Duration, Local};
use tempfile::TempDir;
use url::Url;

use common::{run_cli_with_env, run_cli_with_env_success};

struct Workspace {
    _temp: TempDir,
    root: PathBuf,
    home: PathBuf,
    api: String,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let home = root.join("home");
        std::fs::create_dir_all(&home).unwrap();
        let api = Url::from_directory_path(root.join("store"))
            .expect("Failed to convert path to file URL")
            .to_string();
        Self {
            _temp: temp,
            root,
            home,
            api,
        }
    }

    fn run(&self, args: &[&str]) -> String {
        run_cli_with_env_success(args, &self.home, &self.api)
    }

    fn fails(&self, args: &[&str]) -> String {
        let output = run_cli_with_env(args, &self.home, &self.api);
        assert!(!output.status.success(), "expected {:?} to fail", args);
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    fn account(&self, login: &str, role: &str) {
        self.run(&["create-account", login, "--password", "secret", "--role", role]);
    }

    fn login(&self, login: &str) {
        self.run(&["login", "--login", login, "--password", "secret"]);
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is not JSON")
}

fn as_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_login_whoami_logout() {
    let ws = Workspace::new();
    ws.account("admin", "admin");

    let stdout = ws.run(&["login", "--login", "admin", "--password", "secret"]);
    assert!(stdout.contains("Logged in successfully"));

    let stdout = ws.run(&["whoami"]);
    assert!(stdout.contains("admin"));
    assert!(stdout.contains(&ws.api.trim_end_matches('/').to_string()));

    let stdout = ws.run(&["logout"]);
    assert!(stdout.contains("Logged out"));

    let stderr = ws.fails(&["whoami"]);
    assert!(stderr.contains("pairlab login"));
}

#[test]
fn test_wrong_password_is_rejected() {
    let ws = Workspace::new();
    ws.account("admin", "admin");

    let stderr = ws.fails(&["login", "--login", "admin", "--password", "wrong"]);
    assert!(stderr.contains("Failed to login"));
}

#[test]
fn test_user_cannot_administer() {
    let ws = Workspace::new();
    ws.account("amartin", "user");
    ws.login("amartin");

    ws.fails(&["datasets", "list"]);
    ws.fails(&["annotators", "list"]);

    let output = run_cli_with_env(&["tasks", "list"], &ws.home, &ws.api);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No tasks assigned"));
}

#[test]
fn test_annotator_management() {
    let ws = Workspace::new();
    ws.account("admin", "admin");
    ws.login("admin");

    ws.run(&[
        "annotators", "add", "--login", "amartin", "--first-name", "Alice", "--last-name", "Martin",
    ]);
    ws.run(&[
        "annotators", "add", "--login", "bdupont", "--first-name", "Bob", "--last-name", "Dupont",
    ]);

    let stdout = ws.run(&["annotators", "list", "--search", "martin"]);
    assert!(stdout.contains("amartin"));
    assert!(!stdout.contains("bdupont"));

    ws.run(&["annotators", "edit", "2", "--first-name", "Robert"]);
    ws.run(&["annotators", "delete", "1"]);

    let stdout = ws.run(&["annotators", "list", "--status", "active"]);
    assert!(stdout.contains("Robert"));
    assert!(!stdout.contains("amartin"));

    let stdout = ws.run(&["annotators", "stats", "--json"]);
    let stats = json(&stdout);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["inactive"], 1);
}

#[test]
fn test_dataset_assignment_and_annotation() {
    let ws = Workspace::new();
    ws.account("admin", "admin");
    for user in ["amartin", "bdupont", "cdurand"] {
        ws.account(user, "user");
    }
    ws.login("admin");

    let pairs = ws.path("pairs.tsv");
    std::fs::write(&pairs, "text_1\ttext_2\ngood\tgreat\nbad\tawful\nok\tfine\n").unwrap();
    ws.run(&[
        "datasets",
        "create",
        "--name",
        "Reviews",
        "--description",
        "Product reviews",
        "--classes",
        "same, different",
        "--file",
        as_str(&pairs),
    ]);

    let stdout = ws.run(&["datasets", "list"]);
    assert!(stdout.contains("Reviews"));
    assert!(stdout.contains("Unassigned"));

    // Without annotators, assign lists the candidates.
    let stdout = ws.run(&["datasets", "assign", "1"]);
    assert!(stdout.contains("amartin"));

    let deadline = (Local::now().date_naive() + Duration::days(7)).to_string();
    ws.run(&[
        "datasets", "assign", "1", "--annotator", "1", "--annotator", "2", "--annotator", "3",
        "--deadline", &deadline,
    ]);

    let stdout = ws.run(&["datasets", "list", "--status", "in-progress"]);
    assert!(stdout.contains("Reviews"));

    ws.login("amartin");
    let tasks = json(&ws.run(&["tasks", "list", "--json"]));
    let task_id = tasks["tasks"][0]["id"].as_i64().unwrap().to_string();

    let stdout = ws.run(&["tasks", "classes", &task_id]);
    assert!(stdout.contains("same"));
    assert!(stdout.contains("different"));

    let couple = json(&ws.run(&["tasks", "show", &task_id, "--json"]));
    let couple_id = couple["currentCouple"]["id"].as_i64().unwrap().to_string();

    let stdout = ws.run(&[
        "tasks", "annotate", &task_id, "--couple", &couple_id, "--class", "same",
    ]);
    assert!(stdout.contains("annotated as 'same'"));

    let tasks = json(&ws.run(&["tasks", "list", "--json"]));
    assert_eq!(tasks["taskProgressMap"][&task_id], 100.0);

    let stderr = ws.fails(&[
        "tasks", "annotate", &task_id, "--couple", &couple_id, "--class", "maybe",
    ]);
    assert!(stderr.contains("Failed to submit annotation"));
}

#[test]
fn test_assignment_rejects_unknown_annotators() {
    let ws = Workspace::new();
    ws.account("admin", "admin");
    ws.account("amartin", "user");
    ws.login("admin");

    let pairs = ws.path("pairs.csv");
    std::fs::write(&pairs, "a,b\nc,d\n").unwrap();
    ws.run(&[
        "datasets", "create", "--name", "Small", "--description", "Two pairs", "--classes", "x,y",
        "--file", as_str(&pairs),
    ]);

    let deadline = (Local::now().date_naive() + Duration::days(7)).to_string();
    let stderr = ws.fails(&[
        "datasets", "assign", "1", "--annotator", "1", "--annotator", "8", "--annotator", "9",
        "--deadline", &deadline,
    ]);
    assert!(stderr.contains("Not active annotators: 8, 9"));
}
