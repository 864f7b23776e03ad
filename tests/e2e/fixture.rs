//! E2E test fixture with step logging.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

const FIXTURE_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog");

/// Catalog table file names, as the loader expects them.
pub const CATALOG_FILES: [&str; 3] = ["products_main.csv", "product_tags.csv", "product_colors.csv"];

/// E2E test fixture providing an isolated catalog and output directory.
pub struct E2EFixture {
    /// Test scenario name
    pub scenario_name: String,
    /// Root temp directory
    pub temp_dir: TempDir,
    /// Working directory for every command (temp_dir path)
    pub root: PathBuf,
    /// Catalog tables (./data)
    pub data_dir: PathBuf,
    /// Saved recommendations (./recommendations)
    pub output_dir: PathBuf,
    start_time: Instant,
    step_count: usize,
}

impl E2EFixture {
    /// Create a fixture whose data directory holds a copy of the shared
    /// test catalog.
    pub fn new(scenario_name: &str) -> Self {
        let fixture = Self::empty(scenario_name);
        std::fs::create_dir_all(&fixture.data_dir).expect("Failed to create data dir");
        for file in CATALOG_FILES {
            std::fs::copy(Path::new(FIXTURE_DATA).join(file), fixture.data_dir.join(file))
                .expect("Failed to copy catalog table");
        }
        fixture
    }

    /// Create a fixture with no catalog tables.
    pub fn empty(scenario_name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let data_dir = root.join("data");
        let output_dir = root.join("recommendations");

        println!();
        println!("{}", "█".repeat(70));
        println!("█ E2E SCENARIO: {scenario_name}");
        println!("{}", "█".repeat(70));
        println!();
        println!("[E2E] Root: {root:?}");
        println!("[E2E] Data: {data_dir:?}");
        println!("[E2E] Output: {output_dir:?}");
        println!();

        Self {
            scenario_name: scenario_name.to_string(),
            temp_dir,
            root,
            data_dir,
            output_dir,
            start_time: Instant::now(),
            step_count: 0,
        }
    }

    /// Log a step in the E2E workflow.
    pub fn log_step(&mut self, description: &str) {
        self.step_count += 1;
        let elapsed = self.start_time.elapsed();

        println!();
        println!("┌{}", "─".repeat(68));
        println!("│ STEP {}: {}", self.step_count, description);
        println!("│ Time: {elapsed:?}");
        println!("└{}", "─".repeat(68));
    }

    /// Replace one catalog table.
    pub fn write_table(&self, file: &str, content: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join(file), content).expect("Failed to write table");
        println!("[E2E] Wrote {file} ({} bytes)", content.len());
    }

    pub fn remove_table(&self, file: &str) {
        std::fs::remove_file(self.data_dir.join(file)).expect("Failed to remove table");
        println!("[E2E] Removed {file}");
    }

    /// Run cosmorec with the fixture's data and output directories.
    pub fn run_cosmorec(&self, args: &[&str]) -> CommandOutput {
        self.run_cosmorec_with_input(args, "")
    }

    /// Run cosmorec feeding `input` on stdin.
    pub fn run_cosmorec_with_input(&self, args: &[&str], input: &str) -> CommandOutput {
        let start = Instant::now();
        println!();
        println!("[CMD] cosmorec {}", args.join(" "));
        if !input.is_empty() {
            println!("[STDIN] {:?}", input);
        }

        let mut child = Command::new(env!("CARGO_BIN_EXE_cosmorec"))
            .arg("--data")
            .arg(&self.data_dir)
            .arg("--output")
            .arg(&self.output_dir)
            .args(args)
            .env("HOME", &self.root)
            .env("XDG_CONFIG_HOME", self.root.join(".config"))
            .env_remove("COSMOREC_CONFIG")
            .env_remove("RUST_LOG")
            .current_dir(&self.root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn cosmorec");

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .expect("Failed to write stdin");
        }

        let output = child.wait_with_output().expect("Failed to wait for cosmorec");
        let result = CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            elapsed: start.elapsed(),
        };

        println!("[CMD] Exit: {} in {:?}", result.exit_code, result.elapsed);
        println!("[STDOUT]\n{}", truncate(&result.stdout, 2000));
        if !result.stderr.is_empty() {
            println!("[STDERR]\n{}", truncate(&result.stderr, 1000));
        }
        result
    }

    /// Files written to the output directory, sorted by name.
    pub fn saved_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(&self.output_dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files
    }

    /// Assert command succeeded.
    pub fn assert_success(&self, output: &CommandOutput, operation: &str) {
        assert!(
            output.success,
            "[E2E] {} failed with exit code {}: {}",
            operation, output.exit_code, output.stderr
        );
        println!("[ASSERT] {operation} - SUCCESS");
    }

    /// Assert stdout or stderr contains expected text.
    pub fn assert_output_contains(&self, output: &CommandOutput, expected: &str) {
        let found = output.stdout.contains(expected) || output.stderr.contains(expected);
        assert!(
            found,
            "[E2E] Output does not contain '{}'\nStdout: {}\nStderr: {}",
            expected,
            truncate(&output.stdout, 2000),
            truncate(&output.stderr, 500)
        );
        println!("[ASSERT] Output contains '{expected}' - PASSED");
    }

    /// Assert output does not contain text.
    pub fn assert_output_not_contains(&self, output: &CommandOutput, unexpected: &str) {
        let found = output.stdout.contains(unexpected) || output.stderr.contains(unexpected);
        assert!(
            !found,
            "[E2E] Output unexpectedly contains '{}'\nStdout: {}\nStderr: {}",
            unexpected,
            truncate(&output.stdout, 2000),
            truncate(&output.stderr, 500)
        );
        println!("[ASSERT] Output does not contain '{unexpected}' - PASSED");
    }
}

impl Drop for E2EFixture {
    fn drop(&mut self) {
        let elapsed = self.start_time.elapsed();
        println!();
        println!("{}", "█".repeat(70));
        println!("█ E2E CLEANUP: {}", self.scenario_name);
        println!("█ Steps: {} in {:?}", self.step_count, elapsed);
        println!("█ Temp dir: {:?}", self.temp_dir.path());
        println!("{}", "█".repeat(70));
    }
}

/// Command output structure.
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl CommandOutput {
    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout should be valid JSON")
    }
}

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
