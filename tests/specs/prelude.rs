//! Shared helpers for CLI specs.
//!
//! Each [`Project`] is a temp directory; the CLI runs inside it so the
//! default `.scholar` ledger directory lands there.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The exam date used across scenarios
pub const EXAM_DATE: &str = "2024-06-01T10:00:00Z";
/// Before the exam takes place
pub const BEFORE_EXAM: &str = "2024-05-31T10:00:00Z";
/// Inside the default 24h correction window
pub const DURING_WINDOW: &str = "2024-06-02T09:59:59Z";
/// Once the default correction window has opened
pub const AFTER_WINDOW: &str = "2024-06-02T10:00:00Z";

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> PathBuf {
        self.path().join(".scholar")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    /// Bare `scholar` invocation
    pub fn scholar(&self) -> CliBuilder {
        CliBuilder::new(self.path(), vec![])
    }

    /// `scholar invoke` as a member of the institution
    pub fn institution(&self, subject: &str) -> CliBuilder {
        self.invoke("InstitutionMSP", subject)
    }

    /// `scholar invoke` as a learner
    pub fn learner(&self, subject: &str) -> CliBuilder {
        self.invoke("LearnerMSP", subject)
    }

    pub fn invoke(&self, org: &str, subject: &str) -> CliBuilder {
        CliBuilder::new(
            self.path(),
            vec!["invoke", "--org", org, "--subject", subject],
        )
    }

    /// Seed the scenario most specs build on: class C1 with module M1,
    /// alice enrolled, exam E1 on [`EXAM_DATE`].
    pub fn with_exam(&self) {
        let prof = || self.institution("prof").at(BEFORE_EXAM);
        prof().args(&["CreateClass", "C1", "Algebra", "Linear algebra"]).passes();
        prof().args(&["AddModule", "C1", "M1"]).passes();
        prof().args(&["EnrollStudent", "C1", "alice"]).passes();
        prof()
            .args(&["CreateExam", "E1", "C1", "M1", "Midterm", EXAM_DATE, "ipfs://exam"])
            .passes();
    }
}

pub struct CliBuilder {
    cwd: PathBuf,
    head: Vec<String>,
    options: Vec<String>,
    args: Vec<String>,
}

impl CliBuilder {
    fn new(cwd: &Path, head: Vec<&str>) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            head: head.into_iter().map(String::from).collect(),
            options: vec![],
            args: vec![],
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    /// Run the operation at a fixed instant
    pub fn at(mut self, timestamp: &str) -> Self {
        self.options.extend(["--at".to_string(), timestamp.to_string()]);
        self
    }

    pub fn json(mut self) -> Self {
        self.options
            .extend(["--output".to_string(), "json".to_string()]);
        self
    }

    fn run(self) -> RunAssert {
        let mut cmd = Command::cargo_bin("scholar").unwrap();
        cmd.current_dir(&self.cwd)
            .env_remove("RUST_LOG")
            .args(&self.head)
            .args(&self.options)
            .args(&self.args);
        let output = cmd.output().unwrap();
        RunAssert { output }
    }

    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }

    /// Fail with the given exit status
    pub fn exits(self, code: i32) -> RunAssert {
        let run = self.fails();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "stderr:\n{}",
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "{:?} not in stdout:\n{}", needle, stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "{:?} not in stderr:\n{}", needle, stderr);
        self
    }
}
