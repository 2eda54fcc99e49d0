//! Fake port implementations shared by the unit tests.

#![allow(dead_code, clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use medcompare_cli::application::ports::{CommandRunner, LocalFs, ProgressReporter};

use crate::helpers::{exit_status, ok_output};

/// One recorded `run_status` call.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl Invocation {
    pub fn env(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

enum Scripted {
    Exit(i32),
    SpawnError(std::io::ErrorKind),
}

/// Records every foreground invocation and answers with scripted statuses.
///
/// Commands are matched by the first argument that follows `-m pip install`,
/// or by program name; anything unscripted exits 0.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    probes: Mutex<Vec<String>>,
    scripted: Mutex<HashMap<String, Scripted>>,
    probe_output: Option<Output>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make invocations whose rendered command line contains `needle` exit with `code`.
    pub fn exit_with(self, needle: &str, code: i32) -> Self {
        self.scripted
            .lock()
            .expect("lock")
            .insert(needle.to_string(), Scripted::Exit(code));
        self
    }

    /// Make invocations whose rendered command line contains `needle` fail to spawn.
    pub fn spawn_error(self, needle: &str, kind: std::io::ErrorKind) -> Self {
        self.scripted
            .lock()
            .expect("lock")
            .insert(needle.to_string(), Scripted::SpawnError(kind));
        self
    }

    pub fn with_probe_output(mut self, output: Output) -> Self {
        self.probe_output = Some(output);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().expect("lock").clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.probes
            .lock()
            .expect("lock")
            .push(format!("{program} {}", args.join(" ")));
        Ok(self
            .probe_output
            .clone()
            .unwrap_or_else(|| ok_output(b"Python 3.12.3\n")))
    }

    async fn run_with_timeout(&self, program: &str, args: &[&str], _: Duration) -> Result<Output> {
        self.run(program, args).await
    }

    async fn run_status(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> Result<ExitStatus> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            envs: envs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        };
        let line = format!("{program} {}", args.join(" "));
        self.calls.lock().expect("lock").push(invocation);

        let scripted = self.scripted.lock().expect("lock");
        for (needle, outcome) in scripted.iter() {
            if line.contains(needle.as_str()) {
                return match outcome {
                    Scripted::Exit(code) => Ok(exit_status(*code)),
                    Scripted::SpawnError(kind) => Err(anyhow::Error::new(std::io::Error::from(
                        *kind,
                    ))
                    .context(format!("failed to run {program}"))),
                };
            }
        }
        Ok(exit_status(0))
    }
}

/// Filesystem fake backed by a fixed set of existing paths.
#[derive(Default)]
pub struct FakeFs {
    existing: Vec<PathBuf>,
}

impl FakeFs {
    pub fn with(paths: &[&Path]) -> Self {
        Self {
            existing: paths.iter().map(|p| p.to_path_buf()).collect(),
        }
    }
}

impl LocalFs for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path)
    }
}

/// Collects reporter events as `kind: message` strings.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("warn: {message}"));
    }
}
