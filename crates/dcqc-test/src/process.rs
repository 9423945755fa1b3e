//! Process specifications for external tests.

use crate::error::{TestError, TestResult};
use serde::{Deserialize, Serialize};

const DEFAULT_CPUS: u32 = 1;
const DEFAULT_MEMORY_GB: u32 = 2;

/// A containerized command to be run outside dcqc.
///
/// Arguments may carry their own shell quoting and pipe tokens; the recorded
/// `command` is their space-join and is re-split with shell rules on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ProcessRecord", try_from = "ProcessRecord")]
pub struct Process {
    container: String,
    command_args: Vec<String>,
    cpus: u32,
    memory: u32,
}

impl Process {
    pub fn new<I, S>(container: impl Into<String>, command_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            container: container.into(),
            command_args: command_args.into_iter().map(Into::into).collect(),
            cpus: DEFAULT_CPUS,
            memory: DEFAULT_MEMORY_GB,
        }
    }

    /// Override the resource hints (memory in GB).
    pub fn with_resources(mut self, cpus: u32, memory: u32) -> Self {
        self.cpus = cpus;
        self.memory = memory;
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn command_args(&self) -> &[String] {
        &self.command_args
    }

    /// Space-joined command line.
    pub fn command(&self) -> String {
        self.command_args.join(" ")
    }

    pub fn cpus(&self) -> u32 {
        self.cpus
    }

    pub fn memory(&self) -> u32 {
        self.memory
    }

    /// Rebuild a process from a recorded command line.
    pub fn from_command(
        container: impl Into<String>,
        command: &str,
        cpus: u32,
        memory: u32,
    ) -> TestResult<Self> {
        let command_args =
            shlex::split(command).ok_or_else(|| TestError::InvalidCommand(command.to_string()))?;
        Ok(Self {
            container: container.into(),
            command_args,
            cpus,
            memory,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProcessRecord {
    container: String,
    command: String,
    #[serde(default = "default_cpus")]
    cpus: u32,
    #[serde(default = "default_memory")]
    memory: u32,
}

fn default_cpus() -> u32 {
    DEFAULT_CPUS
}

fn default_memory() -> u32 {
    DEFAULT_MEMORY_GB
}

impl From<Process> for ProcessRecord {
    fn from(process: Process) -> Self {
        Self {
            command: process.command(),
            container: process.container,
            cpus: process.cpus,
            memory: process.memory,
        }
    }
}

impl TryFrom<ProcessRecord> for Process {
    type Error = TestError;

    fn try_from(record: ProcessRecord) -> TestResult<Self> {
        Process::from_command(record.container, &record.command, record.cpus, record.memory)
    }
}
