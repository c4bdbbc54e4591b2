//! Host machine description for the report header
//!
//! Collection is best effort. Missing fields become `Unknown`, and a machine
//! whose metadata source cannot be read at all is described as `Unknown`.

use std::fs;
use std::num::NonZeroUsize;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::constants::report::UNKNOWN;

static CHIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Chip: (.+)").expect("chip pattern is valid"));

static PROCESSOR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Processor Name: (.+)").expect("processor pattern is valid"));

static MEMORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Memory: (.+)").expect("memory pattern is valid"));

static CORES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Total Number of Cores: (.+)").expect("cores pattern is valid")
});

/// How long `system_profiler` may take
const PROFILER_TIMEOUT: Duration = Duration::from_secs(30);

/// Human readable summary of the host hardware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineProfile {
    pub description: String,
}

impl MachineProfile {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN)
    }

    /// Describe the current machine. Never fails.
    pub async fn collect() -> Self {
        let profile = if cfg!(target_os = "macos") {
            Self::from_system_profiler_command().await
        } else if cfg!(target_os = "linux") {
            Self::from_proc_files()
        } else {
            None
        };

        profile.unwrap_or_else(|| {
            warn!("Could not collect machine metadata, describing host as {}", UNKNOWN);
            Self::unknown()
        })
    }

    /// Parse `system_profiler SPHardwareDataType` output
    pub fn from_system_profiler(output: &str) -> Self {
        let chip = scrape(&CHIP, output).or_else(|| scrape(&PROCESSOR_NAME, output));
        let memory = scrape(&MEMORY, output);
        let cores = scrape(&CORES, output);

        Self::new(describe(chip, cores, memory))
    }

    /// Parse the contents of `/proc/cpuinfo` and `/proc/meminfo`
    pub fn from_proc(cpuinfo: &str, meminfo: &str, cores: Option<usize>) -> Self {
        let chip = proc_field(cpuinfo, "model name").map(str::to_string);

        let memory = proc_field(meminfo, "MemTotal")
            .and_then(|value| value.split_whitespace().next())
            .and_then(|kb| kb.parse::<u64>().ok())
            .map(|kb| format!("{} GB", (kb + 512 * 1024) / (1024 * 1024)));

        Self::new(describe(chip, cores.map(|c| c.to_string()), memory))
    }

    async fn from_system_profiler_command() -> Option<Self> {
        let output = timeout(
            PROFILER_TIMEOUT,
            Command::new("system_profiler")
                .arg("SPHardwareDataType")
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        match output {
            Ok(Ok(output)) => Some(Self::from_system_profiler(&String::from_utf8_lossy(
                &output.stdout,
            ))),
            Ok(Err(e)) => {
                debug!(error = %e, "Failed to run system_profiler");
                None
            }
            Err(_) => {
                debug!("system_profiler timed out");
                None
            }
        }
    }

    fn from_proc_files() -> Option<Self> {
        let cpuinfo = fs::read_to_string("/proc/cpuinfo").ok();
        let meminfo = fs::read_to_string("/proc/meminfo").ok();

        if cpuinfo.is_none() && meminfo.is_none() {
            return None;
        }

        let cores = std::thread::available_parallelism()
            .ok()
            .map(NonZeroUsize::get);

        Some(Self::from_proc(
            cpuinfo.as_deref().unwrap_or_default(),
            meminfo.as_deref().unwrap_or_default(),
            cores,
        ))
    }
}

fn describe(chip: Option<String>, cores: Option<String>, memory: Option<String>) -> String {
    let or_unknown = |field: Option<String>| field.unwrap_or_else(|| UNKNOWN.to_string());

    format!(
        "{}, {} cores, {} RAM",
        or_unknown(chip),
        or_unknown(cores),
        or_unknown(memory)
    )
}

fn scrape(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Value of the first `key : value` line in a /proc file
fn proc_field<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    contents
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim() == key)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE_SILICON: &str = "Hardware:

    Hardware Overview:

      Model Name: MacBook Pro
      Model Identifier: Mac14,9
      Chip: Apple M2 Pro
      Total Number of Cores: 10 (6 performance and 4 efficiency)
      Memory: 16 GB
      System Firmware Version: 10151.81.1
";

    #[test]
    fn test_from_system_profiler() {
        let profile = MachineProfile::from_system_profiler(APPLE_SILICON);
        assert_eq!(
            profile.description,
            "Apple M2 Pro, 10 (6 performance and 4 efficiency) cores, 16 GB RAM"
        );
    }

    #[test]
    fn test_from_system_profiler_intel() {
        let output = "Processor Name: 6-Core Intel Core i7\nTotal Number of Cores: 6\nMemory: 32 GB\n";
        let profile = MachineProfile::from_system_profiler(output);
        assert_eq!(profile.description, "6-Core Intel Core i7, 6 cores, 32 GB RAM");
    }

    #[test]
    fn test_missing_fields_are_unknown() {
        let profile = MachineProfile::from_system_profiler("Memory: 8 GB\n");
        assert_eq!(profile.description, "Unknown, Unknown cores, 8 GB RAM");
    }

    #[test]
    fn test_from_proc() {
        let cpuinfo = "processor\t: 0\nmodel name\t: AMD Ryzen 9 7950X 16-Core Processor\n";
        let meminfo = "MemTotal:       65536000 kB\nMemFree:        1000 kB\n";
        let profile = MachineProfile::from_proc(cpuinfo, meminfo, Some(32));
        assert_eq!(
            profile.description,
            "AMD Ryzen 9 7950X 16-Core Processor, 32 cores, 63 GB RAM"
        );
    }

    #[test]
    fn test_collect_never_fails() {
        let profile = tokio_test::block_on(MachineProfile::collect());
        assert!(!profile.description.is_empty());
    }

    #[test]
    fn test_from_proc_empty() {
        let profile = MachineProfile::from_proc("", "", None);
        assert_eq!(profile.description, "Unknown, Unknown cores, Unknown RAM");
    }
}
