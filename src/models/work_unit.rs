//! Work unit model
//!
//! A work unit is one day's solution program. The full table is resolved from
//! configuration before anything runs and never changes afterwards.

use serde::{Deserialize, Serialize};

use crate::{
    config::UnitConfig,
    constants::{DAY_PLACEHOLDER, ID_PLACEHOLDER},
    error::{AppError, AppResult},
};

/// Resolved launch identity of a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkUnit {
    /// Day number
    pub id: u32,
    /// Executable to launch
    pub program: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
}

impl WorkUnit {
    /// Build a work unit from a command template.
    ///
    /// Use `{day}` (zero-padded) and `{id}` as placeholders. Returns `None` if
    /// the template has no program.
    pub fn from_template(id: u32, template: &str) -> Option<Self> {
        let day = format!("{:02}", id);
        let plain = id.to_string();

        let mut parts = template
            .split_whitespace()
            .map(|part| part.replace(DAY_PLACEHOLDER, &day).replace(ID_PLACEHOLDER, &plain));

        let program = parts.next()?;

        Some(Self {
            id,
            program,
            args: parts.collect(),
        })
    }

    /// Command line as a single string, for logs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Static table of every configured day
#[derive(Debug, Clone, Default)]
pub struct WorkUnitTable {
    units: Vec<WorkUnit>,
}

impl WorkUnitTable {
    /// Resolve every configured day against the command template
    pub fn from_config(config: &UnitConfig) -> AppResult<Self> {
        let units = config
            .days
            .iter()
            .map(|&id| WorkUnit::from_template(id, &config.command).ok_or(AppError::UnknownDay(id)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { units })
    }

    /// Build a table from already resolved units
    pub fn new(mut units: Vec<WorkUnit>) -> Self {
        units.sort_by_key(|u| u.id);
        units.dedup_by_key(|u| u.id);
        Self { units }
    }

    /// Look up a single day
    pub fn get(&self, id: u32) -> AppResult<&WorkUnit> {
        self.units
            .iter()
            .find(|u| u.id == id)
            .ok_or(AppError::UnknownDay(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
