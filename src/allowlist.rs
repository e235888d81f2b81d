//! Known-safe experimental compiler argument allowlists
//!
//! An allowlist names the experimental arguments pre-vetted for a compiler
//! release. It is external configuration: loaded once from a TOML file (or
//! from the built-in defaults), read-only afterwards, and injected into the
//! classifier as a plain value. Membership is exact string equality: two
//! flags can share a long common prefix while only one of them is vetted.
//!
//! # Example flagward.toml
//!
//! ```toml
//! compiler_version = "1.4.31"
//! arguments = [
//!     "-XXLanguage:+DisableCompatibilityModeForNewInference",
//! ]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Experimental language switches the build tooling itself enables.
/// Used when no allowlist file is configured.
pub const DEFAULT_KNOWN_SAFE_ARGUMENTS: &[&str] = &[
    "-XXLanguage:+DisableCompatibilityModeForNewInference",
    "-XXLanguage:+SamConversionForKotlinFunctions",
];

/// Errors that can occur while loading an allowlist file
#[derive(Error, Debug)]
pub enum AllowlistError {
    #[error("Failed to read allowlist {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse allowlist: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk shape of an allowlist file
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct AllowlistFile {
    /// Compiler release the arguments were vetted against (informational)
    #[serde(default)]
    compiler_version: Option<String>,

    /// The known-safe experimental arguments
    #[serde(default)]
    arguments: Vec<String>,
}

/// Read-only set of known-safe experimental compiler arguments
#[derive(Debug, Clone)]
pub struct Allowlist {
    arguments: HashSet<String>,
    compiler_version: Option<String>,
    source: String,
}

impl Allowlist {
    /// Allowlist of the built-in known-safe arguments
    pub fn built_in() -> Self {
        Self {
            arguments: DEFAULT_KNOWN_SAFE_ARGUMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            compiler_version: None,
            source: "built-in".to_string(),
        }
    }

    /// Build an allowlist from explicit argument values
    pub fn from_arguments<I, S>(arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
            compiler_version: None,
            source: "inline".to_string(),
        }
    }

    /// Load an allowlist from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AllowlistError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AllowlistError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut allowlist = Self::from_toml_str(&content)?;
        allowlist.source = path.display().to_string();
        Ok(allowlist)
    }

    /// Load an allowlist from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, AllowlistError> {
        let file: AllowlistFile = toml::from_str(content)?;
        Ok(Self {
            arguments: file.arguments.into_iter().collect(),
            compiler_version: file.compiler_version,
            source: "inline".to_string(),
        })
    }

    /// Exact-match membership test. No prefix matching, no case folding.
    pub fn contains(&self, argument: &str) -> bool {
        self.arguments.contains(argument)
    }

    /// Number of allowlisted arguments
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// True when no arguments are allowlisted
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Compiler release this allowlist was vetted against, if recorded
    pub fn compiler_version(&self) -> Option<&str> {
        self.compiler_version.as_deref()
    }

    /// Where this allowlist came from ("built-in", "inline", or a file path)
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::built_in()
    }
}
