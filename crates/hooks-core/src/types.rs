use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// The six ontology dimensions every documentation artifact files under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Groups,
    People,
    Things,
    Connections,
    Events,
    Knowledge,
}

impl Dimension {
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Groups,
            Dimension::People,
            Dimension::Things,
            Dimension::Connections,
            Dimension::Events,
            Dimension::Knowledge,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Groups => "groups",
            Dimension::People => "people",
            Dimension::Things => "things",
            Dimension::Connections => "connections",
            Dimension::Events => "events",
            Dimension::Knowledge => "knowledge",
        }
    }

    /// One-line description used in reports and guidance output.
    pub fn describe(self) -> &'static str {
        match self {
            Dimension::Groups => "Hierarchical containers for collaboration",
            Dimension::People => "Authorization & governance",
            Dimension::Things => "All entities (users, agents, content)",
            Dimension::Connections => "All relationships between entities",
            Dimension::Events => "All actions and state changes",
            Dimension::Knowledge => "Labels, embeddings, and semantic search",
        }
    }

    /// Label attached to classified artifacts, e.g. `dimension-things`.
    pub fn label(self) -> String {
        format!("dimension-{}", self.as_str())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = crate::error::HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groups" => Ok(Dimension::Groups),
            "people" => Ok(Dimension::People),
            "things" => Ok(Dimension::Things),
            "connections" => Ok(Dimension::Connections),
            "events" => Ok(Dimension::Events),
            "knowledge" => Ok(Dimension::Knowledge),
            _ => Err(crate::error::HookError::InvalidDimension(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

/// Coarse kind of a file, derived from its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Code,
    Documentation,
    Design,
    Test,
    Config,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Code => "code",
            ArtifactKind::Documentation => "documentation",
            ArtifactKind::Design => "design",
            ArtifactKind::Test => "test",
            ArtifactKind::Config => "config",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = crate::error::HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(ArtifactKind::Code),
            "documentation" => Ok(ArtifactKind::Documentation),
            "design" => Ok(ArtifactKind::Design),
            "test" => Ok(ArtifactKind::Test),
            "config" => Ok(ArtifactKind::Config),
            _ => Err(crate::error::HookError::InvalidArtifactKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Specialist
// ---------------------------------------------------------------------------

/// The agent role responsible for a cycle of the 100-cycle plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialist {
    Director,
    Backend,
    Frontend,
    Integration,
    Quality,
    Designer,
    Ops,
    Documenter,
}

impl Specialist {
    pub fn as_str(self) -> &'static str {
        match self {
            Specialist::Director => "director",
            Specialist::Backend => "backend",
            Specialist::Frontend => "frontend",
            Specialist::Integration => "integration",
            Specialist::Quality => "quality",
            Specialist::Designer => "designer",
            Specialist::Ops => "ops",
            Specialist::Documenter => "documenter",
        }
    }
}

impl fmt::Display for Specialist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Finding severity. `Error` findings can block (policy), `Warning` findings
/// never do (advisory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
