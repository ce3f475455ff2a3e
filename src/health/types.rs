//! Health report data model.
//!
//! Both types are built fresh for every request and serialized straight into
//! the response body.

use serde::{Deserialize, Serialize};

/// Binary operational status of a dependency or of the whole service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    pub fn is_up(&self) -> bool {
        matches!(self, Status::Up)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Up => "up",
            Status::Down => "down",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finer-grained health descriptor, independent of [`Status`].
///
/// Serializes as `{"health": "healthy"}` or
/// `{"health": "unhealthy", "cause": "..."}`; a cause cannot exist without
/// the unhealthy variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "health", rename_all = "lowercase")]
pub enum Condition {
    Healthy,
    Unhealthy { cause: String },
}

impl Condition {
    pub fn unhealthy(cause: impl Into<String>) -> Self {
        Condition::Unhealthy {
            cause: cause.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Condition::Healthy)
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            Condition::Healthy => None,
            Condition::Unhealthy { cause } => Some(cause),
        }
    }
}

/// Outcome of a single probe invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Dependency identifier (e.g. "database", "redis").
    pub name: String,
    pub status: Status,
    pub condition: Condition,
}

impl ProbeResult {
    /// Dependency is up and healthy.
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Up,
            condition: Condition::Healthy,
        }
    }

    /// Dependency still serves requests but reports an unhealthy condition.
    pub fn degraded(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Up,
            condition: Condition::unhealthy(cause),
        }
    }

    /// Dependency is unusable.
    pub fn down(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Down,
            condition: Condition::unhealthy(cause),
        }
    }
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateHealth {
    /// `down` iff at least one service is down.
    pub status: Status,
    /// One entry per registered probe, in registration order.
    pub services: Vec<ProbeResult>,
    /// Set only when `status` is down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl AggregateHealth {
    pub fn is_up(&self) -> bool {
        self.status.is_up()
    }
}

/// Aggregate cause reported for a failing dependency.
pub fn dependency_down_cause(name: &str) -> String {
    format!("dependent service '{}' is down", name)
}
