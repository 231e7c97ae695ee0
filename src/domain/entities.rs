//! Domain entities: node payloads and the per-kind duty texts

use std::fmt;

use serde::{Deserialize, Serialize};

/// Leaf subtype. Each department carries a fixed responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    HumanResources,
    Finance,
}

impl Department {
    /// Fixed responsibility of this department kind.
    pub fn duty(&self) -> &'static str {
        match self {
            Department::HumanResources => "handles recruitment and payroll",
            Department::Finance => "handles financial management",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Department::HumanResources => write!(f, "human resources"),
            Department::Finance => write!(f, "finance"),
        }
    }
}

/// Responsibility text used for every composite.
pub const COORDINATION_DUTY: &str = "coordinates all company affairs";

/// Role-specific description of a node, as emitted by the duty traversal.
pub fn duty_line(name: &str, duty: &str) -> String {
    format!("{}, {}.", name, duty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_departments_when_asking_duty_then_texts_differ() {
        assert_ne!(Department::HumanResources.duty(), Department::Finance.duty());
    }

    #[test]
    fn given_name_and_duty_when_formatting_then_joins_with_comma() {
        assert_eq!(
            duty_line("Finance", Department::Finance.duty()),
            "Finance, handles financial management."
        );
    }
}
