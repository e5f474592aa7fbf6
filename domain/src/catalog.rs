//! Canned problem statements
//!
//! The demo ships with a handful of predefined problems so a debate can be
//! started from a short key instead of pasting a paragraph.

use crate::core::error::DomainError;
use crate::core::problem::ProblemStatement;
use serde::Serialize;

/// A predefined problem the panel can be asked to debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CannedProblem {
    pub id: &'static str,
    pub title: &'static str,
    pub statement: &'static str,
}

const PROBLEMS: &[CannedProblem] = &[
    CannedProblem {
        id: "mars_currency",
        title: "Mars Digital Currency",
        statement: "Design a digital currency system for a Mars colony that must settle \
                    payments with Earth and the Moon base despite light-delay latencies of \
                    up to 22 minutes, intermittent connectivity during solar conjunction, and \
                    a population that grows from 100 to 1 million settlers.",
    },
    CannedProblem {
        id: "air_taxi_pollution",
        title: "Clean-Air Taxi Fleet",
        statement: "How to use AWS technology to build a movable air device like clear-air \
                    taxi to bring down air pollution? Consider: real-time air quality \
                    monitoring, route optimization for minimal emissions, fleet management at \
                    scale, predictive maintenance, and AWS IoT and analytics services.",
    },
    CannedProblem {
        id: "personal_air_taxi",
        title: "Personal Air Taxi Platform",
        statement: "Build the booking, dispatch and air-traffic coordination platform for a \
                    personal air taxi service operating in 50 cities, with sub-second \
                    collision avoidance updates, dynamic pricing, regulatory audit trails and \
                    a mobile app that must work during network handoffs mid-flight.",
    },
];

/// Lookup over the built-in problems
pub struct ProblemCatalog;

impl ProblemCatalog {
    /// All canned problems in display order.
    pub fn all() -> &'static [CannedProblem] {
        PROBLEMS
    }

    /// Find a canned problem by id.
    pub fn get(id: &str) -> Option<&'static CannedProblem> {
        PROBLEMS.iter().find(|p| p.id == id)
    }

    /// Resolve a key into a validated problem statement.
    pub fn resolve(id: &str) -> Result<ProblemStatement, DomainError> {
        let problem = Self::get(id).ok_or_else(|| DomainError::UnknownProblem(id.to_string()))?;
        ProblemStatement::new(problem.statement)
    }
}
