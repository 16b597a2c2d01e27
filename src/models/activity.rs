// ABOUTME: Activity and recommendation models exchanged with the fitness backend
// ABOUTME: Mirrors the backend camelCase JSON for activities and AI recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of workout logged by the user
///
/// The backend owns the list; values this client does not know about are
/// carried through as `Other` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    /// Running
    Running,
    /// Cycling
    Cycling,
    /// Swimming
    Swimming,
    /// Walking
    Walking,
    /// Yoga
    Yoga,
    /// Stretching
    Stretching,
    /// Anything the backend added after this client was built
    Other(String),
}

impl ActivityType {
    /// Wire name (`RUNNING`, `CYCLING`, ...)
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Cycling => "CYCLING",
            Self::Swimming => "SWIMMING",
            Self::Walking => "WALKING",
            Self::Yoga => "YOGA",
            Self::Stretching => "STRETCHING",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        match value.to_uppercase().as_str() {
            "RUNNING" => Self::Running,
            "CYCLING" => Self::Cycling,
            "SWIMMING" => Self::Swimming,
            "WALKING" => Self::Walking,
            "YOGA" => Self::Yoga,
            "STRETCHING" => Self::Stretching,
            _ => Self::Other(value),
        }
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for ActivityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Payload for logging a new activity
///
/// `userId` is filled in by the backend from the `X-User-ID` header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    /// Workout kind
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Duration in minutes
    pub duration: u32,
    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Free-form gender value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Local start time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    /// Provider-specific extras (pace, heart rate, ...)
    #[serde(default)]
    pub additional_metrics: Map<String, Value>,
}

impl ActivityRequest {
    /// Minimal request: type and duration
    #[must_use]
    pub fn new(activity_type: ActivityType, duration: u32) -> Self {
        Self {
            activity_type,
            duration,
            weight: None,
            height: None,
            gender: None,
            start_time: None,
            additional_metrics: Map::new(),
        }
    }
}

/// Activity as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Backend identifier
    pub id: String,
    /// Owner (the identity provider subject)
    #[serde(default)]
    pub user_id: Option<String>,
    /// Workout kind
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Duration in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(default)]
    pub height: Option<f64>,
    /// Free-form gender value
    #[serde(default)]
    pub gender: Option<String>,
    /// Local start time
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    /// Provider-specific extras
    #[serde(default)]
    pub additional_metrics: Map<String, Value>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// AI-generated analysis of one activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Backend identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Activity this analysis belongs to
    pub activity_id: String,
    /// Owner
    #[serde(default)]
    pub user_id: Option<String>,
    /// Workout kind of the analysed activity
    #[serde(default)]
    pub activity_type: Option<ActivityType>,
    /// Narrative analysis, sections separated by blank lines
    #[serde(default)]
    pub recommendation: String,
    /// Calorie estimates
    #[serde(default)]
    pub calories_burned: Vec<String>,
    /// "Area: recommendation" entries
    #[serde(default)]
    pub improvement: Vec<String>,
    /// "Workout: description" entries
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Safety guidelines
    #[serde(default)]
    pub safety: Vec<String>,
    /// Summary bullet points
    #[serde(default)]
    pub summary: Vec<String>,
    /// Generation timestamp
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Recommendation {
    /// Narrative analysis split into its sections
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.recommendation
            .split("\n\n")
            .map(str::trim)
            .filter(|section| !section.is_empty())
    }
}
