use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub type IdeaId = String;

pub const DEFAULT_CATEGORY: &str = "SaaS";
pub const DEFAULT_AUTHOR: &str = "Anonymous Maker";
pub const DEFAULT_COMMENT_AUTHOR: &str = "You";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    #[default]
    Concept,
    Prototype,
    Alpha,
    Beta,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationStatus::Concept => "Concept",
            ValidationStatus::Prototype => "Prototype",
            ValidationStatus::Alpha => "Alpha",
            ValidationStatus::Beta => "Beta",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// e.g. "Founder", "Investor", "Maker"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub tagline: String,
    pub category: String,
    pub tags: Vec<String>,
    /// The problem being solved.
    pub description: String,
    pub solution: String,
    pub business_model: String,
    pub target_audience: String,
    pub risks: String,
    pub validation_goals: String,

    pub upvotes: u64,
    pub downvotes: u64,
    pub views: u64,
    /// Email captures.
    pub subscribers: u64,

    pub comments: Vec<Comment>,

    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub status: ValidationStatus,
}

/// Caller-supplied fields of a new idea. The store fills in identity,
/// timestamps, counters and status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaDraft {
    pub title: String,
    pub tagline: String,
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
    pub solution: String,
    pub business_model: String,
    pub target_audience: String,
    pub risks: String,
    pub validation_goals: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl Default for IdeaDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            tags: Vec::new(),
            description: String::new(),
            solution: String::new(),
            business_model: String::new(),
            target_audience: String::new(),
            risks: String::new(),
            validation_goals: String::new(),
            author_name: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CommentDraft {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl CommentDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A vote a viewer can cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl FromStr for VoteType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(VoteType::Up),
            "down" => Ok(VoteType::Down),
            other => Err(StoreError::InvalidInput(format!(
                "vote type must be 'up' or 'down', got '{other}'"
            ))),
        }
    }
}

/// The current viewer's vote on one idea.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    #[default]
    None,
    Up,
    Down,
}

impl From<VoteType> for VoteState {
    fn from(vote: VoteType) -> Self {
        match vote {
            VoteType::Up => VoteState::Up,
            VoteType::Down => VoteState::Down,
        }
    }
}

impl VoteState {
    pub fn as_vote(self) -> Option<VoteType> {
        match self {
            VoteState::None => None,
            VoteState::Up => Some(VoteType::Up),
            VoteState::Down => Some(VoteType::Down),
        }
    }
}

impl fmt::Display for VoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VoteState::None => "none",
            VoteState::Up => "up",
            VoteState::Down => "down",
        };
        f.write_str(label)
    }
}

/// Four-tier classification derived from votes and subscribers. Always
/// computed from the counters, never stored on the idea.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalStrength {
    New,
    #[serde(rename = "Early Interest")]
    EarlyInterest,
    Promising,
    Hot,
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalStrength::New => "New",
            SignalStrength::EarlyInterest => "Early Interest",
            SignalStrength::Promising => "Promising",
            SignalStrength::Hot => "Hot",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    Newest,
    #[default]
    Popular,
    Discussed,
}

impl FromStr for SortOption {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "popular" => Ok(SortOption::Popular),
            "discussed" => Ok(SortOption::Discussed),
            other => Err(StoreError::InvalidInput(format!(
                "sort must be one of newest, popular, discussed; got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortOption::Newest => "newest",
            SortOption::Popular => "popular",
            SortOption::Discussed => "discussed",
        };
        f.write_str(label)
    }
}
