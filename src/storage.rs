use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use ulid::Ulid;

use crate::error::{StoreError, StoreResult};
use crate::ledger::{CounterDelta, VoteLedger};
use crate::seed::mock_ideas;
use crate::types::{
    Comment, CommentDraft, DEFAULT_AUTHOR, DEFAULT_COMMENT_AUTHOR, Idea, IdeaDraft,
    ValidationStatus, VoteState, VoteType,
};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const DEFAULT_VIEWER: &str = "local-viewer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Voter id used for every vote cast through the store.
    pub viewer_id: String,
    /// Author recorded on ideas whose draft does not name one.
    pub default_author: String,
    /// Start from the mock catalogue instead of an empty collection.
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            viewer_id: DEFAULT_VIEWER.to_string(),
            default_author: DEFAULT_AUTHOR.to_string(),
            seed: true,
        }
    }
}

/// Sole gateway to the idea collection and the viewer's votes.
///
/// Ideas are kept most-recent-submission first. Reads hand out clones, so
/// callers can only change state through the methods below. Every mutation
/// checks its inputs and computes the new values before writing anything.
#[derive(Clone, Debug)]
pub struct IdeaStore {
    ideas: Vec<Idea>,
    ledger: VoteLedger,
    viewer_id: String,
    default_author: String,
}

impl IdeaStore {
    pub fn new(config: &StoreConfig) -> Self {
        let ideas = if config.seed { mock_ideas() } else { Vec::new() };
        Self::with_ideas(config, ideas)
    }

    pub fn with_ideas(config: &StoreConfig, ideas: Vec<Idea>) -> Self {
        tracing::debug!(count = ideas.len(), viewer = %config.viewer_id, "idea store initialised");
        Self {
            ideas,
            ledger: VoteLedger::new(),
            viewer_id: config.viewer_id.clone(),
            default_author: config.default_author.clone(),
        }
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn default_author(&self) -> &str {
        &self.default_author
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn list_ideas(&self) -> Vec<Idea> {
        self.ideas.clone()
    }

    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    /// Read-only lookup; views are only counted through `record_view`.
    pub fn get_idea(&self, id: &str) -> StoreResult<Idea> {
        self.ideas
            .iter()
            .find(|idea| idea.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn position(&self, id: &str) -> StoreResult<usize> {
        self.ideas
            .iter()
            .position(|idea| idea.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn add_idea(&mut self, draft: IdeaDraft) -> StoreResult<Idea> {
        let missing: Vec<&str> = [
            ("title", &draft.title),
            ("tagline", &draft.tagline),
            ("description", &draft.description),
            ("solution", &draft.solution),
            ("validationGoals", &draft.validation_goals),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            tracing::warn!(?missing, "rejected idea draft");
            return Err(StoreError::Validation(format!(
                "required fields are empty: {}",
                missing.join(", ")
            )));
        }

        let author_name = draft
            .author_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.default_author.clone());
        let idea = Idea {
            id: Ulid::new().to_string(),
            title: draft.title,
            tagline: draft.tagline,
            category: draft.category,
            tags: draft.tags,
            description: draft.description,
            solution: draft.solution,
            business_model: draft.business_model,
            target_audience: draft.target_audience,
            risks: draft.risks,
            validation_goals: draft.validation_goals,
            upvotes: 0,
            downvotes: 0,
            views: 0,
            subscribers: 0,
            comments: Vec::new(),
            created_at: Utc::now(),
            author_name,
            status: ValidationStatus::Concept,
        };
        self.ideas.insert(0, idea.clone());
        tracing::debug!(idea_id = %idea.id, title = %idea.title, "idea added");
        Ok(idea)
    }

    pub fn vote_idea(&mut self, id: &str, vote: VoteType) -> StoreResult<Idea> {
        let index = self.position(id)?;
        let planned = self.ledger.plan(id, &self.viewer_id, vote);
        let (upvotes, downvotes) = apply_delta(&self.ideas[index], planned.delta)?;

        let idea = &mut self.ideas[index];
        idea.upvotes = upvotes;
        idea.downvotes = downvotes;
        self.ledger.commit(id, &self.viewer_id, &planned);
        tracing::debug!(
            idea_id = %id,
            from = %planned.previous,
            to = %planned.next,
            upvotes,
            downvotes,
            "vote applied"
        );
        Ok(idea.clone())
    }

    pub fn add_comment(&mut self, id: &str, draft: CommentDraft) -> StoreResult<Idea> {
        let index = self.position(id)?;
        if draft.text.trim().is_empty() {
            tracing::warn!(idea_id = %id, "rejected empty comment");
            return Err(StoreError::Validation("comment text is empty".to_string()));
        }

        let comment = Comment {
            id: Ulid::new().to_string(),
            author: draft
                .author
                .filter(|author| !author.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COMMENT_AUTHOR.to_string()),
            text: draft.text,
            created_at: Utc::now(),
            role: draft.role.filter(|role| !role.trim().is_empty()),
        };
        let idea = &mut self.ideas[index];
        idea.comments.push(comment);
        tracing::debug!(idea_id = %id, comments = idea.comments.len(), "comment added");
        Ok(idea.clone())
    }

    /// Counts one email signal. Repeat calls with the same address each count.
    pub fn subscribe_to_idea(&mut self, id: &str, email: &str) -> StoreResult<Idea> {
        let index = self.position(id)?;
        if !EMAIL_RE.is_match(email.trim()) {
            tracing::warn!(idea_id = %id, "rejected malformed email");
            return Err(StoreError::Validation(format!(
                "'{}' is not a valid email address",
                email.trim()
            )));
        }

        let idea = &mut self.ideas[index];
        idea.subscribers = idea
            .subscribers
            .checked_add(1)
            .ok_or_else(|| StoreError::CounterOverflow(id.to_string()))?;
        tracing::debug!(idea_id = %id, subscribers = idea.subscribers, "subscriber added");
        Ok(idea.clone())
    }

    pub fn record_view(&mut self, id: &str) -> StoreResult<Idea> {
        let index = self.position(id)?;
        let idea = &mut self.ideas[index];
        idea.views = idea
            .views
            .checked_add(1)
            .ok_or_else(|| StoreError::CounterOverflow(id.to_string()))?;
        Ok(idea.clone())
    }

    /// The viewer's current vote. Unknown ids report no vote.
    pub fn get_user_vote(&self, id: &str) -> VoteState {
        self.ledger.current(id, &self.viewer_id)
    }
}

impl Default for IdeaStore {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

fn apply_delta(idea: &Idea, delta: CounterDelta) -> StoreResult<(u64, u64)> {
    let overflow = || StoreError::CounterOverflow(idea.id.clone());
    let upvotes = idea
        .upvotes
        .checked_add_signed(delta.upvotes)
        .ok_or_else(overflow)?;
    let downvotes = idea
        .downvotes
        .checked_add_signed(delta.downvotes)
        .ok_or_else(overflow)?;
    Ok((upvotes, downvotes))
}
