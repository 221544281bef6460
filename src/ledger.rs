//! Per-voter vote state machine.
//!
//! Each (voter, idea) pair is in one of three states: no vote, up or down.
//! Repeating the current vote clears it, voting the other way switches it.
//! Every transition yields a [`CounterDelta`] for the idea's aggregate
//! counters, so that a voter contributes at most one vote to exactly one of
//! `upvotes` / `downvotes` at any time.

use std::collections::HashMap;

use crate::types::{VoteState, VoteType};

/// Signed change to an idea's vote counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl CounterDelta {
    fn bump(vote: VoteType, by: i64) -> Self {
        match vote {
            VoteType::Up => Self {
                upvotes: by,
                downvotes: 0,
            },
            VoteType::Down => Self {
                upvotes: 0,
                downvotes: by,
            },
        }
    }

    fn plus(self, other: CounterDelta) -> Self {
        Self {
            upvotes: self.upvotes + other.upvotes,
            downvotes: self.downvotes + other.downvotes,
        }
    }
}

/// Outcome of a vote request, computed without touching the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteTransition {
    pub previous: VoteState,
    pub next: VoteState,
    pub delta: CounterDelta,
}

/// Pure transition function of the vote state machine.
pub fn transition(current: VoteState, requested: VoteType) -> VoteTransition {
    match current.as_vote() {
        Some(active) if active == requested => VoteTransition {
            previous: current,
            next: VoteState::None,
            delta: CounterDelta::bump(requested, -1),
        },
        Some(active) => VoteTransition {
            previous: current,
            next: requested.into(),
            delta: CounterDelta::bump(requested, 1).plus(CounterDelta::bump(active, -1)),
        },
        None => VoteTransition {
            previous: current,
            next: requested.into(),
            delta: CounterDelta::bump(requested, 1),
        },
    }
}

#[derive(Clone, Debug, Default)]
pub struct VoteLedger {
    votes: HashMap<(String, String), VoteType>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, idea_id: &str, voter_id: &str) -> VoteState {
        self.votes
            .get(&(voter_id.to_string(), idea_id.to_string()))
            .map(|vote| VoteState::from(*vote))
            .unwrap_or_default()
    }

    /// Works out what `requested` would do without recording it.
    pub fn plan(&self, idea_id: &str, voter_id: &str, requested: VoteType) -> VoteTransition {
        transition(self.current(idea_id, voter_id), requested)
    }

    /// Records the target state of a planned transition.
    pub fn commit(&mut self, idea_id: &str, voter_id: &str, planned: &VoteTransition) {
        let key = (voter_id.to_string(), idea_id.to_string());
        match planned.next.as_vote() {
            Some(vote) => {
                self.votes.insert(key, vote);
            }
            None => {
                self.votes.remove(&key);
            }
        }
    }

    pub fn apply_vote(
        &mut self,
        idea_id: &str,
        voter_id: &str,
        requested: VoteType,
    ) -> (VoteState, CounterDelta) {
        let planned = self.plan(idea_id, voter_id, requested);
        self.commit(idea_id, voter_id, &planned);
        (planned.next, planned.delta)
    }

    /// Number of active (non-none) votes across all voters.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
