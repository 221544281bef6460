//! Pure scoring, filtering and ordering over idea snapshots. Nothing here
//! mutates its input; every listing function returns a new vector.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Idea, SignalStrength, SortOption, ValidationStatus, VoteState};

const HOT_THRESHOLD: i64 = 1000;
const PROMISING_THRESHOLD: i64 = 200;
const EARLY_INTEREST_THRESHOLD: i64 = 50;

pub fn net_score(idea: &Idea) -> i64 {
    to_signed(idea.upvotes) - to_signed(idea.downvotes)
}

/// Net score plus two points per subscriber.
pub fn signal_score(idea: &Idea) -> i64 {
    net_score(idea).saturating_add(to_signed(idea.subscribers).saturating_mul(2))
}

pub fn signal_strength(idea: &Idea) -> SignalStrength {
    let score = signal_score(idea);
    if score > HOT_THRESHOLD {
        SignalStrength::Hot
    } else if score > PROMISING_THRESHOLD {
        SignalStrength::Promising
    } else if score > EARLY_INTEREST_THRESHOLD {
        SignalStrength::EarlyInterest
    } else {
        SignalStrength::New
    }
}

fn to_signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl IdeaFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| idea.category == category);
        let search_ok = self.search.as_deref().is_none_or(|term| {
            let needle = term.to_lowercase();
            idea.title.to_lowercase().contains(&needle)
                || idea.tagline.to_lowercase().contains(&needle)
                || idea.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        });
        category_ok && search_ok
    }
}

pub fn filter(ideas: &[Idea], predicate: &IdeaFilter) -> Vec<Idea> {
    ideas
        .iter()
        .filter(|idea| predicate.matches(idea))
        .cloned()
        .collect()
}

/// Orders ideas by `key`, keeping input order among equals.
pub fn sort(ideas: &[Idea], key: SortOption) -> Vec<Idea> {
    let mut sorted = ideas.to_vec();
    match key {
        SortOption::Popular => sorted.sort_by_key(|idea| std::cmp::Reverse(net_score(idea))),
        SortOption::Newest => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Discussed => sorted.sort_by_key(|idea| std::cmp::Reverse(idea.comments.len())),
    }
    sorted
}

pub fn rank(ideas: &[Idea], predicate: &IdeaFilter, key: SortOption) -> Vec<Idea> {
    sort(&filter(ideas, predicate), key)
}

/// Totals across a set of ideas, e.g. everything one maker has posted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabSummary {
    pub idea_count: usize,
    pub total_views: u64,
    pub total_subscribers: u64,
    pub total_comments: usize,
}

pub fn summarize<'a>(ideas: impl IntoIterator<Item = &'a Idea>) -> LabSummary {
    ideas
        .into_iter()
        .fold(LabSummary::default(), |acc, idea| LabSummary {
            idea_count: acc.idea_count + 1,
            total_views: acc.total_views.saturating_add(idea.views),
            total_subscribers: acc.total_subscribers.saturating_add(idea.subscribers),
            total_comments: acc.total_comments + idea.comments.len(),
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SignalBreakdown {
    pub up: u64,
    pub down: u64,
    pub interest: u64,
}

pub fn breakdown(idea: &Idea) -> SignalBreakdown {
    SignalBreakdown {
        up: idea.upvotes,
        down: idea.downvotes,
        interest: idea.subscribers,
    }
}

/// Compact listing row with the derived scores filled in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaCard {
    pub id: String,
    pub title: String,
    pub tagline: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: ValidationStatus,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub net_score: i64,
    pub signal: SignalStrength,
    pub subscribers: u64,
    pub comment_count: usize,
    pub user_vote: VoteState,
}

impl IdeaCard {
    pub fn new(idea: &Idea, user_vote: VoteState) -> Self {
        Self {
            id: idea.id.clone(),
            title: idea.title.clone(),
            tagline: idea.tagline.clone(),
            category: idea.category.clone(),
            tags: idea.tags.clone(),
            status: idea.status,
            author_name: idea.author_name.clone(),
            created_at: idea.created_at,
            net_score: net_score(idea),
            signal: signal_strength(idea),
            subscribers: idea.subscribers,
            comment_count: idea.comments.len(),
            user_vote,
        }
    }
}

/// Full idea plus everything derived from its counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDetail {
    #[serde(flatten)]
    pub idea: Idea,
    pub net_score: i64,
    pub signal: SignalStrength,
    pub breakdown: SignalBreakdown,
    pub user_vote: VoteState,
}

impl IdeaDetail {
    pub fn new(idea: Idea, user_vote: VoteState) -> Self {
        Self {
            net_score: net_score(&idea),
            signal: signal_strength(&idea),
            breakdown: breakdown(&idea),
            idea,
            user_vote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, ValidationStatus};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn idea(id: &str, up: u64, down: u64, subscribers: u64) -> Idea {
        Idea {
            id: id.to_string(),
            title: format!("Idea {id}"),
            tagline: "A tagline".to_string(),
            category: "SaaS".to_string(),
            tags: vec![],
            description: String::new(),
            solution: String::new(),
            business_model: String::new(),
            target_audience: String::new(),
            risks: String::new(),
            validation_goals: String::new(),
            upvotes: up,
            downvotes: down,
            views: 0,
            subscribers,
            comments: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            author_name: "Tester".to_string(),
            status: ValidationStatus::Concept,
        }
    }

    fn comment(n: usize) -> Comment {
        Comment {
            id: format!("c{n}"),
            author: "You".to_string(),
            text: "nice".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            role: None,
        }
    }

    #[test]
    fn net_score_can_go_negative() {
        assert_eq!(net_score(&idea("a", 3, 10, 0)), -7);
    }

    #[rstest]
    #[case(0, 0, 0, SignalStrength::New)]
    #[case(50, 0, 0, SignalStrength::New)]
    #[case(51, 0, 0, SignalStrength::EarlyInterest)]
    #[case(200, 0, 0, SignalStrength::EarlyInterest)]
    #[case(201, 0, 0, SignalStrength::Promising)]
    #[case(1000, 0, 0, SignalStrength::Promising)]
    #[case(1001, 0, 0, SignalStrength::Hot)]
    #[case(0, 0, 26, SignalStrength::EarlyInterest)]
    #[case(10, 20, 100, SignalStrength::EarlyInterest)]
    #[case(0, 100, 0, SignalStrength::New)]
    fn signal_tiers_use_strict_thresholds(
        #[case] up: u64,
        #[case] down: u64,
        #[case] subscribers: u64,
        #[case] expected: SignalStrength,
    ) {
        assert_eq!(signal_strength(&idea("a", up, down, subscribers)), expected);
    }

    #[test]
    fn filter_matches_title_tagline_and_tags_case_insensitively() {
        let mut by_tag = idea("tag", 0, 0, 0);
        by_tag.tags = vec!["ClimateTech".to_string()];
        let mut by_tagline = idea("tagline", 0, 0, 0);
        by_tagline.tagline = "Carbon CLIMATE ledger".to_string();
        let other = idea("other", 0, 0, 0);
        let ideas = vec![by_tag, other, by_tagline];

        let found = filter(&ideas, &IdeaFilter::default().search("climate"));
        let ids: Vec<_> = found.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["tag", "tagline"]);
    }

    #[test]
    fn filter_ands_category_and_search() {
        let mut hardware = idea("hw", 0, 0, 0);
        hardware.category = "Hardware".to_string();
        hardware.title = "Smart bike lock".to_string();
        let mut saas = idea("saas", 0, 0, 0);
        saas.title = "Smart invoices".to_string();
        let ideas = vec![hardware, saas];

        let found = filter(
            &ideas,
            &IdeaFilter::default().category("Hardware").search("smart"),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "hw");

        let none = filter(&ideas, &IdeaFilter::default().category("Marketplace"));
        assert!(none.is_empty());
    }

    #[test]
    fn empty_search_matches_everything() {
        let ideas = vec![idea("a", 0, 0, 0), idea("b", 0, 0, 0)];
        assert_eq!(filter(&ideas, &IdeaFilter::default().search("")).len(), 2);
    }

    #[test]
    fn popular_sort_is_stable_for_equal_scores() {
        let ideas = vec![
            idea("first", 5, 0, 0),
            idea("top", 20, 0, 0),
            idea("second", 6, 1, 0),
        ];
        let sorted = sort(&ideas, SortOption::Popular);
        let ids: Vec<_> = sorted.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "first", "second"]);
        // input untouched
        assert_eq!(ideas[0].id, "first");
    }

    #[test]
    fn newest_sort_orders_by_creation_time() {
        let mut old = idea("old", 0, 0, 0);
        old.created_at = Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap();
        let mut new = idea("new", 0, 0, 0);
        new.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let same_a = idea("same-a", 0, 0, 0);
        let same_b = idea("same-b", 0, 0, 0);

        let sorted = sort(&[old, same_a, new, same_b], SortOption::Newest);
        let ids: Vec<_> = sorted.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "same-a", "same-b", "old"]);
    }

    #[test]
    fn discussed_sort_orders_by_comment_count() {
        let quiet = idea("quiet", 0, 0, 0);
        let mut busy = idea("busy", 0, 0, 0);
        busy.comments = (0..3).map(comment).collect();
        let mut some = idea("some", 0, 0, 0);
        some.comments = vec![comment(0)];

        let sorted = sort(&[quiet, some, busy], SortOption::Discussed);
        let ids: Vec<_> = sorted.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["busy", "some", "quiet"]);
    }

    #[test]
    fn summarize_totals_counters() {
        let mut a = idea("a", 0, 0, 4);
        a.views = 100;
        a.comments = vec![comment(0), comment(1)];
        let mut b = idea("b", 0, 0, 1);
        b.views = 20;

        let summary = summarize(&[a, b]);
        assert_eq!(
            summary,
            LabSummary {
                idea_count: 2,
                total_views: 120,
                total_subscribers: 5,
                total_comments: 2,
            }
        );
        assert_eq!(summarize(&[]), LabSummary::default());
    }

    #[test]
    fn detail_flattens_idea_fields() {
        let value = serde_json::to_value(IdeaDetail::new(idea("a", 60, 5, 0), VoteState::Up)).unwrap();
        assert_eq!(value["title"], "Idea a");
        assert_eq!(value["netScore"], 55);
        assert_eq!(value["signal"], "Early Interest");
        assert_eq!(value["userVote"], "up");
        assert_eq!(value["breakdown"]["up"], 60);
    }

    #[test]
    fn card_counts_comments() {
        let mut a = idea("a", 1, 0, 0);
        a.comments = vec![comment(0), comment(1)];
        let card = IdeaCard::new(&a, VoteState::None);
        assert_eq!(card.comment_count, 2);
        assert_eq!(card.net_score, 1);
        assert_eq!(card.signal, SignalStrength::New);
    }

    #[test]
    fn breakdown_reports_raw_counters() {
        let b = breakdown(&idea("a", 7, 2, 3));
        assert_eq!((b.up, b.down, b.interest), (7, 2, 3));
    }
}
