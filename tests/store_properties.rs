//! Behavioural properties of the idea store, exercised through the public API.

use idea_lab_mcp::error::StoreError;
use idea_lab_mcp::ranking::{IdeaFilter, net_score, rank, signal_strength, sort};
use idea_lab_mcp::storage::{IdeaStore, StoreConfig};
use idea_lab_mcp::types::{
    CommentDraft, IdeaDraft, SignalStrength, SortOption, ValidationStatus, VoteState, VoteType,
};
use rstest::{fixture, rstest};

#[fixture]
fn seeded() -> IdeaStore {
    IdeaStore::new(&StoreConfig::default())
}

#[fixture]
fn empty() -> IdeaStore {
    IdeaStore::new(&StoreConfig {
        seed: false,
        ..StoreConfig::default()
    })
}

fn minimal_draft() -> IdeaDraft {
    IdeaDraft {
        title: "X".to_string(),
        tagline: "Y".to_string(),
        description: "D".to_string(),
        solution: "S".to_string(),
        validation_goals: "G".to_string(),
        ..IdeaDraft::default()
    }
}

// === Voting ===

#[rstest]
#[case(VoteType::Up)]
#[case(VoteType::Down)]
fn repeating_a_vote_restores_the_baseline(mut seeded: IdeaStore, #[case] vote: VoteType) {
    let baseline = seeded.get_idea("2").unwrap();

    seeded.vote_idea("2", vote).unwrap();
    let after = seeded.vote_idea("2", vote).unwrap();

    assert_eq!(after.upvotes, baseline.upvotes);
    assert_eq!(after.downvotes, baseline.downvotes);
    assert_eq!(seeded.get_user_vote("2"), VoteState::None);
}

#[rstest]
fn switching_vote_moves_one_count(mut seeded: IdeaStore) {
    let baseline = seeded.get_idea("3").unwrap();

    seeded.vote_idea("3", VoteType::Up).unwrap();
    let after = seeded.vote_idea("3", VoteType::Down).unwrap();

    assert_eq!(after.upvotes, baseline.upvotes);
    assert_eq!(after.downvotes, baseline.downvotes + 1);
    assert_eq!(seeded.get_user_vote("3"), VoteState::Down);
}

#[rstest]
fn votes_on_one_idea_leave_others_alone(mut seeded: IdeaStore) {
    let before = seeded.list_ideas();
    seeded.vote_idea("1", VoteType::Up).unwrap();
    let after = seeded.list_ideas();

    for (old, new) in before.iter().zip(after.iter()).filter(|(old, _)| old.id != "1") {
        assert_eq!(old, new);
    }
    assert_eq!(seeded.get_user_vote("4"), VoteState::None);
}

#[rstest]
fn vote_on_missing_idea_changes_nothing(mut seeded: IdeaStore) {
    let before = seeded.list_ideas();

    let err = seeded.vote_idea("missing-id", VoteType::Up).unwrap_err();

    assert_eq!(err, StoreError::NotFound("missing-id".to_string()));
    assert_eq!(seeded.list_ideas(), before);
    assert_eq!(seeded.get_user_vote("missing-id"), VoteState::None);
}

#[test]
fn unknown_vote_text_is_invalid_input() {
    let err = "meh".parse::<VoteType>().unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

// === Submitting ===

#[rstest]
fn add_idea_into_empty_collection(mut empty: IdeaStore) {
    let idea = empty.add_idea(minimal_draft()).unwrap();

    assert_eq!(empty.len(), 1);
    assert_eq!(idea.upvotes, 0);
    assert_eq!(idea.downvotes, 0);
    assert_eq!(idea.subscribers, 0);
    assert_eq!(idea.status, ValidationStatus::Concept);
    assert_eq!(
        serde_json::to_value(idea.status).unwrap(),
        serde_json::json!("Concept")
    );
}

#[rstest]
#[case::title(IdeaDraft { title: String::new(), ..minimal_draft() })]
#[case::tagline(IdeaDraft { tagline: " ".to_string(), ..minimal_draft() })]
#[case::description(IdeaDraft { description: String::new(), ..minimal_draft() })]
#[case::solution(IdeaDraft { solution: "\n".to_string(), ..minimal_draft() })]
#[case::validation_goals(IdeaDraft { validation_goals: String::new(), ..minimal_draft() })]
fn add_idea_requires_core_fields(mut empty: IdeaStore, #[case] draft: IdeaDraft) {
    let err = empty.add_idea(draft).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(empty.is_empty());
}

#[rstest]
fn new_idea_appears_first_in_the_feed(mut seeded: IdeaStore) {
    let idea = seeded.add_idea(minimal_draft()).unwrap();
    assert_eq!(seeded.list_ideas()[0].id, idea.id);

    let newest = rank(seeded.ideas(), &IdeaFilter::default(), SortOption::Newest);
    assert_eq!(newest[0].id, idea.id);
}

// === Comments and subscribers ===

#[rstest]
fn whitespace_comment_is_rejected(mut seeded: IdeaStore) {
    let before = seeded.get_idea("1").unwrap().comments;

    let err = seeded.add_comment("1", CommentDraft::new("   ")).unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(seeded.get_idea("1").unwrap().comments, before);
}

#[rstest]
fn comments_append_in_order(mut seeded: IdeaStore) {
    let start = seeded.get_idea("3").unwrap().comments.len();
    seeded.add_comment("3", CommentDraft::new("first")).unwrap();
    let idea = seeded
        .add_comment(
            "3",
            CommentDraft {
                text: "second".to_string(),
                author: Some("Investor Ivy".to_string()),
                role: Some("Investor".to_string()),
            },
        )
        .unwrap();

    assert_eq!(idea.comments.len(), start + 2);
    assert_eq!(idea.comments[start].text, "first");
    let last = idea.comments.last().unwrap();
    assert_eq!(last.text, "second");
    assert_eq!(last.role.as_deref(), Some("Investor"));
}

#[rstest]
fn subscribers_never_decrease(mut seeded: IdeaStore) {
    let mut last = seeded.get_idea("4").unwrap().subscribers;
    for email in ["a@example.com", "not-an-email", "a@example.com", "b@lab.io"] {
        let _ = seeded.subscribe_to_idea("4", email);
        let now = seeded.get_idea("4").unwrap().subscribers;
        assert!(now >= last);
        last = now;
    }
    assert_eq!(last, seeded.get_idea("4").unwrap().subscribers);
}

#[rstest]
fn subscribe_to_missing_idea_is_not_found(mut seeded: IdeaStore) {
    let err = seeded
        .subscribe_to_idea("missing-id", "a@example.com")
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

// === Ranking over the store ===

#[rstest]
fn popular_sort_keeps_ties_in_input_order(mut empty: IdeaStore) {
    let a = empty.add_idea(IdeaDraft { title: "a".into(), ..minimal_draft() }).unwrap();
    let b = empty.add_idea(IdeaDraft { title: "b".into(), ..minimal_draft() }).unwrap();
    let c = empty.add_idea(IdeaDraft { title: "c".into(), ..minimal_draft() }).unwrap();
    empty.vote_idea(&a.id, VoteType::Up).unwrap();

    let sorted = sort(empty.ideas(), SortOption::Popular);
    let ids: Vec<_> = sorted.iter().map(|i| i.id.clone()).collect();
    // collection order is c, b, a; a leads on score, c and b tie
    assert_eq!(ids, vec![a.id, c.id, b.id]);
}

#[rstest]
fn signal_boundary_at_two_hundred_is_early_interest(mut empty: IdeaStore) {
    let mut idea = empty.add_idea(minimal_draft()).unwrap();
    idea.upvotes = 200;
    assert_eq!(net_score(&idea), 200);
    assert_eq!(signal_strength(&idea), SignalStrength::EarlyInterest);
}

#[rstest]
fn seeded_feed_filters_by_category_and_search(seeded: IdeaStore) {
    let saas = rank(
        seeded.ideas(),
        &IdeaFilter::default().category("SaaS"),
        SortOption::Popular,
    );
    assert!(saas.iter().all(|i| i.category == "SaaS"));
    assert!(saas.windows(2).all(|w| net_score(&w[0]) >= net_score(&w[1])));

    let b2b = rank(
        seeded.ideas(),
        &IdeaFilter::default().search("B2B"),
        SortOption::Discussed,
    );
    assert!(!b2b.is_empty());
    assert!(b2b.windows(2).all(|w| w[0].comments.len() >= w[1].comments.len()));
}
