//! Terminal front end for the idea store: a browsable feed, an idea page
//! with voting, comments and email interest, a three step submit wizard and
//! the maker's own summary.

use colored::{ColoredString, Colorize};
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::cli::FeedArguments;
use crate::error::{ServiceResult, StoreError};
use crate::ranking::{IdeaCard, IdeaFilter, breakdown, net_score, rank, signal_strength, summarize};
use crate::seed::CATEGORIES;
use crate::storage::IdeaStore;
use crate::types::{
    CommentDraft, Idea, IdeaDraft, SignalStrength, SortOption, VoteState, VoteType,
};

const ALL_CATEGORIES: &str = "All";

#[derive(Clone, Debug, Default)]
struct FeedState {
    filter: IdeaFilter,
    sort: SortOption,
}

pub fn signal_badge(signal: SignalStrength) -> ColoredString {
    let label = format!(" {signal} ");
    match signal {
        SignalStrength::Hot => label.white().on_red().bold(),
        SignalStrength::Promising => label.black().on_yellow(),
        SignalStrength::EarlyInterest => label.blue(),
        SignalStrength::New => label.dimmed(),
    }
}

fn vote_marker(vote: VoteState) -> ColoredString {
    match vote {
        VoteState::Up => "▲ you".green(),
        VoteState::Down => "▼ you".red(),
        VoteState::None => "".normal(),
    }
}

pub fn render_card(idea: &Idea, vote: VoteState) -> String {
    let tags = if idea.tags.is_empty() {
        String::new()
    } else {
        format!("  #{}", idea.tags.join(" #"))
    };
    format!(
        "{} {} [{}]\n  {}{}\n  score {:>+5}  subscribers {:>4}  comments {:>3}  {} {}",
        signal_badge(signal_strength(idea)),
        idea.title.bold(),
        idea.category,
        idea.tagline.italic(),
        tags.dimmed(),
        net_score(idea),
        idea.subscribers,
        idea.comments.len(),
        idea.status.to_string().cyan(),
        vote_marker(vote),
    )
}

pub fn render_detail(idea: &Idea, vote: VoteState) -> String {
    let signals = breakdown(idea);
    let mut out = format!(
        "{}\n{}\nby {} on {}  {}  {}\n",
        idea.title.bold().underline(),
        idea.tagline.italic(),
        idea.author_name,
        idea.created_at.format("%Y-%m-%d"),
        idea.status.to_string().cyan(),
        signal_badge(signal_strength(idea)),
    );
    for (heading, body) in [
        ("The problem", &idea.description),
        ("The solution", &idea.solution),
        ("Business model", &idea.business_model),
        ("Target audience", &idea.target_audience),
        ("Biggest risk", &idea.risks),
        ("Validation goal", &idea.validation_goals),
    ] {
        if !body.trim().is_empty() {
            out.push_str(&format!("\n{}\n  {}\n", heading.bold(), body));
        }
    }
    out.push_str(&format!(
        "\n{} {}  {} {}  {} {}  net {:+}  views {}  {}\n",
        "up".blue(),
        signals.up,
        "down".red(),
        signals.down,
        "interest".yellow(),
        signals.interest,
        net_score(idea),
        idea.views,
        vote_marker(vote),
    ));
    out.push_str(&format!("\n{} ({})\n", "Lab notes".bold(), idea.comments.len()));
    for comment in &idea.comments {
        let role = comment
            .role
            .as_deref()
            .map(|r| format!(" [{}]", r.to_uppercase()))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {}{} {}\n    {}\n",
            comment.author.bold(),
            role.dimmed(),
            comment.created_at.format("%Y-%m-%d").to_string().dimmed(),
            comment.text,
        ));
    }
    out
}

/// Splits comma separated tag input, dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn report(err: &StoreError) {
    eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
}

/// Renders the `feed` command output, as pretty JSON cards or text cards.
pub fn render_feed(store: &IdeaStore, args: &FeedArguments) -> ServiceResult<String> {
    let filter = IdeaFilter {
        category: args.category.clone(),
        search: args.search.clone(),
    };
    let ranked = rank(store.ideas(), &filter, args.sort);
    if args.json {
        let cards: Vec<IdeaCard> = ranked
            .iter()
            .map(|idea| IdeaCard::new(idea, store.get_user_vote(&idea.id)))
            .collect();
        return Ok(serde_json::to_string_pretty(&cards)?);
    }
    if ranked.is_empty() {
        return Ok("No ideas found. Adjust your filters or submit one."
            .dimmed()
            .to_string());
    }
    Ok(ranked
        .iter()
        .map(|idea| render_card(idea, store.get_user_vote(&idea.id)))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// Non-interactive listing used by the `feed` command.
pub fn print_feed(store: &IdeaStore, args: &FeedArguments) -> ServiceResult<()> {
    println!("{}", render_feed(store, args)?);
    Ok(())
}

/// Runs the interactive lab until the user quits.
pub fn run(store: &mut IdeaStore) -> ServiceResult<()> {
    let theme = ColorfulTheme::default();
    let mut feed = FeedState::default();
    println!(
        "{}\n{}\n",
        "Don't hoard ideas. Validate them.".bold(),
        "Open business plans, real feedback, and validation signals.".dimmed()
    );

    let actions = [
        "Browse feed",
        "Filter & sort",
        "Open an idea",
        "Submit an idea",
        "My lab",
        "Quit",
    ];
    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&actions)
            .default(0)
            .interact()?;
        match choice {
            0 => show_feed(store, &feed),
            1 => adjust_feed(&theme, &mut feed)?,
            2 => open_idea(&theme, store, &feed)?,
            3 => submit_idea(&theme, store)?,
            4 => my_lab(store),
            _ => break,
        }
    }
    Ok(())
}

fn show_feed(store: &IdeaStore, feed: &FeedState) {
    let ranked = rank(store.ideas(), &feed.filter, feed.sort);
    println!(
        "{} sorted by {} ({} ideas)\n",
        "Feed".bold(),
        feed.sort,
        ranked.len()
    );
    if ranked.is_empty() {
        println!("{}", "No ideas found. Adjust your filters or submit one.".dimmed());
    }
    for idea in &ranked {
        println!("{}\n", render_card(idea, store.get_user_vote(&idea.id)));
    }
}

fn adjust_feed(theme: &ColorfulTheme, feed: &mut FeedState) -> ServiceResult<()> {
    let mut categories = vec![ALL_CATEGORIES];
    categories.extend(CATEGORIES);
    let current = feed
        .filter
        .category
        .as_deref()
        .and_then(|c| categories.iter().position(|x| *x == c))
        .unwrap_or(0);
    let picked = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&categories)
        .default(current)
        .interact()?;
    feed.filter.category = (picked != 0).then(|| categories[picked].to_string());

    let search: String = Input::with_theme(theme)
        .with_prompt("Search tags, titles, taglines")
        .with_initial_text(feed.filter.search.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    feed.filter.search = Some(search.trim().to_string()).filter(|s| !s.is_empty());

    let sorts = [SortOption::Popular, SortOption::Newest, SortOption::Discussed];
    let labels: Vec<String> = sorts.iter().map(SortOption::to_string).collect();
    let picked = Select::with_theme(theme)
        .with_prompt("Sort by")
        .items(&labels)
        .default(sorts.iter().position(|s| *s == feed.sort).unwrap_or(0))
        .interact()?;
    feed.sort = sorts[picked];
    Ok(())
}

fn open_idea(theme: &ColorfulTheme, store: &mut IdeaStore, feed: &FeedState) -> ServiceResult<()> {
    let ranked = rank(store.ideas(), &feed.filter, feed.sort);
    if ranked.is_empty() {
        println!("{}", "Nothing to open with the current filters.".dimmed());
        return Ok(());
    }
    let titles: Vec<String> = ranked
        .iter()
        .map(|idea| format!("{} - {}", idea.title, idea.tagline))
        .collect();
    let picked = Select::with_theme(theme)
        .with_prompt("Open which idea?")
        .items(&titles)
        .default(0)
        .interact()?;
    let id = ranked[picked].id.clone();

    let mut idea = match store.record_view(&id) {
        Ok(idea) => idea,
        Err(err) => {
            report(&err);
            return Ok(());
        }
    };
    let actions = ["Upvote", "Downvote", "Leave a comment", "Get updates by email", "Back"];
    loop {
        println!("\n{}", render_detail(&idea, store.get_user_vote(&id)));
        let choice = Select::with_theme(theme)
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()?;
        let outcome = match choice {
            0 => store.vote_idea(&id, VoteType::Up),
            1 => store.vote_idea(&id, VoteType::Down),
            2 => {
                let text: String = Input::with_theme(theme)
                    .with_prompt("Share your feedback")
                    .allow_empty(true)
                    .interact_text()?;
                store.add_comment(&id, CommentDraft::new(text))
            }
            3 => {
                let email: String = Input::with_theme(theme)
                    .with_prompt("email@example.com")
                    .interact_text()?;
                let result = store.subscribe_to_idea(&id, &email);
                if result.is_ok() {
                    println!("{}", "You're on the list.".green());
                }
                result
            }
            _ => return Ok(()),
        };
        match outcome {
            Ok(updated) => idea = updated,
            Err(err) => report(&err),
        }
    }
}

fn required(theme: &ColorfulTheme, prompt: &str) -> ServiceResult<String> {
    let value = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("this field is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value)
}

fn optional(theme: &ColorfulTheme, prompt: &str) -> ServiceResult<String> {
    let value = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn submit_idea(theme: &ColorfulTheme, store: &mut IdeaStore) -> ServiceResult<()> {
    println!("{}", "Step 1/3  The hook".bold());
    let title = required(theme, "Project title")?;
    let tagline = required(theme, "One-liner (tagline)")?;
    let category = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&CATEGORIES)
        .default(0)
        .interact()?;
    let tags = parse_tags(&optional(theme, "Tags (comma separated)")?);

    println!("{}", "Step 2/3  The meat".bold());
    let description = required(theme, "The problem")?;
    let solution = required(theme, "The solution")?;

    println!("{}", "Step 3/3  The business".bold());
    let business_model = optional(theme, "Business model")?;
    let target_audience = optional(theme, "Target audience")?;
    let risks = optional(theme, "Biggest risk")?;
    let validation_goals = required(theme, "Validation goal: the ONE thing you want to learn")?;

    let draft = IdeaDraft {
        title,
        tagline,
        category: CATEGORIES[category].to_string(),
        tags,
        description,
        solution,
        business_model,
        target_audience,
        risks,
        validation_goals,
        author_name: None,
    };
    match store.add_idea(draft) {
        Ok(idea) => println!(
            "{} {} is live as a {} experiment.",
            "✓".green().bold(),
            idea.title.bold(),
            idea.status
        ),
        Err(err) => report(&err),
    }
    Ok(())
}

fn my_lab(store: &IdeaStore) {
    let author = store.default_author();
    let mine: Vec<&Idea> = store
        .ideas()
        .iter()
        .filter(|idea| idea.author_name == author)
        .collect();
    let summary = summarize(mine.iter().copied());
    println!(
        "{}  ideas {}  views {}  subscribers {}  comments {}\n",
        format!("My Lab ({author})").bold(),
        summary.idea_count,
        summary.total_views,
        summary.total_subscribers,
        summary.total_comments,
    );
    if mine.is_empty() {
        println!("{}", "No experiments yet. Submit one to get started.".dimmed());
    }
    for idea in mine {
        println!("{}\n", render_card(idea, store.get_user_vote(&idea.id)));
    }
}
