use std::sync::Arc;

use rmcp::RoleServer;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::ranking::{IdeaCard, IdeaDetail, IdeaFilter, rank, summarize};
use crate::seed::CATEGORIES;
use crate::storage::IdeaStore;
use crate::types::{CommentDraft, IdeaDraft, SortOption, VoteType};

const CATEGORIES_URI: &str = "idealab://categories";
const FEED_URI: &str = "idealab://feed";

// Tool argument types

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListIdeasArgs {
    /// Exact category to keep, e.g. "SaaS"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Case-insensitive text matched against title, tagline and tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// One of "popular" (default), "newest", "discussed"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct IdeaIdArgs {
    pub id: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct VoteArgs {
    pub id: String,
    /// "up" or "down"; repeating the current vote removes it
    pub vote: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct CommentArgs {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct SubscribeArgs {
    pub id: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct SummaryArgs {
    /// Only count ideas posted under this author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

fn store_error(err: StoreError) -> ErrorData {
    match &err {
        StoreError::NotFound(id) => {
            ErrorData::resource_not_found(err.to_string(), Some(json!({ "id": id })))
        }
        StoreError::Validation(_) | StoreError::InvalidInput(_) => {
            ErrorData::invalid_params(err.to_string(), Some(json!({ "kind": err.kind() })))
        }
        StoreError::CounterOverflow(_) => {
            ErrorData::internal_error(err.to_string(), Some(json!({ "kind": err.kind() })))
        }
    }
}

fn to_json_text<T: Serialize>(value: &T) -> Result<String, ErrorData> {
    serde_json::to_string_pretty(value).map_err(|e| ErrorData::internal_error(e.to_string(), None))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::success(vec![Content::text(to_json_text(value)?)]))
}

fn parse_sort(sort: Option<&str>) -> Result<SortOption, StoreError> {
    sort.map(|s| s.parse::<SortOption>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// MCP front end for one shared [`IdeaStore`]. Every tool call takes the
/// store lock for the whole facade call.
#[derive(Clone)]
pub struct IdeaLabServer {
    store: Arc<Mutex<IdeaStore>>,
    pub tool_router: ToolRouter<IdeaLabServer>,
}

#[tool_router]
impl IdeaLabServer {
    pub fn new(store: Arc<Mutex<IdeaStore>>) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    pub fn store(&self) -> Arc<Mutex<IdeaStore>> {
        Arc::clone(&self.store)
    }

    #[tool(description = "List ideas with optional category/search filters and sort order")]
    async fn list_ideas(
        &self,
        Parameters(args): Parameters<ListIdeasArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let sort = parse_sort(args.sort.as_deref()).map_err(store_error)?;
        let predicate = IdeaFilter {
            category: args.category,
            search: args.search,
        };
        let store = self.store.lock().await;
        let cards: Vec<IdeaCard> = rank(store.ideas(), &predicate, sort)
            .iter()
            .map(|idea| IdeaCard::new(idea, store.get_user_vote(&idea.id)))
            .collect();
        json_result(&json!({ "sort": sort, "count": cards.len(), "ideas": cards }))
    }

    #[tool(
        description = "Open an idea: returns full details and counts one view. Every call increments views, unlike list_ideas and the idealab://feed resource"
    )]
    async fn get_idea(
        &self,
        Parameters(args): Parameters<IdeaIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let mut store = self.store.lock().await;
        let idea = store.record_view(&args.id).map_err(store_error)?;
        let vote = store.get_user_vote(&idea.id);
        json_result(&IdeaDetail::new(idea, vote))
    }

    #[tool(description = "Submit a new idea; title, tagline, description, solution and validationGoals are required")]
    async fn add_idea(
        &self,
        Parameters(draft): Parameters<IdeaDraft>,
    ) -> Result<CallToolResult, ErrorData> {
        let mut store = self.store.lock().await;
        let idea = store.add_idea(draft).map_err(store_error)?;
        tracing::info!(idea_id = %idea.id, "idea submitted over MCP");
        json_result(&IdeaDetail::new(idea, Default::default()))
    }

    #[tool(description = "Vote 'up' or 'down' on an idea; voting the same way again removes the vote")]
    async fn vote_idea(
        &self,
        Parameters(args): Parameters<VoteArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let vote: VoteType = args.vote.parse().map_err(|e: StoreError| {
            tracing::warn!(idea_id = %args.id, vote = %args.vote, "rejected vote type");
            store_error(e)
        })?;
        let mut store = self.store.lock().await;
        let idea = store.vote_idea(&args.id, vote).map_err(store_error)?;
        let state = store.get_user_vote(&idea.id);
        json_result(&IdeaDetail::new(idea, state))
    }

    #[tool(description = "Append a comment to an idea")]
    async fn add_comment(
        &self,
        Parameters(args): Parameters<CommentArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let draft = CommentDraft {
            text: args.text,
            author: args.author,
            role: args.role,
        };
        let mut store = self.store.lock().await;
        let idea = store.add_comment(&args.id, draft).map_err(store_error)?;
        let state = store.get_user_vote(&idea.id);
        json_result(&IdeaDetail::new(idea, state))
    }

    #[tool(description = "Register email interest in an idea")]
    async fn subscribe_to_idea(
        &self,
        Parameters(args): Parameters<SubscribeArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let mut store = self.store.lock().await;
        let idea = store
            .subscribe_to_idea(&args.id, &args.email)
            .map_err(store_error)?;
        json_result(&json!({ "id": idea.id, "subscribers": idea.subscribers }))
    }

    #[tool(description = "Current viewer's vote on an idea: none, up or down")]
    async fn get_user_vote(
        &self,
        Parameters(args): Parameters<IdeaIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let store = self.store.lock().await;
        let vote = store.get_user_vote(&args.id);
        json_result(&json!({ "id": args.id, "vote": vote }))
    }

    #[tool(description = "Total views, subscribers and comments, optionally for one author's ideas")]
    async fn lab_summary(
        &self,
        Parameters(args): Parameters<SummaryArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let store = self.store.lock().await;
        let summary = summarize(
            store
                .ideas()
                .iter()
                .filter(|idea| args.author.as_deref().is_none_or(|a| idea.author_name == a)),
        );
        json_result(&summary)
    }
}

#[tool_handler]
impl rmcp::ServerHandler for IdeaLabServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Idea lab: browse, vote on, comment on and subscribe to startup ideas".to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: rmcp::service::RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new(CATEGORIES_URI, "Idea Categories").no_annotation(),
                RawResource::new(FEED_URI, "Popular Ideas").no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: rmcp::service::RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let body = match uri.as_str() {
            CATEGORIES_URI => to_json_text(&json!({ "categories": CATEGORIES }))?,
            FEED_URI => {
                let store = self.store.lock().await;
                let cards: Vec<IdeaCard> =
                    rank(store.ideas(), &IdeaFilter::default(), SortOption::Popular)
                        .iter()
                        .map(|idea| IdeaCard::new(idea, store.get_user_vote(&idea.id)))
                        .collect();
                to_json_text(&cards)?
            }
            _ => {
                return Err(ErrorData::resource_not_found(
                    "Unknown resource URI",
                    Some(json!({ "uri": uri })),
                ));
            }
        };
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(body, uri)],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: rmcp::service::RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreConfig;
    use crate::types::VoteState;

    fn server() -> IdeaLabServer {
        IdeaLabServer::new(Arc::new(Mutex::new(IdeaStore::new(&StoreConfig::default()))))
    }

    #[tokio::test]
    async fn vote_tool_updates_shared_store() {
        let server = server();
        let before = server.store().lock().await.get_idea("2").unwrap();

        let result = server
            .vote_idea(Parameters(VoteArgs {
                id: "2".to_string(),
                vote: "up".to_string(),
            }))
            .await;
        assert!(result.is_ok());

        let store = server.store();
        let store = store.lock().await;
        assert_eq!(store.get_idea("2").unwrap().upvotes, before.upvotes + 1);
        assert_eq!(store.get_user_vote("2"), VoteState::Up);
    }

    #[tokio::test]
    async fn vote_tool_maps_errors() {
        let server = server();

        let missing = server
            .vote_idea(Parameters(VoteArgs {
                id: "missing-id".to_string(),
                vote: "up".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);

        let invalid = server
            .vote_idea(Parameters(VoteArgs {
                id: "2".to_string(),
                vote: "sideways".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(server.store().lock().await.get_user_vote("2"), VoteState::None);
    }

    #[tokio::test]
    async fn list_tool_rejects_unknown_sort() {
        let server = server();
        let err = server
            .list_ideas(Parameters(ListIdeasArgs {
                sort: Some("loudest".to_string()),
                ..ListIdeasArgs::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn get_idea_tool_counts_a_view() {
        let server = server();
        let before = server.store().lock().await.get_idea("4").unwrap().views;
        server
            .get_idea(Parameters(IdeaIdArgs {
                id: "4".to_string(),
            }))
            .await
            .unwrap();
        let after = server.store().lock().await.get_idea("4").unwrap().views;
        assert_eq!(after, before + 1);
    }

    #[test]
    fn parse_sort_defaults_to_popular() {
        assert_eq!(parse_sort(None).unwrap(), SortOption::Popular);
        assert_eq!(parse_sort(Some("newest")).unwrap(), SortOption::Newest);
        assert!(parse_sort(Some("random")).is_err());
    }
}
