//! GraphQL client for the Linear API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::{JanitorError, Result};
use crate::models::{DeletePayload, Label, LabelPage};
use crate::pagination::Pagination;

/// Labels requested per page.
pub const LABEL_PAGE_SIZE: u32 = 100;

/// Lists labels with a one-issue sample each.
pub const LABELS_QUERY: &str = r"
    query IssueLabels($first: Int!, $after: String) {
        issueLabels(first: $first, after: $after) {
            pageInfo {
                hasNextPage
                endCursor
            }
            nodes {
                id
                name
                isGroup
                issues(first: 1) { nodes { id } }
            }
        }
    }
";

/// Deletes a single label by id.
pub const DELETE_LABEL_MUTATION: &str = r"
    mutation DeleteLabel($id: String!) {
        issueLabelDelete(id: $id) {
            success
        }
    }
";

/// Label operations the janitor needs from the service.
#[async_trait]
pub trait LabelApi: Send + Sync {
    /// Every label in the workspace, each once, in service order.
    async fn fetch_all_labels(&self) -> Result<Vec<Label>>;

    /// Delete one label. `Ok(false)` means the service declined.
    async fn delete_label(&self, id: &str) -> Result<bool>;
}

/// Linear GraphQL client
#[derive(Debug, Clone)]
pub struct LinearClient {
    client: reqwest::Client,
    api_url: String,
}

/// GraphQL request body
#[derive(Debug, Serialize)]
struct GraphQLRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<serde_json::Value>>,
}

impl LinearClient {
    /// Create a client from the run configuration.
    ///
    /// The API key goes into the `Authorization` header as-is; Linear
    /// personal keys take no `Bearer` prefix.
    ///
    /// # Errors
    /// Returns [`JanitorError::Config`] if the key is not a valid header
    /// value, or [`JanitorError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut auth_value = HeaderValue::from_str(&config.api_key).map_err(|_| {
            JanitorError::Config("LINEAR_API_KEY contains invalid header characters".to_string())
        })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// Execute a GraphQL query/mutation.
    ///
    /// # Errors
    /// [`JanitorError::Api`] when the response carries a non-empty `errors`
    /// list (the serialized list is the message) or no data at all;
    /// [`JanitorError::Transport`] for network failures, non-JSON bodies and
    /// data that does not match `R`.
    pub async fn execute<V: Serialize, R: DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<R> {
        let request = GraphQLRequest { query, variables };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                JanitorError::Transport(format!("Failed to send request to Linear API: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            JanitorError::Transport(format!("Failed to read Linear API response: {e}"))
        })?;

        let gql_response: GraphQLResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(JanitorError::Transport(format!(
                    "Linear API returned error status {status}: {body}"
                )));
            }
            Err(e) => {
                return Err(JanitorError::Transport(format!(
                    "Failed to parse Linear API response: {e}"
                )));
            }
        };

        if let Some(errors) = gql_response.errors.filter(|errors| !errors.is_empty()) {
            let payload = serde_json::to_string(&errors)
                .unwrap_or_else(|_| format!("{} GraphQL error(s)", errors.len()));
            return Err(JanitorError::Api(payload));
        }

        if !status.is_success() {
            return Err(JanitorError::Transport(format!(
                "Linear API returned error status {status}: {body}"
            )));
        }

        let data = gql_response
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| JanitorError::Api("No data in GraphQL response".to_string()))?;

        serde_json::from_value(data).map_err(|e| {
            JanitorError::Transport(format!("Unexpected Linear API response shape: {e}"))
        })
    }

    // =========================================================================
    // Label Operations
    // =========================================================================

    /// Fetch a single page of labels.
    #[instrument(skip(self))]
    pub async fn fetch_label_page(&self, after: Option<&str>) -> Result<LabelPage> {
        #[derive(Serialize)]
        struct Variables<'a> {
            first: u32,
            after: Option<&'a str>,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueLabels")]
            issue_labels: LabelPage,
        }

        let response: Response = self
            .execute(
                LABELS_QUERY,
                Variables {
                    first: LABEL_PAGE_SIZE,
                    after,
                },
            )
            .await?;

        debug!(
            count = response.issue_labels.nodes.len(),
            has_next_page = response.issue_labels.page_info.has_next_page,
            "Retrieved label page"
        );
        Ok(response.issue_labels)
    }
}

#[async_trait]
impl LabelApi for LinearClient {
    #[instrument(skip(self))]
    async fn fetch_all_labels(&self) -> Result<Vec<Label>> {
        let mut labels = Vec::new();
        let mut pagination = Pagination::new();
        let mut pages = 0usize;

        while let Some(cursor) = pagination.next_cursor() {
            let page = self.fetch_label_page(cursor.as_deref()).await?;
            pages += 1;
            labels.extend(page.nodes);
            pagination.advance(&page.page_info)?;
        }

        info!(count = labels.len(), pages, "Fetched all labels");
        Ok(labels)
    }

    #[instrument(skip(self), fields(label_id = %id))]
    async fn delete_label(&self, id: &str) -> Result<bool> {
        #[derive(Serialize)]
        struct Variables<'a> {
            id: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueLabelDelete")]
            issue_label_delete: DeletePayload,
        }

        let response: Response = self
            .execute(DELETE_LABEL_MUTATION, Variables { id })
            .await?;
        Ok(response.issue_label_delete.success)
    }
}
