use std::collections::HashMap;

use async_trait::async_trait;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::fields::FieldMap;
use super::{jql, IssueTracker, MAX_RESULTS};
use crate::error::{Error, Result};
use crate::model::issue::{Assignee, Issue, IssueType};
use crate::model::sprint::Sprint;
use crate::model::update::{FieldUpdate, IssueUpdate};

/// Everything the client needs besides the credential.
#[derive(Debug, Clone)]
pub struct JiraSettings {
    pub base_url: String,
    pub project: String,
    /// When set, authenticate with Basic `email:token` instead of a bearer token.
    pub email: Option<String>,
    pub fields: FieldMap,
    /// Kind names whose linked tasks mark an issue as already split.
    pub split_kinds: Vec<String>,
    pub dry_run: bool,
}

pub struct JiraClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
    fields: FieldMap,
    project: String,
    split_kinds: Vec<String>,
    dry_run: bool,
}

impl JiraClient {
    pub fn new(settings: JiraSettings, api_token: &str) -> Self {
        let auth_header = match &settings.email {
            Some(email) => {
                let creds = format!("{email}:{api_token}");
                let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
                format!("Basic {encoded}")
            }
            None => format!("Bearer {api_token}"),
        };
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            auth_header,
            client: reqwest::Client::new(),
            fields: settings.fields,
            project: settings.project,
            split_kinds: settings.split_kinds,
            dry_run: settings.dry_run,
        }
    }

    fn sprint_issues_url(
        &self,
        sprint_id: u64,
        assignee: Option<&str>,
        exclude_issues_with_tasks: bool,
    ) -> String {
        let filter = jql::all([
            assignee.map(jql::assignee),
            exclude_issues_with_tasks
                .then(|| jql::without_linked_tasks(&self.split_kinds, &self.project)),
        ]);
        self.listing_url(&format!("rest/agile/1.0/sprint/{sprint_id}/issue"), filter)
    }

    fn backlog_url(&self, board_id: u64, assignee: Option<&str>) -> String {
        let filter = assignee.map(jql::assignee);
        self.listing_url(&format!("rest/agile/1.0/board/{board_id}/backlog"), filter)
    }

    fn listing_url(&self, path: &str, filter: Option<String>) -> String {
        let mut url = format!(
            "{}/{path}?maxResults={MAX_RESULTS}&fields={}",
            self.base_url,
            self.fields.listing().join(",")
        );
        if let Some(filter) = filter {
            url.push_str("&jql=");
            url.push_str(&urlencoding::encode(&filter));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Result<T> {
        debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::upstream(context, e))?;
        checked(resp, context)
            .await?
            .json()
            .await
            .map_err(|e| Error::upstream(context, e))
    }

    async fn edit_issue(&self, issue_key: &str, fields: Map<String, Value>, context: &str) -> Result<()> {
        let url = format!("{}/rest/api/2/issue/{issue_key}", self.base_url);
        debug!(%url, "PUT");
        let resp = self
            .client
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .map_err(|e| Error::upstream(context, e))?;
        checked(resp, context).await?;
        Ok(())
    }
}

async fn checked(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::UpstreamStatus {
        context: context.to_string(),
        status,
        body,
    })
}

/// Field payload for a partial update. Unset fields are left out, cleared ones
/// are written as null.
pub(crate) fn edit_fields(fields: &FieldMap, update: &IssueUpdate) -> Map<String, Value> {
    let mut payload = Map::new();
    match &update.assignee {
        FieldUpdate::Unset => {}
        FieldUpdate::Clear => {
            payload.insert(fields.assignee.clone(), Value::Null);
        }
        FieldUpdate::Set(name) => {
            payload.insert(fields.assignee.clone(), json!({ "name": name }));
        }
    }
    match &update.size {
        FieldUpdate::Unset => {}
        FieldUpdate::Clear => {
            payload.insert(fields.size.clone(), Value::Null);
        }
        FieldUpdate::Set(size) => {
            payload.insert(fields.size.clone(), json!(size.value()));
        }
    }
    match &update.sprint {
        FieldUpdate::Unset => {}
        FieldUpdate::Clear => {
            payload.insert(fields.sprint.clone(), Value::Null);
        }
        FieldUpdate::Set(sprint) => {
            payload.insert(fields.sprint.clone(), json!(sprint));
        }
    }
    payload
}

/// The automation field takes multi-select options as `{ "id": "<id>" }`.
pub(crate) fn automation_fields(fields: &FieldMap, kind_ids: &[u64]) -> Map<String, Value> {
    let options: Vec<Value> = kind_ids
        .iter()
        .map(|id| json!({ "id": id.to_string() }))
        .collect();
    let mut payload = Map::new();
    payload.insert(fields.automation.clone(), Value::Array(options));
    payload
}

fn join_ids(kind_ids: &[u64]) -> String {
    kind_ids
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Deserialize)]
struct ServerInfo {
    version: Option<String>,
}

#[derive(Deserialize)]
struct SprintPage {
    #[serde(default)]
    values: Vec<Sprint>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

#[derive(Deserialize)]
struct JiraIssue {
    key: String,
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Deserialize, Default)]
struct IssueFields {
    issuetype: Option<NamedField>,
    status: Option<NamedField>,
    summary: Option<String>,
    assignee: Option<UserField>,
    components: Option<Vec<NamedField>>,
    /// Priority, severity and estimate live under deployment-specific ids.
    #[serde(flatten)]
    other: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct NamedField {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserField {
    display_name: Option<String>,
    email_address: Option<String>,
}

/// Display text of an option-like field: `{ "name": .. }`, `{ "value": .. }` or a scalar.
fn option_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj
            .get("name")
            .or_else(|| obj.get("value"))
            .and_then(|v| v.as_str())
            .map(String::from),
        _ => None,
    }
}

impl JiraIssue {
    fn into_issue(self, fields: &FieldMap) -> Issue {
        let f = self.fields;
        Issue {
            key: self.key,
            kind: f
                .issuetype
                .map(|t| IssueType::from_name(&t.name))
                .unwrap_or_else(|| IssueType::Other(String::new())),
            status: f.status.map(|s| s.name).unwrap_or_default(),
            summary: f.summary.unwrap_or_default(),
            assignee: f.assignee.map(|a| Assignee {
                display_name: a.display_name,
                email: a.email_address,
            }),
            components: f
                .components
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.name)
                .collect(),
            estimate: f.other.get(&fields.size).and_then(Value::as_f64),
            priority: f.other.get(&fields.priority).and_then(option_text),
            severity: f.other.get(&fields.severity).and_then(option_text),
        }
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn server_version(&self) -> Result<String> {
        let url = format!("{}/rest/api/2/serverInfo", self.base_url);
        let info: ServerInfo = self.get_json(&url, "Jira server info request failed").await?;
        info.version
            .ok_or_else(|| Error::UpstreamUnavailable("server info carries no version".into()))
    }

    async fn list_sprints(&self, board_id: u64) -> Result<Vec<Sprint>> {
        let url = format!(
            "{}/rest/agile/1.0/board/{board_id}/sprint?state=active,future",
            self.base_url
        );
        let page: SprintPage = self.get_json(&url, "Jira sprint listing failed").await?;
        Ok(page.values)
    }

    async fn list_sprint_issues(
        &self,
        sprint_id: u64,
        assignee: Option<&str>,
        exclude_issues_with_tasks: bool,
    ) -> Result<Vec<Issue>> {
        let url = self.sprint_issues_url(sprint_id, assignee, exclude_issues_with_tasks);
        let search: SearchResponse = self.get_json(&url, "Jira sprint issue listing failed").await?;
        Ok(search
            .issues
            .into_iter()
            .map(|i| i.into_issue(&self.fields))
            .collect())
    }

    async fn list_backlog_issues(&self, board_id: u64, assignee: Option<&str>) -> Result<Vec<Issue>> {
        let url = self.backlog_url(board_id, assignee);
        let search: SearchResponse = self.get_json(&url, "Jira backlog listing failed").await?;
        Ok(search
            .issues
            .into_iter()
            .map(|i| i.into_issue(&self.fields))
            .collect())
    }

    async fn find_linked_tasks(&self, issue_key: &str, kind_names: &[String]) -> Result<Vec<Issue>> {
        let context = "Jira linked task search failed";
        let url = format!("{}/rest/api/2/search", self.base_url);
        let body = json!({
            "jql": jql::linked_tasks(issue_key, kind_names),
            "fields": self.fields.linked_task(),
        });
        let resp = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::upstream(context, e))?;
        let search: SearchResponse = checked(resp, context)
            .await?
            .json()
            .await
            .map_err(|e| Error::upstream(context, e))?;
        Ok(search
            .issues
            .into_iter()
            .map(|i| i.into_issue(&self.fields))
            .collect())
    }

    async fn create_sub_tasks(&self, issue_key: &str, kind_ids: &[u64]) -> Result<()> {
        if self.dry_run {
            info!("Would create tasks: {} for issue: {issue_key}", join_ids(kind_ids));
            return Ok(());
        }
        info!("Creating tasks: {} for issue: {issue_key}", join_ids(kind_ids));
        let fields = automation_fields(&self.fields, kind_ids);
        self.edit_issue(issue_key, fields, "Jira task creation failed").await
    }

    async fn update_issue(&self, issue_key: &str, update: &IssueUpdate) -> Result<()> {
        if update.is_empty() {
            debug!(issue = issue_key, "nothing to update");
            return Ok(());
        }
        let fields = edit_fields(&self.fields, update);
        if self.dry_run {
            let payload = Value::Object(fields);
            info!("Would update {issue_key}: {payload}");
            return Ok(());
        }
        self.edit_issue(issue_key, fields, "Jira issue update failed").await
    }

    fn issue_url(&self, issue_key: &str) -> String {
        format!("{}/browse/{issue_key}", self.base_url)
    }
}
