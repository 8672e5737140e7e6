use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SprintState {
    Active,
    Future,
    Closed,
    Other(String),
}

impl From<String> for SprintState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "active" => SprintState::Active,
            "future" => SprintState::Future,
            "closed" => SprintState::Closed,
            _ => SprintState::Other(state),
        }
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SprintState::Active => f.write_str("active"),
            SprintState::Future => f.write_str("future"),
            SprintState::Closed => f.write_str("closed"),
            SprintState::Other(state) => f.write_str(state),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: SprintState,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl Sprint {
    /// Short date range like `10-20 → 11-03`, when the remote knows the dates.
    pub fn date_range(&self) -> Option<String> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(format!(
                "{} \u{2192} {}",
                start.format("%m-%d"),
                end.format("%m-%d")
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_agile_sprint() {
        let json = r#"{
            "id": 4211,
            "self": "https://issues.example.com/rest/agile/1.0/sprint/4211",
            "state": "future",
            "name": "Sprint 42",
            "startDate": "2026-10-20T08:00:00.000Z",
            "endDate": "2026-11-03T08:00:00.000Z",
            "originBoardId": 7
        }"#;
        let sprint: Sprint = serde_json::from_str(json).unwrap();
        assert_eq!(sprint.id, 4211);
        assert_eq!(sprint.state, SprintState::Future);
        assert_eq!(sprint.date_range().as_deref(), Some("10-20 \u{2192} 11-03"));
    }

    #[test]
    fn dates_are_optional_and_unknown_states_kept() {
        let json = r#"{"id": 1, "name": "Someday", "state": "parked"}"#;
        let sprint: Sprint = serde_json::from_str(json).unwrap();
        assert_eq!(sprint.state, SprintState::Other("parked".into()));
        assert_eq!(sprint.date_range(), None);
    }
}
