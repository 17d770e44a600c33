// SPDX-License-Identifier: MIT

//! SQL execution node (M0 placeholder: never touches a database)

use async_trait::async_trait;

use super::Node;
use crate::error::Result;
use crate::graph::state::{timestamp, ExecutionResult, Nl2SqlState};

/// Execute the state's candidate query
///
/// M0 always succeeds with an empty result set.
pub fn execute_sql_node(state: &Nl2SqlState) -> Nl2SqlState {
    let sql = state.candidate_sql().unwrap_or("N/A");
    let result = ExecutionResult {
        ok: true,
        message: format!("M0 placeholder - no actual execution for: {}", sql),
        row_count: 0,
        columns: vec![],
        rows: vec![],
    };
    state.with_execution_result(result, timestamp())
}

pub struct ExecuteSqlNode;

#[async_trait]
impl Node for ExecuteSqlNode {
    fn name(&self) -> &str {
        "execute_sql"
    }

    async fn invoke(&self, state: &Nl2SqlState) -> Result<Nl2SqlState> {
        log::debug!(
            "Skipping database execution for: {}",
            state.candidate_sql().unwrap_or("N/A")
        );
        Ok(execute_sql_node(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_empty_success(state: &Nl2SqlState) {
        let result = state.execution_result().unwrap();
        assert!(result.ok);
        assert_eq!(result.row_count, 0);
        assert!(result.columns.is_empty());
        assert!(result.rows.is_empty());
        assert!(state.executed_at().is_some());
    }

    #[test]
    fn test_placeholder_result() {
        let input = Nl2SqlState::new("q").with_candidate_sql("SELECT * FROM users", "t");
        let state = execute_sql_node(&input);

        assert_empty_success(&state);
        assert_eq!(
            state.execution_result().unwrap().message,
            "M0 placeholder - no actual execution for: SELECT * FROM users"
        );
    }

    #[test]
    fn test_missing_candidate_sql() {
        let state = execute_sql_node(&Nl2SqlState::empty());
        assert_empty_success(&state);
        assert_eq!(
            state.execution_result().unwrap().message,
            "M0 placeholder - no actual execution for: N/A"
        );
    }

    #[test]
    fn test_succeeds_regardless_of_sql() {
        for sql in ["", "DROP TABLE users;", "not sql at all", "SELECT 1; SELECT 2"] {
            let state = execute_sql_node(&Nl2SqlState::empty().with_candidate_sql(sql, "t"));
            assert_empty_success(&state);
        }
    }

    #[test]
    fn test_result_serialized_shape() {
        let state = execute_sql_node(&Nl2SqlState::empty().with_candidate_sql("x", "t"));
        assert_eq!(
            state.to_json()["execution_result"],
            json!({
                "ok": true,
                "message": "M0 placeholder - no actual execution for: x",
                "row_count": 0,
                "columns": [],
                "rows": []
            })
        );
    }

    #[tokio::test]
    async fn test_node_invoke_preserves_input() {
        let input = Nl2SqlState::new("q")
            .with_value("request_id", json!("r-1"))
            .unwrap();
        let state = ExecuteSqlNode.invoke(&input).await.unwrap();

        assert_eq!(state.question(), Some("q"));
        assert_eq!(state.get("request_id"), Some(json!("r-1")));
        assert!(input.execution_result().is_none());
    }
}
