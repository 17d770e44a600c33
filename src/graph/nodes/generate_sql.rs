// SPDX-License-Identifier: MIT

//! SQL generation node (M0 placeholder: echoes the question)

use async_trait::async_trait;

use super::Node;
use crate::error::Result;
use crate::graph::state::{timestamp, Nl2SqlState};

/// Generate a candidate query for the state's question
///
/// M0 wraps the question in a fixed template; a missing question is treated
/// as the empty string.
pub fn generate_sql_node(state: &Nl2SqlState) -> Nl2SqlState {
    let question = state.question().unwrap_or_default();
    let sql = format!("Processed query: '{}'", question);
    state.with_candidate_sql(sql, timestamp())
}

pub struct GenerateSqlNode;

#[async_trait]
impl Node for GenerateSqlNode {
    fn name(&self) -> &str {
        "generate_sql"
    }

    async fn invoke(&self, state: &Nl2SqlState) -> Result<Nl2SqlState> {
        Ok(generate_sql_node(state))
    }
}
