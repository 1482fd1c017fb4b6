use crate::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    #[error("Malformed question JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Node id {0} is declared more than once")]
    DuplicateNode(NodeId),
}
