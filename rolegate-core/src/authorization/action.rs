use serde::{Deserialize, Serialize};

/// State-changing actions guarded by the decision model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DeletePost,
    DeleteUser,
    Promote,
    Demote,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::DeletePost => "delete_post",
            Action::DeleteUser => "delete_user",
            Action::Promote => "promote",
            Action::Demote => "demote",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
