use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub last_active: i64, // unix timestamp, refreshed on every authenticated action
}
