use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: String,
}
