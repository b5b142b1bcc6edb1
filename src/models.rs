use serde::Deserialize;

// server-owned entities, exactly as the backend returns them

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_professional: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub job_name: String,
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub average_rate: f64,
    #[serde(default)]
    pub id_category: Option<Category>,
    #[serde(default)]
    pub id_professional: Option<User>,
    #[serde(default)]
    pub requests_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meet {
    pub id: i64,
    pub id_job: Job,
    #[serde(default)]
    pub id_user: Option<User>,
    pub meet_date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_done: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub comment: String,
    pub rate: i64,
    #[serde(default)]
    pub id_job: Option<Job>,
    #[serde(default)]
    pub id_user: Option<User>,
}

/// `login` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub email: String,
}

/// `verifyToken` payload: the decoded claims of the bearer credential.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}
