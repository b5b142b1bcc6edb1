use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::gateway::{Gateway, GatewayError, Payload};
use crate::models::{Claims, User};
use crate::AppResult;

// every module goes through these accessors; nothing else touches the keys
const TOKEN: &str = "token";
const IDENTITY: &str = "identity";
const FORM_TOKEN: &str = "form_token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_professional: bool,
}

const VERIFY_TOKEN: &str = r#"
mutation verifyToken {
  verifyToken { data { id email iat exp } message success }
}"#;

const USER_BY_EMAIL: &str = r#"
query userByEmail($email: String!) {
  userByEmail(email: $email) {
    data { id username email phone address isProfessional }
    message
    success
  }
}"#;

pub async fn token(session: &Session) -> AppResult<Option<String>> {
    Ok(session.get::<String>(TOKEN).await?)
}

/// The authenticated identity, or `None`.
///
/// A stored credential without a cached identity is verified against the
/// backend once; failure clears the credential and stays unauthenticated
/// until the next login. No retry.
pub async fn current_user(session: &Session, gateway: &Gateway) -> AppResult<Option<Identity>> {
    if let Some(identity) = session.get::<Identity>(IDENTITY).await? {
        return Ok(Some(identity));
    }

    let Some(token) = session.get::<String>(TOKEN).await? else {
        return Ok(None);
    };

    match verify(gateway, &token).await {
        Ok(identity) => {
            session.insert(IDENTITY, identity.clone()).await?;
            Ok(Some(identity))
        }
        Err(err) => {
            log::warn!("credential verification failed: {err}");
            session.remove::<String>(TOKEN).await?;
            Ok(None)
        }
    }
}

/// Called once on successful login: stores the credential, then the identity
/// the backend vouches for. A credential that does not verify is dropped.
pub async fn establish(session: &Session, gateway: &Gateway, token: String) -> AppResult<Result<Identity, GatewayError>> {
    match verify(gateway, &token).await {
        Ok(identity) => {
            session.insert(TOKEN, token).await?;
            session.insert(IDENTITY, identity.clone()).await?;
            Ok(Ok(identity))
        }
        Err(err) => Ok(Err(err)),
    }
}

pub async fn clear(session: &Session) {
    session.clear().await;
}

async fn verify(gateway: &Gateway, token: &str) -> Result<Identity, GatewayError> {
    let claims: Claims = gateway
        .call::<Claims>(Some(token), "verifyToken", VERIFY_TOKEN, serde_json::json!({}))
        .await?
        .required()?;

    let user: Payload<User> = gateway
        .call(
            Some(token),
            "userByEmail",
            USER_BY_EMAIL,
            serde_json::json!({ "email": claims.email }),
        )
        .await?;
    let user = user.required()?;

    Ok(Identity {
        id: claims.id,
        username: user.username,
        email: user.email,
        is_professional: user.is_professional,
    })
}

/// Updates the cached display name after a profile edit.
pub async fn refresh_identity(session: &Session, username: &str) -> AppResult<()> {
    if let Some(mut identity) = session.get::<Identity>(IDENTITY).await? {
        identity.username = username.to_string();
        session.insert(IDENTITY, identity).await?;
    }
    Ok(())
}

/// One-shot token embedded in mutation forms; consumed on submit so a rapid
/// duplicate submit does not issue the mutation twice.
pub async fn issue_form_token(session: &Session) -> AppResult<Uuid> {
    let token = Uuid::now_v7();
    session.insert(FORM_TOKEN, token).await?;
    Ok(token)
}

pub async fn take_form_token(session: &Session, submitted: Uuid) -> AppResult<bool> {
    let stored = session.remove::<Uuid>(FORM_TOKEN).await?;
    Ok(stored == Some(submitted))
}
