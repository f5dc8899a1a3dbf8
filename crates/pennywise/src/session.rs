use std::fs;
use std::path::{Path, PathBuf};

use api_types::user::UserView;

use crate::client::Client;
use crate::error::Result;

/// Owns the authenticated identity for this process.
///
/// At most one identity is active at a time. It is mirrored to a JSON file
/// so a restart picks the session back up without re-entering credentials;
/// the file holds exactly the serialized [`UserView`] record.
#[derive(Debug)]
pub struct SessionStore {
    client: Client,
    path: PathBuf,
    user: Option<UserView>,
    loading: bool,
}

impl SessionStore {
    pub fn new(client: Client, path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            path: path.into(),
            user: None,
            loading: false,
        }
    }

    /// Restores a persisted identity, if any.
    ///
    /// A missing file means no session. A file that fails to deserialize is
    /// treated the same way and is deleted, so one corrupt write cannot wedge
    /// every subsequent start.
    pub fn restore(&mut self) -> Option<&UserView> {
        let _loading = LoadingFlag::raise(&mut self.loading);
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<UserView>(&content) {
                Ok(user) => {
                    tracing::debug!(email = %user.email, "restored session");
                    self.user = Some(user);
                }
                Err(err) => {
                    tracing::warn!("discarding corrupt session record: {err}");
                    let _ = fs::remove_file(&self.path);
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!("failed to read session record: {err}");
            }
        }
        self.user.as_ref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&UserView> {
        let outcome = {
            let _loading = LoadingFlag::raise(&mut self.loading);
            self.client.login(email, password).await
        };
        Ok(self.install(outcome?))
    }

    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<&UserView> {
        let outcome = {
            let _loading = LoadingFlag::raise(&mut self.loading);
            self.client.signup(name, email, password).await
        };
        Ok(self.install(outcome?))
    }

    /// Clears the in-memory identity and removes the durable record.
    ///
    /// Dependent stores must be cleared by the caller in the same step so
    /// collections never leak across identities; [`crate::app::App::logout`]
    /// does this.
    pub fn logout(&mut self) {
        self.user = None;
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!("failed to remove session record: {err}"),
        }
    }

    pub fn user(&self) -> Option<&UserView> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True only while restoring or while a login/signup call is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn install(&mut self, user: UserView) -> &UserView {
        if let Err(err) = persist(&self.path, &user) {
            // The login itself succeeded; losing the durable copy only costs
            // a re-login after restart.
            tracing::warn!("failed to persist session record: {err}");
        }
        self.user.insert(user)
    }
}

/// Raises the loading flag and clears it again on drop.
///
/// Login/signup hold this across the await, so a caller that abandons the
/// in-flight future cannot leave [`SessionStore::is_loading`] stuck at true.
struct LoadingFlag<'a>(&'a mut bool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn persist(path: &Path, user: &UserView) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(user)?;
    fs::write(path, payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_sessions");
        fs::create_dir_all(&root).unwrap();
        root.join(format!("{name}_{}.json", std::process::id()))
    }

    fn store(path: &Path) -> SessionStore {
        let client = Client::new("http://127.0.0.1:1").unwrap();
        SessionStore::new(client, path)
    }

    fn identity() -> UserView {
        UserView {
            id: 3,
            email: "carol@example.com".to_string(),
            name: "Carol".to_string(),
            role: Some("USER".to_string()),
        }
    }

    #[test]
    fn restore_missing_file_is_absent() {
        let path = scratch_path("missing");
        let _ = fs::remove_file(&path);
        let mut session = store(&path);
        assert!(session.restore().is_none());
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
    }

    #[test]
    fn restore_roundtrips_persisted_identity() {
        let path = scratch_path("roundtrip");
        persist(&path, &identity()).unwrap();
        let mut session = store(&path);
        let restored = session.restore().cloned();
        assert_eq!(restored, Some(identity()));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_record_is_purged() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let mut session = store(&path);
        assert!(session.restore().is_none());
        assert!(!path.exists());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn abandoned_login_resets_loading_flag() {
        use std::future::Future;
        use std::task::Poll;

        // A socket that accepts but never answers keeps the login in flight.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let path = scratch_path("abandoned");
        let client = Client::new(&format!("http://{addr}")).unwrap();
        let mut session = SessionStore::new(client, &path);
        {
            let mut fut = std::pin::pin!(session.login("carol@example.com", "pw"));
            std::future::poll_fn(|cx| {
                assert!(fut.as_mut().poll(cx).is_pending());
                Poll::Ready(())
            })
            .await;
        }
        assert!(!session.is_loading(), "flag must clear when the future is dropped");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_removes_record() {
        let path = scratch_path("logout");
        persist(&path, &identity()).unwrap();
        let mut session = store(&path);
        session.restore();
        assert!(session.is_authenticated());
        session.logout();
        assert!(!session.is_authenticated());
        assert!(!path.exists());
    }
}
