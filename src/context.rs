use crate::api::MailClient;
use crate::config::AppPaths;
use crate::error::{AppError, AppResult};
use crate::output::Output;
use crate::session::{FileSessionStore, Session, SessionStore};

#[derive(Debug)]
pub struct AppContext {
    pub verbose: u8,
    pub paths: AppPaths,
    pub session_store: FileSessionStore,
    pub mail: MailClient,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(json: bool, verbose: u8) -> AppResult<Self> {
        let paths = AppPaths::discover()?;
        let session_store = FileSessionStore::new(paths.session_file());
        let mail = MailClient::new();
        let output = Output::new(json);

        Ok(Self {
            verbose,
            paths,
            session_store,
            mail,
            output,
        })
    }

    pub fn require_session(&self) -> AppResult<Session> {
        self.session_store.load()?.ok_or_else(|| {
            AppError::InvalidInput("no active mailbox. run `tmail new` first".to_string())
        })
    }
}
