use std::time::SystemTime;

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::Serialize;

use crate::cli::NewArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::session::{Session, SessionStore};

#[derive(Debug, Serialize)]
struct NewMailboxResult {
    address: String,
    created_at_unix: u64,
}

/// Creates a provider account with generated credentials, authenticates, and
/// persists the session, replacing any prior one. Rate-limit and auth errors
/// abort the command.
pub async fn run(ctx: &AppContext, args: NewArgs) -> AppResult<()> {
    let domain = match args.domain {
        Some(domain) => {
            let domain = domain.trim().trim_start_matches('@').to_string();
            if domain.is_empty() {
                return Err(AppError::InvalidInput(
                    "--domain must not be empty".to_string(),
                ));
            }
            domain
        }
        None => {
            let domains = ctx.mail.list_domains().await?;
            domains
                .first()
                .map(|d| d.domain.clone())
                .ok_or_else(|| AppError::Provider("no domains available".to_string()))?
        }
    };

    let address = format!("{}@{domain}", random_local_part());
    let password = random_password();

    ctx.mail.create_account(&address, &password).await?;
    let token = ctx.mail.authenticate(&address, &password).await?;

    let session = Session::new(&address, token, password, SystemTime::now())?;
    ctx.session_store.save(&session)?;

    let result = NewMailboxResult {
        address: session.address.clone(),
        created_at_unix: session.created_at_unix,
    };
    let text = format!("mailbox ready: {}", session.address);
    ctx.output.emit(&text, &result)
}

fn random_local_part() -> String {
    let number: u32 = thread_rng().gen_range(10_000..100_000);
    format!("tm{number}")
}

fn random_password() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_part_is_prefixed_and_five_digits() {
        for _ in 0..32 {
            let local = random_local_part();
            assert!(local.starts_with("tm"));
            assert_eq!(local.len(), 7);
            assert!(local[2..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn passwords_are_long_and_distinct() {
        let a = random_password();
        let b = random_password();
        assert_eq!(a.len(), 20);
        assert_ne!(a, b);
    }
}
