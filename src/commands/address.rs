use std::time::SystemTime;

use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::render;

#[derive(Debug, Serialize)]
struct AddressView {
    address: String,
    created_at_unix: u64,
    age: String,
}

/// Prints the active address on its own line so it pipes cleanly into other
/// tools (the CLI's copy-to-clipboard).
pub fn run(ctx: &AppContext) -> AppResult<()> {
    let session = ctx.require_session()?;
    let age = render::format_age(session.age_seconds(SystemTime::now()));

    let view = AddressView {
        address: session.address.clone(),
        created_at_unix: session.created_at_unix,
        age,
    };
    ctx.output.emit(&session.address, &view)
}
