use std::path::Path;

use crate::{ClientArgs, CredentialArgs, OutputArgs};

use super::config::load_items;
use super::run::run_items;
use super::validate::preflight;

pub async fn execute_cmd(
    path: &Path,
    no_validate: bool,
    events: bool,
    output: OutputArgs,
    credentials: CredentialArgs,
    client: ClientArgs,
) -> i32 {
    let parsed = match load_items(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    tracing::info!(items = parsed.items.len(), format = ?parsed.format, "loaded items");

    if !no_validate {
        if let Err(code) = preflight(&parsed.items, &output) {
            return code;
        }
    }

    run_items(parsed.items, events, &output, &credentials, &client).await
}
