// ProfileLookup - app/headless.rs
//
// One-shot lookup without a window (`--query <USERNAME>`): run the query on
// the calling thread, print the result the same way the view renders it,
// and report failure through the return value.

use crate::core::query::{self, GraphQlTransport};
use crate::util::error::{ProfileLookupError, Result};
use std::io::Write;

/// Look up `username` and write the pretty-printed `data` payload plus a
/// trailing newline to `out`.
pub fn run(transport: &dyn GraphQlTransport, username: &str, out: &mut dyn Write) -> Result<()> {
    tracing::info!(endpoint = transport.endpoint(), username, "Headless lookup");

    let data = query::query_profile(transport, username)?;
    let text = query::to_pretty_json(Some(&data));

    writeln!(out, "{text}")
        .and_then(|()| out.flush())
        .map_err(|source| ProfileLookupError::Io {
            operation: "writing result",
            source,
        })
}
