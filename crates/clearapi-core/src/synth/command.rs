use crate::parse::components::Components;
use crate::parse::operation::{HttpMethod, Operation};

use super::example::synthesize_default;

/// Credential text used in the `Authorization` header unless configured.
pub const TOKEN_PLACEHOLDER: &str = "<token>";

/// Line continuation between command arguments.
const CONTINUATION: &str = " \\\n  ";

/// Options for [`build_command_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    /// Bearer token text. The header is emitted regardless.
    pub token: String,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            token: TOKEN_PLACEHOLDER.to_string(),
        }
    }
}

/// Build a copyable `curl` invocation for one operation.
///
/// ```text
/// curl -X POST "https://api.example.com/users/:id/roles" \
///   -H "Content-Type: application/json" \
///   -H "Authorization: Bearer <token>" \
///   -d '{
///   "role": "admin"
/// }'
/// ```
pub fn build_command(
    method: HttpMethod,
    path: &str,
    operation: &Operation,
    server: Option<&str>,
    components: &Components,
) -> String {
    build_command_with_options(
        method,
        path,
        operation,
        server,
        components,
        &CommandOptions::default(),
    )
}

/// [`build_command`] with explicit options.
pub fn build_command_with_options(
    method: HttpMethod,
    path: &str,
    operation: &Operation,
    server: Option<&str>,
    components: &Components,
    options: &CommandOptions,
) -> String {
    let mut args = vec![format!(
        "curl -X {} \"{}\"",
        method.as_str(),
        escape_double_quoted(&request_url(server, path))
    )];

    if operation.request_body.is_some() {
        args.push("-H \"Content-Type: application/json\"".to_string());
    }
    args.push(format!(
        "-H \"Authorization: Bearer {}\"",
        escape_double_quoted(&options.token)
    ));

    let payload = operation
        .json_request_schema()
        .and_then(|schema| synthesize_default(schema, components));
    if let Some(payload) = payload {
        let json = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
        args.push(format!("-d '{}'", escape_single_quotes(&json)));
    }

    args.join(CONTINUATION)
}

/// Join the server and path with exactly one `/`, after rewriting path
/// templates. Without a server the path is used as-is.
pub fn request_url(server: Option<&str>, path: &str) -> String {
    let path = colon_params(path);
    match server {
        Some(base) => {
            let base = base.strip_suffix('/').unwrap_or(base);
            let rest = path.strip_prefix('/').unwrap_or(&path);
            format!("{base}/{rest}")
        }
        None => path,
    }
}

/// Rewrite `{name}` placeholders to `:name`.
/// e.g. `/users/{id}/roles` → `/users/:id/roles`
pub fn colon_params(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push(':');
        out.push_str(&rest[open + 1..open + len]);
        rest = &rest[open + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Make text literal inside a double-quoted shell argument.
fn escape_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Make text safe inside a single-quoted shell argument.
fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', r"'\''")
}
