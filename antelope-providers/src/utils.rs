use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Runs `fut` to completion unless `token` is cancelled first, in which case the future is
/// dropped and `None` is returned.
///
/// Without a token the future simply runs to completion.
pub async fn cancellable<F: Future>(token: Option<&CancellationToken>, fut: F) -> Option<F::Output> {
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => None,
            out = fut => Some(out),
        },
        None => Some(fut.await),
    }
}

/// Checks the parts of an account name that can be judged without the node: it must be
/// present and at most 13 characters long
pub fn check_account_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("account name is empty".to_owned())
    }
    let len = name.chars().count();
    if len > 13 {
        return Err(format!("account name `{name}` is {len} characters long, at most 13 are allowed"))
    }
    Ok(())
}
