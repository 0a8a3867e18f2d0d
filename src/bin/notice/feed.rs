use std::future::Future;
use std::io::{self, BufRead};
use std::thread;

use async_channel::{Receiver, Sender, TrySendError};
use notice::notifier::Notifier;
use notice::target::DisplayTarget;
use notice::types::{Category, Notification};
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

const PREFIXES: [&str; 2] = ["success", "error"];

/// How the stdin feed ended.
#[derive(Debug)]
pub enum FeedEnd {
    Interrupted,
    Finished(io::Result<()>),
}

/// Forward every non-blank line of `input` to the notifier task.
///
/// Blocks the calling thread; waits on the notifier when the queue is full.
pub fn read_lines<R: BufRead>(input: R, tx: Sender<Notification>) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let notification = parse_line(&line);
        match tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(notification)) => {
                warn!("notice queue full; waiting for the notifier");
                if tx.send_blocking(notification).is_err() {
                    break;
                }
            }
            Err(TrySendError::Closed(_)) => break,
        }
    }
    tx.close();
    Ok(())
}

/// Run [`read_lines`] on its own OS thread.
///
/// A blocked read cannot be cancelled, so the thread is detached and the
/// runtime only waits on the returned receiver.
pub fn spawn_reader<R>(
    input: R,
    tx: Sender<Notification>,
) -> io::Result<oneshot::Receiver<io::Result<()>>>
where
    R: BufRead + Send + 'static,
{
    let (done_tx, done_rx) = oneshot::channel();
    thread::Builder::new()
        .name("notice-stdin".to_string())
        .spawn(move || {
            let res = read_lines(input, tx);
            if done_tx.send(res).is_err() {
                debug!("feed finished after shutdown");
            }
        })?;
    Ok(done_rx)
}

/// Wait for the reader to finish or for `shutdown`, whichever comes first.
pub async fn wait_for_feed<F>(shutdown: F, done: oneshot::Receiver<io::Result<()>>) -> FeedEnd
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = shutdown => FeedEnd::Interrupted,
        res = done => FeedEnd::Finished(
            res.unwrap_or_else(|_| Err(io::Error::other("stdin reader stopped unexpectedly"))),
        ),
    }
}

/// Display notices as they arrive until the feed closes.
pub async fn run_notifier<T: DisplayTarget>(
    rx: Receiver<Notification>,
    mut notifier: Notifier<T>,
) -> Notifier<T> {
    while let Ok(notification) = rx.recv().await {
        debug!(category = %notification.category, "notice received");
        if let Err(err) = notifier.display_notification(&notification) {
            error!(error = %err, "failed to display notice");
        }
    }
    notifier
}

/// `category<TAB>text`, `success: text` or `error: text`; anything else is an
/// error notice carrying the whole line.
pub fn parse_line(line: &str) -> Notification {
    if let Some((category, text)) = line.split_once('\t') {
        return Notification::new(text, category.trim());
    }
    match line.split_once(':') {
        Some((prefix, text)) if PREFIXES.contains(&prefix.trim()) => {
            Notification::new(text.trim_start(), prefix.trim())
        }
        _ => Notification::new(line, Category::Error),
    }
}
