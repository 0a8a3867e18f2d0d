use std::io::IsTerminal;
use std::path::PathBuf;

use async_channel::bounded;
use notice::Result;
use notice::config::{Config, HidePolicy, NotifySettings};
use notice::document::Document;
use notice::error::{ConfigError, Error as NoticeError};
use notice::notifier::Notifier;
use notice::target::{DisplayTarget, StatusLine};
use notice::telemetry::init_tracing;
use tokio::signal;
use tracing::{debug, info, warn};

use super::cli::Cli;
use super::feed::{FeedEnd, run_notifier, spawn_reader, wait_for_feed};

const DEFAULT_CONFIG: &str = "notice.toml";

type BoxedNotifier = Notifier<Box<dyn DisplayTarget>>;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;

    if let Some(hide_after) = cli.hide_after {
        if hide_after.is_zero() {
            return Err(NoticeError::from(ConfigError::InvalidField {
                field: "cli.hide_after",
                message: "delay must be greater than zero".to_string(),
            }));
        }
        config.notify.hide_after = hide_after;
    }
    if cli.overlap {
        config.notify.hide_policy = HidePolicy::Overlap;
    }

    let output = outputs(wants_desktop(&cli), &config.notify)
        .resolve(&config.notify.primary_id, &config.notify.fallback_id)?;
    debug!(?output, "output selected");
    let notifier = Notifier::new(build_target(output, cli.plain), config.notify.clone())?;

    match cli.message.as_deref() {
        Some(message) => show_one(notifier, message, cli.category.as_deref()).await,
        None => show_stdin(notifier, &config).await,
    }
}

/// Where notices go.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Output {
    Terminal,
    #[cfg(target_os = "linux")]
    Desktop,
}

/// Outputs addressable by the configured identifiers: the desktop popup under
/// the primary one when requested, the terminal status line as fallback.
fn outputs(desktop: bool, settings: &NotifySettings) -> Document<Output> {
    let mut document = Document::new();
    document.insert(settings.fallback_id.clone(), Output::Terminal);
    if desktop {
        #[cfg(target_os = "linux")]
        document.insert(settings.primary_id.clone(), Output::Desktop);
    }
    document
}

#[cfg(target_os = "linux")]
const fn wants_desktop(cli: &Cli) -> bool {
    cli.desktop
}

#[cfg(not(target_os = "linux"))]
const fn wants_desktop(_cli: &Cli) -> bool {
    false
}

fn build_target(output: Output, plain: bool) -> Box<dyn DisplayTarget> {
    match output {
        #[cfg(target_os = "linux")]
        Output::Desktop => Box::new(notice::target::DesktopTarget::new("notice")),
        Output::Terminal => {
            let stdout = std::io::stdout();
            let ansi = !plain && stdout.is_terminal();
            Box::new(StatusLine::new(stdout, ansi))
        }
    }
}

async fn show_one(
    mut notifier: BoxedNotifier,
    message: &str,
    category: Option<&str>,
) -> Result<()> {
    notifier.display(message, category)?;
    settle_or_interrupt(&mut notifier).await
}

async fn show_stdin(notifier: BoxedNotifier, config: &Config) -> Result<()> {
    let (tx, rx) = bounded(config.app.queue_bound);
    let display = tokio::spawn(run_notifier(rx, notifier));
    let done = spawn_reader(std::io::BufReader::new(std::io::stdin()), tx.clone())?;

    let end = wait_for_feed(interrupt(), done).await;
    tx.close();

    let mut notifier = display.await?;

    match end {
        FeedEnd::Interrupted => {
            info!("shutdown signal received, hiding notice");
            notifier.hide_now()
        }
        FeedEnd::Finished(Ok(())) => settle_or_interrupt(&mut notifier).await,
        FeedEnd::Finished(Err(err)) => {
            notifier.hide_now()?;
            Err(err.into())
        }
    }
}

async fn interrupt() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn settle_or_interrupt(notifier: &mut BoxedNotifier) -> Result<()> {
    let interrupted = tokio::select! {
        () = interrupt() => true,
        () = notifier.settle() => false,
    };
    if interrupted {
        info!("interrupted, hiding notice");
        notifier.hide_now()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Output, outputs};
    use notice::config::NotifySettings;

    fn settings(primary: &str, fallback: &str) -> NotifySettings {
        NotifySettings {
            primary_id: primary.to_string(),
            fallback_id: fallback.to_string(),
            ..NotifySettings::default()
        }
    }

    fn resolve(desktop: bool, settings: &NotifySettings) -> Output {
        match outputs(desktop, settings).resolve(&settings.primary_id, &settings.fallback_id) {
            Ok(output) => output,
            Err(err) => panic!("an output should always resolve: {err}"),
        }
    }

    #[test]
    fn terminal_is_registered_under_the_fallback_identifier() {
        let settings = settings("popup", "status");
        let document = outputs(false, &settings);
        assert!(document.contains("status"));
        assert!(!document.contains("popup"));
        assert!(!document.contains("message"));
        assert_eq!(resolve(false, &settings), Output::Terminal);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn desktop_is_resolved_through_the_primary_identifier() {
        let settings = settings("popup", "status");
        assert!(outputs(true, &settings).contains("popup"));
        assert_eq!(resolve(true, &settings), Output::Desktop);
    }
}
