use chrono::Utc;
use std::future;
use std::future::Future;
use std::io::ErrorKind;
use std::io::Result;
use tokio::fs;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::instrument;
use tracing::warn;
use tracing::Level;

use crypto_price_widget::config::{Config, WidgetConfig};
use crypto_price_widget::quote::client::TickerClient;
use crypto_price_widget::widget::asset::Asset;
use crypto_price_widget::widget::entry::DisplayEntry;
use crypto_price_widget::widget::provider::TimelineProvider;
use crypto_price_widget::widget::view::{render, WidgetFamily};

async fn read_config(file_path: &str) -> Result<Config> {
    let config_string = match fs::read_to_string(file_path).await {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("{} not found, using built-in BTC and ETH widgets", file_path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e),
    };
    let config: Config = serde_json::from_str(config_string.as_str())?;
    Ok(config)
}

fn show_entry(provider: &TimelineProvider, entry: &DisplayEntry, family: WidgetFamily) {
    let widget = provider.widget();
    info!(
        "{} [{}] as of {}: {}",
        widget.kind,
        entry.difference_class().color_name(),
        entry.date.format("%Y-%m-%d %H:%M:%S"),
        render(widget, entry, family).join(" | ")
    );
}

/// Plays the widget host for one widget: render the placeholder, then ask for
/// a timeline and wait until its refresh time, until stopped.
#[instrument(skip_all, fields(widget = provider.widget().kind))]
async fn run_widget_refresh_loop(
    provider: TimelineProvider,
    family: WidgetFamily,
    mut stop_signal_recv: oneshot::Receiver<()>,
) {
    info!(
        "Starting {} ({}): {}",
        provider.widget().kind,
        provider.widget().title,
        provider.widget().description
    );
    show_entry(&provider, &provider.placeholder(), family);

    loop {
        debug!("Refreshing timeline for {}", provider.widget().symbol_pair);

        let timeline = provider.timeline().await;
        for entry in &timeline.entries {
            show_entry(&provider, entry, family);
        }

        let wait = (timeline.next_refresh - Utc::now())
            .to_std()
            .unwrap_or_default();
        debug!(
            "Next refresh for {} at {}",
            provider.widget().symbol_pair,
            timeline.next_refresh
        );

        if let Ok(_) = timeout(wait, &mut stop_signal_recv).await {
            info!(
                "Received stop signal for {}, quit loop",
                provider.widget().kind
            );
            break;
        }
    }
}

/// Sends a stop signal to every widget once `shutdown` resolves. If listening
/// fails, the senders are held forever so the widgets keep running.
async fn stop_widgets_on_signal<F>(shutdown: F, stop_signal_channels: Vec<(Asset, oneshot::Sender<()>)>)
where
    F: Future<Output = Result<()>>,
{
    if let Err(e) = shutdown.await {
        error!("Failed to listen for Ctrl+C, widgets can only be stopped by killing the process: {}", e);
        future::pending::<()>().await;
    }

    info!("Ctrl+C pressed. Stopping...");
    for (asset, stop_signal) in stop_signal_channels {
        if stop_signal.send(()).is_err() {
            warn!("Stop signal receiver for {} widget is already dropped", asset);
        } else {
            info!("Stop signal sent to {} widget", asset);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let config = match read_config("app_config.json").await {
        Ok(config) => config,
        Err(error) => {
            error!("Error reading config file: {}", error);
            return;
        }
    };

    let client = match TickerClient::new(
        &config.api_base_url,
        std::time::Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(client) => client,
        Err(error) => {
            error!("Error creating ticker client: {}", error);
            return;
        }
    };

    let mut tasks = Vec::new();
    let mut stop_signal_channels = Vec::new();

    for WidgetConfig { asset, family } in config.widgets {
        debug!("Loaded config for widget: {}, family {:?}", asset, family);

        let (stop_signal_send, stop_signal_recv) = oneshot::channel();
        let provider = TimelineProvider::new(client.clone(), asset.widget());

        tasks.push(tokio::spawn(async move {
            run_widget_refresh_loop(provider, family, stop_signal_recv).await;
        }));

        stop_signal_channels.push((asset, stop_signal_send));
    }

    tokio::spawn(stop_widgets_on_signal(signal::ctrl_c(), stop_signal_channels));

    info!("Waiting for all widgets to finish...");
    for task in tasks {
        let _ = task.await;
    }

    info!("All widgets finished.");
}
