//! `netglance status` -- one-shot resolve and print.

use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;

use netglance_core::{
    GeoStatus, MonitorConfig, NetMonitor, StatusStore, SysfsPathSource, status_glyph,
};

use crate::cli::StatusArgs;
use crate::error::CliError;

/// Extra slack on top of the request timeout before giving up on the
/// lookup and printing whatever state we have.
const COMPLETION_SLACK: Duration = Duration::from_secs(1);

/// How long to wait for the first WiFi sample.
const WIFI_WAIT: Duration = Duration::from_secs(5);

pub async fn run(args: &StatusArgs, config: MonitorConfig) -> Result<(), CliError> {
    let monitor = NetMonitor::new(config)?;
    let store = Arc::clone(monitor.store());

    let mut connectivity = store.subscribe_connectivity();
    let mut last_update = store.subscribe_last_update();

    let poll = monitor.config().path_poll_interval;
    monitor.start(SysfsPathSource::new(poll)).await;

    // First path observation lands quickly; don't stall if the state
    // matches the defaults and never notifies.
    let _ = tokio::time::timeout(Duration::from_millis(300), connectivity.changed()).await;

    // The lookup records a completion timestamp on success and failure
    // alike, so this wait covers both outcomes.
    let wait = monitor.config().request_timeout + COMPLETION_SLACK;
    let _ = tokio::time::timeout(wait, last_update.changed()).await;

    // One WiFi reading, only when WiFi is actually in use.
    if !args.no_wifi && store.connectivity().uses_wifi() {
        let mut wifi = store.subscribe_wifi();
        monitor.start_wifi_sampling();
        let _ = tokio::time::timeout(WIFI_WAIT, wifi.changed()).await;
        monitor.stop_wifi_sampling();
    }

    if args.json {
        print_json(&store)?;
    } else {
        print_text(&store);
    }

    monitor.shutdown().await;
    Ok(())
}

fn print_text(store: &StatusStore) {
    let conn = store.connectivity();
    let geo = store.geo();
    let wifi = store.wifi_sample();
    let glyph = status_glyph(conn.reachable, &geo);

    match &geo {
        GeoStatus::Resolved(result) => {
            let country = if result.country_code.is_empty() {
                String::new()
            } else {
                format!(" - {} ({})", result.country_name(), result.country_code)
            };
            println!("{glyph} {}{country}", result.public_ip.bold());
        }
        GeoStatus::Unavailable => println!("{glyph} {}", "No connection".red()),
        GeoStatus::Pending => println!("{glyph} {}", "Resolving...".dimmed()),
    }

    let reachable = if conn.reachable {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    };
    println!(
        "  {} {reachable} ({})",
        "reachable:".dimmed(),
        super::interfaces_label(&conn)
    );

    if let Some(sampled_at) = wifi.sampled_at {
        println!(
            "  {} {} ({}%), sampled {}",
            "wifi:".dimmed(),
            wifi.ssid,
            wifi.percent,
            sampled_at.format("%H:%M:%S")
        );
    }

    if let Some(updated) = store.last_update() {
        println!(
            "  {} {}",
            "updated:".dimmed(),
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}

fn print_json(store: &StatusStore) -> Result<(), CliError> {
    let conn = store.connectivity();
    let geo = store.geo();
    let wifi = store.wifi_sample();

    let wifi_payload = if wifi.sampled_at.is_some() {
        serde_json::to_value(&wifi)?
    } else {
        serde_json::Value::Null
    };

    let payload = serde_json::json!({
        "reachable": conn.reachable,
        "interfaces": conn.interfaces,
        "glyph": status_glyph(conn.reachable, &geo),
        "geo": geo,
        "wifi": wifi_payload,
        "lastUpdate": store.last_update(),
    });

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
