//! `netglance watch` -- stream status changes until interrupted.

use std::sync::Arc;

use owo_colors::OwoColorize;

use netglance_core::{
    GeoStatus, MonitorConfig, NetMonitor, StatusStore, SysfsPathSource, status_glyph,
};

use crate::cli::WatchArgs;
use crate::error::CliError;

pub async fn run(args: &WatchArgs, config: MonitorConfig) -> Result<(), CliError> {
    let monitor = NetMonitor::new(config)?;
    let store = Arc::clone(monitor.store());

    let mut connectivity = store.subscribe_connectivity();
    let mut geo = store.subscribe_geo();
    let mut wifi = store.subscribe_wifi();

    let poll = monitor.config().path_poll_interval;
    monitor.start(SysfsPathSource::new(poll)).await;
    if !args.no_wifi {
        monitor.start_wifi_sampling();
    }

    println!("{}", "watching network status (ctrl-c to stop)".dimmed());
    print_line(&store);

    loop {
        tokio::select! {
            biased;
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            changed = connectivity.changed() => {
                if changed.is_none() { break; }
                print_line(&store);
            }
            changed = geo.changed() => {
                if changed.is_none() { break; }
                print_line(&store);
            }
            changed = wifi.changed() => {
                if changed.is_none() { break; }
                print_line(&store);
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

/// One compact line per change, newest state wins.
fn print_line(store: &StatusStore) {
    let conn = store.connectivity();
    let geo = store.geo();
    let wifi = store.wifi_sample();
    let glyph = status_glyph(conn.reachable, &geo);

    let geo_label = match &geo {
        GeoStatus::Resolved(result) if result.country_code.is_empty() => {
            result.public_ip.clone()
        }
        GeoStatus::Resolved(result) => {
            format!("{} {} {}", result.public_ip, result.flag(), result.country_code)
        }
        GeoStatus::Unavailable => "no connection".red().to_string(),
        GeoStatus::Pending => "resolving...".dimmed().to_string(),
    };

    let wifi_label = match wifi.sampled_at {
        Some(_) => format!("  {} {}%", wifi.ssid, wifi.percent),
        None => String::new(),
    };

    let stamp = chrono::Utc::now().format("%H:%M:%S");
    println!(
        "{} {glyph} {geo_label}  [{}]{wifi_label}",
        stamp.to_string().dimmed(),
        super::interfaces_label(&conn)
    );
}
