//! Expands wildcard paths against a simulated CPE.
//!
//! Run with `cargo run --example basic_usage -p tr069-expander`.

use tr069_expander::{ExpanderError, ExpanderPool, PathExpander};

/// Canned GetParameterNames(NextLevel=true) answers of a small gateway.
fn simulate_discovery(prefix: &str) -> Vec<String> {
    let names: &[&str] = match prefix {
        "InternetGatewayDevice.LANDevice." => &[
            "InternetGatewayDevice.LANDevice.1.",
            "InternetGatewayDevice.LANDevice.2.",
            "InternetGatewayDevice.LANDevice.3.",
        ],
        "InternetGatewayDevice.LANDevice.1.WLANConfiguration." => &[
            "InternetGatewayDevice.LANDevice.1.WLANConfiguration.1.",
            "InternetGatewayDevice.LANDevice.1.WLANConfiguration.2.",
            "InternetGatewayDevice.LANDevice.1.WLANConfiguration.3.",
        ],
        // LANDevice 2 has no WLAN configurations
        "InternetGatewayDevice.LANDevice.3.WLANConfiguration." => {
            &["InternetGatewayDevice.LANDevice.3.WLANConfiguration.1."]
        }
        "Device.WiFi.AccessPoint." => &[
            "Device.WiFi.AccessPoint.1.",
            "Device.WiFi.AccessPoint.2.",
            "Device.WiFi.AccessPoint.3.",
        ],
        _ => &[],
    };
    names.iter().map(|name| name.to_string()).collect()
}

fn main() -> Result<(), ExpanderError> {
    println!("1. Single wildcard, driven by hand:");
    single_wildcard()?;

    println!("\n2. Multi-level wildcards with a discoverer:");
    multi_level()?;

    println!("\n3. Error handling:");
    error_handling();

    Ok(())
}

fn single_wildcard() -> Result<(), ExpanderError> {
    let mut expander = ExpanderPool::global().acquire();
    expander.add(["Device.WiFi.AccessPoint.*.Enable"])?;

    while let Some(prefix) = expander.next() {
        let names = simulate_discovery(&prefix);
        println!("  discover {prefix:?} -> {} name(s)", names.len());
        expander.register(&names)?;
    }

    for (position, path) in expander.collect()?.iter().enumerate() {
        println!("  {}. {path}", position + 1);
    }
    Ok(())
}

fn multi_level() -> Result<(), ExpanderError> {
    let mut expander = PathExpander::new();
    expander.add([
        "InternetGatewayDevice.LANDevice.*.WLANConfiguration.*.Enable",
        "InternetGatewayDevice.LANDevice.*.WLANConfiguration.*.SSID",
    ])?;

    let mut discover = |prefix: &str| -> Result<Vec<String>, String> {
        println!("  discover {prefix:?}");
        Ok(simulate_discovery(prefix))
    };
    let paths = expander.expand_with(&mut discover)?;

    println!("  {} path(s) after {} query(ies):", paths.len(), expander.discoveries());
    for path in &paths {
        println!("    {path}");
    }
    Ok(())
}

fn error_handling() {
    let mut expander = PathExpander::new();
    if let Err(error) = expander.add([""]) {
        println!("  empty pattern: {error}");
    }

    if let Err(error) = expander.register(&["Device.Test.1"]) {
        println!("  register before next: {error}");
    }

    expander
        .add(["Device.Test.*.Value"])
        .expect("valid pattern");
    if let Err(error) = expander.collect() {
        println!("  collect too early: {error}");
    }

    let _ = expander.next();
    if let Err(error) = expander.register_for("Device.Wrong.Path", &["Device.Wrong.Path.1"]) {
        println!("  wrong prefix: {error}");
    }
}
