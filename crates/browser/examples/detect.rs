//! Detect the browser described by a navigator JSON document
//!
//! Usage: cargo run -p browser --example detect -- '{"userAgent": "...", "platform": "Win32"}'

use browser::{BrowserInfo, Navigator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let json = std::env::args().nth(1).unwrap_or_else(|| {
        r#"{"userAgent": "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0", "platform": "Linux x86_64"}"#
            .to_string()
    });

    let navigator = Navigator::from_json(&json)?;
    let info = BrowserInfo::detect(&navigator);

    println!("{}", info);
    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}
