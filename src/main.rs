#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod content;
#[cfg(any(target_arch = "wasm32", test))]
mod error;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod logging;
#[cfg(any(target_arch = "wasm32", test))]
mod page;
#[cfg(any(target_arch = "wasm32", test))]
mod parallax;
#[cfg(any(target_arch = "wasm32", test))]
mod theme;
#[cfg(any(target_arch = "wasm32", test))]
mod typing;
#[cfg(any(target_arch = "wasm32", test))]
mod visibility;

use serde_json::json;

use crate::logging::Logger;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let logger = Logger::default();

    match content::Portfolio::embedded() {
        Ok(portfolio) => logger.info("content.valid", portfolio.to_log_fields()),
        Err(error) => {
            logger.error("content.invalid", json!({ "error": error.to_string() }));
            std::process::exit(1);
        }
    }

    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    if let Err(error) = frontend::run() {
        Logger::default().error(
            "site.start_failed",
            json!({ "kind": error.kind(), "error": error.to_string() }),
        );
    }
}
