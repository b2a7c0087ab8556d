#![allow(warnings)]
//! Billed Frontend Entry Point

mod models;
mod format;
mod store;
mod session;
mod config;
mod views;
mod containers;
mod router;
mod app;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    if config.enable_logging {
        wasm_logger::init(wasm_logger::Config::new(config.log_level));
    }
    log::info!("[APP] Billed starting ({})", config.environment);

    mount_to_body(App);
}
