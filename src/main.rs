// Prevents an extra console window on Windows in release.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    if let Err(e) = snip_lib::run() {
        log::error!("{}", e);
        eprintln!("snip: {}", e);
        std::process::exit(1);
    }
}
