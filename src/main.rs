//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves `static/` locally so the transition can be checked in a browser.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: &str = "8000";

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    let port = env::var("SCROLLFADE_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .env("SCROLLFADE_SKIP_PACK", "1")
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Serving whatever is already in static/pkg.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn();

    let mut server = match server {
        Ok(child) => child,
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            std::process::exit(1);
        }
    };

    // Keep process alive while the server runs.
    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                eprintln!("http server exited: {status}");
                std::process::exit(status.code().unwrap_or(1));
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(err) => {
                eprintln!("failed to poll http server: {err}");
                std::process::exit(1);
            }
        }
    }
}
