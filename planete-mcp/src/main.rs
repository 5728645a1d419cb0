//! Planete MCP Server
//!
//! Line-delimited JSON-RPC over stdio. Protocol frames go to stdout, logs to
//! stderr.
//!
//! Tools:
//! - convert: Convert a value between two units, with an optional prefix
//! - convert_by_si: Ratio of two units through their SI values
//! - list_units / list_prefixes / list_categories: Browse the catalogs
//! - save_conversion / list_history / delete_conversion: Conversion history

mod config;
mod protocol;
mod render;
mod tools;

use std::io::{self, BufRead, IsTerminal, Write};
use planete_history::{HistoryStore, MemoryStore};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use crate::config::Config;
use crate::protocol::{handle_request, McpRequest, McpResponse, PROTOCOL_VERSION, SERVER_VERSION};
use crate::tools::Planete;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Write one frame and flush; stdout is locked only for the write
fn send(response: &McpResponse) -> io::Result<()> {
    let json = serde_json::to_string(response)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()
}

fn main() {
    init_logging();

    let config = Config::from_env();
    let history = config.open_history().unwrap_or_else(|e| {
        warn!(error = %e, "history unavailable, keeping conversions in memory");
        Box::new(MemoryStore::new()) as Box<dyn HistoryStore>
    });
    let planete = Planete::new(history);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Planete MCP Server started");
    info!(
        data_path = %config.data_path.display(),
        units = planete.units().len(),
        prefixes = planete.prefixes().len(),
        "catalogs loaded"
    );
    debug!(
        stdin_terminal = io::stdin().is_terminal(),
        stdout_terminal = io::stdout().is_terminal(),
        "stdio"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(error = %e, "unparseable request");
                        if let Err(e) = send(&McpResponse::parse_error(e)) {
                            error!(error = %e, "writing response failed");
                            break;
                        }
                        continue;
                    }
                };

                debug!(method = %request.method, "processing");
                let response = handle_request(&planete, &request);

                // Notifications (no id) get no response
                if request.id.is_none() {
                    debug!(method = %request.method, "notification processed");
                    continue;
                }

                if let Err(e) = send(&response) {
                    error!(error = %e, "writing response failed");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "reading input failed");
                break;
            }
        }
    }

    info!("server shutting down");
}
