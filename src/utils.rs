//! Utility functions.

use tokio::signal;
use tracing::{error, info};

/// Signal that triggered a graceful shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT / Ctrl+C.
    Interrupt,
    /// SIGTERM.
    Terminate,
}

impl ShutdownSignal {
    /// Exit code of a process terminated by this signal.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShutdownSignal::Interrupt => 128 + 2,
            ShutdownSignal::Terminate => 128 + 15,
        }
    }

    /// Conventional signal name.
    pub fn name(&self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
        }
    }
}

/// Wait for SIGINT or SIGTERM.
pub async fn shutdown_signal() -> ShutdownSignal {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
    };

    info!("Received {}, shutting down", received.name());
    received
}

/// Format a service name as title case words.
///
/// Words break on separators, camelCase humps, acronym ends and
/// letter/digit transitions. Only the first character of each word is
/// changed, so `"myAPI-server"` becomes `"My API Server"`.
pub fn title_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|word| upper_first(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();

    for run in input.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = run.chars().collect();
        let mut current = String::new();

        for (i, &cur) in chars.iter().enumerate() {
            if i > 0 {
                let prev = chars[i - 1];
                let next = chars.get(i + 1).copied();
                let hump = prev.is_lowercase() && cur.is_uppercase();
                let acronym_end = prev.is_uppercase()
                    && cur.is_uppercase()
                    && next.is_some_and(char::is_lowercase);
                let digit_edge = prev.is_numeric() != cur.is_numeric();

                if hump || acronym_end || digit_edge {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(cur);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
