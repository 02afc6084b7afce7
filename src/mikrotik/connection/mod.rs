// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Low-level RouterOS API connection handling

mod auth;
mod parse;
mod protocol;

use std::collections::HashMap;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::error::RouterError;

pub(crate) use parse::{
    parse_dhcp_leases, parse_health, parse_identity, parse_interfaces, parse_netwatch,
    parse_system, summarize_connections,
};
pub use protocol::{encode_length, read_length, read_word, write_word};

/// One reply row: the `=key=value` attributes of a `!re` sentence
pub(crate) type Sentence = HashMap<String, String>;

/// Low-level RouterOS API connection
pub(super) struct RouterOsConnection {
    stream: TcpStream,
    read_timeout: Duration,
}

impl RouterOsConnection {
    /// Opens the TCP socket; the same timeout bounds every later reply
    pub(super) async fn connect(addr: &str, limit: Duration) -> Result<Self, RouterError> {
        tracing::trace!("Attempting TCP connection to: {}", addr);
        let stream = timeout(limit, TcpStream::connect(addr))
            .await
            .map_err(|_| RouterError::ConnectTimeout {
                addr: addr.to_string(),
                timeout: limit,
            })?
            .map_err(|source| RouterError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        tracing::trace!("TCP connection established to: {}", addr);
        Ok(Self {
            stream,
            read_timeout: limit,
        })
    }

    pub(super) async fn command(
        &mut self,
        path: &str,
        args: &[&str],
    ) -> Result<Vec<Sentence>, RouterError> {
        let mut words: Vec<String> = Vec::with_capacity(1 + args.len());
        words.push(path.to_string());
        for a in args {
            words.push((*a).to_string());
        }
        self.raw_command(words).await
    }

    async fn raw_command(&mut self, words: Vec<String>) -> Result<Vec<Sentence>, RouterError> {
        self.send_words(&words).await?;
        self.read_sentences().await
    }

    async fn send_words(&mut self, words: &[String]) -> Result<(), RouterError> {
        for w in words {
            write_word(&mut self.stream, w).await?;
        }
        // zero length word terminator
        self.stream.write_all(&[0]).await?;
        Ok(())
    }

    async fn read_sentences(&mut self) -> Result<Vec<Sentence>, RouterError> {
        let limit = self.read_timeout;
        timeout(limit, self.read_reply())
            .await
            .map_err(|_| RouterError::ReadTimeout(limit))?
    }

    async fn read_reply(&mut self) -> Result<Vec<Sentence>, RouterError> {
        let mut sentences: Vec<Sentence> = Vec::new();
        let mut current: Option<Sentence> = None;
        loop {
            let word = read_word(&mut self.stream).await?;
            if word.is_empty() {
                continue;
            }
            tracing::trace!("Received word: {}", word);
            match word.as_str() {
                "!done" => {
                    if let Some(s) = current.take() {
                        sentences.push(s);
                    }
                    // `!done` may carry its own attributes (e.g. `=ret=`)
                    let tail = self.read_attributes().await?;
                    if !tail.is_empty() {
                        sentences.push(tail);
                    }
                    tracing::trace!("Command complete, {} sentences received", sentences.len());
                    return Ok(sentences);
                }
                "!trap" => {
                    tracing::trace!("Trap received, reading trap details");
                    let trap = self.read_attributes().await?;
                    self.drain_until_done().await?;
                    let msg = trap
                        .get("message")
                        .cloned()
                        .unwrap_or_else(|| "trap".to_string());
                    return Err(RouterError::Trap(msg));
                }
                "!fatal" => {
                    let reason = read_word(&mut self.stream).await.unwrap_or_default();
                    return Err(RouterError::Protocol(format!(
                        "session closed by router: {reason}"
                    )));
                }
                "!re" => {
                    if let Some(s) = current.take() {
                        sentences.push(s);
                    }
                    current = Some(HashMap::new());
                }
                _ => {
                    if let Some(stripped) = word.strip_prefix('=') {
                        let tgt = current.get_or_insert_with(HashMap::new);
                        if let Some((k, v)) = stripped.split_once('=') {
                            tgt.insert(k.to_string(), v.to_string());
                        }
                    }
                    // ignore other headers
                }
            }
        }
    }

    /// Reads the rest of the current sentence as attributes
    async fn read_attributes(&mut self) -> Result<Sentence, RouterError> {
        let mut attrs = HashMap::new();
        loop {
            let w = read_word(&mut self.stream).await?;
            if w.is_empty() {
                return Ok(attrs);
            }
            if let Some((k, v)) = w.strip_prefix('=').and_then(|s| s.split_once('=')) {
                attrs.insert(k.to_string(), v.to_string());
            }
        }
    }

    /// Skips everything up to and including the `!done` that closes a trapped command
    async fn drain_until_done(&mut self) -> Result<(), RouterError> {
        loop {
            let w = read_word(&mut self.stream).await?;
            if w == "!done" {
                self.read_attributes().await?;
                return Ok(());
            }
        }
    }

    pub(super) async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::trace!("Socket shutdown failed: {}", e);
        }
    }
}
