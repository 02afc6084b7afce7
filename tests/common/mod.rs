// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Scripted RouterOS API endpoint for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mikrotik_status::{RouterConfig, read_word, write_word};
use secrecy::SecretString;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;

/// Canned answer for one command path
#[derive(Debug, Clone)]
pub enum Reply {
    Rows(Vec<Vec<(&'static str, &'static str)>>),
    Trap(&'static str),
    /// Pre-6.43 login: a bare `/login` gets `!done =ret=<hex>`, the
    /// follow-up with `=response=` gets a plain `!done`
    Challenge(&'static str),
    /// Reads the command and never answers
    Silent,
}

type Received = Arc<Mutex<Vec<Vec<String>>>>;

/// Answers API sentences by command path; `/login` succeeds unless scripted
/// otherwise and unknown paths trap like a missing package would.
pub struct FakeRouter {
    pub addr: SocketAddr,
    received: Received,
}

impl FakeRouter {
    pub async fn start(script: Vec<(&'static str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let script: Arc<HashMap<&'static str, Reply>> = Arc::new(script.into_iter().collect());
        let received = Received::default();

        let log = received.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let script = script.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let _ = serve(&mut stream, &script, &log).await;
                });
            }
        });

        Self { addr, received }
    }

    pub fn config(&self) -> RouterConfig {
        router_config(&self.addr.ip().to_string(), self.addr.port())
    }

    /// Every sentence received so far, in order
    pub fn received(&self) -> Vec<Vec<String>> {
        self.received.lock().unwrap().clone()
    }
}

pub fn router_config(host: &str, port: u16) -> RouterConfig {
    RouterConfig {
        host: host.to_string(),
        port,
        username: "monitor".to_string(),
        password: SecretString::from("secret".to_string()),
        plaintext_login: true,
        timeout: Duration::from_secs(2),
    }
}

/// A netwatch row as RouterOS prints it
pub fn netwatch_row(
    host: &'static str,
    status: &'static str,
    comment: &'static str,
) -> Vec<(&'static str, &'static str)> {
    vec![
        ("host", host),
        ("status", status),
        ("since", "mar/01/2025 09:00:00"),
        ("last-up", "mar/01/2025 08:00:00"),
        ("last-down", "feb/28/2025 23:10:00"),
        ("comment", comment),
    ]
}

async fn serve<S>(
    stream: &mut S,
    script: &HashMap<&'static str, Reply>,
    received: &Received,
) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let sentence = read_sentence(stream).await?;
        received.lock().unwrap().push(sentence.clone());
        let Some(path) = sentence.first() else {
            continue;
        };
        let reply = match script.get(path.as_str()) {
            Some(reply) => reply.clone(),
            None if path == "/login" => Reply::Rows(vec![]),
            None => Reply::Trap("no such command prefix"),
        };
        match reply {
            Reply::Rows(rows) => {
                for row in rows {
                    write_word(stream, "!re").await?;
                    for (k, v) in row {
                        write_word(stream, &format!("={k}={v}")).await?;
                    }
                    write_word(stream, "").await?;
                }
            }
            Reply::Trap(message) => {
                write_word(stream, "!trap").await?;
                write_word(stream, &format!("=message={message}")).await?;
                write_word(stream, "").await?;
            }
            Reply::Challenge(challenge) if sentence.len() == 1 => {
                write_word(stream, "!done").await?;
                write_word(stream, &format!("=ret={challenge}")).await?;
                write_word(stream, "").await?;
                continue;
            }
            Reply::Challenge(_) => {}
            Reply::Silent => continue,
        }
        write_word(stream, "!done").await?;
        write_word(stream, "").await?;
    }
}

async fn read_sentence<S>(stream: &mut S) -> std::io::Result<Vec<String>>
where
    S: AsyncRead + Unpin,
{
    let mut words = Vec::new();
    loop {
        let word = read_word(stream).await?;
        if word.is_empty() {
            return Ok(words);
        }
        words.push(word);
    }
}
