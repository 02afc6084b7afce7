// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS authentication

use md5::compute as md5_compute;

use super::RouterOsConnection;
use crate::mikrotik::error::RouterError;

impl RouterOsConnection {
    /// Logs in with either the plaintext method (RouterOS 6.43+) or the
    /// legacy MD5 challenge-response method.
    pub(crate) async fn login(
        &mut self,
        username: &str,
        password: &str,
        plaintext: bool,
    ) -> Result<(), RouterError> {
        tracing::trace!("Attempting login for user: {}", username);
        if plaintext {
            self.login_plaintext(username, password).await
        } else {
            self.login_challenge(username, password).await
        }
    }

    async fn login_plaintext(&mut self, username: &str, password: &str) -> Result<(), RouterError> {
        let sentences = self
            .raw_command(vec![
                "/login".to_string(),
                format!("=name={username}"),
                format!("=password={password}"),
            ])
            .await
            .map_err(auth_failure)?;

        tracing::trace!("Login response received, {} sentences", sentences.len());
        for s in &sentences {
            if let Some(msg) = s.get("message") {
                if msg.contains("failure") || msg.contains("invalid") {
                    tracing::trace!("Login failed with message: {}", msg);
                    return Err(RouterError::Auth(msg.clone()));
                }
                tracing::debug!("Login message: {}", msg);
            }
            // Pre-6.43 routers answer a plaintext login with a challenge
            if s.contains_key("ret") {
                return Err(RouterError::Auth(
                    "router requested challenge-response login; disable plaintext login"
                        .to_string(),
                ));
            }
        }
        tracing::debug!("Login successful (plaintext method)");
        Ok(())
    }

    async fn login_challenge(&mut self, username: &str, password: &str) -> Result<(), RouterError> {
        tracing::trace!("Requesting challenge for legacy login");
        let sentences = self
            .raw_command(vec!["/login".to_string()])
            .await
            .map_err(auth_failure)?;
        let challenge_hex = sentences
            .iter()
            .find_map(|s| s.get("ret").cloned())
            .ok_or_else(|| RouterError::Protocol("No challenge 'ret' received".to_string()))?;
        tracing::trace!("Challenge received, length: {}", challenge_hex.len());
        let challenge = hex::decode(&challenge_hex)
            .map_err(|e| RouterError::Protocol(format!("Malformed login challenge: {e}")))?;

        let response = challenge_response(password, &challenge);

        let login_sentences = self
            .raw_command(vec![
                "/login".to_string(),
                format!("=name={username}"),
                format!("=response={response}"),
            ])
            .await
            .map_err(auth_failure)?;
        // If no !trap assume success
        for s in &login_sentences {
            if let Some(msg) = s.get("message") {
                tracing::warn!("Login message: {}", msg);
            }
        }
        tracing::debug!("Login successful (legacy method)");
        Ok(())
    }
}

/// A trap during `/login` is a credential rejection, not a command failure
fn auth_failure(err: RouterError) -> RouterError {
    match err {
        RouterError::Trap(msg) => RouterError::Auth(msg),
        other => other,
    }
}

/// `"00"` followed by hex(MD5(0x00 + password + challenge))
fn challenge_response(password: &str, challenge: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + password.len() + challenge.len());
    data.push(0u8);
    data.extend_from_slice(password.as_bytes());
    data.extend_from_slice(challenge);
    let digest = md5_compute(&data);
    let mut response = String::from("00");
    response.push_str(&hex::encode(digest.0));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_response_format() {
        let challenge = hex::decode("ebddd18303a54111e2dea05a92ab46b4").unwrap();
        let response = challenge_response("secret", &challenge);

        assert_eq!(response.len(), 34);
        assert!(response.starts_with("00"));
        assert!(response[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_challenge_response_known_vector() {
        let challenge = hex::decode("ebddd18303a54111e2dea05a92ab46b4").unwrap();

        assert_eq!(
            challenge_response("secret", &challenge),
            "007319531c22b6b85e160d6ac355c1df2e"
        );
    }

    #[test]
    fn test_challenge_response_depends_on_password() {
        let challenge = [0xAB; 16];
        assert_ne!(
            challenge_response("one", &challenge),
            challenge_response("two", &challenge)
        );
    }

    #[test]
    fn test_auth_failure_maps_trap() {
        let err = auth_failure(RouterError::Trap("invalid user name or password (6)".into()));
        assert!(matches!(err, RouterError::Auth(_)));

        let err = auth_failure(RouterError::Protocol("garbage".into()));
        assert!(matches!(err, RouterError::Protocol(_)));
    }
}
