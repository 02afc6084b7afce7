// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS wire protocol helpers

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

// RouterOS protocol length encoding - intentional truncation is part of the wire format
#[allow(clippy::cast_possible_truncation)]
pub fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        vec![len as u8]
    } else if len < 0x4000 {
        vec![((len >> 8) as u8) | 0x80, (len & 0xFF) as u8]
    } else if len < 0x0020_0000 {
        vec![
            ((len >> 16) as u8) | 0xC0,
            ((len >> 8) & 0xFF) as u8,
            (len & 0xFF) as u8,
        ]
    } else if len < 0x1000_0000 {
        vec![
            ((len >> 24) as u8) | 0xE0,
            ((len >> 16) & 0xFF) as u8,
            ((len >> 8) & 0xFF) as u8,
            (len & 0xFF) as u8,
        ]
    } else {
        vec![
            0xF0,
            ((len >> 24) & 0xFF) as u8,
            ((len >> 16) & 0xFF) as u8,
            ((len >> 8) & 0xFF) as u8,
            (len & 0xFF) as u8,
        ]
    }
}

/// Reads one length prefix from the stream.
///
/// The five byte form carries the length in the four bytes after the
/// `0xF0` marker.
pub async fn read_length<R>(stream: &mut R) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let first = stream.read_u8().await?;
    let len = if first & 0x80 == 0 {
        first as usize
    } else if first & 0xC0 == 0x80 {
        let second = stream.read_u8().await?;
        (((first & 0x3F) as usize) << 8) + second as usize
    } else if first & 0xE0 == 0xC0 {
        let second = stream.read_u8().await?;
        let third = stream.read_u8().await?;
        (((first & 0x1F) as usize) << 16) + ((second as usize) << 8) + third as usize
    } else if first & 0xF0 == 0xE0 {
        let second = stream.read_u8().await?;
        let third = stream.read_u8().await?;
        let fourth = stream.read_u8().await?;
        (((first & 0x0F) as usize) << 24)
            + ((second as usize) << 16)
            + ((third as usize) << 8)
            + fourth as usize
    } else {
        stream.read_u32().await? as usize
    };
    Ok(len)
}

/// Writes a single length-prefixed word
pub async fn write_word<W>(stream: &mut W, word: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = word.as_bytes();
    stream.write_all(&encode_length(bytes.len())).await?;
    stream.write_all(bytes).await
}

/// Reads a single word; an empty string marks the end of a sentence
pub async fn read_word<R>(stream: &mut R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let len = read_length(stream).await?;
    if len == 0 {
        return Ok(String::new());
    }
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_length_small() {
        assert_eq!(encode_length(0), vec![0]);
        assert_eq!(encode_length(1), vec![1]);
        assert_eq!(encode_length(127), vec![127]);
    }

    #[test]
    fn test_encode_length_medium() {
        assert_eq!(encode_length(128), vec![0x80, 0x80]);
        assert_eq!(encode_length(256), vec![0x81, 0x00]);
        assert_eq!(encode_length(0x3FFF), vec![0xBF, 0xFF]);
    }

    #[test]
    fn test_encode_length_large() {
        assert_eq!(encode_length(0x4000), vec![0xC0, 0x40, 0x00]);
        assert_eq!(encode_length(0x1F_FFFF), vec![0xDF, 0xFF, 0xFF]);
        assert_eq!(
            encode_length(0x1000_0000),
            vec![0xF0, 0x10, 0x00, 0x00, 0x00]
        );
    }

    #[tokio::test]
    async fn test_read_length_two_bytes() {
        let mut input: &[u8] = &[0x81, 0x00];
        assert_eq!(read_length(&mut input).await.unwrap(), 256);
    }

    #[tokio::test]
    async fn test_read_length_five_bytes() {
        let mut input: &[u8] = &[0xF0, 0x10, 0x00, 0x00, 0x01];
        assert_eq!(read_length(&mut input).await.unwrap(), 0x1000_0001);
    }

    #[tokio::test]
    async fn test_read_length_truncated_input() {
        let mut input: &[u8] = &[0xC0, 0x40];
        let err = read_length(&mut input).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn test_write_then_read_word() {
        let mut buf: Vec<u8> = Vec::new();
        write_word(&mut buf, "/tool/netwatch/print").await.unwrap();
        write_word(&mut buf, "").await.unwrap();

        let mut input: &[u8] = &buf;
        assert_eq!(read_word(&mut input).await.unwrap(), "/tool/netwatch/print");
        assert_eq!(read_word(&mut input).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_read_word_keeps_non_ascii() {
        let mut buf: Vec<u8> = Vec::new();
        write_word(&mut buf, "=comment=Pelanggan Ñandú").await.unwrap();

        let mut input: &[u8] = &buf;
        assert_eq!(
            read_word(&mut input).await.unwrap(),
            "=comment=Pelanggan Ñandú"
        );
    }
}
