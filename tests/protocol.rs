// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use mikrotik_status::{encode_length, read_length, read_word, write_word};

#[test]
fn test_encode_length_boundary_values() {
    // 1-byte: 0..0x80
    assert_eq!(encode_length(0).len(), 1);
    assert_eq!(encode_length(0x7F).len(), 1);

    // 2-byte: 0x80..0x4000
    assert_eq!(encode_length(0x80).len(), 2);
    assert_eq!(encode_length(0x3FFF).len(), 2);

    // 3-byte: 0x4000..0x20_0000
    assert_eq!(encode_length(0x4000).len(), 3);
    assert_eq!(encode_length(0x1F_FFFF).len(), 3);

    // 4-byte: 0x20_0000..0x1000_0000
    assert_eq!(encode_length(0x0020_0000).len(), 4);
    assert_eq!(encode_length(0x0FFF_FFFF).len(), 4);

    // 5-byte: 0x1000_0000+
    assert_eq!(encode_length(0x1000_0000).len(), 5);
    assert_eq!(encode_length(0xFFFF_FFFF).len(), 5);
}

#[tokio::test]
async fn test_read_length_accepts_every_prefix_width() {
    for len in [
        0usize,
        0x7F,
        0x80,
        0x3FFF,
        0x4000,
        0x1F_FFFF,
        0x0020_0000,
        0x0FFF_FFFF,
        0x1000_0000,
    ] {
        let bytes = encode_length(len);
        let mut input: &[u8] = &bytes;
        assert_eq!(read_length(&mut input).await.unwrap(), len, "len {len:#x}");
        assert!(input.is_empty(), "prefix for {len:#x} not fully consumed");
    }
}

#[tokio::test]
async fn test_sentence_over_duplex_stream() {
    let (mut client, mut server) = tokio::io::duplex(1024);

    let sentence = ["/tool/netwatch/print", "=.proplist=host,status", ""];
    for word in sentence {
        write_word(&mut client, word).await.unwrap();
    }

    let mut received = Vec::new();
    loop {
        let word = read_word(&mut server).await.unwrap();
        if word.is_empty() {
            break;
        }
        received.push(word);
    }
    assert_eq!(received, vec!["/tool/netwatch/print", "=.proplist=host,status"]);
}

#[tokio::test]
async fn test_long_word_uses_two_byte_prefix() {
    let comment = format!("=comment={}", "x".repeat(200));
    let mut buf = Vec::new();
    write_word(&mut buf, &comment).await.unwrap();

    assert_eq!(buf[0] & 0xC0, 0x80);
    let mut input: &[u8] = &buf;
    assert_eq!(read_word(&mut input).await.unwrap(), comment);
}
