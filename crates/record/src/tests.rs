use super::*;

fn small_layout() -> RecordLayout {
    // 4 + 8 + 12 = 24 bytes, small enough to eyeball in hex dumps
    RecordLayout::new(TimeWidth::Four, 8, 12).unwrap()
}

// -------------------- Layout --------------------

#[test]
fn default_layout_matches_linux_lastlog() {
    let l = RecordLayout::default();
    assert_eq!(l.time_width(), TimeWidth::Four);
    assert_eq!(l.line_size(), 32);
    assert_eq!(l.host_size(), 256);
    assert_eq!(l.record_size(), 292);
}

#[test]
fn eight_byte_time_layout_size() {
    let l = RecordLayout::new(TimeWidth::Eight, 32, 256).unwrap();
    assert_eq!(l.record_size(), 296);
}

#[test]
fn zero_width_fields_are_rejected() {
    assert_eq!(
        RecordLayout::new(TimeWidth::Four, 0, 16),
        Err(CodecError::FieldWidth("line"))
    );
    assert_eq!(
        RecordLayout::new(TimeWidth::Four, 8, 0),
        Err(CodecError::FieldWidth("host"))
    );
}

#[test]
fn time_width_from_bytes() {
    assert_eq!(TimeWidth::from_bytes(4), Ok(TimeWidth::Four));
    assert_eq!(TimeWidth::from_bytes(8), Ok(TimeWidth::Eight));
    assert_eq!(TimeWidth::from_bytes(2), Err(CodecError::TimeWidth(2)));
}

// -------------------- Decode --------------------

#[test]
fn encode_then_decode_keeps_values() {
    let l = small_layout();
    let raw = encode(&l, 1_600_000_000, "pts/3", "example.org").unwrap();
    assert_eq!(raw.len(), 24);

    let rec = decode(&l, &raw).unwrap();
    assert_eq!(rec.timestamp(), 1_600_000_000);
    assert!(rec.has_logged_in());
    assert_eq!(rec.last_login(), Some(1_600_000_000));
    assert_eq!(rec.terminal(), "pts/3");
    assert_eq!(rec.remote_host(), "example.org");
}

#[test]
fn encode_then_decode_eight_byte_time() {
    let l = RecordLayout::new(TimeWidth::Eight, 8, 16).unwrap();
    let raw = encode(&l, 4_102_444_800, "tty1", "").unwrap();
    let rec = decode(&l, &raw).unwrap();
    assert_eq!(rec.timestamp(), 4_102_444_800);
    assert_eq!(rec.terminal(), "tty1");
    assert_eq!(rec.remote_host(), "");
}

#[test]
fn four_byte_time_is_read_unsigned() {
    let l = small_layout();
    let mut raw = vec![0u8; l.record_size()];
    raw[..4].copy_from_slice(&u32::MAX.to_ne_bytes());
    let rec = decode(&l, &raw).unwrap();
    assert_eq!(rec.timestamp(), i64::from(u32::MAX));
}

#[test]
fn all_zero_slot_is_never_logged_in() {
    let l = small_layout();
    let rec = decode(&l, &vec![0u8; l.record_size()]).unwrap();
    assert_eq!(rec.timestamp(), 0);
    assert!(!rec.has_logged_in());
    assert_eq!(rec.last_login(), None);
    assert_eq!(rec.terminal(), "");
    assert_eq!(rec.remote_host(), "");
}

#[test]
fn wrong_length_is_an_error() {
    let l = small_layout();
    assert_eq!(
        decode(&l, &[0u8; 23]),
        Err(CodecError::Length {
            expected: 24,
            actual: 23
        })
    );
    assert!(decode(&l, &[0u8; 25]).is_err());
    assert!(decode(&l, &[]).is_err());
}

#[test]
fn unterminated_line_field_is_capped() {
    let l = small_layout();
    let mut raw = vec![0u8; l.record_size()];
    raw[..4].copy_from_slice(&1u32.to_ne_bytes());
    // line field fully populated, no NUL anywhere
    raw[4..12].copy_from_slice(b"ABCDEFGH");
    let rec = decode(&l, &raw).unwrap();
    assert_eq!(rec.terminal(), "ABCDEFG");
}

#[test]
fn unterminated_host_does_not_bleed_past_slot() {
    let l = small_layout();
    let raw = encode(&l, 1, "pts/0", "aaaaaaaaaaaaaaaaaaaa").unwrap();
    let rec = decode(&l, &raw).unwrap();
    assert_eq!(rec.remote_host(), "aaaaaaaaaaa");
    assert_eq!(rec.remote_host().len(), l.host_size() - 1);
}

#[test]
fn garbage_after_nul_is_ignored() {
    let l = small_layout();
    let mut raw = vec![0u8; l.record_size()];
    raw[4..12].copy_from_slice(b"tty\0junk");
    let rec = decode(&l, &raw).unwrap();
    assert_eq!(rec.terminal(), "tty");
}

// -------------------- fixed_text --------------------

#[test]
fn fixed_text_absent_is_empty() {
    assert_eq!(fixed_text(None), "");
    assert_eq!(fixed_text(Some(&[][..])), "");
}

#[test]
fn fixed_text_terminated_passes_through() {
    assert_eq!(fixed_text(Some(&b"host\0\0\0\0"[..])), "host");
}

#[test]
fn fixed_text_forces_terminator_at_last_byte() {
    assert_eq!(fixed_text(Some(&b"abcd"[..])), "abc");
    assert_eq!(fixed_text(Some(&b"x"[..])), "");
}

#[test]
fn fixed_text_replaces_invalid_utf8() {
    let s = fixed_text(Some(&[b'a', 0xff, b'b', 0][..]));
    assert_eq!(s, "a\u{fffd}b");
}

// -------------------- Encode --------------------

#[test]
fn encode_rejects_timestamp_outside_four_bytes() {
    let l = small_layout();
    assert_eq!(encode(&l, -1, "", ""), Err(CodecError::Timestamp(-1)));
    assert_eq!(
        encode(&l, 1 << 33, "", ""),
        Err(CodecError::Timestamp(1 << 33))
    );
}

#[test]
fn encode_zero_fills_unused_bytes() {
    let l = small_layout();
    let raw = encode(&l, 0, "a", "b").unwrap();
    assert_eq!(&raw[4..12], b"a\0\0\0\0\0\0\0");
    assert_eq!(&raw[12..], b"b\0\0\0\0\0\0\0\0\0\0\0");
}
