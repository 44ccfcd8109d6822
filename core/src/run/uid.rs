use rand::RngCore;
use time::macros::format_description;
use time::OffsetDateTime;

/// `YYYYMMDD-HHMMSS-<8 hex>`; names both the output directory and the
/// archived response of one run.
pub fn generate_uid() -> String {
    let mut suffix = [0u8; 4];
    rand::thread_rng().fill_bytes(&mut suffix);
    format_uid(OffsetDateTime::now_utc(), suffix)
}

pub fn format_uid(at: OffsetDateTime, suffix: [u8; 4]) -> String {
    let stamp = at
        .format(format_description!(
            "[year][month][day]-[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "00000000-000000".to_string());
    format!("{}-{}", stamp, hex::encode(suffix))
}

pub fn is_valid_uid(uid: &str) -> bool {
    let bytes = uid.as_bytes();
    bytes.len() == 24
        && bytes[8] == b'-'
        && bytes[15] == b'-'
        && uid[..8].chars().all(|c| c.is_ascii_digit())
        && uid[9..15].chars().all(|c| c.is_ascii_digit())
        && uid[16..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_is_stable() {
        let uid = format_uid(datetime!(2025-08-09 07:05:03 UTC), [0xde, 0xad, 0x00, 0x0f]);
        assert_eq!(uid, "20250809-070503-dead000f");
        assert!(is_valid_uid(&uid));
    }

    #[test]
    fn test_generated_uids_are_well_formed_and_distinct() {
        let a = generate_uid();
        let b = generate_uid();
        assert!(is_valid_uid(&a), "{a}");
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid_uid("20250809-070503-DEAD000F"));
        assert!(!is_valid_uid("../../etc"));
        assert!(!is_valid_uid("20250809070503-dead000f"));
    }
}
