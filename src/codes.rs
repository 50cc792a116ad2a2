//! Human-readable identifiers: booking numbers, session codes, gateway
//! transaction ids.

use chrono::Utc;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn booking_number() -> String {
    format!("BK{}{}", to_base36(now_millis()), random_suffix(4))
}

pub fn session_code() -> String {
    format!("SS{}{}", to_base36(now_millis()), random_suffix(6))
}

pub fn transaction_id() -> String {
    format!("TXN{}{}", now_millis(), random_suffix(6))
}

pub fn refund_id() -> String {
    format!("REF{}{}", now_millis(), random_suffix(6))
}

fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_suffix(len: usize) -> String {
    (0..len)
        .map(|_| BASE36[rand::random_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_296), "100");
    }

    #[test]
    fn booking_numbers_are_uppercase_base36() {
        let number = booking_number();
        assert!(number.starts_with("BK"));
        assert!(number[2..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert!(number.len() > 6);
    }

    #[test]
    fn session_codes_carry_a_six_char_suffix() {
        let millis = to_base36(now_millis());
        let code = session_code();
        assert!(code.starts_with("SS"));
        assert!(code.len() >= 2 + millis.len() + 6);
    }

    #[test]
    fn gateway_ids_have_distinct_prefixes() {
        assert!(transaction_id().starts_with("TXN"));
        assert!(refund_id().starts_with("REF"));
    }
}
