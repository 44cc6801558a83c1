pub mod url_validator;

pub use url_validator::is_valid;

/// Length of every generated short ID
pub const SHORT_ID_LENGTH: usize = 8;

/// URL-safe alphabet (64 symbols, same set as base64url)
const SHORT_ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// 生成随机短 ID
///
/// Draws each character uniformly from the thread-local CSPRNG. Collisions
/// are still possible and are resolved by the store's unique constraint.
pub fn generate_short_id() -> String {
    generate_random_code(SHORT_ID_LENGTH)
}

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| {
        SHORT_ID_ALPHABET[rand::random_range(0..SHORT_ID_ALPHABET.len())] as char
    })
    .take(length)
    .collect()
}

/// 校验短 ID 格式（长度 + 字符集）
#[inline]
pub fn is_valid_short_id(id: &str) -> bool {
    id.len() == SHORT_ID_LENGTH
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_id_shape() {
        for _ in 0..1000 {
            let id = generate_short_id();
            assert_eq!(id.len(), SHORT_ID_LENGTH);
            assert!(is_valid_short_id(&id), "unexpected id: {}", id);
        }
    }

    #[test]
    fn test_generated_ids_are_url_safe() {
        let id = generate_random_code(256);
        let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
        assert_eq!(encoded, id);
    }

    #[test]
    fn test_generated_ids_rarely_collide() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_short_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_alphabet_coverage() {
        // 64 symbols over 64k draws: every symbol shows up
        let sample = generate_random_code(64 * 1024);
        let seen: HashSet<u8> = sample.bytes().collect();
        assert_eq!(seen.len(), SHORT_ID_ALPHABET.len());
    }

    #[test]
    fn test_is_valid_short_id() {
        assert!(is_valid_short_id("abcDEF12"));
        assert!(is_valid_short_id("a_b-c_d-"));
        assert!(!is_valid_short_id(""));
        assert!(!is_valid_short_id("short"));
        assert!(!is_valid_short_id("toolong123"));
        assert!(!is_valid_short_id("abc/def1"));
        assert!(!is_valid_short_id("abc.def1"));
        assert!(!is_valid_short_id("abcdéfg"));
    }
}
