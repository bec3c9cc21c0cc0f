use rand::Rng;
use uuid::{Builder, Uuid};

/// Length of a rendered token (hyphenated UUID).
pub const TOKEN_LEN: usize = 36;

/// Draw a random v4 UUID from `rng`.
///
/// The bytes come from the caller's RNG rather than the OS so a seeded
/// generator yields the same tokens on every run.
pub fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Render a fresh token as a line record (token plus `\n`).
pub fn random_line<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut line = String::with_capacity(TOKEN_LEN + 1);
    line.push_str(
        random_uuid(rng)
            .hyphenated()
            .encode_lower(&mut Uuid::encode_buffer()),
    );
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn line_is_token_plus_newline() {
        let mut rng = StdRng::seed_from_u64(7);
        let line = random_line(&mut rng);
        assert_eq!(line.len(), TOKEN_LEN + 1);
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn token_is_lowercase_v4() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = random_uuid(&mut rng);
        assert_eq!(id.get_version_num(), 4);
        let s = id.hyphenated().to_string();
        assert_eq!(s, s.to_lowercase());
    }

    #[test]
    fn same_seed_same_tokens() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(random_line(&mut a), random_line(&mut b));
        }
    }
}
