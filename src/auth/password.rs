use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
const HASH_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

const B64: base64::engine::general_purpose::GeneralPurpose =
    base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Hash a plaintext password with a fresh random salt.
///
/// Output format: `pbkdf2:sha256:<iterations>$<salt>$<hash>` with
/// base64-encoded salt and hash. The iteration count travels with the
/// hash, so it can be raised later without invalidating stored rows.
pub fn hash_password(password: &str) -> String {
    hash_with_iterations(password, PBKDF2_ITERATIONS)
}

fn hash_with_iterations(password: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut out);

    format!(
        "pbkdf2:sha256:{iterations}${}${}",
        B64.encode(salt),
        B64.encode(out)
    )
}

/// Verify a plaintext password against a stored hash, in constant time.
/// Malformed stored values verify as false rather than erroring — a
/// corrupt row must never let a login through.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((iterations, salt, expected)) = parse(stored) else {
        return false;
    };

    let mut out = vec![0u8; expected.len()];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut out);
    out.ct_eq(&expected).into()
}

fn parse(stored: &str) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let rest = stored.strip_prefix("pbkdf2:sha256:")?;
    let mut parts = rest.splitn(3, '$');
    let iterations: u32 = parts.next()?.parse().ok()?;
    let salt = B64.decode(parts.next()?).ok()?;
    let hash = B64.decode(parts.next()?).ok()?;
    if iterations == 0 || hash.is_empty() {
        return None;
    }
    Some((iterations, salt, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let stored = hash_with_iterations("hunter2", 1_000);
        assert!(verify_password("hunter2", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash_with_iterations("hunter2", 1_000);
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_with_iterations("hunter2", 1_000);
        let b = hash_with_iterations("hunter2", 1_000);
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_value_never_verifies() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "plaintext-password"));
        assert!(!verify_password("anything", "pbkdf2:sha256:notanumber$a$b"));
        assert!(!verify_password("anything", "pbkdf2:sha256:1000$%%%$%%%"));
    }

    #[test]
    fn iteration_count_is_read_from_the_stored_hash() {
        // A hash produced at 1k iterations still verifies even though
        // the current default is much higher.
        let stored = hash_with_iterations("hunter2", 1_000);
        assert!(stored.starts_with("pbkdf2:sha256:1000$"));
        assert!(verify_password("hunter2", &stored));
    }

    #[test]
    fn default_hash_takes_meaningful_time() {
        let start = std::time::Instant::now();
        let _stored = hash_password("test_password");
        let elapsed = start.elapsed();
        assert!(
            elapsed.as_millis() > 100,
            "PBKDF2 too fast: {}ms — brute force protection insufficient",
            elapsed.as_millis()
        );
    }
}
