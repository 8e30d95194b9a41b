//! BLAKE3 content digests for cache busting

use blake3::Hasher;

/// Length of the short digest used for bundle directory names
pub const DIGEST_LENGTH: usize = 8;

/// Compute the short content digest for a set of resource contents.
///
/// The chunks are hashed in the order given; callers are responsible for a
/// deterministic order. The digest is hex-encoded and truncated to
/// [`DIGEST_LENGTH`] characters. Hex is already lower-case, which keeps the
/// resulting directory names safe on case-insensitive filesystems.
pub fn short_digest<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hasher = Hasher::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..DIGEST_LENGTH].to_lowercase()
}
