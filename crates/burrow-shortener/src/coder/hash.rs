use crate::error::{Result, ShortenerError};
use burrow_bloom::BloomFilter;
use burrow_core::{base62, ShortCode, Store, StoreError};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Length of every hash-strategy code.
pub const CODE_LENGTH: usize = 7;

/// `62^7`, the number of distinct 7-symbol codes.
const CODE_SPACE: u64 = 3_521_614_606_208;

pub const DEFAULT_MAX_RETRIES: u32 = 8;

/// Digest used to derive hash codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashMethod {
    #[default]
    Sha256,
    Md5,
    Sha1,
    Crc32,
}

impl HashMethod {
    /// Returns the leading digest bytes of `input` as a big-endian integer.
    ///
    /// MD5 and SHA digests contribute 8 bytes, CRC-32 its whole 4-byte checksum.
    pub fn digest_prefix(self, input: &[u8]) -> u64 {
        match self {
            HashMethod::Sha256 => {
                use sha2::Digest;
                leading_u64(&sha2::Sha256::digest(input))
            }
            HashMethod::Md5 => {
                use md5::Digest;
                leading_u64(&md5::Md5::digest(input))
            }
            HashMethod::Sha1 => {
                use sha1::Digest;
                leading_u64(&sha1::Sha1::digest(input))
            }
            HashMethod::Crc32 => u64::from(crc32fast::hash(input)),
        }
    }
}

impl Display for HashMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HashMethod::Sha256 => write!(f, "sha256"),
            HashMethod::Md5 => write!(f, "md5"),
            HashMethod::Sha1 => write!(f, "sha1"),
            HashMethod::Crc32 => write!(f, "crc32"),
        }
    }
}

fn leading_u64(digest: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Content-hash code producer.
///
/// Candidate `0` hashes the URL itself; candidate `n` hashes `"{url}#{n}"`.
/// The digest prefix is reduced into the 7-symbol base62 space, so codes are
/// always exactly [`CODE_LENGTH`] characters.
#[derive(Debug, Clone, TypedBuilder)]
pub struct HashCoder {
    #[builder(default)]
    method: HashMethod,
    /// Rehash attempts allowed after the first candidate collides.
    #[builder(default = DEFAULT_MAX_RETRIES)]
    max_retries: u32,
}

impl Default for HashCoder {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HashCoder {
    pub fn method(&self) -> HashMethod {
        self.method
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the code tried for `long_url` at the given attempt.
    pub fn candidate(&self, long_url: &str, attempt: u32) -> ShortCode {
        let input = match attempt {
            0 => Cow::Borrowed(long_url),
            n => Cow::Owned(format!("{long_url}#{n}")),
        };
        let value = self.method.digest_prefix(input.as_bytes()) % CODE_SPACE;
        ShortCode::new_unchecked(base62::encode_padded(value, CODE_LENGTH))
    }

    /// Issues a code for `long_url`, storing the mapping.
    ///
    /// Returns the existing code when `long_url` already owns one of its
    /// candidates, and [`ShortenerError::CollisionExhausted`] when every
    /// candidate is owned by another URL.
    pub async fn generate<S: Store + ?Sized>(
        &self,
        long_url: &str,
        store: &S,
        filter: &BloomFilter,
    ) -> Result<ShortCode> {
        for attempt in 0..=self.max_retries {
            let code = self.candidate(long_url, attempt);
            trace!(code = %code, attempt, "trying hash candidate");

            if filter.might_contain(code.as_str()) {
                match store.get(&code).await? {
                    Some(owner) if owner == long_url => {
                        debug!(code = %code, "url already shortened");
                        return Ok(code);
                    }
                    Some(owner) => {
                        warn!(code = %code, attempt, owner = %owner, "hash collision, rehashing");
                        continue;
                    }
                    None => debug!(code = %code, "existence filter false positive"),
                }
            }

            match store.put(&code, long_url).await {
                Ok(()) => {
                    filter.add(code.as_str());
                    debug!(code = %code, attempt, "issued hash code");
                    return Ok(code);
                }
                // Another writer claimed the code after the check above.
                Err(StoreError::AlreadyExists(_)) => {
                    filter.add(code.as_str());
                    if store.get(&code).await?.as_deref() == Some(long_url) {
                        return Ok(code);
                    }
                    warn!(code = %code, attempt, "hash collision on write, rehashing");
                }
                Err(err) => return Err(err.into()),
            }
        }

        let attempts = self.max_retries + 1;
        warn!(url = %long_url, attempts, "hash candidates exhausted");
        Err(ShortenerError::CollisionExhausted {
            url: long_url.to_owned(),
            attempts,
        })
    }
}
