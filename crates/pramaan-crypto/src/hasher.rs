use pramaan_types::{CertificateHash, Record};

use crate::canonical::{canonical_bytes, CanonicalError};

/// Domain-separated BLAKE3 record hasher.
///
/// The hasher carries a domain tag that is prepended to every computation,
/// so certificate hashes can never collide with hashes of other content the
/// system might adopt later under a different tag.
pub struct RecordHasher {
    domain: &'static str,
}

impl RecordHasher {
    /// Hasher for certificate records.
    pub const CERTIFICATE: Self = Self {
        domain: "pramaan-cert-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> CertificateHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        CertificateHash::from_hash(*hasher.finalize().as_bytes())
    }

    /// Canonicalize a record and hash the result.
    pub fn hash_record(&self, record: &Record) -> Result<CertificateHash, CanonicalError> {
        let bytes = canonical_bytes(record)?;
        Ok(self.hash(&bytes))
    }

    /// Whether a record hashes to the expected certificate hash.
    pub fn matches(
        &self,
        record: &Record,
        expected: &CertificateHash,
    ) -> Result<bool, CanonicalError> {
        Ok(self.hash_record(record)? == *expected)
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
