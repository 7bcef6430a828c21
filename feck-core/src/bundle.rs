//! The `FECK` bundle wire format: a fixed header (magic, version, shape,
//! original length, chunk size, per-chunk digests) followed by the
//! concatenated repair-chunk payloads. All multi-byte fields are
//! little-endian regardless of host byte order.

use crate::error::{FeckError, Result};

pub const MAGIC: [u8; 4] = *b"FECK";
pub const VERSION: u8 = 1;

/// Bytes before the per-chunk digest table begins.
const FIXED_HEADER_LEN: usize = 16;

/// A parsed bundle header: shape and framing, without the digest table or
/// payload (those are addressed directly against the owning `Bundle`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BundleHeader {
    pub k: usize,
    pub m: usize,
    pub len: u32,
    pub chunksize: u32,
}

impl BundleHeader {
    pub fn repair_count(&self) -> usize {
        self.m - self.k
    }

    /// Offset of the per-chunk digest table.
    fn digest_table_offset(&self) -> usize {
        FIXED_HEADER_LEN
    }

    /// Offset of the repair-chunk payload region.
    fn payload_offset(&self) -> usize {
        FIXED_HEADER_LEN + 8 * self.m
    }

    /// Total bundle size for this header's shape.
    pub fn bundle_len(&self) -> usize {
        self.payload_offset() + self.repair_count() * self.chunksize as usize
    }
}

/// An assembled or parsed recovery bundle, owning its backing bytes.
pub struct Bundle {
    bytes: Vec<u8>,
    header: BundleHeader,
}

impl Bundle {
    /// Allocate a zero-filled bundle buffer for the given shape, with the
    /// fixed header already written. Digests and repair payloads are filled
    /// in by the caller (see `prepare`).
    pub fn allocate(k: usize, m: usize, len: u32, chunksize: u32) -> Result<Self> {
        let header = BundleHeader { k, m, len, chunksize };
        // chunksize * repair_count is the only product that can realistically
        // overflow `usize` on a 32-bit host; guard it explicitly rather than
        // let the allocator abort the process.
        let payload_bytes = (header.repair_count() as u128) * (chunksize as u128);
        let total_128 = payload_bytes + header.payload_offset() as u128;
        if total_128 > usize::MAX as u128 {
            return Err(FeckError::AllocationFailed { requested_bytes: total_128 });
        }
        let total = total_128 as usize;
        let mut bytes = vec![0u8; total];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[4] = VERSION;
        bytes[5] = 0;
        bytes[6] = k as u8;
        bytes[7] = m as u8;
        bytes[8..12].copy_from_slice(&len.to_le_bytes());
        bytes[12..16].copy_from_slice(&chunksize.to_le_bytes());
        Ok(Self { bytes, header })
    }

    /// Parse and validate an existing bundle blob.
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < FIXED_HEADER_LEN {
            return Err(FeckError::InvalidBundle);
        }
        if bytes[0..4] != MAGIC {
            return Err(FeckError::InvalidBundle);
        }
        let version = bytes[4];
        if version != VERSION {
            return Err(FeckError::UnsupportedVersion { found: version });
        }
        let k = bytes[6] as usize;
        let m = bytes[7] as usize;
        if k < 2 || k >= m || m > 255 {
            return Err(FeckError::InvalidShape { k, m });
        }
        let len = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        let chunksize = u32::from_le_bytes(bytes[12..16].try_into().unwrap());
        let header = BundleHeader { k, m, len, chunksize };
        if bytes.len() != header.bundle_len() {
            return Err(FeckError::InvalidBundle);
        }
        Ok(Self { bytes, header })
    }

    pub fn header(&self) -> BundleHeader {
        self.header
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn digest_slot(&self, index: usize) -> usize {
        self.header.digest_table_offset() + 8 * index
    }

    /// Digest recorded at logical index `index` (`[0, k)` primaries,
    /// `[k, m)` repairs).
    pub fn digest_at(&self, index: usize) -> u64 {
        let off = self.digest_slot(index);
        u64::from_le_bytes(self.bytes[off..off + 8].try_into().unwrap())
    }

    pub fn set_digest_at(&mut self, index: usize, value: u64) {
        let off = self.digest_slot(index);
        self.bytes[off..off + 8].copy_from_slice(&value.to_le_bytes());
    }

    /// The payload slice for repair chunk `j` (`j` is the repair index, i.e.
    /// logical index `k + j`).
    pub fn repair_chunk(&self, j: usize) -> &[u8] {
        let chunksize = self.header.chunksize as usize;
        let base = self.header.payload_offset() + j * chunksize;
        &self.bytes[base..base + chunksize]
    }

    pub fn repair_chunk_mut(&mut self, j: usize) -> &mut [u8] {
        let chunksize = self.header.chunksize as usize;
        let base = self.header.payload_offset() + j * chunksize;
        &mut self.bytes[base..base + chunksize]
    }
}
