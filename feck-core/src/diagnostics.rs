//! Verbosity-gated diagnostic output.
//!
//! Mirrors the teacher's `progress.rs` texture: a small flag-guarded struct
//! writing straight to stderr rather than a pulled-in logging framework.
//! Exact wording is not part of the contract.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verbosity(u8);

impl Verbosity {
    pub fn new(level: u32) -> Self {
        Self(level.min(u8::MAX as u32) as u8)
    }

    pub fn silent() -> Self {
        Self(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.0 > 0
    }

    pub fn shape_dump(&self, k: usize, m: usize, len: usize, chunksize: usize, padding: usize) {
        if self.is_enabled() {
            eprintln!("len={len} k={k} m={m} chunksize={chunksize} padding={padding}");
        }
    }

    pub fn digest_compare(&self, label: &str, idx: usize, expected: u64, actual: u64) {
        if self.is_enabled() {
            eprintln!("[{label} {idx:>2}] {expected:x} : {actual:x}");
        }
    }

    pub fn repair_feasibility(&self, bad_primary: usize, good_repair: usize) {
        if self.is_enabled() {
            if bad_primary == 0 {
                eprintln!("no bad blocks, nothing to repair");
            } else {
                eprintln!("repair needed: {bad_primary} bad primary block(s), {good_repair} repair block(s) available");
            }
        }
    }
}

impl From<u32> for Verbosity {
    fn from(level: u32) -> Self {
        Self::new(level)
    }
}
