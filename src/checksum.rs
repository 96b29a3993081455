// ─────────────────────────────────────────────────────────────────────────────
// dintact v0.1.0
// Copyright 2026 Ankit Chaubey <ankitchaubey.dev@gmail.com>
// github.com/ankit-chaubey
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// All rights reserved 2026.
// ─────────────────────────────────────────────────────────────────────────────
//! Streaming XXH3-128 checksums: a chunked file reader, a single-file
//! hasher, and a lockstep dual-stream hash-and-compare (§4.A).

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

use crate::progress::Progress;

const CHUNK_SIZE: usize = 4096;

/// Opaque 128-bit content fingerprint, stored as 32 lowercase hex chars.
/// Equal checksums do not by themselves imply byte equality — see
/// [`hash_compare_files`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest(digest: u128) -> Self {
        Checksum(hex::encode(digest.to_be_bytes()))
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Checksum {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        anyhow::ensure!(
            s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit()),
            "not a 32-hex-char XXH3-128 checksum: '{s}'"
        );
        Ok(Checksum(s.to_lowercase()))
    }
}

/// Stream-hash a file's content. On open/read failure, reports to stderr
/// and continues as if the stream were empty (§4.A, §9 open question —
/// this makes a corrupt/unreadable file hash equal to the empty hash,
/// which is intentional per the design notes: callers downstream still
/// surface a mismatch against whatever the index expects).
pub fn hash_file(path: &Path, progress: &dyn Progress) -> Checksum {
    let mut hasher = Xxh3::new();
    match File::open(path) {
        Ok(mut file) => {
            let mut buf = [0u8; CHUNK_SIZE];
            loop {
                match file.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        hasher.update(&buf[..n]);
                        progress.inc(n as u64);
                    }
                    Err(e) => {
                        crate::output::warn(&format!("read error on '{}': {e}", path.display()));
                        break;
                    }
                }
            }
        }
        Err(e) => {
            crate::output::warn(&format!("unable to open '{}': {e}", path.display()));
        }
    }
    Checksum::from_digest(hasher.digest128())
}

/// Hash two files in lockstep, one chunk at a time, and record whether
/// their byte streams are identical. Byte-equality is authoritative —
/// `equal` can be `false` even when the two checksums happen to match.
pub fn hash_compare_files(a: &Path, b: &Path, progress: &dyn Progress) -> (Checksum, Checksum, bool) {
    let mut a_file = open_or_warn(a);
    let mut b_file = open_or_warn(b);
    let mut a_hasher = Xxh3::new();
    let mut b_hasher = Xxh3::new();
    let mut equal = true;

    let mut a_buf = [0u8; CHUNK_SIZE];
    let mut b_buf = [0u8; CHUNK_SIZE];

    loop {
        let a_n = read_chunk(&mut a_file, &mut a_buf, a);
        let b_n = read_chunk(&mut b_file, &mut b_buf, b);

        if a_n == 0 && b_n == 0 {
            break;
        }

        a_hasher.update(&a_buf[..a_n]);
        b_hasher.update(&b_buf[..b_n]);
        if a_buf[..a_n] != b_buf[..b_n] {
            equal = false;
        }
        progress.inc((a_n.max(b_n)) as u64);
    }

    (
        Checksum::from_digest(a_hasher.digest128()),
        Checksum::from_digest(b_hasher.digest128()),
        equal,
    )
}

fn open_or_warn(path: &Path) -> Option<File> {
    match File::open(path) {
        Ok(f) => Some(f),
        Err(e) => {
            crate::output::warn(&format!("unable to open '{}': {e}", path.display()));
            None
        }
    }
}

/// Fill `buf` to capacity (or EOF), looping over short reads. `Read::read`
/// is allowed to return fewer bytes than requested even mid-file, and the
/// lockstep compare above needs equal-length chunks from both streams on
/// each iteration to avoid a spurious length mismatch.
fn read_chunk(file: &mut Option<File>, buf: &mut [u8], path: &Path) -> usize {
    let Some(f) = file.as_mut() else { return 0 };
    let mut filled = 0;
    while filled < buf.len() {
        match f.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) => {
                crate::output::warn(&format!("read error on '{}': {e}", path.display()));
                *file = None;
                break;
            }
        }
    }
    filled
}
