use blake3::Hasher;
use glam::{Quat, Vec3};

/// Incremental digest over little-endian bytes. Two runs with identical inputs must agree.
pub struct StepHasher(Hasher);

impl Default for StepHasher { fn default() -> Self { Self::new() } }

impl StepHasher {
    pub fn new() -> Self { StepHasher(Hasher::new()) }
    pub fn update_bytes(&mut self, bytes: &[u8]) { self.0.update(bytes); }
    pub fn finalize(self) -> [u8; 32] { *self.0.finalize().as_bytes() }
}

#[inline]
pub fn hash_vec3(h: &mut StepHasher, v: &Vec3) {
    for c in [v.x, v.y, v.z] { h.update_bytes(&c.to_le_bytes()); }
}

#[inline]
pub fn hash_quat(h: &mut StepHasher, q: &Quat) {
    for c in [q.x, q.y, q.z, q.w] { h.update_bytes(&c.to_le_bytes()); }
}

/// Hex-encode a 32-byte digest.
pub fn hex32(x: [u8; 32]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(64);
    for b in &x { let _ = write!(s, "{:02x}", b); }
    s
}
