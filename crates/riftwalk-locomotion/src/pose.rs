use glam::{Quat, Vec3};
use riftwalk_core::{hash_quat, hash_vec3, StepHasher};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseValue {
    Vec3(Vec3),
    Quat(Quat),
}

impl PoseValue {
    pub fn as_vec3(&self) -> Option<Vec3> { if let PoseValue::Vec3(v) = self { Some(*v) } else { None } }
    pub fn as_quat(&self) -> Option<Quat> { if let PoseValue::Quat(q) = self { Some(*q) } else { None } }
}

/// One recorded animation key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    pub frame: i32,
    pub channel: String,
    pub value: PoseValue,
}

/// Receives keys as the driver produces them, frame by frame in increasing order.
pub trait PoseSink {
    fn record(&mut self, channel: &str, value: PoseValue, frame: i32);
}

impl<T: PoseSink + ?Sized> PoseSink for &mut T {
    fn record(&mut self, channel: &str, value: PoseValue, frame: i32) { (**self).record(channel, value, frame) }
}

/// In-memory, append-only sink.
#[derive(Clone, Debug, Default)]
pub struct PoseTrack {
    samples: Vec<PoseSample>,
}

impl PoseSink for PoseTrack {
    fn record(&mut self, channel: &str, value: PoseValue, frame: i32) {
        self.samples.push(PoseSample { frame, channel: channel.to_string(), value });
    }
}

impl PoseTrack {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn samples(&self) -> &[PoseSample] { &self.samples }
    #[inline] pub fn len(&self) -> usize { self.samples.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// `(frame, value)` pairs of one channel, in recording order.
    pub fn channel<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (i32, PoseValue)> + 'a {
        self.samples.iter().filter(move |s| s.channel == name).map(|s| (s.frame, s.value))
    }

    pub fn value_at(&self, name: &str, frame: i32) -> Option<PoseValue> {
        self.samples.iter().find(|s| s.frame == frame && s.channel == name).map(|s| s.value)
    }

    pub fn vec3_at(&self, name: &str, frame: i32) -> Option<Vec3> {
        self.value_at(name, frame).and_then(|v| v.as_vec3())
    }

    /// blake3 over every key's frame, channel and raw float bits. Equal digests mean
    /// byte-identical tracks.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_bytes(b"POSEv1\0");
        for s in &self.samples {
            h.update_bytes(&s.frame.to_le_bytes());
            h.update_bytes(&(s.channel.len() as u64).to_le_bytes());
            h.update_bytes(s.channel.as_bytes());
            match &s.value {
                PoseValue::Vec3(v) => { h.update_bytes(&[0]); hash_vec3(&mut h, v); }
                PoseValue::Quat(q) => { h.update_bytes(&[1]); hash_quat(&mut h, q); }
            }
        }
        h.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_lookup_and_digest() {
        let mut t = PoseTrack::new();
        t.record("a", PoseValue::Vec3(Vec3::X), 1);
        t.record("b", PoseValue::Quat(Quat::IDENTITY), 1);
        t.record("a", PoseValue::Vec3(Vec3::Y), 2);

        assert_eq!(t.channel("a").map(|(f, _)| f).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(t.vec3_at("a", 2), Some(Vec3::Y));
        assert_eq!(t.value_at("b", 1).and_then(|v| v.as_quat()), Some(Quat::IDENTITY));
        assert!(t.vec3_at("b", 1).is_none());

        let mut u = t.clone();
        assert_eq!(t.digest(), u.digest());
        u.record("a", PoseValue::Vec3(Vec3::Z), 3);
        assert_ne!(t.digest(), u.digest());
    }
}
