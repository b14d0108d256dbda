use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path as FsPath;

use anyhow::{Context, Result};
use riftwalk_core::hex32;
use riftwalk_locomotion::{PoseTrack, PoseValue, WalkReport};
use serde::{Deserialize, Serialize};

pub const POSE_DOC_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub frame: i32,
    pub value: PoseValue,
}

/// On-disk form of a baked walk: keys grouped per channel, in frame order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseDocument {
    pub version: u32,           // bump if layout changes
    pub skeleton: String,
    pub report: WalkReport,
    /// Hex blake3 of the track, see [`track_hash`].
    pub digest: String,
    pub channels: BTreeMap<String, Vec<Key>>,
}

pub fn track_hash(track: &PoseTrack) -> String {
    hex32(track.digest())
}

pub fn pose_document(skeleton: &str, track: &PoseTrack, report: &WalkReport) -> PoseDocument {
    let mut channels: BTreeMap<String, Vec<Key>> = BTreeMap::new();
    for s in track.samples() {
        channels.entry(s.channel.clone()).or_default().push(Key { frame: s.frame, value: s.value });
    }
    PoseDocument {
        version: POSE_DOC_VERSION,
        skeleton: skeleton.to_string(),
        report: *report,
        digest: track_hash(track),
        channels,
    }
}

pub fn write_pose_json<W: Write>(doc: &PoseDocument, mut out: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut out, doc)?;
    } else {
        serde_json::to_writer(&mut out, doc)?;
    }
    out.write_all(b"\n")?;
    Ok(())
}

pub fn write_pose_file(doc: &PoseDocument, path: &FsPath, pretty: bool) -> Result<()> {
    let f = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_pose_json(doc, std::io::BufWriter::new(f), pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use riftwalk_locomotion::PoseSink;

    fn track() -> PoseTrack {
        let mut t = PoseTrack::new();
        for f in 1..=3 {
            t.record("root.location", PoseValue::Vec3(Vec3::new(f as f32, 0.0, 1.0)), f);
            t.record("root.rotation", PoseValue::Quat(Quat::IDENTITY), f);
        }
        t
    }

    #[test]
    fn groups_keys_by_channel() {
        let t = track();
        let doc = pose_document("hero", &t, &WalkReport::default());
        assert_eq!(doc.channels.len(), 2);
        let loc = &doc.channels["root.location"];
        assert_eq!(loc.iter().map(|k| k.frame).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(doc.digest.len(), 64);
    }

    #[test]
    fn written_json_reads_back() {
        let t = track();
        let doc = pose_document("hero", &t, &WalkReport::default());
        let mut buf = Vec::new();
        write_pose_json(&doc, &mut buf, true).unwrap();
        let back: PoseDocument = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.channels["root.rotation"][0].value, PoseValue::Quat(Quat::IDENTITY));
    }
}
