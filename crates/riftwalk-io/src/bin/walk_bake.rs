use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, ArgAction};
use log::info;
use riftwalk_io::{bake, pose_document, write_pose_file, Scenario};

#[derive(Parser, Debug)]
#[command(name="walk_bake", version, about="Bake a scenario's walk into a pose-track JSON + hash")]
struct Opts {
    /// Scenario .json
    scenario: PathBuf,

    /// Skeleton to drive (default: the scenario's own choice)
    #[arg(long, env = "RIFTWALK_SKELETON")]
    skeleton: Option<String>,

    /// Output .poses.json path (default: <scenario>.poses.json next to source)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long, action=ArgAction::SetTrue)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let scenario = Scenario::load(&opts.scenario)?;
    let skeleton = opts.skeleton.as_deref().unwrap_or(&scenario.skeleton).to_string();
    let (track, report) = bake(&scenario, Some(&skeleton))?;
    let doc = pose_document(&skeleton, &track, &report);

    let out = opts.out.clone().unwrap_or_else(|| {
        let mut p = opts.scenario.clone();
        p.set_extension("poses.json");
        p
    });
    write_pose_file(&doc, &out, opts.pretty)?;

    let mut hash_path = out.clone();
    hash_path.set_extension("blake3");
    std::fs::write(&hash_path, format!("{}\n", doc.digest))?;
    info!("wrote {} channels to {}", doc.channels.len(), out.display());

    println!("Poses:    {}", out.display());
    println!("Hash:     {}", doc.digest);
    println!("Skeleton: {}", skeleton);
    println!("Frames:   {} (cycle {})", report.frames, report.cycle_length);
    println!("Plants:   {}", report.plants);
    println!("Misses:   {}", report.ground_misses);
    Ok(())
}
