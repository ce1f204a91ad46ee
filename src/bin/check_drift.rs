//! Pre-deploy gate: asserts the propagation packet, discovery document, and
//! endpoint registry agree, and (when a lock path is given) that the
//! upstream refresh lock carries an acknowledged baseline for every
//! tracked ref. Exits non-zero on the first failure.

use std::path::PathBuf;

use clap::Parser;

use x0xmd::model::{self, CanonicalModel};
use x0xmd::ops;

#[derive(Parser, Debug)]
#[command(name = "check-drift")]
#[command(about = "Fails when published x0x artifacts disagree with each other")]
struct Args {
    /// Upstream refresh lock to validate (fail-closed when provided)
    #[arg(long, env = "REFRESH_LOCK_PATH")]
    lock_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let model = CanonicalModel::built_in();
    model::validate(&model)?;
    println!("ok - canonical model invariants");

    for name in ops::check_propagation_drift(&model)? {
        println!("ok - {name}");
    }

    if let Some(path) = args.lock_path {
        let lock = ops::load_refresh_lock(&path, &ops::upstream_refs())?;
        println!(
            "ok - refresh lock carries {} acknowledged baseline(s)",
            lock.refs.len()
        );
    }

    println!("all drift checks passed");
    Ok(())
}
