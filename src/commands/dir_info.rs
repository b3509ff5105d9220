//! dir-info command implementation

use crate::cli::DirInfoArgs;
use crate::dirinfo;
use crate::error::Result;

/// Run dir-info command
pub fn run(args: DirInfoArgs) -> Result<()> {
    let written = dirinfo::generate(&args.dir)?;
    println!(
        "Wrote {written} {} files under {}",
        dirinfo::INDEX_FILE,
        args.dir.display()
    );
    Ok(())
}
