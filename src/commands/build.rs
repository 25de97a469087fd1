use tracing::info;

use crate::{BuildArgs, build::Builder, config::SiteConfig};

pub fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    // The base URL must resolve before any document is read
    let site = SiteConfig::load_from_file(&args.config)?;
    info!(base_url = %site.base_url, "Loaded site config");

    let working_dir = std::env::current_dir()?;
    let builder = Builder::new(
        site,
        args.content.clone(),
        args.out.clone(),
        working_dir,
    );
    let result = builder.build()?;
    info!(
        documents = result.documents,
        skipped = result.skipped,
        excluded = result.excluded,
        items = result.items,
        "Build finished"
    );

    println!(
        "Wrote {} items to {}",
        result.items,
        result.output_path.display()
    );

    Ok(())
}
