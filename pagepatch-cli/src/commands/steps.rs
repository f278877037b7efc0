use anyhow::Result;

use pagepatch::core::output::{OutputFormat, OutputWriter};
use pagepatch::{PageVariant, Pipeline};

pub fn run(variant: Option<PageVariant>, format: OutputFormat) -> Result<()> {
    let writer = OutputWriter::new(format);
    let variants = match variant {
        Some(variant) => vec![variant],
        None => vec![PageVariant::Detail, PageVariant::Creation],
    };

    for variant in variants {
        let pipeline = Pipeline::for_variant(variant)?;
        writer.write_steps(variant, &pipeline.step_names())?;
    }

    Ok(())
}
