use anyhow::Result;
use std::path::PathBuf;

use pagepatch::core::output::{OutputFormat, OutputWriter};
use pagepatch::{FsStore, PageProcessor, PageVariant};

pub fn run(path: PathBuf, variant: PageVariant, preview: bool, format: OutputFormat) -> Result<()> {
    let processor = PageProcessor::new(FsStore)?;
    let writer = OutputWriter::new(format);

    if preview {
        let preview = processor.preview(&path, variant)?;
        writer.write_previews(std::slice::from_ref(&preview), &[])?;
    } else {
        let result = processor.process(&path, variant);
        writer.write_result(&result)?;
    }

    Ok(())
}
