use crate::compose::compose;
use crate::layout::ImageSpec;
use crate::options::ComposeOptions;
use crate::types::*;

/// Calculate statistics for a conversion without rendering anything
pub fn calculate_statistics(
    images: &[ImageSpec],
    options: &ComposeOptions,
) -> Result<ComposeStatistics> {
    let pages = compose(images, options.page_size_mode, &options.page_numbers)?;

    let images_per_page: Vec<usize> = pages.iter().map(|p| p.placements.len()).collect();

    Ok(ComposeStatistics {
        mode: options.page_size_mode,
        source_images: images.len(),
        output_pages: pages.len(),
        images_per_page,
    })
}
