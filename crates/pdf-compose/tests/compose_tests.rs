use pdf_compose::constants::{A4_HEIGHT_PT, A4_WIDTH_PT, GRID_COLUMNS};
use pdf_compose::*;

const EPS: f32 = 1e-3;

fn specs(sizes: &[(u32, u32)]) -> Vec<ImageSpec> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, (w, h))| ImageSpec::new(*w, *h, ImageRef(i)))
        .collect()
}

fn mixed_sizes() -> Vec<ImageSpec> {
    specs(&[
        (4000, 3000),
        (100, 100),
        (595, 842),
        (3000, 200),
        (200, 3000),
        (1, 1),
        (1024, 768),
    ])
}

fn placement_order(pages: &[Page]) -> Vec<usize> {
    pages
        .iter()
        .flat_map(|p| p.placements.iter().map(|pl| pl.image.0))
        .collect()
}

#[test]
fn test_compose_empty_input() {
    for mode in PageSizeMode::ALL {
        let result = compose(&[], mode, &PageNumberSettings::default());
        match result {
            Err(ComposeError::EmptyInput) => {}
            other => panic!("Expected EmptyInput for {:?}, got {:?}", mode, other),
        }
    }
}

#[test]
fn test_compose_rejects_zero_sized_image() {
    let images = specs(&[(0, 10)]);
    let result = compose(&images, PageSizeMode::FitToA4, &PageNumberSettings::default());
    assert!(matches!(result, Err(ComposeError::Config(_))));
}

#[test]
fn test_compose_rejects_invalid_page_numbers() {
    let images = specs(&[(100, 100), (100, 100)]);
    let invalid = [
        PageNumberSettings {
            start_number: u32::MAX,
            ..Default::default()
        },
        PageNumberSettings {
            start_number: 0,
            ..Default::default()
        },
        PageNumberSettings {
            prefix_text: "Page number".to_string(),
            ..Default::default()
        },
    ];

    for settings in invalid {
        for mode in PageSizeMode::ALL {
            match compose(&images, mode, &settings) {
                Err(ComposeError::Config(_)) => {}
                other => panic!("Expected Config error for {:?}, got {:?}", settings, other),
            }
        }
    }

    let options = ComposeOptions {
        page_numbers: PageNumberSettings {
            start_number: u32::MAX,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(
        calculate_statistics(&images, &options),
        Err(ComposeError::Config(_))
    ));
}

#[test]
fn test_page_label_does_not_overflow() {
    let settings = PageNumberSettings {
        start_number: u32::MAX,
        ..Default::default()
    };
    assert_eq!(settings.label(2), (u32::MAX - 1).to_string());
}

#[test]
fn test_single_image_modes_one_page_per_image() {
    let images = mixed_sizes();
    for mode in PageSizeMode::ALL.into_iter().filter(|m| m.is_single_image()) {
        let pages = compose(&images, mode, &PageNumberSettings::default()).unwrap();
        assert_eq!(pages.len(), images.len(), "mode {:?}", mode);
        for (idx, page) in pages.iter().enumerate() {
            assert_eq!(page.number, idx as u32 + 1);
            assert_eq!(page.placements.len(), 1);
            assert_eq!(page.placements[0].image, ImageRef(idx));
        }
    }
}

#[test]
fn test_fit_to_a4_within_page_and_centered() {
    for settings in [PageNumberSettings::default(), PageNumberSettings::hidden()] {
        let pages = compose(&mixed_sizes(), PageSizeMode::FitToA4, &settings).unwrap();
        for page in &pages {
            assert_eq!((page.width, page.height), (A4_WIDTH_PT, A4_HEIGHT_PT));
            let rect = page.placements[0].rect;
            assert!(rect.width <= page.width + EPS);
            assert!(rect.height <= page.height + EPS);
            assert!((rect.x - (page.width - rect.width) / 2.0).abs() < EPS);
            assert!(rect.y >= -EPS);
            assert!(rect.bottom() <= page.height + EPS);
        }
    }
}

#[test]
fn test_fit_to_a4_without_footer_centers_vertically() {
    let pages = compose(
        &specs(&[(1000, 500)]),
        PageSizeMode::FitToA4,
        &PageNumberSettings::hidden(),
    )
    .unwrap();
    let rect = pages[0].placements[0].rect;
    assert!((rect.y - (A4_HEIGHT_PT - rect.height) / 2.0).abs() < EPS);
}

#[test]
fn test_fit_to_a4_scale_down_never_upscales() {
    let pages = compose(
        &specs(&[(300, 200), (50, 800)]),
        PageSizeMode::FitToA4ScaleDown,
        &PageNumberSettings::default(),
    )
    .unwrap();
    for page in &pages {
        assert_eq!(page.placements[0].scale, 1.0);
    }

    let pages = compose(
        &specs(&[(5000, 5000)]),
        PageSizeMode::FitToA4ScaleDown,
        &PageNumberSettings::hidden(),
    )
    .unwrap();
    let scale = pages[0].placements[0].scale;
    assert!(scale < 1.0);
    assert!((scale - A4_WIDTH_PT / 5000.0).abs() < 1e-6);
}

#[test]
fn test_fit_to_a4_scale_down_keeps_image_smaller_than_page() {
    // Fits A4 but is taller than the area beside the footer bands
    let pages = compose(
        &specs(&[(500, 820)]),
        PageSizeMode::FitToA4ScaleDown,
        &PageNumberSettings::default(),
    )
    .unwrap();
    let placement = &pages[0].placements[0];
    assert_eq!(placement.scale, 1.0);
    assert!(placement.rect.y >= 0.0);
    assert!(placement.rect.bottom() <= A4_HEIGHT_PT);
}

#[test]
fn test_no_scaling_keeps_pixel_size() {
    let pages = compose(
        &specs(&[(2000, 100)]),
        PageSizeMode::NoScaling,
        &PageNumberSettings::default(),
    )
    .unwrap();
    let placement = &pages[0].placements[0];
    assert_eq!(placement.scale, 1.0);
    assert_eq!(placement.rect.width, 2000.0);
    assert_eq!(placement.rect.x, (A4_WIDTH_PT - 2000.0) / 2.0);
}

#[test]
fn test_native_size_single_image() {
    let pages = compose(
        &specs(&[(1234, 567)]),
        PageSizeMode::ImageNativeSize,
        &PageNumberSettings::default(),
    )
    .unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!((pages[0].width, pages[0].height), (1234.0, 567.0));
    assert_eq!(pages[0].placements[0].scale, 1.0);
    assert_eq!(pages[0].placements[0].rect, Rect::new(0.0, 0.0, 1234.0, 567.0));
}

#[test]
fn test_grid_every_image_once_in_order() {
    let images: Vec<ImageSpec> = (0..23)
        .map(|i| ImageSpec::new(100 + (i * 37) % 900, 100 + (i * 53) % 1200, ImageRef(i as usize)))
        .collect();

    for settings in [PageNumberSettings::default(), PageNumberSettings::hidden()] {
        let pages = compose(&images, PageSizeMode::GridPacked, &settings).unwrap();
        assert_eq!(placement_order(&pages), (0..23).collect::<Vec<_>>());

        for (idx, page) in pages.iter().enumerate() {
            assert_eq!(page.number, idx as u32 + 1);
            assert!(!page.placements.is_empty());

            // Group placements by row (same center line)
            let mut rows: Vec<Vec<&Placement>> = Vec::new();
            for placement in &page.placements {
                match rows.last_mut() {
                    Some(row)
                        if row.len() < GRID_COLUMNS
                            && placement.rect.x > row[row.len() - 1].rect.x =>
                    {
                        row.push(placement)
                    }
                    _ => rows.push(vec![placement]),
                }
            }
            assert!(rows.iter().all(|r| r.len() <= GRID_COLUMNS));
        }
    }
}

#[test]
fn test_grid_oversized_row_still_placed() {
    // Extremely tall images are capped, so every one still gets placed
    let images = specs(&[(10, 10_000), (10, 10_000), (10, 10_000)]);
    let pages = compose(&images, PageSizeMode::GridPacked, &PageNumberSettings::default()).unwrap();
    assert_eq!(placement_order(&pages), vec![0, 1, 2]);
}

#[test]
fn test_footer_numbering_with_prefix() {
    let settings = PageNumberSettings {
        start_number: 5,
        prefix_text: "Page".to_string(),
        ..Default::default()
    };
    let pages = compose(&specs(&[(100, 100); 3]), PageSizeMode::FitToA4, &settings).unwrap();
    let labels: Vec<&str> = pages
        .iter()
        .map(|p| p.footer.as_ref().unwrap().text.as_str())
        .collect();
    assert_eq!(labels, vec!["Page 5", "Page 6", "Page 7"]);
}

#[test]
fn test_footer_without_prefix_is_trimmed() {
    let pages = compose(
        &specs(&[(100, 100)]),
        PageSizeMode::GridPacked,
        &PageNumberSettings::default(),
    )
    .unwrap();
    assert_eq!(pages[0].footer.as_ref().unwrap().text, "1");
}

#[test]
fn test_footer_hidden() {
    let pages = compose(
        &specs(&[(100, 100); 2]),
        PageSizeMode::ImageNativeSize,
        &PageNumberSettings::hidden(),
    )
    .unwrap();
    assert!(pages.iter().all(|p| p.footer.is_none()));
}

#[test]
fn test_footer_top_alignment_moves_image_down() {
    let top = PageNumberSettings {
        vertical_align: VerticalAlign::Top,
        ..Default::default()
    };
    let bottom = PageNumberSettings::default();
    let image = specs(&[(500, 2000)]);

    let top_page = &compose(&image, PageSizeMode::FitToA4, &top).unwrap()[0];
    let bottom_page = &compose(&image, PageSizeMode::FitToA4, &bottom).unwrap()[0];

    let top_footer = top_page.footer.as_ref().unwrap();
    let bottom_footer = bottom_page.footer.as_ref().unwrap();
    assert!(top_footer.baseline_y < A4_HEIGHT_PT / 2.0);
    assert!(bottom_footer.baseline_y > A4_HEIGHT_PT / 2.0);

    // The image never covers the number
    let top_rect = top_page.placements[0].rect;
    assert!(top_rect.y > top_footer.baseline_y);
    let bottom_rect = bottom_page.placements[0].rect;
    assert!(bottom_rect.bottom() < bottom_footer.baseline_y - bottom_footer.font_size);
}

#[test]
fn test_statistics_match_layout() {
    let images = specs(&[(100, 100); 5]);
    let options = ComposeOptions {
        page_size_mode: PageSizeMode::GridPacked,
        page_numbers: PageNumberSettings::hidden(),
        ..Default::default()
    };
    let stats = calculate_statistics(&images, &options).unwrap();
    assert_eq!(stats.source_images, 5);
    assert_eq!(stats.output_pages, 2);
    assert_eq!(stats.images_per_page, vec![4, 1]);
    assert_eq!(stats.mode, PageSizeMode::GridPacked);

    let options = ComposeOptions::default();
    let stats = calculate_statistics(&images, &options).unwrap();
    assert_eq!(stats.output_pages, 5);
    assert_eq!(stats.images_per_page, vec![1; 5]);

    assert!(matches!(
        calculate_statistics(&[], &options),
        Err(ComposeError::EmptyInput)
    ));
}
