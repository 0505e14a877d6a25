use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use pdf_compose::*;
use std::io::Cursor;
use std::time::{Duration, SystemTime};

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([20, 120, 220]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 64]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

fn provider_with(count: usize) -> MemoryImageProvider {
    let mut provider = MemoryImageProvider::new();
    for i in 0..count {
        provider.push(format!("img{}.png", i), png(40 + i as u32 * 10, 30));
    }
    provider
}

/// Probes fine but refuses to decode one image
struct FlakyProvider {
    inner: MemoryImageProvider,
    broken: ImageRef,
}

impl ImageProvider for FlakyProvider {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn probe(&self, image: ImageRef) -> Result<(u32, u32)> {
        self.inner.probe(image)
    }

    fn load(&self, image: ImageRef) -> Result<DynamicImage> {
        if image == self.broken {
            return Err(ComposeError::Decode {
                image: self.describe(image),
                message: "truncated data".to_string(),
            });
        }
        self.inner.load(image)
    }

    fn describe(&self, image: ImageRef) -> String {
        self.inner.describe(image)
    }
}

#[test]
fn test_convert_single_mode_page_count() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pdf");
    let provider = provider_with(3);

    let mut calls = Vec::new();
    let report = convert_blocking(&provider, &ComposeOptions::default(), &output, &mut |done, total| {
        calls.push((done, total))
    })
    .unwrap();

    assert_eq!(report.output, output);
    assert_eq!(report.pages, 3);
    assert_eq!(report.images_placed, 3);
    assert!(report.skipped.is_empty());
    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);

    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

#[test]
fn test_convert_grid_mode_packs_pages() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("grid.pdf");
    let provider = provider_with(5);
    let options = ComposeOptions {
        page_size_mode: PageSizeMode::GridPacked,
        ..Default::default()
    };

    let report = convert_blocking(&provider, &options, &output, &mut |_, _| {}).unwrap();
    assert_eq!(report.images_placed, 5);

    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), report.pages);
    assert!(report.pages < 5);
}

#[test]
fn test_convert_transparent_and_native_size() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("native.pdf");
    let mut provider = MemoryImageProvider::new();
    provider.push("alpha.png", transparent_png(64, 48));
    let options = ComposeOptions {
        page_size_mode: PageSizeMode::ImageNativeSize,
        title: Some("Native".to_string()),
        ..Default::default()
    };

    convert_blocking(&provider, &options, &output, &mut |_, _| {}).unwrap();

    let doc = lopdf::Document::load(&output).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.values().next().unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();
    assert_eq!((width, height), (64.0, 48.0));
}

#[test]
fn test_convert_skips_unreadable_image() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("skip.pdf");
    let mut provider = provider_with(2);
    provider.push("broken.png", b"definitely not a png".to_vec());

    let report = convert_blocking(&provider, &ComposeOptions::default(), &output, &mut |_, _| {})
        .unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].description, "broken.png");
    assert_eq!(lopdf::Document::load(&output).unwrap().get_pages().len(), 2);
}

#[test]
fn test_convert_decode_failure_leaves_slot_empty() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("flaky.pdf");
    let provider = FlakyProvider {
        inner: provider_with(3),
        broken: ImageRef(1),
    };

    let report = convert_blocking(&provider, &ComposeOptions::default(), &output, &mut |_, _| {})
        .unwrap();

    assert_eq!(report.pages, 3);
    assert_eq!(report.images_placed, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].image, ImageRef(1));
    assert_eq!(lopdf::Document::load(&output).unwrap().get_pages().len(), 3);
}

#[test]
fn test_convert_all_images_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("none.pdf");
    let mut provider = MemoryImageProvider::new();
    provider.push("a", b"junk".to_vec());

    let result = convert_blocking(&provider, &ComposeOptions::default(), &output, &mut |_, _| {});
    assert!(matches!(result, Err(ComposeError::EmptyInput)));
    assert!(!output.exists());
}

#[test]
fn test_convert_rejects_invalid_options() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("bad.pdf");
    let mut options = ComposeOptions::default();
    options.page_numbers.start_number = 0;

    let result = convert_blocking(&provider_with(1), &options, &output, &mut |_, _| {});
    assert!(matches!(result, Err(ComposeError::Config(_))));
    assert!(!output.exists());
}

#[test]
fn test_failed_save_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("out.pdf");

    let result = convert_blocking(&provider_with(1), &ComposeOptions::default(), &output, &mut |_, _| {});
    match result {
        Err(ComposeError::SinkUnavailable(_)) => {}
        other => panic!("Expected SinkUnavailable, got {:?}", other),
    }
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_resolve_output_path_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(resolve_output_path(dir.path()), dir.path().join("images.pdf"));

    let file = dir.path().join("named.pdf");
    assert_eq!(resolve_output_path(&file), file);
}

#[tokio::test]
async fn test_convert_images_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for (i, format) in [ImageFormat::Png, ImageFormat::Jpeg].into_iter().enumerate() {
        let path = dir
            .path()
            .join(format!("photo{}.{}", i, format.extensions_str()[0]));
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 80, Rgb([9, 9, 9])));
        std::fs::write(&path, encode(img, format)).unwrap();
        paths.push(path);
    }

    let out_dir = tempfile::tempdir().unwrap();
    let report = convert_images(&paths, &ComposeOptions::default(), out_dir.path())
        .await
        .unwrap();

    assert_eq!(report.output, out_dir.path().join("images.pdf"));
    assert_eq!(report.pages, 2);
    assert_eq!(lopdf::Document::load(&report.output).unwrap().get_pages().len(), 2);
}

#[tokio::test]
async fn test_convert_images_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<std::path::PathBuf> = Vec::new();
    match convert_images(&paths, &ComposeOptions::default(), dir.path()).await {
        Err(ComposeError::EmptyInput) => {}
        other => panic!("Expected EmptyInput, got {:?}", other),
    }
}

#[tokio::test]
async fn test_probe_files_reports_missing() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    std::fs::write(&good, png(10, 20)).unwrap();
    let missing = dir.path().join("missing.png");

    let (specs, skipped) = probe_files(&[good, missing]).await.unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!((specs[0].width, specs[0].height), (10, 20));
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].image, ImageRef(1));
}

#[tokio::test]
async fn test_list_pdfs_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let now = SystemTime::now();

    for (name, age) in [("old.pdf", 300), ("new.pdf", 10), ("middle.PDF", 100)] {
        let path = dir.path().join(name);
        let file = std::fs::File::create(&path).unwrap();
        file.set_modified(now - Duration::from_secs(age)).unwrap();
    }
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let entries = list_pdfs(dir.path()).await.unwrap();
    let names: Vec<String> = entries
        .iter()
        .map(|e| e.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["new.pdf", "middle.PDF", "old.pdf"]);
}

#[tokio::test]
async fn test_save_pdf_async() {
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_with(1);
    let options = ComposeOptions::default();
    let (specs, _) = probe_images(&provider);
    let pages = compose(&specs, options.page_size_mode, &options.page_numbers).unwrap();
    let rendered = render_document(&pages, &provider, &options, &mut |_, _| {}).unwrap();

    let path = dir.path().join("saved.pdf");
    save_pdf(rendered.document, &path).await.unwrap();

    let entries = list_pdfs(dir.path()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, path);
    assert!(entries[0].size_bytes > 0);
}
