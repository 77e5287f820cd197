//! 送信する画像の読み込みとプレビュー用デコード

use box_scanner_common::AnalysisError;
use bytes::Bytes;
use image::ImageFormat;
use std::path::Path;

use crate::error::{BoxScannerError, Result};

/// ファイル選択のacceptフィルタ相当
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// 送信用の生画像
///
/// 本体は `Bytes` で持つので、デコード待ちや送信用に複製してもバッファは共有される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// 表示用のプレビュー情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl std::fmt::Display for ImagePreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}

fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// 画像ファイルを読み込む（中身はそのままmultipartに載せる）
pub fn load_image(path: &Path) -> Result<ImageFile> {
    if !path.is_file() {
        return Err(BoxScannerError::FileNotFound(path.display().to_string()));
    }

    let accepted = path
        .extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false);
    if !accepted {
        return Err(BoxScannerError::UnsupportedImage(path.display().to_string()));
    }

    let bytes = Bytes::from(std::fs::read(path)?);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mime_type = ImageFormat::from_path(path)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string());

    Ok(ImageFile {
        file_name,
        mime_type,
        bytes,
    })
}

/// プレビュー用にデコードする
pub fn decode_preview(image: &ImageFile) -> std::result::Result<ImagePreview, AnalysisError> {
    let format = image::guess_format(&image.bytes)
        .map_err(|e| AnalysisError::DecodeFailed(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(&image.bytes, format)
        .map_err(|e| AnalysisError::DecodeFailed(e.to_string()))?;

    Ok(ImagePreview {
        width: decoded.width(),
        height: decoded.height(),
        format: format!("{:?}", format).to_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(width, height);
        buffer.save(path).unwrap();
    }

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("png"));
        assert!(is_image_extension("webp"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
    }

    #[test]
    fn test_load_image_not_found() {
        let result = load_image(Path::new("/nonexistent/boxes.jpg"));
        assert!(matches!(result, Err(BoxScannerError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_rejects_other_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let result = load_image(&path);
        assert!(matches!(result, Err(BoxScannerError::UnsupportedImage(_))));
    }

    #[test]
    fn test_load_and_decode_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("boxes.png");
        write_png(&path, 4, 3);

        let image = load_image(&path).unwrap();
        assert_eq!(image.file_name, "boxes.png");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, std::fs::read(&path).unwrap());

        let preview = decode_preview(&image).unwrap();
        assert_eq!(preview.width, 4);
        assert_eq!(preview.height, 3);
        assert_eq!(preview.format, "png");
    }

    #[test]
    fn test_clone_shares_image_buffer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("boxes.png");
        write_png(&path, 2, 2);

        let image = load_image(&path).unwrap();
        let copy = image.clone();
        assert_eq!(copy.bytes.as_ptr(), image.bytes.as_ptr());
    }

    #[test]
    fn test_decode_corrupt_image() {
        let image = ImageFile {
            file_name: "broken.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: Bytes::from_static(b"definitely not a jpeg"),
        };
        let err = decode_preview(&image).unwrap_err();
        assert!(matches!(err, AnalysisError::DecodeFailed(_)));
    }
}
