//! 入力画像（Data URL）の検証
//!
//! FileReader で読み込んだ Data URL を分類器に渡す前に、
//! 先頭数十バイトだけをデコードしてマジックバイトから画像形式を判定する。
//! SVG はテキストなので宣言MIMEで受け付け、最終的な判定はブラウザのデコードに任せる。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

/// 形式判定に使う Base64 文字数（4の倍数 = 48バイト）
const HEADER_BASE64_LEN: usize = 64;

const SVG_MIME: &str = "image/svg+xml";

/// 画像の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Raster(ImageFormat),
    Svg,
}

impl ImageKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Raster(format) => format.to_mime_type(),
            ImageKind::Svg => SVG_MIME,
        }
    }
}

/// 分類に渡せることを確認済みの画像
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub file_name: String,
    pub data_url: String,
    pub kind: ImageKind,
}

impl ImageSource {
    /// Data URL から生成（画像でなければ `Error::Decode`）
    pub fn from_data_url(file_name: &str, data_url: &str) -> Result<Self> {
        let payload = extract_base64_from_data_url(data_url)
            .ok_or_else(|| Error::Decode(format!("{}: Data URL形式ではありません", file_name)))?;

        if payload.is_empty() {
            return Err(Error::Decode(format!("{}: 空のファイルです", file_name)));
        }

        let kind = if extract_mime_type_from_data_url(data_url) == Some(SVG_MIME) {
            ImageKind::Svg
        } else {
            ImageKind::Raster(sniff_format(file_name, payload)?)
        };

        Ok(Self {
            file_name: file_name.to_string(),
            data_url: data_url.to_string(),
            kind,
        })
    }

    /// FileReader の結果から生成（読み込み失敗も `Error::Decode`）
    pub fn from_file_read(
        file_name: &str,
        read: std::result::Result<String, String>,
    ) -> Result<Self> {
        let data_url =
            read.map_err(|e| Error::Decode(format!("{}: 読み込みに失敗しました: {}", file_name, e)))?;
        Self::from_data_url(file_name, &data_url)
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }
}

/// 先頭部分だけデコードして形式を判定
fn sniff_format(file_name: &str, payload: &str) -> Result<ImageFormat> {
    // 文字境界で切れない（非ASCII）場合は全体をデコードしてエラーにする
    let header = payload.get(..HEADER_BASE64_LEN).unwrap_or(payload);
    let bytes = STANDARD
        .decode(header)
        .map_err(|e| Error::Decode(format!("{}: {}", file_name, e)))?;

    image::guess_format(&bytes)
        .map_err(|_| Error::Decode(format!("{}: 対応していない画像形式です", file_name)))
}

/// "data:image/jpeg;base64,..." から Base64 部分を取り出す
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    let rest = data_url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    Some(payload)
}

/// Data URL から MIME タイプを取り出す
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split([';', ',']).next())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
    const SVG_BALL: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><circle cx="5" cy="5" r="4"/></svg>"#;

    fn data_url(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
    }

    #[test]
    fn test_accepts_png() {
        let url = data_url("image/png", PNG_SIGNATURE);
        let source = ImageSource::from_data_url("a.png", &url).unwrap();
        assert_eq!(source.kind, ImageKind::Raster(ImageFormat::Png));
        assert_eq!(source.mime_type(), "image/png");
        assert_eq!(source.data_url, url);
    }

    #[test]
    fn test_sniffs_format_not_declared_mime() {
        // 拡張子・MIMEが嘘でも中身で判定
        let url = data_url("application/octet-stream", JPEG_SIGNATURE);
        let source = ImageSource::from_data_url("photo.bin", &url).unwrap();
        assert_eq!(source.kind, ImageKind::Raster(ImageFormat::Jpeg));
    }

    #[test]
    fn test_accepts_svg() {
        let url = data_url("image/svg+xml", SVG_BALL.as_bytes());
        let source = ImageSource::from_data_url("ball.svg", &url).unwrap();
        assert_eq!(source.kind, ImageKind::Svg);
        assert_eq!(source.mime_type(), "image/svg+xml");
    }

    #[test]
    fn test_large_payload_only_header_decoded() {
        // 先頭以外が壊れていても判定は先頭だけで行う
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.resize(4096, 0);
        let url = format!("{}@@@@", data_url("image/png", &bytes));
        let source = ImageSource::from_data_url("big.png", &url).unwrap();
        assert_eq!(source.kind, ImageKind::Raster(ImageFormat::Png));
    }

    #[test]
    fn test_rejects_text_file() {
        let url = data_url("text/plain", b"hello world, not an image");
        let result = ImageSource::from_data_url("notes.txt", &url);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_rejects_empty_payload() {
        let result = ImageSource::from_data_url("empty.png", "data:image/png;base64,");
        assert!(matches!(result, Err(Error::Decode(_))));

        let result = ImageSource::from_data_url("empty.svg", "data:image/svg+xml;base64,");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_rejects_non_base64_url() {
        let result = ImageSource::from_data_url("x", "data:text/plain,hello");
        assert!(matches!(result, Err(Error::Decode(_))));

        let result = ImageSource::from_data_url("x", "https://example.com/a.png");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_rejects_broken_base64() {
        let result = ImageSource::from_data_url("x", "data:image/png;base64,@@@@");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_from_file_read_error() {
        let result = ImageSource::from_file_read("a.png", Err("NotReadableError".to_string()));
        match result {
            Err(Error::Decode(message)) => {
                assert!(message.contains("a.png"));
                assert!(message.contains("NotReadableError"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_from_file_read_ok() {
        let url = data_url("image/png", PNG_SIGNATURE);
        let source = ImageSource::from_file_read("a.png", Ok(url)).unwrap();
        assert_eq!(source.file_name, "a.png");
    }

    #[test]
    fn test_extract_mime_type() {
        assert_eq!(
            extract_mime_type_from_data_url("data:image/jpeg;base64,AAAA"),
            Some("image/jpeg")
        );
        assert_eq!(extract_mime_type_from_data_url("data:;base64,AAAA"), None);
        assert_eq!(extract_mime_type_from_data_url("image/jpeg"), None);
    }
}
