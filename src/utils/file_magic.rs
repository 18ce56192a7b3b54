/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// `extension` 不含点号（如 `png`），大小写不敏感。未知扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_ascii_lowercase().as_str() {
        // 图片
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        "webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",

        // 文档
        "pdf" => data.starts_with(b"%PDF"),
        "doc" | "xls" | "ppt" => {
            // OLE 复合文档
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        "docx" | "xlsx" | "pptx" | "zip" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        // 视频：ISO BMFF，偏移 4 处为 ftyp
        "mp4" | "m4v" | "mov" => data.len() >= 8 && &data[4..8] == b"ftyp",

        // 纯文本：不能含 NUL
        "csv" | "txt" | "md" => !data.contains(&0),

        _ => false,
    }
}

/// 扩展名对应的 Content-Type，下载时使用
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "xls" => "application/vnd.ms-excel",
        "ppt" => "application/vnd.ms-powerpoint",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "zip" => "application/zip",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// 从原始文件名取出小写扩展名
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, "png"));
        assert!(validate_magic_bytes(&png_header, "PNG"));
        assert!(!validate_magic_bytes(&png_header, "jpg"));
    }

    #[test]
    fn test_mp4_magic() {
        let mp4_header = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&mp4_header, "mp4"));
        assert!(!validate_magic_bytes(b"ftyp", "mp4"));
    }

    #[test]
    fn test_csv_must_be_text() {
        assert!(validate_magic_bytes(b"name,email\nada,ada@example.com\n", "csv"));
        assert!(!validate_magic_bytes(&[0x50, 0x4B, 0x00, 0x04], "csv"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], "png"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A, 0x90, 0x00], "exe"));
    }

    #[test]
    fn test_extension_and_content_type() {
        assert_eq!(extension_of("Syllabus.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension_of("README"), None);
        assert!(content_type_for("xlsx").starts_with("application/vnd"));
        assert_eq!(content_type_for("bin"), "application/octet-stream");
    }
}
