//! 문서 텍스트 추출 모듈
//!
//! 수집 대상 파일에서 분류용 원문 텍스트를 추출합니다.
//! - 텍스트 파일: 직접 읽기
//! - PDF 파일: pdf-extract로 추출 후 페이지를 개행으로 연결
//!
//! 페이지 구조는 이후 단계에서 사용하지 않습니다 - 파이프라인은
//! 문서당 단일 문자열을 입력으로 받습니다.

pub mod pdf;

use std::path::Path;

use anyhow::{anyhow, Context, Result};

// ============================================================================
// Document Types
// ============================================================================

/// 지원하는 문서 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// 일반 텍스트 (txt, md)
    Text,
    /// PDF 문서
    Pdf,
}

impl DocumentType {
    /// 확장자로 문서 타입 결정
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" | "md" | "text" => Some(DocumentType::Text),
            "pdf" => Some(DocumentType::Pdf),
            _ => None,
        }
    }

    /// 파일 경로에서 타입 결정
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// 파일에서 문서 전체 텍스트 추출
///
/// PDF는 페이지별 텍스트를 개행으로 연결한 단일 문자열을 반환합니다.
pub async fn extract_document_text(path: &Path) -> Result<String> {
    let doc_type = DocumentType::from_path(path)
        .ok_or_else(|| anyhow!("Unsupported document type: {:?}", path))?;

    match doc_type {
        DocumentType::Text => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read text file: {:?}", path)),
        DocumentType::Pdf => {
            // PDF 추출은 CPU 바운드이므로 spawn_blocking 사용
            let path = path.to_path_buf();
            let pages = tokio::task::spawn_blocking(move || pdf::extract_text_from_pdf(&path))
                .await
                .context("PDF extraction task failed")??;

            Ok(pages
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_document_type_from_extension() {
        assert_eq!(DocumentType::from_extension("pdf"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("PDF"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("txt"), Some(DocumentType::Text));
        assert_eq!(DocumentType::from_extension("docx"), None);
    }

    #[test]
    fn test_document_type_from_path() {
        assert_eq!(
            DocumentType::from_path(&PathBuf::from("guidance.pdf")),
            Some(DocumentType::Pdf)
        );
        assert_eq!(DocumentType::from_path(&PathBuf::from("no_extension")), None);
    }

    #[tokio::test]
    async fn test_extract_text_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        tokio::fs::write(&path, "Purity requirements apply.")
            .await
            .unwrap();

        let text = extract_document_text(&path).await.unwrap();
        assert_eq!(text, "Purity requirements apply.");
    }

    #[tokio::test]
    async fn test_extract_unsupported_type_fails() {
        let result = extract_document_text(&PathBuf::from("document.docx")).await;
        assert!(result.is_err());
    }
}
