//! PDF 텍스트 추출 모듈
//!
//! pdf-extract 크레이트로 PDF에서 텍스트를 뽑고 페이지 단위로 나눕니다.
//! 추출 자체는 블랙박스로 취급합니다 - 이 모듈은 원문 텍스트만 넘깁니다.

use std::path::Path;

use anyhow::{Context, Result};

/// PDF에서 페이지별 텍스트 추출
///
/// (페이지 번호, 텍스트) 튜플 벡터를 반환합니다. 페이지 번호는 1부터.
/// 텍스트가 전혀 없는 PDF(스캔본 등)는 빈 텍스트 한 페이지로 반환합니다.
pub fn extract_text_from_pdf(path: &Path) -> Result<Vec<(usize, String)>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read PDF: {:?}", path))?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .with_context(|| format!("Failed to extract text from PDF: {:?}", path))?;

    if text.trim().is_empty() {
        tracing::warn!(
            "No text extracted from PDF: {:?}. It might be a scanned document.",
            path
        );
        return Ok(vec![(1, String::new())]);
    }

    Ok(split_pdf_pages(&text)
        .into_iter()
        .enumerate()
        .map(|(i, page)| (i + 1, page))
        .collect())
}

/// PDF 텍스트를 페이지별로 분리
///
/// 폼피드 문자를 우선 시도하고, 없으면 "--- Page N ---" 형태의
/// 구분자 패턴을 시도합니다. 둘 다 실패하면 전체를 한 페이지로 봅니다.
fn split_pdf_pages(text: &str) -> Vec<String> {
    let pages: Vec<String> = text
        .split('\x0c')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if pages.len() > 1 {
        return pages;
    }

    let page_marker = regex::Regex::new(r"(?m)^[\s]*[-=]+[\s]*(?:Page[\s]*)?(\d+)[\s]*[-=]+[\s]*$")
        .expect("Invalid page marker regex");

    if page_marker.is_match(text) {
        let pages: Vec<String> = page_marker
            .split(text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if pages.len() > 1 {
            return pages;
        }
    }

    vec![text.to_string()]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_formfeed() {
        let text = "Purity section\x0cPotency section\x0cAppendix";
        let pages = split_pdf_pages(text);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], "Purity section");
        assert_eq!(pages[2], "Appendix");
    }

    #[test]
    fn test_split_pages_marker_pattern() {
        let text = "Intro\n--- Page 2 ---\nBody\n--- Page 3 ---\nEnd";
        let pages = split_pdf_pages(text);
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn test_split_pages_no_separator() {
        let text = "Single page document without breaks";
        let pages = split_pdf_pages(text);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], text);
    }
}
