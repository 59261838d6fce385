//! 텍스트 청킹 모듈
//!
//! 추출된 문서 원문을 고정 길이 세그먼트로 분할합니다.
//! 세그먼트는 입력을 왼쪽에서 오른쪽으로 겹침 없이 빠짐없이 덮으며,
//! 각 세그먼트는 독립적으로 분류됩니다.
//! 정규화(대소문자, 공백)는 여기서 하지 않습니다 - 분류 단계의 역할입니다.

// ============================================================================
// Chunk Configuration
// ============================================================================

/// 청킹 설정
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 세그먼트 길이 (문자 수, 마지막 세그먼트는 더 짧을 수 있음)
    pub chunk_characters: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_characters: 1000,
        }
    }
}

// ============================================================================
// Chunker Trait
// ============================================================================

/// 텍스트 청킹 전략 트레이트
pub trait Chunker: Send + Sync {
    /// 텍스트를 청크로 분할
    fn chunk(&self, text: &str) -> Vec<String>;

    /// 청커 이름
    fn name(&self) -> &'static str;
}

// ============================================================================
// FixedChunker
// ============================================================================

/// 고정 길이 청커
///
/// 문자 수 기준으로 분할합니다 (UTF-8 바이트 경계 안전):
/// - 빈 입력은 빈 시퀀스
/// - 마지막을 제외한 모든 청크는 정확히 설정 길이
/// - 청크를 모두 이어붙이면 원문이 그대로 복원됨
pub struct FixedChunker {
    config: ChunkConfig,
}

impl FixedChunker {
    /// 설정으로 생성
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// 기본 설정으로 생성 (1000자)
    pub fn with_defaults() -> Self {
        Self::new(ChunkConfig::default())
    }
}

impl Chunker for FixedChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        // 길이 0 설정은 1로 보정
        let size = self.config.chunk_characters.max(1);

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut count = 0usize;

        for ch in text.chars() {
            current.push(ch);
            count += 1;
            if count == size {
                chunks.push(std::mem::take(&mut current));
                count = 0;
            }
        }

        // 마지막 부분 청크 (빈 문자열은 추가하지 않음)
        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }

    fn name(&self) -> &'static str {
        "FixedChunker"
    }
}

// ============================================================================
// Factory Functions
// ============================================================================

/// 기본 청커 생성
pub fn default_chunker() -> Box<dyn Chunker> {
    Box::new(FixedChunker::with_defaults())
}

/// 고정 길이 청커 생성 (설정 지정)
pub fn fixed_chunker(config: ChunkConfig) -> Box<dyn Chunker> {
    Box::new(FixedChunker::new(config))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: usize) -> FixedChunker {
        FixedChunker::new(ChunkConfig {
            chunk_characters: size,
        })
    }

    #[test]
    fn test_chunker_empty() {
        let chunks = chunker(1000).chunk("");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunker_lossless_cover() {
        let text = "The purity of the drug substance was assessed by HPLC. \
                    Aggregation levels remained below 1%.";
        let chunks = chunker(10).chunk(text);

        assert_eq!(chunks.concat(), text);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 10);
        }
        assert!(chunks.last().unwrap().chars().count() <= 10);
    }

    #[test]
    fn test_chunker_exact_multiple_has_no_trailing_empty() {
        let text = "abcdefgh"; // 8자, 청크 4자
        let chunks = chunker(4).chunk(text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "abcd");
        assert_eq!(chunks[1], "efgh");
    }

    #[test]
    fn test_chunker_shorter_than_chunk() {
        let chunks = chunker(1000).chunk("short text");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "short text");
    }

    #[test]
    fn test_chunker_last_chunk_length() {
        let text = "a".repeat(25);
        let chunks = chunker(10).chunk(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 5); // 25 mod 10
    }

    #[test]
    fn test_chunker_multibyte_safe() {
        let text = "순도 평가는 HPLC로 수행한다. 純度評価。";
        let chunks = chunker(5).chunk(text);

        assert_eq!(chunks.concat(), text);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 5);
        }
    }

    #[test]
    fn test_chunker_zero_size_treated_as_one() {
        let chunks = chunker(0).chunk("ab");
        assert_eq!(chunks, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_default_config() {
        assert_eq!(ChunkConfig::default().chunk_characters, 1000);
        assert_eq!(default_chunker().name(), "FixedChunker");
    }
}
