//! cqa-kb - 규제 문서 CQA 지식베이스
//!
//! 규제 PDF에서 CQA(핵심 품질 특성) 지식을 키워드 규칙으로 추출하여
//! 고정 컬럼 테이블 지식베이스에 저장하고, 모달리티/개발 단계별 질의에
//! 구조화된 답변을 생성합니다.
//!
//! 파이프라인: 텍스트 추출 → 고정 길이 청킹 → 모달리티별 CQA 분류 →
//! 레코드 생성 → 저장. 질의: 전체 로드 → 필터 → CQA별 그룹 → 렌더링.

pub mod classifier;
pub mod cli;
pub mod extractor;
pub mod knowledge;
pub mod reasoning;

// Re-exports
pub use classifier::{CqaClassifier, Finding, ModalityClass};
pub use knowledge::{
    build_records, default_chunker, fixed_chunker, get_data_dir, ChunkConfig, Chunker,
    FixedChunker, IngestPipeline, KnowledgeRecord, KnowledgeStore, StoreStats,
    CONTROL_ACTION_SPECIFICATION, JUSTIFICATION_AI_EXTRACTED, REGULATORY_SOURCE_PDF_LLM,
};
pub use reasoning::{CqaSummary, NO_DATA_MESSAGE};
