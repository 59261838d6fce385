//! Knowledge 모듈 - CQA 지식베이스
//!
//! - Store: 고정 컬럼 CSV 테이블 저장소 (load-all / append / save-all)
//! - Chunker: 고정 길이 텍스트 분할
//! - Ingest: 청킹 → 분류 → 레코드 생성 → 저장 파이프라인

mod chunker;
mod ingest;
mod store;

// Re-exports
pub use chunker::{default_chunker, fixed_chunker, ChunkConfig, Chunker, FixedChunker};
pub use ingest::{
    build_records, IngestPipeline, CONTROL_ACTION_SPECIFICATION, JUSTIFICATION_AI_EXTRACTED,
    REGULATORY_SOURCE_PDF_LLM,
};
pub use store::{get_data_dir, KnowledgeRecord, KnowledgeStore, StoreStats};
