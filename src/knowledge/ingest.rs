//! 수집 파이프라인 - 청킹 → 분류 → 레코드 생성 → 저장
//!
//! 문서 원문을 고정 길이 청크로 나누고, 각 청크를 CQA 분류기에 통과시켜
//! Finding을 수집한 뒤, 지식베이스 레코드로 변환하여 저장합니다.
//! 전 과정은 동기적이며 결정적입니다 - 같은 문서를 재수집하면
//! 같은 Finding이 재생산됩니다.

use anyhow::{bail, Result};

use crate::classifier::{CqaClassifier, Finding};

use super::chunker::{default_chunker, Chunker};
use super::store::{KnowledgeRecord, KnowledgeStore};

// ============================================================================
// Machine-extracted Record Defaults
// ============================================================================

/// 기계 추출 레코드의 근거 필드 기본값
pub const JUSTIFICATION_AI_EXTRACTED: &str = "AI Extracted";
/// 기계 추출 레코드의 출처 태그
pub const REGULATORY_SOURCE_PDF_LLM: &str = "PDF-LLM";
/// 기계 추출 레코드의 관리 전략 분류
pub const CONTROL_ACTION_SPECIFICATION: &str = "Specification";

// ============================================================================
// Record Builder
// ============================================================================

/// Finding 목록을 지식베이스 레코드로 변환
///
/// Finding당 레코드 하나를 생성하며, 기계 추출 기본값을 스탬핑합니다.
/// 순수 변환입니다 - 영속화는 호출자 책임입니다.
pub fn build_records(findings: &[Finding], modality: &str, phase: &str) -> Vec<KnowledgeRecord> {
    findings
        .iter()
        .map(|finding| KnowledgeRecord {
            modality: modality.to_string(),
            phase: phase.to_string(),
            cqa: finding.cqa.clone(),
            test_methods: finding.test_methods.clone(),
            justification: JUSTIFICATION_AI_EXTRACTED.to_string(),
            regulatory_source: REGULATORY_SOURCE_PDF_LLM.to_string(),
            control_action: CONTROL_ACTION_SPECIFICATION.to_string(),
        })
        .collect()
}

// ============================================================================
// IngestPipeline
// ============================================================================

/// 수집 파이프라인
///
/// 청커와 저장소를 묶어 문서 단위 수집을 수행합니다.
pub struct IngestPipeline {
    store: KnowledgeStore,
    chunker: Box<dyn Chunker>,
}

impl IngestPipeline {
    /// 기본 청커(1000자 고정)로 생성
    pub fn new(store: KnowledgeStore) -> Self {
        Self {
            store,
            chunker: default_chunker(),
        }
    }

    /// 청커 지정 생성
    pub fn with_chunker(store: KnowledgeStore, chunker: Box<dyn Chunker>) -> Self {
        Self { store, chunker }
    }

    /// 저장소 참조
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// 문서 텍스트 분류 (저장 없음)
    ///
    /// 청크 순서대로, 청크 내에서는 규칙표 순서대로 Finding을 반환합니다.
    /// 청크 간 반복 매치는 그대로 보존됩니다 (중복 제거 없음).
    pub fn extract(&self, document_text: &str, modality: &str) -> Vec<Finding> {
        let classifier = CqaClassifier::for_modality(modality);

        self.chunker
            .chunk(document_text)
            .iter()
            .flat_map(|chunk| classifier.classify(chunk))
            .collect()
    }

    /// 문서 수집: 분류 → 레코드 생성 → 저장
    ///
    /// 추가된 레코드 수를 반환합니다. Finding이 없으면
    /// 저장소를 건드리지 않고 0을 반환합니다 (오류 아님).
    /// 영속 레코드의 모달리티/단계는 비어 있을 수 없습니다.
    pub fn ingest(&self, document_text: &str, modality: &str, phase: &str) -> Result<usize> {
        if modality.trim().is_empty() {
            bail!("Modality must not be blank");
        }
        if phase.trim().is_empty() {
            bail!("Phase must not be blank");
        }

        let findings = self.extract(document_text, modality);

        if findings.is_empty() {
            tracing::warn!(
                "No extractable CQA data found (modality={}, phase={})",
                modality,
                phase
            );
            return Ok(0);
        }

        let records = build_records(&findings, modality, phase);
        self.store.append(&records)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::chunker::{fixed_chunker, ChunkConfig};
    use tempfile::TempDir;

    fn create_test_pipeline() -> (TempDir, IngestPipeline) {
        let dir = TempDir::new().unwrap();
        let store = KnowledgeStore::open(&dir.path().join("kb.csv")).unwrap();
        (dir, IngestPipeline::new(store))
    }

    #[test]
    fn test_build_records_stamps_defaults() {
        let findings = vec![Finding {
            cqa: "Purity".to_string(),
            test_methods: "HPLC, SEC".to_string(),
        }];

        let records = build_records(&findings, "mAb", "Phase 1");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].modality, "mAb");
        assert_eq!(records[0].phase, "Phase 1");
        assert_eq!(records[0].cqa, "Purity");
        assert_eq!(records[0].test_methods, "HPLC, SEC");
        assert_eq!(records[0].justification, "AI Extracted");
        assert_eq!(records[0].regulatory_source, "PDF-LLM");
        assert_eq!(records[0].control_action, "Specification");
    }

    #[test]
    fn test_build_records_empty_findings() {
        assert!(build_records(&[], "mAb", "Phase 1").is_empty());
    }

    #[test]
    fn test_extract_repeats_across_chunks() {
        let dir = TempDir::new().unwrap();
        let store = KnowledgeStore::open(&dir.path().join("kb.csv")).unwrap();
        let pipeline = IngestPipeline::with_chunker(
            store,
            fixed_chunker(ChunkConfig {
                chunk_characters: 30,
            }),
        );

        // "purity"가 서로 다른 청크에 한 번씩 등장하도록 구성 (청크 30자)
        let text = format!("purity{}purity", " ".repeat(30));
        let findings = pipeline.extract(&text, "mAb");

        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.cqa == "Purity"));
    }

    #[test]
    fn test_ingest_appends_records() {
        let (_dir, pipeline) = create_test_pipeline();

        let added = pipeline
            .ingest(
                "Purity and potency must be controlled per specification.",
                "mAb",
                "Phase 1",
            )
            .unwrap();
        assert_eq!(added, 2);

        let records = pipeline.store().load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cqa, "Purity");
        assert_eq!(records[1].cqa, "Potency");
        assert_eq!(records[0].justification, "AI Extracted");
    }

    #[test]
    fn test_ingest_rejects_blank_modality_or_phase() {
        let (_dir, pipeline) = create_test_pipeline();
        let text = "Purity must be controlled.";

        assert!(pipeline.ingest(text, "", "Phase 1").is_err());
        assert!(pipeline.ingest(text, "  ", "Phase 1").is_err());
        assert!(pipeline.ingest(text, "mAb", "").is_err());

        // 거부된 수집은 저장소에 아무것도 남기지 않음
        assert!(pipeline.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_ingest_no_findings_leaves_store_untouched() {
        let (_dir, pipeline) = create_test_pipeline();

        let added = pipeline
            .ingest("Nothing relevant in this document.", "mAb", "Phase 1")
            .unwrap();

        assert_eq!(added, 0);
        assert!(pipeline.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_reingest_is_deterministic() {
        let (_dir, pipeline) = create_test_pipeline();
        let text = "Identity testing and aggregation monitoring are required.";

        let first = pipeline.extract(text, "CAR-T");
        let second = pipeline.extract(text, "CAR-T");
        assert_eq!(first, second);

        pipeline.ingest(text, "CAR-T", "Phase 2").unwrap();
        pipeline.ingest(text, "CAR-T", "Phase 2").unwrap();

        // 중복 조합은 합법 - 쓰기 시점 중복 제거 없음
        assert_eq!(pipeline.store().load().unwrap().len(), 4);
    }
}
