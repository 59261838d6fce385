//! Knowledge Store - CSV 기반 동기 지식베이스 저장소
//!
//! 추출된 CQA 레코드를 고정 컬럼 테이블 파일로 저장합니다.
//! 저장 위치: ~/.cqa-kb/cqa_knowledge_base.csv
//!
//! 지식베이스는 추가 전용(append-only) 레코드 시퀀스입니다.
//! 레코드는 한 번 기록되면 수정되지 않으며, 중복
//! (모달리티, 단계, CQA) 조합은 허용됩니다 - 질의 시점에 통합됩니다.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Data Directory
// ============================================================================

/// 데이터 디렉토리 경로 (~/.cqa-kb/)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cqa-kb")
}

/// 지식베이스 파일 이름
const KB_FILE_NAME: &str = "cqa_knowledge_base.csv";

/// 고정 컬럼 헤더 (순서 고정)
const HEADERS: [&str; 7] = [
    "Modality",
    "Phase",
    "CQA",
    "Test Methods",
    "Justification",
    "Regulatory Source",
    "Control Action",
];

// ============================================================================
// Types
// ============================================================================

/// 지식베이스 레코드 (테이블의 한 행)
///
/// `modality`와 `phase`는 영속화 시 비어 있지 않아야 합니다.
/// 로드 시 누락/빈 셀은 빈 문자열로 정규화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    #[serde(rename = "Modality", default)]
    pub modality: String,
    #[serde(rename = "Phase", default)]
    pub phase: String,
    #[serde(rename = "CQA", default)]
    pub cqa: String,
    #[serde(rename = "Test Methods", default)]
    pub test_methods: String,
    #[serde(rename = "Justification", default)]
    pub justification: String,
    #[serde(rename = "Regulatory Source", default)]
    pub regulatory_source: String,
    #[serde(rename = "Control Action", default)]
    pub control_action: String,
}

/// 저장소 통계
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub record_count: usize,
    pub modality_count: usize,
    pub phase_count: usize,
    pub kb_path: PathBuf,
}

// ============================================================================
// KnowledgeStore
// ============================================================================

/// Knowledge Store - 동기 지식베이스 저장소
///
/// 전체 로드 / 추가 / 전체 저장 인터페이스를 제공합니다.
/// 추가는 load-all → append-in-memory → save-all 사이클로 수행되며,
/// 다중 기록자 동기화는 호출자 책임입니다 (마지막 기록이 승리).
pub struct KnowledgeStore {
    kb_path: PathBuf,
}

impl KnowledgeStore {
    /// 저장소 열기 (파일이 없으면 헤더만 있는 스키마로 생성)
    ///
    /// # Arguments
    /// * `path` - 지식베이스 CSV 파일 경로
    pub fn open(path: &Path) -> Result<Self> {
        // 부모 디렉토리 생성
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .context("Failed to create knowledge base directory")?;
            }
        }

        let store = Self {
            kb_path: path.to_path_buf(),
        };

        if !path.exists() {
            store.save(&[])?;
            tracing::debug!("Created empty knowledge base at {:?}", store.kb_path);
        }

        Ok(store)
    }

    /// 기본 위치에서 열기 (~/.cqa-kb/cqa_knowledge_base.csv)
    pub fn open_default() -> Result<Self> {
        Self::open(&get_data_dir().join(KB_FILE_NAME))
    }

    /// 지식베이스 파일 경로 반환
    pub fn kb_path(&self) -> &Path {
        &self.kb_path
    }

    /// 전체 레코드 로드 (삽입 순서 유지)
    ///
    /// 누락/빈 셀은 빈 문자열로 정규화됩니다. 수동 편집으로 셀 수가
    /// 헤더보다 적은 행도 빈 셀로 패딩하여 수용합니다.
    pub fn load(&self) -> Result<Vec<KnowledgeRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.kb_path)
            .with_context(|| format!("Failed to open knowledge base: {:?}", self.kb_path))?;

        let headers = reader
            .headers()
            .context("Failed to read knowledge base header")?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let mut row = row.context("Failed to read knowledge base row")?;

            // 짧은 행은 헤더 수만큼 빈 셀로 패딩
            while row.len() < headers.len() {
                row.push_field("");
            }

            let record: KnowledgeRecord = row
                .deserialize(Some(&headers))
                .context("Failed to parse knowledge base row")?;
            records.push(record);
        }

        Ok(records)
    }

    /// 새 레코드 추가 (load-all → append → save-all)
    ///
    /// 추가된 레코드 수를 반환합니다. 빈 입력은 no-op입니다.
    pub fn append(&self, new_records: &[KnowledgeRecord]) -> Result<usize> {
        if new_records.is_empty() {
            return Ok(0);
        }

        let mut all = self.load()?;
        all.extend_from_slice(new_records);
        self.save(&all)?;

        tracing::info!(
            "Appended {} records to knowledge base ({} total)",
            new_records.len(),
            all.len()
        );

        Ok(new_records.len())
    }

    /// 전체 저장 (헤더 포함 덮어쓰기)
    pub fn save(&self, records: &[KnowledgeRecord]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.kb_path)
            .with_context(|| format!("Failed to write knowledge base: {:?}", self.kb_path))?;

        // 빈 저장소에도 헤더는 항상 기록
        writer
            .write_record(HEADERS)
            .context("Failed to write knowledge base header")?;

        for record in records {
            writer
                .serialize(record)
                .context("Failed to write knowledge base row")?;
        }

        writer.flush().context("Failed to flush knowledge base")?;
        Ok(())
    }

    /// 저장소 통계
    pub fn stats(&self) -> Result<StoreStats> {
        let records = self.load()?;

        let modalities: HashSet<String> = records
            .iter()
            .map(|r| r.modality.to_lowercase())
            .collect();
        let phases: HashSet<String> = records.iter().map(|r| r.phase.to_lowercase()).collect();

        Ok(StoreStats {
            record_count: records.len(),
            modality_count: modalities.len(),
            phase_count: phases.len(),
            kb_path: self.kb_path.clone(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
