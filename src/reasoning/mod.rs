//! 추론 엔진 - 지식베이스 질의 및 CQA 그룹 요약
//!
//! 누적된 레코드를 (모달리티, 단계)로 필터링하고 CQA별로 그룹화하여
//! 구조화된 텍스트 답변을 생성합니다. 읽기 전용입니다 -
//! 지식베이스를 변경하지 않습니다.

use std::collections::BTreeMap;

use crate::knowledge::KnowledgeRecord;

// ============================================================================
// Types
// ============================================================================

/// 매칭 레코드가 없을 때 반환되는 문장 (오류 아님)
pub const NO_DATA_MESSAGE: &str = "No data found for your query.";

/// CQA 하나에 대한 그룹 요약
///
/// 각 목록은 중복이 제거된 서로 다른 값을 최초 등장 순서로 담습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqaSummary {
    pub cqa: String,
    pub test_methods: Vec<String>,
    pub control_actions: Vec<String>,
    pub justifications: Vec<String>,
}

// ============================================================================
// Query Pipeline
// ============================================================================

/// (모달리티, 단계) 필터 (양쪽 모두 대소문자 무시 동등 비교)
pub fn filter_records<'a>(
    records: &'a [KnowledgeRecord],
    modality: &str,
    phase: &str,
) -> Vec<&'a KnowledgeRecord> {
    let modality = modality.to_lowercase();
    let phase = phase.to_lowercase();

    records
        .iter()
        .filter(|r| r.modality.to_lowercase() == modality && r.phase.to_lowercase() == phase)
        .collect()
}

/// CQA별 그룹 요약 생성
///
/// 그룹 키는 CQA 문자열의 정확 일치이며, 결과는 CQA 이름 순으로
/// 정렬됩니다 (결정적 순서 보장). 그룹 내 값 목록은 최초 등장
/// 순서를 유지합니다.
pub fn group_by_cqa(records: &[&KnowledgeRecord]) -> Vec<CqaSummary> {
    let mut groups: BTreeMap<String, CqaSummary> = BTreeMap::new();

    for record in records {
        let entry = groups
            .entry(record.cqa.clone())
            .or_insert_with(|| CqaSummary {
                cqa: record.cqa.clone(),
                test_methods: Vec::new(),
                control_actions: Vec::new(),
                justifications: Vec::new(),
            });

        push_distinct(&mut entry.test_methods, &record.test_methods);
        push_distinct(&mut entry.control_actions, &record.control_action);
        push_distinct(&mut entry.justifications, &record.justification);
    }

    groups.into_values().collect()
}

/// 질의 응답 생성
///
/// 매칭 레코드가 없으면 [`NO_DATA_MESSAGE`]를 반환하고,
/// 있으면 CQA 그룹당 블록 하나를 빈 줄로 연결하여 반환합니다.
pub fn query(records: &[KnowledgeRecord], modality: &str, phase: &str) -> String {
    let filtered = filter_records(records, modality, phase);

    if filtered.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let blocks: Vec<String> = group_by_cqa(&filtered).iter().map(render_block).collect();
    blocks.join("\n\n")
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 미등장 값만 추가 (최초 등장 순서 유지)
fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// CQA 그룹 하나를 블록으로 렌더링
fn render_block(summary: &CqaSummary) -> String {
    format!(
        "**CQA:** {}\n- Test Methods: {}\n- Control Action: {}\n- Justification: {}\n",
        summary.cqa,
        summary.test_methods.join(", "),
        summary.control_actions.join(", "),
        summary.justifications.join(", "),
    )
}

// ============================================================================
// Tests
// ============================================================================
