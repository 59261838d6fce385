//! CQA 분류기 모듈
//!
//! 텍스트 세그먼트를 모달리티 클래스별 키워드 규칙표에 대조하여
//! (CQA, 시험법) Finding 쌍을 생성합니다.
//!
//! 매칭은 대소문자 무시 부분 문자열 포함 검사이며,
//! 규칙표의 행 순서가 Finding 순서를 결정합니다.

// ============================================================================
// Types
// ============================================================================

/// 분류 결과 (CQA 이름, 시험법 라벨) 쌍
///
/// 영속화되지 않는 일시적 값입니다. 레코드 생성 단계에서 소비됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// CQA 이름 (예: "Purity")
    pub cqa: String,
    /// 시험법 라벨 (예: "HPLC, SEC")
    pub test_methods: String,
}

/// 모달리티 클래스
///
/// 분류 규칙표를 선택하는 태그입니다. 새 CQA는 분기 추가가 아니라
/// 해당 규칙표에 행을 추가하는 방식으로 확장합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalityClass {
    /// 바이오의약품 (mAb, CAR-T, 융합단백질, AAV 유전자치료제, ADC)
    Biologic,
    /// 저분자 및 기타 모달리티 (기본 클래스)
    SmallMolecule,
}

// ============================================================================
// Rule Tables
// ============================================================================

/// 키워드 → (CQA, 시험법) 규칙 한 행
struct CqaRule {
    /// 매칭 키워드 (하나라도 포함되면 매치, 소문자로 기재)
    keywords: &'static [&'static str],
    cqa: &'static str,
    test_methods: &'static str,
}

/// 바이오의약품 클래스에 속하는 모달리티 (소문자 비교)
const BIOLOGIC_MODALITIES: &[&str] = &[
    "mab",
    "monoclonal antibody",
    "car-t",
    "fusion protein",
    "aav gene therapy",
    "adc",
    "antibody-drug conjugate",
];

/// 바이오의약품 규칙표
const BIOLOGIC_RULES: &[CqaRule] = &[
    CqaRule {
        keywords: &["purity"],
        cqa: "Purity",
        test_methods: "HPLC, SEC",
    },
    CqaRule {
        keywords: &["potency"],
        cqa: "Potency",
        test_methods: "Bioassay, Cell-based Assay",
    },
    CqaRule {
        keywords: &["identity"],
        cqa: "Identity",
        test_methods: "Peptide Mapping",
    },
    CqaRule {
        keywords: &["glycosylation"],
        cqa: "Glycosylation",
        test_methods: "UPLC-MS",
    },
    CqaRule {
        keywords: &["charge variant", "icief"],
        cqa: "Charge Variants",
        test_methods: "iCIEF",
    },
    CqaRule {
        keywords: &["aggregation", "aggregate"],
        cqa: "Aggregates",
        test_methods: "SEC-HPLC",
    },
    CqaRule {
        keywords: &["oxidation"],
        cqa: "Oxidation",
        test_methods: "Peptide Mapping",
    },
];

/// 저분자/기본 클래스 규칙표
const SMALL_MOLECULE_RULES: &[CqaRule] = &[
    CqaRule {
        keywords: &["identity"],
        cqa: "Identity",
        test_methods: "HPLC RT, Mass Spec",
    },
    CqaRule {
        keywords: &["purity"],
        cqa: "Purity",
        test_methods: "HPLC, CE",
    },
    CqaRule {
        keywords: &["potency"],
        cqa: "Potency",
        test_methods: "Bioassay",
    },
    CqaRule {
        keywords: &["residual solvent"],
        cqa: "Residual Solvents",
        test_methods: "GC",
    },
    CqaRule {
        keywords: &["heavy metal"],
        cqa: "Heavy Metals",
        test_methods: "ICP-MS",
    },
    CqaRule {
        keywords: &["degradation"],
        cqa: "Degradation Products",
        test_methods: "Stability HPLC",
    },
    CqaRule {
        keywords: &["moisture"],
        cqa: "Moisture Content",
        test_methods: "Karl Fischer",
    },
    CqaRule {
        keywords: &["content uniformity"],
        cqa: "Content Uniformity",
        test_methods: "HPLC Assay",
    },
    CqaRule {
        keywords: &["polymorph"],
        cqa: "Polymorphic Forms",
        test_methods: "XRPD",
    },
];

impl ModalityClass {
    /// 모달리티 문자열에서 클래스 결정 (대소문자 무시)
    ///
    /// 바이오의약품 목록에 없는 모달리티는 모두 기본 클래스로 취급합니다.
    /// 약어("mAb", "ADC")와 전체 이름 모두 허용합니다.
    pub fn from_modality(modality: &str) -> Self {
        let lower = modality.trim().to_lowercase();
        if BIOLOGIC_MODALITIES.contains(&lower.as_str()) {
            ModalityClass::Biologic
        } else {
            ModalityClass::SmallMolecule
        }
    }

    /// 클래스의 규칙표
    fn rules(&self) -> &'static [CqaRule] {
        match self {
            ModalityClass::Biologic => BIOLOGIC_RULES,
            ModalityClass::SmallMolecule => SMALL_MOLECULE_RULES,
        }
    }
}

// ============================================================================
// CqaClassifier
// ============================================================================

/// CQA 분류기
///
/// 모달리티 클래스에 고정된 규칙표를 적용합니다.
/// 세그먼트 하나에서 규칙당 최대 1개의 Finding을 생성합니다
/// (같은 키워드가 여러 번 나와도 1회만 계수).
pub struct CqaClassifier {
    class: ModalityClass,
}

impl CqaClassifier {
    /// 클래스 지정 생성
    pub fn new(class: ModalityClass) -> Self {
        Self { class }
    }

    /// 모달리티 문자열로 생성
    pub fn for_modality(modality: &str) -> Self {
        Self::new(ModalityClass::from_modality(modality))
    }

    /// 분류 대상 클래스
    pub fn class(&self) -> ModalityClass {
        self.class
    }

    /// 텍스트 세그먼트 분류
    ///
    /// 매치가 없으면 빈 벡터를 반환합니다 (오류 아님).
    pub fn classify(&self, segment: &str) -> Vec<Finding> {
        let lower = segment.to_lowercase();

        self.class
            .rules()
            .iter()
            .filter(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
            .map(|rule| Finding {
                cqa: rule.cqa.to_string(),
                test_methods: rule.test_methods.to_string(),
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
