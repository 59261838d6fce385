//! CLI 모듈
//!
//! cqa-kb 명령어 정의 및 구현
//!
//! 수집(ingest) → 질의(query) → 목록(list) → 상태(status)의
//! 요청 단위 동기 사이클을 제공합니다. 동시 수집 직렬화는
//! 호출자 책임입니다 (마지막 기록이 승리).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::extractor::extract_document_text;
use crate::knowledge::{get_data_dir, IngestPipeline, KnowledgeStore};
use crate::reasoning;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "cqa-kb")]
#[command(version, about = "규제 문서 CQA 지식베이스", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 규제 문서(PDF/텍스트)를 지식베이스에 수집
    Ingest {
        /// 수집할 문서 파일 (pdf, txt, md)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 직접 입력할 문서 텍스트
        #[arg(short, long)]
        text: Option<String>,

        /// 모달리티 (예: mAb, ADC, CAR-T, Small Molecule)
        #[arg(short, long)]
        modality: String,

        /// 개발 단계 (예: Phase 1, Phase 2, Phase 3)
        #[arg(short, long)]
        phase: String,

        /// 지식베이스 파일 경로 (기본: ~/.cqa-kb/cqa_knowledge_base.csv)
        #[arg(long)]
        kb: Option<PathBuf>,
    },

    /// 모달리티/단계별 CQA 질의
    Query {
        /// 모달리티
        #[arg(short, long)]
        modality: String,

        /// 개발 단계
        #[arg(short, long)]
        phase: String,

        /// 지식베이스 파일 경로
        #[arg(long)]
        kb: Option<PathBuf>,
    },

    /// 저장된 레코드 목록
    List {
        /// 모달리티 필터 (대소문자 무시)
        #[arg(short, long)]
        modality: Option<String>,

        /// 결과 개수 제한
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// 지식베이스 파일 경로
        #[arg(long)]
        kb: Option<PathBuf>,
    },

    /// 상태 확인
    Status {
        /// 지식베이스 파일 경로
        #[arg(long)]
        kb: Option<PathBuf>,
    },
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ingest {
            file,
            text,
            modality,
            phase,
            kb,
        } => cmd_ingest(file, text, &modality, &phase, kb).await,
        Commands::Query {
            modality,
            phase,
            kb,
        } => cmd_query(&modality, &phase, kb).await,
        Commands::List {
            modality,
            limit,
            kb,
        } => cmd_list(modality, limit, kb).await,
        Commands::Status { kb } => cmd_status(kb).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 수집 명령어 (ingest)
///
/// 문서에서 텍스트를 추출하고 CQA 분류 파이프라인을 거쳐
/// 지식베이스에 레코드를 추가합니다.
async fn cmd_ingest(
    file: Option<PathBuf>,
    text: Option<String>,
    modality: &str,
    phase: &str,
    kb: Option<PathBuf>,
) -> Result<()> {
    if modality.trim().is_empty() || phase.trim().is_empty() {
        bail!("모달리티와 단계를 모두 입력해야 합니다");
    }

    let document_text = if let Some(ref path) = file {
        println!("[*] 문서 텍스트 추출 중: {}", path.display());
        extract_document_text(path)
            .await
            .context("문서 텍스트 추출 실패")?
    } else if let Some(text) = text {
        text
    } else {
        bail!("--file 또는 --text 중 하나를 지정해야 합니다");
    };

    let store = open_store(kb)?;
    let pipeline = IngestPipeline::new(store);

    println!("[*] CQA 분류 중 (모달리티: {}, 단계: {})...", modality, phase);
    let added = pipeline
        .ingest(&document_text, modality, phase)
        .context("수집 실패")?;

    if added > 0 {
        println!("[OK] 수집 완료: 레코드 {} 건 추가됨", added);
        println!("     지식베이스: {}", pipeline.store().kb_path().display());
    } else {
        println!("[!] 문서에서 추출 가능한 CQA 데이터가 없습니다.");
    }

    Ok(())
}

/// 질의 명령어 (query)
///
/// (모달리티, 단계)로 지식베이스를 필터링하고 CQA별 요약을 출력합니다.
async fn cmd_query(modality: &str, phase: &str, kb: Option<PathBuf>) -> Result<()> {
    let store = open_store(kb)?;
    let records = store.load().context("지식베이스 로드 실패")?;

    println!("[*] 질의: 모달리티 \"{}\", 단계 \"{}\"\n", modality, phase);

    let answer = reasoning::query(&records, modality, phase);
    println!("{}", answer);

    Ok(())
}

/// 목록 명령어 (list)
///
/// 저장된 레코드를 삽입 순서대로 출력합니다.
async fn cmd_list(modality: Option<String>, limit: usize, kb: Option<PathBuf>) -> Result<()> {
    let store = open_store(kb)?;
    let records = store.load().context("지식베이스 로드 실패")?;

    let filter = modality.map(|m| m.to_lowercase());
    let rows: Vec<_> = records
        .iter()
        .filter(|r| {
            filter
                .as_ref()
                .map(|m| r.modality.to_lowercase() == *m)
                .unwrap_or(true)
        })
        .take(limit)
        .collect();

    if rows.is_empty() {
        println!("[!] 저장된 레코드가 없습니다.");
        return Ok(());
    }

    println!("[OK] 저장된 레코드 ({} 건):\n", rows.len());

    for (i, record) in rows.iter().enumerate() {
        println!(
            "  #{:<4} [{} / {}] {}",
            i + 1,
            record.modality,
            record.phase,
            record.cqa
        );
        println!("        시험법: {}", record.test_methods);
        println!(
            "        {} | {} | {}",
            record.control_action,
            record.regulatory_source,
            truncate_text(&record.justification, 40)
        );
        println!();
    }

    Ok(())
}

/// 상태 명령어 (status)
async fn cmd_status(kb: Option<PathBuf>) -> Result<()> {
    println!("cqa-kb v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("[*] 데이터 디렉토리: {}", get_data_dir().display());

    match open_store(kb) {
        Ok(store) => match store.stats() {
            Ok(stats) => {
                println!("[OK] 지식베이스: {}", stats.kb_path.display());
                println!("     레코드: {} 건", stats.record_count);
                println!(
                    "     모달리티 {} 종 / 단계 {} 종",
                    stats.modality_count, stats.phase_count
                );
            }
            Err(e) => {
                println!("[!] 통계 조회 실패: {}", e);
            }
        },
        Err(e) => {
            println!("[!] 지식베이스 열기 실패: {}", e);
        }
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 지식베이스 열기 (경로 미지정 시 기본 위치)
fn open_store(kb: Option<PathBuf>) -> Result<KnowledgeStore> {
    match kb {
        Some(path) => KnowledgeStore::open(&path),
        None => KnowledgeStore::open_default(),
    }
    .context("KnowledgeStore 열기 실패")
}

/// 텍스트 자르기 (UTF-8 안전)
fn truncate_text(text: &str, max_chars: usize) -> String {
    let cleaned = text.replace('\n', " ").replace('\r', "");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= max_chars {
        cleaned.to_string()
    } else {
        let truncated: String = cleaned.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

// ============================================================================
// Tests
// ============================================================================
