//! Scan Orchestrator — runs one resume/JD scan end to end.
//!
//! Flow: validate → extract text → store upload → extract skills (JD ∥ resume) →
//!       score → summarize → rewrite (only when keywords are missing) → persist.
//!
//! Everything up to skill extraction can abort the scan. From scoring onward, model
//! stages are best-effort: each yields a `StageOutcome` and a failed stage degrades
//! its output fields to defaults instead of failing the request.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::ScanRepository;
use crate::errors::AppError;
use crate::extraction::{extract_text_from_path, DocumentKind};
use crate::llm_client::{CompletionService, LlmError};
use crate::models::scan::{DegradedStage, NewScanRecord, ResumeSections, ScanResult};
use crate::scan::fit_scoring::{build_missing_keyword_reasons, compute_skill_fit};
use crate::scan::rewriter::{rewrite, RewriteOutcome, RewriteRequest};
use crate::scan::skill_extractor::{extract_from_job_description, extract_from_resume};
use crate::scan::summarizer::summarize;
use crate::storage::ObjectStore;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Scan lifecycle, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Validating,
    Extracting,
    SkillExtracting,
    Scoring,
    Summarizing,
    RewritingIfGapsExist,
    Assembled,
}

/// The uploaded resume, owned by a single request.
/// The backing temp file is deleted when this value is dropped, on every exit path.
pub struct UploadedResume {
    file: NamedTempFile,
    kind: DocumentKind,
}

impl UploadedResume {
    /// Spools upload bytes into a fresh temp file.
    pub async fn spool(bytes: &[u8], kind: DocumentKind) -> Result<Self, std::io::Error> {
        let file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&format!(".{}", kind.extension()))
            .tempfile()?;
        tokio::fs::write(file.path(), bytes).await?;
        Ok(Self { file, kind })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

/// Request as collected by the HTTP adapter. Either part may be missing.
pub struct ScanRequest {
    pub upload: Option<UploadedResume>,
    pub job_description: Option<String>,
    pub owner_id: Option<Uuid>,
}

/// Model-facing input once the document has been turned into text.
#[derive(Debug, Clone, Copy)]
pub struct ScanInput<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub source: DocumentKind,
}

/// Final payload returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub scan_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume_file_url: String,
    pub original_resume_content: String,
    #[serde(flatten)]
    pub result: ScanResult,
}

/// A best-effort stage result. `degraded` marks a value that is only a fallback.
struct StageOutcome<T> {
    value: T,
    degraded: bool,
}

impl<T> StageOutcome<T> {
    fn ok(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    fn degraded(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scanner
// ────────────────────────────────────────────────────────────────────────────

/// Holds the collaborators of the pipeline. Stateless across scans; share via `Arc`.
pub struct Scanner {
    llm: Arc<dyn CompletionService>,
    store: Arc<dyn ObjectStore>,
    repository: Arc<dyn ScanRepository>,
    call_timeout: Duration,
}

impl Scanner {
    pub fn new(
        llm: Arc<dyn CompletionService>,
        store: Arc<dyn ObjectStore>,
        repository: Arc<dyn ScanRepository>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            llm,
            store,
            repository,
            call_timeout,
        }
    }

    /// Runs a full scan and persists the result.
    ///
    /// Steps:
    /// 1. validate → `RejectedInput` when the file or job description is missing
    /// 2. extract text → `UnreadableResume` when nothing usable comes out
    /// 3. store the original upload → `UploadFailed`; the temp file is released here
    /// 4. analyze (skills, score, summary, rewrite)
    /// 5. save → record id
    pub async fn scan(&self, request: ScanRequest) -> Result<ScanResponse, AppError> {
        transition(ScanState::Validating);
        let ScanRequest {
            upload,
            job_description,
            owner_id,
        } = request;

        let job_description = job_description
            .map(|jd| jd.trim().to_string())
            .filter(|jd| !jd.is_empty())
            .ok_or_else(|| AppError::RejectedInput("Job description is required.".to_string()))?;
        let upload = upload.ok_or_else(|| {
            AppError::RejectedInput(
                "Resume file is required. Send it as form-data with key 'resume'.".to_string(),
            )
        })?;

        transition(ScanState::Extracting);
        let resume_text = extract_text_from_path(upload.path(), upload.kind())
            .await?
            .trim()
            .to_string();
        if resume_text.is_empty() {
            return Err(AppError::unreadable_resume());
        }

        let resume_file_url = self
            .store
            .store(upload.path(), upload.kind())
            .await?;
        let source = upload.kind();
        drop(upload);

        let result = self
            .analyze(ScanInput {
                resume_text: &resume_text,
                job_description: &job_description,
                source,
            })
            .await?;

        let saved = self
            .repository
            .save(&NewScanRecord {
                owner_id,
                resume_file_url: &resume_file_url,
                job_description: &job_description,
                result: &result,
            })
            .await?;

        Ok(ScanResponse {
            scan_id: saved.id,
            created_at: saved.created_at,
            resume_file_url,
            original_resume_content: resume_text,
            result,
        })
    }

    /// The model-backed part of a scan. Fails only if skill extraction fails.
    pub async fn analyze(&self, input: ScanInput<'_>) -> Result<ScanResult, AppError> {
        let llm = self.llm.as_ref();
        debug!("Analyzing {:?} resume ({} chars)", input.source, input.resume_text.len());

        transition(ScanState::SkillExtracting);
        let (jd_skills, resume_skills) = tokio::try_join!(
            self.with_timeout(extract_from_job_description(input.job_description, llm)),
            self.with_timeout(extract_from_resume(input.resume_text, llm)),
        )?;

        transition(ScanState::Scoring);
        let fit = compute_skill_fit(&jd_skills, &resume_skills);
        let missing_keyword_reasons =
            build_missing_keyword_reasons(&fit.missing_keywords, &resume_skills);
        info!(
            "Skill fit {}/100 ({} of {} JD skills matched)",
            fit.score,
            fit.matched_skills.len(),
            jd_skills.len()
        );

        transition(ScanState::Summarizing);
        let summary = self.summarize_stage(input.resume_text).await;

        let rewrite = if fit.missing_keywords.is_empty() {
            None
        } else {
            transition(ScanState::RewritingIfGapsExist);
            Some(self.rewrite_stage(&input, &fit.missing_keywords).await)
        };

        transition(ScanState::Assembled);
        let mut degraded_stages = Vec::new();
        if summary.degraded {
            degraded_stages.push(DegradedStage::Summarizing);
        }
        let mut sections = summary.value;
        let mut improved_resume_content = input.resume_text.to_string();
        let mut rewrite_suggestions = Vec::new();

        if let Some(stage) = rewrite {
            if stage.degraded {
                degraded_stages.push(DegradedStage::Rewriting);
            }
            if let Some(outcome) = stage.value {
                sections = sections.overlay(outcome.sections);
                if let Some(improved) = outcome.improved_resume {
                    improved_resume_content = improved;
                }
                rewrite_suggestions = outcome.suggestions;
            }
        }

        Ok(ScanResult {
            jd_skills,
            resume_skills,
            matched_skills: fit.matched_skills,
            missing_keywords: fit.missing_keywords,
            missing_keyword_reasons,
            score: fit.score,
            sections,
            improved_resume_content,
            rewrite_suggestions,
            degraded_stages,
        })
    }

    async fn summarize_stage(&self, resume_text: &str) -> StageOutcome<ResumeSections> {
        match self.with_timeout(summarize(resume_text, self.llm.as_ref())).await {
            Ok(sections) => StageOutcome::ok(sections),
            Err(e) => {
                warn!("Resume summarize failed, continuing with empty sections: {e}");
                StageOutcome::degraded(ResumeSections::default())
            }
        }
    }

    async fn rewrite_stage(
        &self,
        input: &ScanInput<'_>,
        missing_keywords: &[String],
    ) -> StageOutcome<Option<RewriteOutcome>> {
        let request = RewriteRequest {
            resume_text: input.resume_text,
            job_description: input.job_description,
            missing_keywords,
        };
        match self.with_timeout(rewrite(request, self.llm.as_ref())).await {
            Ok(Some(outcome)) => StageOutcome::ok(Some(outcome)),
            Ok(None) => {
                warn!("Resume rewrite returned no usable structure, keeping original resume");
                StageOutcome::degraded(None)
            }
            Err(e) => {
                warn!("Resume rewrite failed, keeping original resume: {e}");
                StageOutcome::degraded(None)
            }
        }
    }

    /// Bounds a model call; an elapsed timer is reported as `LlmError::Timeout`.
    async fn with_timeout<T>(
        &self,
        call: impl Future<Output = Result<T, LlmError>>,
    ) -> Result<T, LlmError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| LlmError::Timeout(self.call_timeout.as_secs()))?
    }
}

fn transition(state: ScanState) {
    debug!(?state, "scan state");
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::scan::SavedScan;
    use crate::scan::tokenizer::equivalent;
    use crate::storage::StorageError;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tokio::sync::Barrier;

    pub(crate) enum Reply {
        Text(String),
        Empty,
        Hang,
    }

    pub(crate) fn text(s: &str) -> Reply {
        Reply::Text(s.to_string())
    }

    /// Routes each prompt to a canned reply by the stage it belongs to.
    pub(crate) struct ScriptedLlm {
        pub jd: Reply,
        pub resume: Reply,
        pub summary: Reply,
        pub rewrite: Reply,
        pub barrier: Option<Barrier>,
        pub calls: Mutex<Vec<&'static str>>,
    }

    impl ScriptedLlm {
        pub(crate) fn new(jd: Reply, resume: Reply, summary: Reply, rewrite: Reply) -> Self {
            Self {
                jd,
                resume,
                summary,
                rewrite,
                barrier: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedLlm {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            let (stage, reply) = if prompt.contains("following JOB DESCRIPTION") {
                ("jd", &self.jd)
            } else if prompt.contains("following RESUME") {
                ("resume", &self.resume)
            } else if prompt.starts_with("Summarize this resume") {
                ("summary", &self.summary)
            } else {
                ("rewrite", &self.rewrite)
            };
            self.calls.lock().unwrap().push(stage);

            if let (Some(barrier), "jd" | "resume") = (&self.barrier, stage) {
                barrier.wait().await;
            }

            match reply {
                Reply::Text(t) => Ok(t.clone()),
                Reply::Empty => Err(LlmError::EmptyCompletion),
                Reply::Hang => std::future::pending().await,
            }
        }
    }

    pub(crate) struct MemoryStore {
        pub fail: bool,
        pub seen: Mutex<Vec<PathBuf>>,
    }

    impl MemoryStore {
        pub(crate) fn new() -> Self {
            Self {
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn store(&self, local_path: &Path, kind: DocumentKind) -> Result<String, StorageError> {
            assert!(local_path.exists(), "upload must still exist while storing");
            self.seen.lock().unwrap().push(local_path.to_path_buf());
            if self.fail {
                return Err(StorageError::Upload("bucket unavailable".to_string()));
            }
            Ok(format!("https://files.test/resumes/upload.{}", kind.extension()))
        }
    }

    #[derive(Default)]
    pub(crate) struct MemoryRepository {
        pub saved: Mutex<Vec<(Option<Uuid>, String, u32)>>,
    }

    #[async_trait]
    impl ScanRepository for MemoryRepository {
        async fn save(&self, record: &NewScanRecord<'_>) -> Result<SavedScan, sqlx::Error> {
            self.saved.lock().unwrap().push((
                record.owner_id,
                record.resume_file_url.to_string(),
                record.result.score,
            ));
            Ok(SavedScan {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
            })
        }
    }

    const RESUME: &str = "Jane Doe\nPython developer with React.js and PostgreSQL experience.";
    const JD: &str = "We need Python, React, Kubernetes and PostgreSQL.";
    const SUMMARY_JSON: &str = r#"{"objective": "Python developer", "experience": ["Built dashboards"],
        "education": ["BSc CS"], "skillsTechnical": ["Python", "React"], "skillsSoft": ["Teamwork"],
        "projects": ["Budget app"]}"#;
    const REWRITE_JSON: &str = r#"{"improvedResume": "Jane Doe\nPython, React, PostgreSQL, Kubernetes",
        "suggestions": ["Mention Kubernetes deployments"], "objective": "Cloud-ready Python developer",
        "experience": ["Shipped services to Kubernetes"], "education": [],
        "skillsTechnical": ["Python", "Kubernetes"], "skillsSoft": [], "projects": []}"#;

    fn healthy_llm() -> ScriptedLlm {
        ScriptedLlm::new(
            text(r#"["Python", "React", "Kubernetes", "PostgreSQL"]"#),
            text(r#"["Python", "React.js", "PostgreSQL"]"#),
            text(SUMMARY_JSON),
            text(REWRITE_JSON),
        )
    }

    fn scanner_with(llm: ScriptedLlm) -> (Scanner, Arc<ScriptedLlm>) {
        let llm = Arc::new(llm);
        let scanner = Scanner::new(
            llm.clone(),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryRepository::default()),
            Duration::from_secs(30),
        );
        (scanner, llm)
    }

    fn input() -> ScanInput<'static> {
        ScanInput {
            resume_text: RESUME,
            job_description: JD,
            source: DocumentKind::PlainText,
        }
    }

    #[tokio::test]
    async fn test_full_analysis_with_gaps() {
        let (scanner, llm) = scanner_with(healthy_llm());
        let result = scanner.analyze(input()).await.unwrap();

        assert_eq!(result.matched_skills, vec!["Python", "React", "PostgreSQL"]);
        assert_eq!(result.missing_keywords, vec!["Kubernetes"]);
        assert_eq!(result.score, 75);
        assert_eq!(result.missing_keyword_reasons.len(), 1);
        assert!(result.missing_keyword_reasons[0].starts_with("Missing Kubernetes:"));

        assert_eq!(result.improved_resume_content, "Jane Doe\nPython, React, PostgreSQL, Kubernetes");
        assert_eq!(result.rewrite_suggestions, vec!["Mention Kubernetes deployments"]);
        // rewrite wins where it has content, summary fills the rest
        assert_eq!(result.sections.objective, "Cloud-ready Python developer");
        assert_eq!(result.sections.education, vec!["BSc CS"]);
        assert_eq!(result.sections.skills_soft, vec!["Teamwork"]);
        assert!(result.degraded_stages.is_empty());

        let calls = llm.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(&calls[2..], &["summary", "rewrite"]);
    }

    #[tokio::test]
    async fn test_no_gaps_skips_rewrite() {
        let mut llm = healthy_llm();
        llm.jd = text(r#"["Python", "PostgreSQL"]"#);
        let (scanner, llm) = scanner_with(llm);

        let result = scanner.analyze(input()).await.unwrap();
        assert_eq!(result.score, 100);
        assert!(result.missing_keywords.is_empty());
        assert!(result.missing_keyword_reasons.is_empty());
        assert_eq!(result.improved_resume_content, RESUME);
        assert!(result.rewrite_suggestions.is_empty());
        assert_eq!(result.sections.objective, "Python developer");
        assert!(!llm.calls().contains(&"rewrite"));
    }

    #[tokio::test]
    async fn test_rewrite_failure_keeps_original_resume() {
        let mut llm = healthy_llm();
        llm.rewrite = Reply::Empty;
        let (scanner, _) = scanner_with(llm);

        let result = scanner.analyze(input()).await.unwrap();
        assert_eq!(result.improved_resume_content, RESUME);
        assert!(result.rewrite_suggestions.is_empty());
        assert_eq!(result.sections.objective, "Python developer");
        assert_eq!(result.degraded_stages, vec![DegradedStage::Rewriting]);
        assert_eq!(result.score, 75);
    }

    #[tokio::test]
    async fn test_unparseable_rewrite_is_degraded() {
        let mut llm = healthy_llm();
        llm.rewrite = text("I rewrote it for you, hope that helps!");
        let (scanner, _) = scanner_with(llm);

        let result = scanner.analyze(input()).await.unwrap();
        assert_eq!(result.improved_resume_content, RESUME);
        assert_eq!(result.degraded_stages, vec![DegradedStage::Rewriting]);
    }

    #[tokio::test]
    async fn test_summary_failure_degrades_to_empty_sections() {
        let mut llm = healthy_llm();
        llm.summary = Reply::Empty;
        llm.jd = text(r#"["Python"]"#);
        let (scanner, _) = scanner_with(llm);

        let result = scanner.analyze(input()).await.unwrap();
        assert_eq!(result.sections, ResumeSections::default());
        assert_eq!(result.degraded_stages, vec![DegradedStage::Summarizing]);
        assert_eq!(result.score, 100);
    }

    #[tokio::test]
    async fn test_empty_skill_extraction_is_an_error() {
        let mut llm = healthy_llm();
        llm.resume = Reply::Empty;
        let (scanner, llm) = scanner_with(llm);

        let err = scanner.analyze(input()).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionService(LlmError::EmptyCompletion)));
        assert!(!llm.calls().contains(&"summary"));
    }

    #[tokio::test]
    async fn test_empty_jd_skill_list_scores_zero() {
        let mut llm = healthy_llm();
        llm.jd = text("[]");
        let (scanner, _) = scanner_with(llm);

        let result = scanner.analyze(input()).await.unwrap();
        assert_eq!(result.score, 0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_skill_extraction_runs_concurrently() {
        // Both extraction calls wait on a two-party barrier; run sequentially they
        // would block until the call timeout fires.
        let mut llm = healthy_llm();
        llm.barrier = Some(Barrier::new(2));
        let llm = Arc::new(llm);
        let scanner = Scanner::new(
            llm.clone(),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryRepository::default()),
            Duration::from_millis(500),
        );

        let result = scanner.analyze(input()).await.unwrap();
        assert_eq!(result.jd_skills.len(), 4);
        assert_eq!(result.resume_skills.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_stage_degrades() {
        let mut llm = healthy_llm();
        llm.summary = Reply::Hang;
        llm.rewrite = Reply::Hang;
        let (scanner, _) = scanner_with(llm);

        let result = scanner.analyze(input()).await.unwrap();
        assert_eq!(
            result.degraded_stages,
            vec![DegradedStage::Summarizing, DegradedStage::Rewriting]
        );
        assert_eq!(result.improved_resume_content, RESUME);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_skill_extraction_is_an_error() {
        let mut llm = healthy_llm();
        llm.jd = Reply::Hang;
        let (scanner, _) = scanner_with(llm);

        let err = scanner.analyze(input()).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionService(LlmError::Timeout(30))));
    }

    /// A toy "model" that reports which known skills literally appear in the prompt body.
    struct VocabularyLlm;

    const VOCABULARY: [&str; 5] = ["Python", "React", "Kubernetes", "PostgreSQL", "Terraform"];

    #[async_trait]
    impl CompletionService for VocabularyLlm {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            let body = prompt.split_once("\n\n").map(|(_, b)| b).unwrap_or(prompt);
            let found: Vec<&str> = VOCABULARY
                .iter()
                .copied()
                .filter(|skill| body.to_lowercase().contains(&skill.to_lowercase()))
                .collect();
            Ok(serde_json::to_string(&found).unwrap())
        }
    }

    #[tokio::test]
    async fn test_improved_resume_does_not_lose_matches() {
        let llm = VocabularyLlm;
        let jd = extract_from_job_description(JD, &llm).await.unwrap();
        let before = extract_from_resume(RESUME, &llm).await.unwrap();
        let improved = "Jane Doe\nPython, React, PostgreSQL. Deployed services with Kubernetes.";
        let after = extract_from_resume(improved, &llm).await.unwrap();

        let matched = |resume: &[String]| {
            jd.iter()
                .filter(|j| resume.iter().any(|r| equivalent(j, r)))
                .count()
        };
        assert!(matched(&after) >= matched(&before));
        assert_eq!(matched(&after), jd.len());
    }

    // ── full scan (upload → persist) ────────────────────────────────────────

    async fn upload(bytes: &[u8]) -> UploadedResume {
        UploadedResume::spool(bytes, DocumentKind::PlainText)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_scan_persists_and_cleans_up_upload() {
        let llm = Arc::new(healthy_llm());
        let store = Arc::new(MemoryStore::new());
        let repository = Arc::new(MemoryRepository::default());
        let scanner = Scanner::new(llm, store.clone(), repository.clone(), Duration::from_secs(30));

        let resume = upload(RESUME.as_bytes()).await;
        let temp_path = resume.path().to_path_buf();
        let owner = Uuid::new_v4();

        let response = scanner
            .scan(ScanRequest {
                upload: Some(resume),
                job_description: Some(format!("  {JD}  ")),
                owner_id: Some(owner),
            })
            .await
            .unwrap();

        assert_eq!(response.result.score, 75);
        assert_eq!(response.original_resume_content, RESUME);
        assert_eq!(response.resume_file_url, "https://files.test/resumes/upload.txt");
        assert!(!temp_path.exists());
        assert_eq!(store.seen.lock().unwrap().as_slice(), &[temp_path]);

        let saved = repository.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, Some(owner));
        assert_eq!(saved[0].2, 75);
    }

    #[tokio::test]
    async fn test_scan_rejects_missing_job_description() {
        let (scanner, llm) = scanner_with(healthy_llm());
        let resume = upload(RESUME.as_bytes()).await;
        let temp_path = resume.path().to_path_buf();

        let err = scanner
            .scan(ScanRequest {
                upload: Some(resume),
                job_description: Some("   ".to_string()),
                owner_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::RejectedInput(ref m) if m.contains("Job description")));
        assert!(!temp_path.exists());
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scan_rejects_missing_file() {
        let (scanner, _) = scanner_with(healthy_llm());
        let err = scanner
            .scan(ScanRequest {
                upload: None,
                job_description: Some(JD.to_string()),
                owner_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RejectedInput(ref m) if m.contains("'resume'")));
    }

    #[tokio::test]
    async fn test_scan_blank_resume_is_unreadable() {
        let (scanner, llm) = scanner_with(healthy_llm());
        let resume = upload(b" \n\t ").await;
        let temp_path = resume.path().to_path_buf();

        let err = scanner
            .scan(ScanRequest {
                upload: Some(resume),
                job_description: Some(JD.to_string()),
                owner_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnreadableResume(_)));
        assert!(!temp_path.exists());
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scan_upload_failure_aborts_and_cleans_up() {
        let llm = Arc::new(healthy_llm());
        let store = Arc::new(MemoryStore {
            fail: true,
            seen: Mutex::new(Vec::new()),
        });
        let repository = Arc::new(MemoryRepository::default());
        let scanner = Scanner::new(llm.clone(), store, repository.clone(), Duration::from_secs(30));

        let resume = upload(RESUME.as_bytes()).await;
        let temp_path = resume.path().to_path_buf();

        let err = scanner
            .scan(ScanRequest {
                upload: Some(resume),
                job_description: Some(JD.to_string()),
                owner_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UploadFailed(_)));
        assert!(!temp_path.exists());
        assert!(llm.calls().is_empty());
        assert!(repository.saved.lock().unwrap().is_empty());
    }
}
