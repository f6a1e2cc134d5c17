//! The ranking engine: one session in, one ranked outcome out

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use crate::input::{self, Document};
use crate::pipeline::entities::EntityExtractor;
use crate::pipeline::fields::FieldExtractor;
use crate::pipeline::ranker::{self, RankingOutcome, ResultRecord, SkipWarning};
use crate::pipeline::similarity::{self, Model2VecEmbedder, TextEmbedder};
use crate::pipeline::skills::{overlap_fraction, SkillMatcher};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

/// Coordinates the per-document transforms and the final ranking merge.
///
/// The embedder, skill vocabulary, and extractors are loaded once and shared
/// read-only across sessions; each call to [`RankingEngine::rank`] owns its
/// own result collection.
pub struct RankingEngine {
    embedder: Arc<dyn TextEmbedder>,
    skill_matcher: SkillMatcher,
    field_extractor: FieldExtractor,
    entity_extractor: EntityExtractor,
    config: Config,
}

impl RankingEngine {
    /// Create an engine with the production Model2Vec embedder.
    pub fn new(config: &Config) -> Result<Self> {
        let embedder = Arc::new(Model2VecEmbedder::from_config(config)?);
        Self::with_embedder(embedder, config)
    }

    /// Create an engine around any embedder implementation. This is the seam
    /// tests use to inject fixed vectors.
    pub fn with_embedder(embedder: Arc<dyn TextEmbedder>, config: &Config) -> Result<Self> {
        let skill_matcher = SkillMatcher::with_extra_skills(
            &config.matching.extra_skills,
            config.matching.fuzzy_threshold,
        )?;

        Ok(Self {
            embedder,
            skill_matcher,
            field_extractor: FieldExtractor::new(),
            entity_extractor: EntityExtractor::new(),
            config: config.clone(),
        })
    }

    /// Run one ranking session: score every document against the job
    /// description and return the descending-ranked outcome.
    ///
    /// Per-document failures (unsupported type, unreadable content, embedding
    /// trouble) become warnings and the batch proceeds; an unusable job
    /// description or an empty batch fails the whole session up front.
    pub async fn rank(
        &self,
        job_description: &str,
        documents: Vec<Document>,
    ) -> Result<RankingOutcome> {
        self.validate(job_description, &documents)?;

        let required_skills = self
            .skill_matcher
            .extract_skills(job_description)
            .unwrap_or_default();
        debug!("Required skills from job description: {:?}", required_skills);

        let job_embedding = self.embed_with_timeout(job_description.to_string()).await?;

        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for document in documents {
            let file_name = document.file_name.clone();

            if file_name.trim().is_empty() {
                warnings.push(SkipWarning {
                    file_name: "<unnamed>".to_string(),
                    reason: "Document has no file name".to_string(),
                });
                continue;
            }

            match self.score_document(&document, &job_embedding, &required_skills).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping {}: {}", file_name, e);
                    warnings.push(SkipWarning {
                        file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        ranker::rank(&mut records);

        Ok(RankingOutcome { records, warnings })
    }

    /// Session preconditions: a usable job description and at least one named
    /// document. Violations fail the session before anything is scored.
    fn validate(&self, job_description: &str, documents: &[Document]) -> Result<()> {
        if job_description.trim().is_empty() {
            return Err(ResumeRankerError::Validation(
                "Job description is empty".to_string(),
            ));
        }
        if documents.is_empty() || documents.iter().all(|d| d.file_name.trim().is_empty()) {
            return Err(ResumeRankerError::Validation(
                "No resume documents were supplied".to_string(),
            ));
        }
        Ok(())
    }

    async fn score_document(
        &self,
        document: &Document,
        job_embedding: &[f32],
        required_skills: &[String],
    ) -> Result<ResultRecord> {
        let text = input::extract_text(document)?;

        let resume_embedding = self.embed_with_timeout(text.clone()).await?;
        let raw_similarity = similarity::cosine_similarity(&resume_embedding, job_embedding)?;
        let normalized_score =
            similarity::normalize_similarity(raw_similarity, self.config.scoring.similarity_ceiling);

        let skills = self.skill_matcher.extract_skills(&text);
        let overlap = overlap_fraction(skills.as_deref().unwrap_or(&[]), required_skills);

        let score = ranker::compose_score(normalized_score, overlap, self.config.scoring.skill_bonus_max);
        let status = ranker::classify(score, self.config.scoring.shortlist_threshold);

        debug!(
            "{}: raw={:.4} normalized={:.2} overlap={:.2} final={:.2}",
            document.file_name, raw_similarity, normalized_score, overlap, score
        );

        Ok(ResultRecord {
            file_name: document.file_name.clone(),
            score,
            cgpa: self.field_extractor.extract_qualification(&text),
            skills,
            has_internship: self.field_extractor.has_internship(&text),
            status,
            entities: self.entity_extractor.extract(&text),
        })
    }

    /// Embedding runs on the blocking pool under a wall-clock limit.
    async fn embed_with_timeout(&self, text: String) -> Result<Vec<f32>> {
        let embedder = Arc::clone(&self.embedder);
        let budget = Duration::from_secs(self.config.scoring.embed_timeout_secs);

        let handle = tokio::task::spawn_blocking(move || embedder.embed(&text));

        match tokio::time::timeout(budget, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(ResumeRankerError::Embedding(format!(
                "Embedding task failed: {}",
                join_err
            ))),
            Err(_) => Err(ResumeRankerError::Embedding(format!(
                "Embedding timed out after {}s",
                self.config.scoring.embed_timeout_secs
            ))),
        }
    }
}
