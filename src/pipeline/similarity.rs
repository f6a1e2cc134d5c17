//! Semantic similarity scoring between resume and job description

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use crate::pipeline::round2;
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Capability interface for text embedding, so the pipeline can be exercised
/// with stub vectors in tests.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn model_name(&self) -> &str {
        "unknown"
    }
}

/// Production embedder backed by a Model2Vec static model.
pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    pub fn new(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();

        info!("Loading embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| ResumeRankerError::Embedding(format!("Failed to load model: {}", e)))?;

        info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let model_path = Self::model_path(config);
        Self::new(&model_path, &config.models.embedding_model)
    }

    fn model_path(config: &Config) -> PathBuf {
        config.models_dir().join(&config.models.embedding_model)
    }
}

impl TextEmbedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.model.encode_single(text))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Cosine similarity between two embeddings, in [-1, 1].
///
/// Zero-magnitude vectors yield 0.0; mismatched dimensions are an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ResumeRankerError::Processing(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Rescale a raw cosine similarity onto the 0-10 match scale.
///
/// Raw similarities between resumes and job descriptions rarely exceed the
/// ceiling even for strong matches, so the raw value is clamped to
/// [0, ceiling] and then stretched across the full scale. Negative
/// similarities collapse to 0.
pub fn normalize_similarity(raw: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 {
        return 0.0;
    }
    let clamped = raw.clamp(0.0, ceiling);
    round2(clamped / ceiling * 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEILING: f64 = 0.6;

    #[test]
    fn test_normalize_fixed_points() {
        assert_eq!(normalize_similarity(0.0, CEILING), 0.0);
        assert_eq!(normalize_similarity(0.6, CEILING), 10.0);
        assert_eq!(normalize_similarity(0.3, CEILING), 5.0);
    }

    #[test]
    fn test_normalize_clamps_out_of_range() {
        assert_eq!(normalize_similarity(1.0, CEILING), 10.0);
        assert_eq!(normalize_similarity(-0.3, CEILING), 0.0);
    }

    #[test]
    fn test_normalize_degenerate_ceiling() {
        assert_eq!(normalize_similarity(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_cosine_similarity_basic() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0];
        assert!((cosine_similarity(&a, &b).unwrap() - 1.0).abs() < 1e-9);

        let c = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &c).unwrap().abs() < 1e-9);

        let d = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &d).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_known_angle() {
        // cos = 0.6 exactly
        let a = vec![1.0, 0.0];
        let b = vec![0.6, 0.8];
        assert!((cosine_similarity(&a, &b).unwrap() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(cosine_similarity(&a, &b).is_err());
    }
}
