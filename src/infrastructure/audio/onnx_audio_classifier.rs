use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use ndarray::Array2;
use ort::session::Session;
use ort::value::TensorRef;
use serde::Deserialize;

use crate::application::ports::{
    AudioClassifier, AudioClassifierError, AudioModelInfo, AudioModelLoader, LabelScore,
};

use super::audio_decoder::TARGET_SAMPLE_RATE;

pub const AUDIO_MODEL_ID: &str = "MelodyMachine/Deepfake-audio-detection-V2";
pub const AUDIO_MODEL_TASK: &str = "audio-classification";
pub const DEFAULT_ONNX_FILE: &str = "model.onnx";
const CONFIG_FILE: &str = "config.json";
const NORMALIZE_EPSILON: f32 = 1e-7;

/// Where the exported Wav2Vec2 classifier lives: a local directory when
/// `model_dir` is set, otherwise the Hugging Face repository `model_id`.
#[derive(Debug, Clone)]
pub struct AudioModelSource {
    pub model_id: String,
    pub model_dir: Option<PathBuf>,
    pub onnx_file: String,
}

impl Default for AudioModelSource {
    fn default() -> Self {
        Self {
            model_id: AUDIO_MODEL_ID.to_string(),
            model_dir: None,
            onnx_file: DEFAULT_ONNX_FILE.to_string(),
        }
    }
}

impl AudioModelSource {
    fn resolve(&self, filename: &str) -> Result<PathBuf, AudioClassifierError> {
        if let Some(dir) = &self.model_dir {
            let path = dir.join(filename);
            return if path.is_file() {
                Ok(path)
            } else {
                Err(AudioClassifierError::ModelLoadFailed(format!(
                    "{} not found",
                    path.display()
                )))
            };
        }

        let api = Api::new().map_err(|e| AudioClassifierError::ModelLoadFailed(e.to_string()))?;
        api.repo(Repo::new(self.model_id.clone(), RepoType::Model))
            .get(filename)
            .map_err(|e| AudioClassifierError::ModelLoadFailed(format!("{}: {}", filename, e)))
    }
}

#[derive(Debug, Deserialize)]
struct ClassifierConfig {
    id2label: BTreeMap<String, String>,
}

/// Reads label names ordered by their output index.
pub fn labels_from_config(contents: &str) -> Result<Vec<String>, AudioClassifierError> {
    let config: ClassifierConfig = serde_json::from_str(contents)
        .map_err(|e| AudioClassifierError::ModelLoadFailed(format!("parse config: {}", e)))?;

    let mut indexed = config
        .id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|i| (i, label))
                .map_err(|_| AudioClassifierError::ModelLoadFailed(format!("bad label id {id}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    indexed.sort_by_key(|(i, _)| *i);

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

/// Zero-mean, unit-variance scaling expected by Wav2Vec2.
pub fn normalize_waveform(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }
    let n = samples.len() as f32;
    let mean = samples.iter().sum::<f32>() / n;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n;
    let scale = (variance + NORMALIZE_EPSILON).sqrt();
    samples.iter().map(|s| (s - mean) / scale).collect()
}

pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = logits.iter().map(|&l| (l as f64 - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

pub struct OnnxAudioClassifier {
    session: Mutex<Session>,
    labels: Vec<String>,
}

impl OnnxAudioClassifier {
    pub fn from_files(model_path: &Path, labels: Vec<String>) -> Result<Self, AudioClassifierError> {
        tracing::info!(model = %model_path.display(), "Loading audio classification model");

        let session = Session::builder()
            .map_err(|e| AudioClassifierError::ModelLoadFailed(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| AudioClassifierError::ModelLoadFailed(e.to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            labels,
        })
    }
}

impl AudioClassifier for OnnxAudioClassifier {
    fn classify(&self, samples: &[f32]) -> Result<Vec<LabelScore>, AudioClassifierError> {
        if samples.is_empty() {
            return Err(AudioClassifierError::InferenceFailed(
                "no audio samples".to_string(),
            ));
        }

        let input = Array2::from_shape_vec((1, samples.len()), normalize_waveform(samples))
            .map_err(|e| AudioClassifierError::InferenceFailed(e.to_string()))?;
        let tensor = TensorRef::from_array_view(input.view())
            .map_err(|e| AudioClassifierError::InferenceFailed(e.to_string()))?;

        let logits: Vec<f32> = {
            let mut session = self.session.lock().map_err(|_| {
                AudioClassifierError::InferenceFailed("session lock poisoned".to_string())
            })?;
            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| AudioClassifierError::InferenceFailed(e.to_string()))?;
            let (_, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| AudioClassifierError::InferenceFailed(e.to_string()))?;
            data.to_vec()
        };

        if logits.len() != self.labels.len() {
            return Err(AudioClassifierError::InferenceFailed(format!(
                "expected {} logits, got {}",
                self.labels.len(),
                logits.len()
            )));
        }

        Ok(self
            .labels
            .iter()
            .zip(softmax(&logits))
            .map(|(label, score)| LabelScore::new(label.clone(), score))
            .collect())
    }
}

pub struct OnnxAudioModelLoader {
    source: AudioModelSource,
}

impl OnnxAudioModelLoader {
    pub fn new(source: AudioModelSource) -> Self {
        Self { source }
    }
}

impl AudioModelLoader for OnnxAudioModelLoader {
    fn info(&self) -> AudioModelInfo {
        AudioModelInfo {
            model_id: self.source.model_id.clone(),
            task: AUDIO_MODEL_TASK.to_string(),
            architecture: "Wav2Vec2ForSequenceClassification".to_string(),
            base_model: "facebook/wav2vec2-base".to_string(),
            sample_rate: TARGET_SAMPLE_RATE,
            labels: vec!["fake".to_string(), "real".to_string()],
            reported_accuracy: 0.997,
        }
    }

    fn load(&self) -> Result<Arc<dyn AudioClassifier>, AudioClassifierError> {
        tracing::info!(model = %self.source.model_id, "Loading audio classification pipeline");

        let config_path = self.source.resolve(CONFIG_FILE)?;
        let model_path = self.source.resolve(&self.source.onnx_file)?;

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| AudioClassifierError::ModelLoadFailed(format!("read config: {}", e)))?;
        let labels = labels_from_config(&contents)?;

        let classifier = OnnxAudioClassifier::from_files(&model_path, labels)?;
        tracing::info!("Audio classification pipeline loaded successfully");

        Ok(Arc::new(classifier))
    }
}
