use std::cmp::Ordering;
use std::path::{Path, PathBuf};

const WEIGHT_EXTENSIONS: [&str; 2] = ["pt", "safetensors"];

/// A trained video checkpoint on disk, named
/// `model_{accuracy}_acc_{frames}_frames_{suffix}.pt`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub path: PathBuf,
    pub filename: String,
    pub accuracy: String,
    pub frames: usize,
}

impl ModelArtifact {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if !WEIGHT_EXTENSIONS.contains(&extension) {
            return None;
        }

        let filename = path.file_name()?.to_str()?.to_string();
        let parts: Vec<&str> = filename.split('_').collect();
        let accuracy = parts.get(1)?.to_string();
        let frames = parts.get(3)?.parse::<usize>().ok()?;

        Some(Self {
            path: path.to_path_buf(),
            filename,
            accuracy,
            frames,
        })
    }

    pub fn accuracy_value(&self) -> Option<f64> {
        self.accuracy.parse::<f64>().ok()
    }

    pub fn accuracy_label(&self) -> String {
        format!("{}%", self.accuracy)
    }
}

/// Picks the most accurate artifact trained for `frames`. Ties and
/// unparseable accuracies fall back to file-name order.
pub fn select_best_artifact(artifacts: &[ModelArtifact], frames: usize) -> Option<&ModelArtifact> {
    let mut candidates: Vec<&ModelArtifact> =
        artifacts.iter().filter(|a| a.frames == frames).collect();
    candidates.sort_by(|a, b| a.filename.cmp(&b.filename));

    candidates.into_iter().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) => match compare_accuracy(candidate, current) {
            Ordering::Greater => Some(candidate),
            _ => Some(current),
        },
    })
}

fn compare_accuracy(a: &ModelArtifact, b: &ModelArtifact) -> Ordering {
    match (a.accuracy_value(), b.accuracy_value()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
