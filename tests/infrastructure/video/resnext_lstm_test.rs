use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};

use deepscan::application::ports::VideoClassifier;
use deepscan::domain::{FrameSequence, NormalizedFrame};
use deepscan::infrastructure::video::{LATENT_DIM, NUM_CLASSES, ResNextLstm};

const IMAGE_SIZE: usize = 32;
const FRAMES: usize = 3;

fn random_model() -> (VarMap, ResNextLstm) {
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    let model = ResNextLstm::from_var_builder(vb, &Device::Cpu, IMAGE_SIZE).unwrap();
    (varmap, model)
}

/// `(1, FRAMES, LATENT_DIM)` features, zero except `frame` set to `value`.
fn features_with(frame: Option<usize>, value: f32) -> Tensor {
    let mut data = vec![0f32; FRAMES * LATENT_DIM];
    if let Some(frame) = frame {
        data[frame * LATENT_DIM..(frame + 1) * LATENT_DIM].fill(value);
    }
    Tensor::from_vec(data, (1, FRAMES, LATENT_DIM), &Device::Cpu).unwrap()
}

fn probabilities(model: &ResNextLstm, features: &Tensor) -> Vec<f32> {
    model
        .classify_features(features)
        .unwrap()
        .to_vec2::<f32>()
        .unwrap()
        .remove(0)
}

#[test]
fn given_zero_weights_when_classifying_frames_then_returns_uniform_distribution() {
    let vb = VarBuilder::zeros(DType::F32, &Device::Cpu);
    let model = ResNextLstm::from_var_builder(vb, &Device::Cpu, IMAGE_SIZE).unwrap();
    let frame: NormalizedFrame = Arc::from(vec![0.25f32; 3 * IMAGE_SIZE * IMAGE_SIZE]);
    let sequence = FrameSequence::assemble(vec![frame], FRAMES).unwrap();

    let input =
        Tensor::zeros((1, FRAMES, 3, IMAGE_SIZE, IMAGE_SIZE), DType::F32, &Device::Cpu).unwrap();
    let output = model.forward(&input).unwrap();
    let classified = model.classify(&sequence).unwrap();

    assert_eq!(output.dims(), &[1, NUM_CLASSES]);
    assert!((classified.fake - 0.5).abs() < 1e-6);
    assert!((classified.real - 0.5).abs() < 1e-6);
}

#[test]
fn given_wrong_frame_size_when_classifying_then_invalid_input() {
    let vb = VarBuilder::zeros(DType::F32, &Device::Cpu);
    let model = ResNextLstm::from_var_builder(vb, &Device::Cpu, IMAGE_SIZE).unwrap();
    let frame: NormalizedFrame = Arc::from(vec![0.0f32; 12]);
    let sequence = FrameSequence::assemble(vec![frame], FRAMES).unwrap();

    assert!(model.classify(&sequence).is_err());
}

#[test]
fn given_random_weights_when_classifying_features_then_probabilities_sum_to_one() {
    let (_varmap, model) = random_model();

    let probs = probabilities(&model, &features_with(Some(1), 0.3));

    assert_eq!(probs.len(), NUM_CLASSES);
    assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
}

#[test]
fn given_sequence_when_classifying_features_then_only_last_frame_drives_output() {
    let (_varmap, model) = random_model();
    let baseline = probabilities(&model, &features_with(None, 0.0));

    let first_changed = probabilities(&model, &features_with(Some(0), 0.5));
    let last_changed = probabilities(&model, &features_with(Some(FRAMES - 1), 0.5));

    assert!((first_changed[0] - baseline[0]).abs() < 1e-6);
    assert!((last_changed[0] - baseline[0]).abs() > 1e-4);
}

#[test]
fn given_var_map_when_building_model_then_uses_checkpoint_key_layout() {
    let (varmap, _model) = random_model();
    let vars = varmap.data().lock().unwrap();

    for key in [
        "model.0.weight",
        "model.1.running_var",
        "model.4.0.conv1.weight",
        "model.7.2.conv3.weight",
        "lstm.weight_ih_l0",
        "lstm.weight_hh_l0",
        "linear1.weight",
        "linear1.bias",
    ] {
        assert!(vars.contains_key(key), "missing {key}");
    }
}
