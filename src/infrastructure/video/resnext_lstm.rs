use std::path::Path;

use candle_core::{D, DType, Device, Tensor};
use candle_nn::{BatchNorm, Conv2d, Conv2dConfig, LSTM, LSTMConfig, Linear, RNN, VarBuilder};

use crate::application::ports::{ClassifierError, VideoClassifier};
use crate::domain::{ClassProbabilities, FrameSequence};

pub const LATENT_DIM: usize = 2048;
pub const HIDDEN_DIM: usize = 2048;
pub const NUM_CLASSES: usize = 2;

const GROUPS: usize = 32;
const WIDTH_PER_GROUP: usize = 4;
const EXPANSION: usize = 4;
const BN_EPS: f64 = 1e-5;

struct ConvBn {
    conv: Conv2d,
    bn: BatchNorm,
}

impl ConvBn {
    #[allow(clippy::too_many_arguments)]
    fn load(
        c_in: usize,
        c_out: usize,
        kernel: usize,
        stride: usize,
        padding: usize,
        groups: usize,
        conv_vb: VarBuilder,
        bn_vb: VarBuilder,
    ) -> candle_core::Result<Self> {
        let config = Conv2dConfig {
            padding,
            stride,
            groups,
            ..Default::default()
        };
        Ok(Self {
            conv: candle_nn::conv2d_no_bias(c_in, c_out, kernel, config, conv_vb)?,
            bn: candle_nn::batch_norm(c_out, BN_EPS, bn_vb)?,
        })
    }

    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        xs.apply(&self.conv)?.apply_t(&self.bn, false)
    }
}

/// ResNeXt bottleneck: 1x1 reduce, grouped 3x3, 1x1 expand.
struct Bottleneck {
    reduce: ConvBn,
    grouped: ConvBn,
    expand: ConvBn,
    downsample: Option<ConvBn>,
}

impl Bottleneck {
    fn load(c_in: usize, planes: usize, stride: usize, vb: VarBuilder) -> candle_core::Result<Self> {
        let width = planes * WIDTH_PER_GROUP / 64 * GROUPS;
        let c_out = planes * EXPANSION;

        let downsample = if stride != 1 || c_in != c_out {
            Some(ConvBn::load(
                c_in,
                c_out,
                1,
                stride,
                0,
                1,
                vb.pp("downsample.0"),
                vb.pp("downsample.1"),
            )?)
        } else {
            None
        };

        Ok(Self {
            reduce: ConvBn::load(c_in, width, 1, 1, 0, 1, vb.pp("conv1"), vb.pp("bn1"))?,
            grouped: ConvBn::load(
                width,
                width,
                3,
                stride,
                1,
                GROUPS,
                vb.pp("conv2"),
                vb.pp("bn2"),
            )?,
            expand: ConvBn::load(width, c_out, 1, 1, 0, 1, vb.pp("conv3"), vb.pp("bn3"))?,
            downsample,
        })
    }

    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let out = self.reduce.forward(xs)?.relu()?;
        let out = self.grouped.forward(&out)?.relu()?;
        let out = self.expand.forward(&out)?;
        let identity = match &self.downsample {
            Some(ds) => ds.forward(xs)?,
            None => xs.clone(),
        };
        (out + identity)?.relu()
    }
}

/// ResNeXt50-32x4d without its pooling and classifier layers. Weight names
/// follow `nn.Sequential(*children[:-2])`: 0 conv1, 1 bn1, 4..=7 layer1..4.
struct Backbone {
    stem: ConvBn,
    layers: Vec<Bottleneck>,
}

impl Backbone {
    fn load(vb: VarBuilder) -> candle_core::Result<Self> {
        let stem = ConvBn::load(3, 64, 7, 2, 3, 1, vb.pp("0"), vb.pp("1"))?;

        let stages = [(64, 3, 1), (128, 4, 2), (256, 6, 2), (512, 3, 2)];
        let mut layers = Vec::new();
        let mut c_in = 64;
        for (stage, (planes, blocks, stride)) in stages.into_iter().enumerate() {
            let stage_vb = vb.pp((stage + 4).to_string());
            for block in 0..blocks {
                let block_stride = if block == 0 { stride } else { 1 };
                layers.push(Bottleneck::load(
                    c_in,
                    planes,
                    block_stride,
                    stage_vb.pp(block.to_string()),
                )?);
                c_in = planes * EXPANSION;
            }
        }

        Ok(Self { stem, layers })
    }

    /// `(N, 3, H, W)` to pooled `(N, 2048)` features.
    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let mut xs = self
            .stem
            .forward(xs)?
            .relu()?
            .pad_with_same(D::Minus1, 1, 1)?
            .pad_with_same(D::Minus2, 1, 1)?
            .max_pool2d_with_stride(3, 2)?;
        for layer in &self.layers {
            xs = layer.forward(&xs)?;
        }
        xs.mean(D::Minus1)?.mean(D::Minus1)
    }
}

/// ResNeXt50 frame encoder followed by a single bias-free LSTM layer and a
/// linear head.
pub struct ResNextLstm {
    backbone: Backbone,
    lstm: LSTM,
    head: Linear,
    device: Device,
    image_size: usize,
}

impl ResNextLstm {
    pub fn load(weights: &Path, device: &Device, image_size: usize) -> Result<Self, ClassifierError> {
        let vb = match weights.extension().and_then(|e| e.to_str()) {
            // SAFETY: safetensors files are memory-mapped read-only
            Some("safetensors") => unsafe {
                VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device)
            },
            _ => VarBuilder::from_pth(weights, DType::F32, device),
        }
        .map_err(|e| ClassifierError::ModelLoadFailed(format!("weights: {}", e)))?;

        Self::from_var_builder(vb, device, image_size)
    }

    pub fn from_var_builder(
        vb: VarBuilder,
        device: &Device,
        image_size: usize,
    ) -> Result<Self, ClassifierError> {
        let load_err = |part: &str, e: candle_core::Error| {
            ClassifierError::ModelLoadFailed(format!("{}: {}", part, e))
        };

        let backbone = Backbone::load(vb.pp("model")).map_err(|e| load_err("backbone", e))?;
        let lstm = candle_nn::lstm(
            LATENT_DIM,
            HIDDEN_DIM,
            LSTMConfig::default_no_bias(),
            vb.pp("lstm"),
        )
        .map_err(|e| load_err("lstm", e))?;
        let head = candle_nn::linear(HIDDEN_DIM, NUM_CLASSES, vb.pp("linear1"))
            .map_err(|e| load_err("linear1", e))?;

        Ok(Self {
            backbone,
            lstm,
            head,
            device: device.clone(),
            image_size,
        })
    }

    /// `(B, S, 3, H, W)` frames to `(B, 2)` class probabilities.
    pub fn forward(&self, frames: &Tensor) -> candle_core::Result<Tensor> {
        let features = self.encode(frames)?;
        self.classify_features(&features)
    }

    /// `(B, S, 3, H, W)` frames to `(B, S, 2048)` pooled backbone features.
    pub fn encode(&self, frames: &Tensor) -> candle_core::Result<Tensor> {
        let (batch, seq, c, h, w) = frames.dims5()?;
        self.backbone
            .forward(&frames.reshape((batch * seq, c, h, w))?)?
            .reshape((batch, seq, LATENT_DIM))
    }

    /// `(B, S, 2048)` features to `(B, 2)` class probabilities.
    ///
    /// The checkpoints were trained with a time-major LSTM fed a batch-major
    /// tensor: the batch axis acts as time and the frame axis as the LSTM
    /// batch, and the head reads the last frame's hidden state.
    pub fn classify_features(&self, features: &Tensor) -> candle_core::Result<Tensor> {
        let (batch, seq, _) = features.dims3()?;

        let mut state = self.lstm.zero_state(seq)?;
        let mut outputs = Vec::with_capacity(batch);
        for step in 0..batch {
            state = self.lstm.step(&features.get(step)?, &state)?;
            outputs.push(state.h().get(seq - 1)?);
        }

        let logits = Tensor::stack(&outputs, 0)?.apply(&self.head)?;
        candle_nn::ops::softmax(&logits, D::Minus1)
    }

    fn to_tensor(&self, frames: &FrameSequence) -> Result<Tensor, ClassifierError> {
        let expected = 3 * self.image_size * self.image_size;
        if frames.frame_len() != expected {
            return Err(ClassifierError::InvalidInput(format!(
                "frame has {} values, expected {}",
                frames.frame_len(),
                expected
            )));
        }

        Tensor::from_vec(
            frames.flatten(),
            (1, frames.len(), 3, self.image_size, self.image_size),
            &self.device,
        )
        .map_err(|e| ClassifierError::InvalidInput(e.to_string()))
    }
}

impl VideoClassifier for ResNextLstm {
    fn classify(&self, frames: &FrameSequence) -> Result<ClassProbabilities, ClassifierError> {
        let input = self.to_tensor(frames)?;

        let probabilities = self
            .forward(&input)
            .and_then(|p| p.get(0))
            .and_then(|p| p.to_vec1::<f32>())
            .map_err(|e| ClassifierError::InferenceFailed(e.to_string()))?;

        tracing::debug!(?probabilities, "Video classifier output");

        ClassProbabilities::from_slice(&probabilities).ok_or_else(|| {
            ClassifierError::InferenceFailed(format!(
                "expected {} classes, got {}",
                NUM_CLASSES,
                probabilities.len()
            ))
        })
    }
}
