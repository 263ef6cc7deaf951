//! ONNX Runtime backends for transformer classifiers.
//!
//! Each model directory holds `model.onnx`, `tokenizer.json` and `labels.txt`
//! (one label per line, in output-index order).

use std::path::Path;

use ndarray::{Array2, CowArray};
use ort::{Environment, GraphOptimizationLevel, LoggingLevel, Session, SessionBuilder, Value};
use tokenizers::{Encoding, Tokenizer, TruncationParams};
use tracing::debug;

use crate::{
    error::{ModelError, ModelResult},
    nlp::{
        ner::{Ner, Span},
        sentiment::{Polarity, SentimentModel, SentimentPrediction},
    },
};

const MAX_SEQUENCE_LENGTH: usize = 512;

struct OnnxModel {
    name: &'static str,
    session: Session,
    tokenizer: Tokenizer,
    labels: Vec<String>,
}

impl OnnxModel {
    fn load(name: &'static str, dir: &Path) -> ModelResult<Self> {
        let model_path = dir.join("model.onnx");
        let tokenizer_path = dir.join("tokenizer.json");
        let labels_path = dir.join("labels.txt");
        for path in [&model_path, &tokenizer_path, &labels_path] {
            if !path.exists() {
                return Err(ModelError::unavailable(
                    name,
                    format!("missing artefact {}", path.display()),
                ));
            }
        }

        let labels: Vec<String> = std::fs::read_to_string(&labels_path)?
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if labels.is_empty() {
            return Err(ModelError::Config(format!(
                "{} lists no labels",
                labels_path.display()
            )));
        }

        let mut tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| ModelError::unavailable(name, e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| ModelError::unavailable(name, e))?;

        let environment = Environment::builder()
            .with_name(name)
            .with_log_level(LoggingLevel::Warning)
            .build()
            .map_err(|e| ModelError::unavailable(name, e))?
            .into_arc();
        let session = SessionBuilder::new(&environment)
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level1))
            .and_then(|b| b.with_model_from_file(&model_path))
            .map_err(|e| ModelError::unavailable(name, e))?;

        Ok(Self {
            name,
            session,
            tokenizer,
            labels,
        })
    }

    /// Run the encoder and return row-major logits with the label count as the row width.
    fn logits(&self, text: &str) -> ModelResult<(Encoding, Vec<Vec<f32>>)> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ModelError::inference(self.name, e))?;
        let len = encoding.get_ids().len();
        let ids: Vec<i64> = encoding.get_ids().iter().map(|&v| v as i64).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&v| v as i64)
            .collect();
        let ids = Array2::from_shape_vec((1, len), ids)
            .map_err(|e| ModelError::inference(self.name, e))?
            .into_dyn();
        let mask = Array2::from_shape_vec((1, len), mask)
            .map_err(|e| ModelError::inference(self.name, e))?
            .into_dyn();
        let ids = CowArray::from(ids);
        let mask = CowArray::from(mask);

        let inputs = vec![
            Value::from_array(self.session.allocator(), &ids)
                .map_err(|e| ModelError::inference(self.name, e))?,
            Value::from_array(self.session.allocator(), &mask)
                .map_err(|e| ModelError::inference(self.name, e))?,
        ];
        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| ModelError::inference(self.name, e))?;
        let tensor = outputs
            .first()
            .ok_or_else(|| ModelError::inference(self.name, "model produced no outputs"))?
            .try_extract::<f32>()
            .map_err(|e| ModelError::inference(self.name, e))?;
        let view = tensor.view();
        let width = self.labels.len();
        let flat: Vec<f32> = view.iter().copied().collect();
        if flat.is_empty() || flat.len() % width != 0 {
            return Err(ModelError::inference(
                self.name,
                format!("logits of size {} do not match {} labels", flat.len(), width),
            ));
        }
        let rows = flat.chunks(width).map(<[f32]>::to_vec).collect();
        Ok((encoding, rows))
    }
}

fn softmax_argmax(logits: &[f32]) -> (usize, f32) {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.iter()
        .enumerate()
        .map(|(idx, v)| (idx, v / total))
        .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best })
}

/// BIO token-classification model decoded into entity spans.
pub struct TokenClassifier {
    inner: OnnxModel,
}

impl TokenClassifier {
    pub fn load(dir: &Path) -> ModelResult<Self> {
        Ok(Self {
            inner: OnnxModel::load("ner", dir)?,
        })
    }
}

impl Ner for TokenClassifier {
    fn extract(&self, text: &str) -> ModelResult<Vec<Span>> {
        let (encoding, rows) = self.inner.logits(text)?;
        let offsets = encoding.get_offsets();
        let special = encoding.get_special_tokens_mask();

        let mut spans: Vec<Span> = Vec::new();
        let mut scores: Vec<f32> = Vec::new();
        let mut open = false;
        for (idx, row) in rows.iter().enumerate() {
            if special.get(idx).copied().unwrap_or(0) == 1 {
                open = false;
                continue;
            }
            let (label_idx, prob) = softmax_argmax(row);
            let raw = self.inner.labels[label_idx].as_str();
            let (prefix, entity) = match raw.split_once('-') {
                Some((p, e)) if p == "B" || p == "I" => (p, e),
                _ => ("", raw),
            };
            if entity == "O" {
                open = false;
                continue;
            }
            let (start, end) = offsets[idx];
            let continues = open
                && prefix != "B"
                && spans.last().is_some_and(|s| s.label == entity.to_uppercase());
            if continues {
                if let (Some(span), Some(score)) = (spans.last_mut(), scores.last_mut()) {
                    span.end = end;
                    *score += prob;
                    span.score += 1.0;
                }
            } else {
                spans.push(Span {
                    start,
                    end,
                    label: entity.to_uppercase(),
                    text: String::new(),
                    score: 1.0,
                });
                scores.push(prob);
            }
            open = true;
        }

        for (span, score) in spans.iter_mut().zip(scores) {
            // `span.score` holds the token count until here.
            span.score = f64::from(score) / span.score;
            span.text = text.get(span.start..span.end).unwrap_or_default().to_string();
        }
        debug!(spans = spans.len(), "decoded token classification");
        Ok(spans)
    }
}

/// Two-way sequence classifier (SST-2 style sentiment).
pub struct SequenceClassifier {
    inner: OnnxModel,
}

impl SequenceClassifier {
    pub fn load(dir: &Path) -> ModelResult<Self> {
        Ok(Self {
            inner: OnnxModel::load("sentiment", dir)?,
        })
    }
}

impl SentimentModel for SequenceClassifier {
    fn classify(&self, text: &str) -> ModelResult<SentimentPrediction> {
        let (_, rows) = self.inner.logits(text)?;
        let row = rows
            .first()
            .ok_or_else(|| ModelError::inference("sentiment", "empty logits"))?;
        let (label_idx, score) = softmax_argmax(row);
        let label = Polarity::from_label(&self.inner.labels[label_idx])?;
        Ok(SentimentPrediction { label, score })
    }
}
