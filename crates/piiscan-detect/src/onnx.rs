//! ONNX token-classification recognizer (BERT-style NER).
//!
//! Loads `model.onnx`, `tokenizer.json` and `config.json` from a model
//! directory and merges BIO tags into entity spans. Requires the `onnx`
//! feature.

/// CoNLL tag names mapped onto the pipeline's entity labels
pub const CONLL_LABELS: [(&str, &str); 3] = [("PER", "PERSON"), ("ORG", "ORG"), ("LOC", "GPE")];

/// Normalize a model tag (without its `B-`/`I-` prefix)
pub fn normalize_label(tag: &str) -> String {
    CONLL_LABELS
        .iter()
        .find(|(conll, _)| *conll == tag)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| tag.to_string())
}

/// Per-token prediction fed into span merging
#[derive(Debug, Clone)]
pub struct TokenTag<'a> {
    pub tag: &'a str,
    pub offsets: (usize, usize),
    pub word: Option<u32>,
}

/// Merge BIO-tagged tokens into `(label, text)` spans sliced from `text`.
///
/// Word pieces sharing a word id with the open span extend it regardless of
/// their own tag.
pub fn merge_bio(text: &str, tokens: &[TokenTag<'_>]) -> Vec<(String, String)> {
    struct Open {
        tag: String,
        start: usize,
        end: usize,
        word: Option<u32>,
    }

    fn close(text: &str, open: Option<Open>, spans: &mut Vec<(String, String)>) {
        if let Some(open) = open {
            if let Some(span) = text.get(open.start..open.end) {
                if !span.is_empty() {
                    spans.push((normalize_label(&open.tag), span.to_string()));
                }
            }
        }
    }

    let mut spans = Vec::new();
    let mut open: Option<Open> = None;

    for token in tokens {
        let (start, end) = token.offsets;

        if let Some(current) = open.as_mut() {
            if token.word.is_some() && token.word == current.word {
                current.end = end;
                continue;
            }
        }

        let (prefix, tag) = match token.tag.split_once('-') {
            Some((prefix, tag)) => (prefix, tag),
            None => ("O", ""),
        };

        match prefix {
            "I" if open.as_ref().is_some_and(|o| o.tag == tag) => {
                if let Some(current) = open.as_mut() {
                    current.end = end;
                    current.word = token.word;
                }
            }
            "B" | "I" => {
                close(text, open.take(), &mut spans);
                open = Some(Open {
                    tag: tag.to_string(),
                    start,
                    end,
                    word: token.word,
                });
            }
            _ => close(text, open.take(), &mut spans),
        }
    }

    close(text, open.take(), &mut spans);
    spans
}

#[cfg(feature = "onnx")]
mod inner {
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Arc;

    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use piiscan_core::{Error, Result};
    use serde::Deserialize;
    use tokenizers::Tokenizer;
    use tracing::{debug, info};

    use super::{TokenTag, merge_bio};
    use crate::recognizer::{Entity, EntityRecognizer};

    /// Maximum sequence length for the model, special tokens included.
    const MAX_SEQ_LEN: usize = 512;

    /// Word pieces per inference window (room for `[CLS]` and `[SEP]`).
    const WINDOW: usize = MAX_SEQ_LEN - 2;

    #[derive(Deserialize)]
    struct ModelConfig {
        id2label: HashMap<String, String>,
    }

    /// ONNX named-entity recognizer.
    ///
    /// The session sits behind a mutex: concurrent callers share one loaded
    /// model and run inference one at a time.
    pub struct OnnxRecognizer {
        session: Arc<Mutex<Session>>,
        tokenizer: Tokenizer,
        labels: Vec<String>,
        cls_id: i64,
        sep_id: i64,
    }

    impl OnnxRecognizer {
        /// Load the model files from `model_dir`.
        ///
        /// Expects:
        /// - `model_dir/model.onnx`: token-classification model
        /// - `model_dir/tokenizer.json`: the HuggingFace tokenizer
        /// - `model_dir/config.json`: carries the `id2label` table
        pub fn load(model: &str, model_dir: &Path) -> Result<Self> {
            let unavailable = |what: String| {
                Error::model_unavailable(
                    model,
                    format!(
                        "{what}. Download the {model} ONNX export (model.onnx, tokenizer.json, \
                         config.json) into {}, or set `[model] dir` in the config file.",
                        model_dir.display()
                    ),
                )
            };

            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");
            let config_path = model_dir.join("config.json");

            for path in [&model_path, &tokenizer_path, &config_path] {
                if !path.exists() {
                    return Err(unavailable(format!("Missing {}", path.display())));
                }
            }

            let config: ModelConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)
                .map_err(|e| unavailable(format!("Unreadable config.json: {}", e)))?;
            let labels = label_table(config.id2label)
                .map_err(|e| unavailable(format!("Bad id2label table: {}", e)))?;

            let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| unavailable(format!("Failed to load tokenizer: {}", e)))?;
            tokenizer
                .with_truncation(None)
                .map_err(|e| unavailable(format!("Failed to configure tokenizer: {}", e)))?;
            tokenizer.with_padding(None);

            let special = |token: &str| {
                tokenizer
                    .token_to_id(token)
                    .map(i64::from)
                    .ok_or_else(|| unavailable(format!("Tokenizer has no {} token", token)))
            };
            let cls_id = special("[CLS]")?;
            let sep_id = special("[SEP]")?;

            // With load-dynamic feature, ORT_DYLIB_PATH env var must point to libonnxruntime.so
            ort::init().commit();

            let session = Session::builder()
                .map_err(|e| unavailable(format!("Failed to create session builder: {}", e)))?
                .with_intra_threads(2)
                .map_err(|e| unavailable(format!("Failed to set threads: {}", e)))?
                .commit_from_file(&model_path)
                .map_err(|e| unavailable(format!("Failed to load ONNX model: {}", e)))?;

            info!(
                model,
                labels = labels.len(),
                path = %model_path.display(),
                "entity recognizer loaded"
            );

            Ok(Self {
                session: Arc::new(Mutex::new(session)),
                tokenizer,
                labels,
                cls_id,
                sep_id,
            })
        }

        /// Arg-max label index for each window token (special tokens excluded)
        fn classify_window(&self, ids: &[u32]) -> Result<Vec<usize>> {
            let seq_len = ids.len() + 2;

            let mut ids_data: Vec<i64> = Vec::with_capacity(seq_len);
            ids_data.push(self.cls_id);
            ids_data.extend(ids.iter().map(|&id| id as i64));
            ids_data.push(self.sep_id);
            let mask_data: Vec<i64> = vec![1i64; seq_len];
            let type_ids_data: Vec<i64> = vec![0i64; seq_len];

            let tensor = |data: Vec<i64>| {
                Tensor::from_array(([1usize, seq_len], data))
                    .map_err(|e| Error::Inference(format!("Failed to create tensor: {}", e)))
            };
            let ids_tensor = tensor(ids_data)?;
            let mask_tensor = tensor(mask_data)?;
            let type_ids_tensor = tensor(type_ids_data)?;

            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, type_ids_tensor])
                .map_err(|e| Error::Inference(format!("ONNX inference failed: {}", e)))?;

            // Logits [1, seq_len, num_labels]
            let (shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Inference(format!("Failed to extract logits: {}", e)))?;

            let dims: Vec<i64> = shape.iter().copied().collect();
            if dims.len() != 3 || dims[1] as usize != seq_len {
                return Err(Error::Inference(format!("Unexpected logits shape: {:?}", dims)));
            }
            let num_labels = dims[2] as usize;

            Ok((1..seq_len - 1)
                .map(|pos| {
                    let row = &data[pos * num_labels..(pos + 1) * num_labels];
                    row.iter()
                        .enumerate()
                        .fold((0, f32::NEG_INFINITY), |best, (i, &score)| {
                            if score > best.1 { (i, score) } else { best }
                        })
                        .0
                })
                .collect())
        }
    }

    impl EntityRecognizer for OnnxRecognizer {
        fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }

            let encoding = self
                .tokenizer
                .encode(text, false)
                .map_err(|e| Error::Inference(format!("Tokenization failed: {}", e)))?;

            let ids = encoding.get_ids();
            let offsets = encoding.get_offsets();
            let words = encoding.get_word_ids();

            let mut predicted = Vec::with_capacity(ids.len());
            for window in ids.chunks(WINDOW) {
                predicted.extend(self.classify_window(window)?);
            }

            let tokens: Vec<TokenTag<'_>> = predicted
                .iter()
                .enumerate()
                .map(|(i, &label)| TokenTag {
                    tag: self.labels.get(label).map(String::as_str).unwrap_or("O"),
                    offsets: offsets[i],
                    word: words[i],
                })
                .collect();

            let entities: Vec<Entity> = merge_bio(text, &tokens)
                .into_iter()
                .map(|(label, span)| Entity::new(label, span))
                .collect();

            debug!(tokens = ids.len(), entities = entities.len(), "entity recognition done");
            Ok(entities)
        }
    }

    /// Turn `{"0": "O", "1": "B-PER", ...}` into an index-ordered table
    fn label_table(id2label: HashMap<String, String>) -> std::result::Result<Vec<String>, String> {
        let mut labels = vec![String::new(); id2label.len()];
        for (id, label) in id2label {
            let index: usize = id.parse().map_err(|_| format!("non-numeric id '{}'", id))?;
            let slot = labels
                .get_mut(index)
                .ok_or_else(|| format!("id {} out of range", index))?;
            *slot = label;
        }
        Ok(labels)
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxRecognizer;

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(tag: &str, start: usize, end: usize, word: u32) -> TokenTag<'_> {
        TokenTag {
            tag,
            offsets: (start, end),
            word: Some(word),
        }
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("PER"), "PERSON");
        assert_eq!(normalize_label("LOC"), "GPE");
        assert_eq!(normalize_label("ORG"), "ORG");
        assert_eq!(normalize_label("MISC"), "MISC");
    }

    #[test]
    fn test_merge_multi_word_person() {
        let text = "Contact John Doe at home";
        let tokens = vec![
            tok("O", 0, 7, 0),
            tok("B-PER", 8, 12, 1),
            tok("I-PER", 13, 16, 2),
            tok("O", 17, 19, 3),
            tok("O", 20, 24, 4),
        ];

        assert_eq!(
            merge_bio(text, &tokens),
            vec![("PERSON".to_string(), "John Doe".to_string())]
        );
    }

    #[test]
    fn test_merge_word_pieces() {
        // "Bengaluru" split as "Ben" "##gal" "##uru", only the first tagged
        let text = "in Bengaluru";
        let tokens = vec![
            tok("O", 0, 2, 0),
            tok("B-LOC", 3, 6, 1),
            tok("O", 6, 9, 1),
            tok("I-MISC", 9, 12, 1),
        ];

        assert_eq!(
            merge_bio(text, &tokens),
            vec![("GPE".to_string(), "Bengaluru".to_string())]
        );
    }

    #[test]
    fn test_merge_adjacent_entities() {
        let text = "Infosys Pune";
        let tokens = vec![tok("B-ORG", 0, 7, 0), tok("B-LOC", 8, 12, 1)];

        assert_eq!(
            merge_bio(text, &tokens),
            vec![
                ("ORG".to_string(), "Infosys".to_string()),
                ("GPE".to_string(), "Pune".to_string()),
            ]
        );
    }

    #[test]
    fn test_merge_stray_inside_tag_opens_span() {
        let text = "met Asha";
        let tokens = vec![tok("O", 0, 3, 0), tok("I-PER", 4, 8, 1)];

        assert_eq!(
            merge_bio(text, &tokens),
            vec![("PERSON".to_string(), "Asha".to_string())]
        );
    }

    #[test]
    fn test_merge_keeps_original_spacing() {
        let text = "Mr John  Smith";
        let tokens = vec![
            tok("O", 0, 2, 0),
            tok("B-PER", 3, 7, 1),
            tok("I-PER", 9, 14, 2),
        ];

        assert_eq!(
            merge_bio(text, &tokens),
            vec![("PERSON".to_string(), "John  Smith".to_string())]
        );
    }
}
